use crate::error::TillError;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// A monetary value counted in cents.
///
/// All register arithmetic happens on this integer representation. `Decimal` is
/// only used at the boundary, when parsing user input and when displaying.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Money(i64);

impl Money {
    pub const ZERO: Self = Self(0);

    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Converts a dollar amount to cents, rounding half to even at the cent boundary.
    ///
    /// Negative amounts are rejected.
    pub fn from_decimal(value: Decimal) -> Result<Self, TillError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(TillError::ValidationError(format!(
                "Amount must not be negative: {}",
                value
            )));
        }

        value
            .checked_mul(Decimal::ONE_HUNDRED)
            .map(|scaled| scaled.round())
            .and_then(|cents| cents.to_i64())
            .map(Self)
            .ok_or_else(|| TillError::ValidationError(format!("Amount out of range: {}", value)))
    }

    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.0, 2)
    }
}

impl TryFrom<Decimal> for Money {
    type Error = TillError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::from_decimal(value)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.to_decimal()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_decimal())
    }
}

impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Mul<i64> for Money {
    type Output = Self;
    fn mul(self, rhs: i64) -> Self::Output {
        Self(self.0 * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_from_decimal_to_cents() {
        assert_eq!(Money::from_decimal(dec!(12.50)).unwrap(), Money::from_cents(1250));
        assert_eq!(Money::from_decimal(dec!(0)).unwrap(), Money::ZERO);
        assert_eq!(Money::from_decimal(dec!(4.99)).unwrap(), Money::from_cents(499));
    }

    #[test]
    fn test_from_decimal_rounds_half_to_even() {
        // 0.125 -> 12.5 cents -> 12
        assert_eq!(Money::from_decimal(dec!(0.125)).unwrap(), Money::from_cents(12));
        // 0.135 -> 13.5 cents -> 14
        assert_eq!(Money::from_decimal(dec!(0.135)).unwrap(), Money::from_cents(14));
        assert_eq!(Money::from_decimal(dec!(1.006)).unwrap(), Money::from_cents(101));
    }

    #[test]
    fn test_negative_amount_rejected() {
        let result = Money::from_decimal(dec!(-0.01));
        assert!(matches!(result, Err(TillError::ValidationError(_))));
    }

    #[test]
    fn test_display_two_decimal_places() {
        assert_eq!(Money::from_cents(750).to_string(), "7.50");
        assert_eq!(Money::from_cents(0).to_string(), "0.00");
        assert_eq!(Money::from_cents(123456).to_string(), "1234.56");
    }

    #[test]
    fn test_money_json_serialization() {
        let json = serde_json::to_string(&Money::from_cents(495)).unwrap();
        assert_eq!(json, "\"4.95\"");

        let money: Money = serde_json::from_str("\"12.50\"").unwrap();
        assert_eq!(money, Money::from_cents(1250));
    }

    #[test]
    fn test_arithmetic() {
        let change = Money::from_cents(2000) - Money::from_cents(1250);
        assert_eq!(change, Money::from_cents(750));
        assert_eq!(change + Money::from_cents(50), Money::from_cents(800));
        assert_eq!(Money::from_cents(20) * 3, Money::from_cents(60));
    }
}
