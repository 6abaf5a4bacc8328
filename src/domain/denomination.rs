use super::money::Money;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DenominationKind {
    Note,
    Coin,
}

/// A physical note or coin the till can dispense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Denomination {
    pub value: Money,
    pub label: &'static str,
    pub kind: DenominationKind,
}

impl Denomination {
    const fn note(cents: i64, label: &'static str) -> Self {
        Self {
            value: Money::from_cents(cents),
            label,
            kind: DenominationKind::Note,
        }
    }

    const fn coin(cents: i64, label: &'static str) -> Self {
        Self {
            value: Money::from_cents(cents),
            label,
            kind: DenominationKind::Coin,
        }
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label)
    }
}

/// Notes and coins in strictly descending order of value.
pub const DENOMINATIONS: [Denomination; 9] = [
    Denomination::note(5000, "$50 note"),
    Denomination::note(1000, "$10 note"),
    Denomination::note(500, "$5 note"),
    Denomination::note(200, "$2 note"),
    Denomination::coin(100, "$1 coin"),
    Denomination::coin(50, "$0.50 coin"),
    Denomination::coin(20, "$0.20 coin"),
    Denomination::coin(10, "$0.10 coin"),
    Denomination::coin(5, "$0.05 coin"),
];

/// Smallest dispensable unit. Change is floored to a multiple of this.
pub const SMALLEST_UNIT: Money = Money::from_cents(5);
