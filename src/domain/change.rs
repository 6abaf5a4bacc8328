use super::denomination::{DENOMINATIONS, Denomination, DenominationKind, SMALLEST_UNIT};
use super::money::Money;
use crate::error::{Result, TillError};
use serde::Serialize;

/// Rejects a payment that does not cover the amount payable.
pub fn validate(payable: Money, tendered: Money) -> Result<()> {
    if tendered < payable {
        return Err(TillError::InsufficientPayment { payable, tendered });
    }
    Ok(())
}

/// Computes the change owed, floored to the smallest dispensable unit.
///
/// The till never hands back more than it owes: a 3 cent difference becomes no change.
/// Callers are expected to have run [`validate`] first.
pub fn compute_change(payable: Money, tendered: Money) -> Money {
    let change = tendered - payable;
    change - Money::from_cents(change.cents() % SMALLEST_UNIT.cents())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BreakdownLine {
    pub count: i64,
    pub denomination: Denomination,
}

/// The notes and coins making up an amount of change.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Breakdown {
    pub lines: Vec<BreakdownLine>,
    /// Whatever the greedy pass could not dispense. Zero for floored change.
    pub residual: Money,
}

impl Breakdown {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of every dispensed note and coin.
    pub fn total(&self) -> Money {
        self.lines
            .iter()
            .fold(Money::ZERO, |acc, line| acc + line.denomination.value * line.count)
    }

    pub fn notes(&self) -> impl Iterator<Item = &BreakdownLine> {
        self.of_kind(DenominationKind::Note)
    }

    pub fn coins(&self) -> impl Iterator<Item = &BreakdownLine> {
        self.of_kind(DenominationKind::Coin)
    }

    fn of_kind(&self, kind: DenominationKind) -> impl Iterator<Item = &BreakdownLine> {
        self.lines
            .iter()
            .filter(move |line| line.denomination.kind == kind)
    }

    /// Surfaces a leftover remainder as [`TillError::ResidualRemainder`].
    pub fn check(&self) -> Result<()> {
        if self.residual.is_zero() {
            Ok(())
        } else {
            Err(TillError::ResidualRemainder(self.residual))
        }
    }
}

/// Splits change into the standard note and coin set.
pub fn decompose(change: Money) -> Breakdown {
    decompose_with(change, &DENOMINATIONS)
}

/// Greedy decomposition over `denominations`, which must be sorted in descending value.
pub fn decompose_with(change: Money, denominations: &[Denomination]) -> Breakdown {
    let mut remaining = change.cents();
    let mut lines = Vec::new();

    for denomination in denominations {
        let value = denomination.value.cents();
        let count = remaining / value;
        remaining -= count * value;
        if count > 0 {
            lines.push(BreakdownLine {
                count,
                denomination: *denomination,
            });
        }
    }

    Breakdown {
        lines,
        residual: Money::from_cents(remaining),
    }
}
