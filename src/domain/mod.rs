//! Pure domain values and rules. Nothing in here performs I/O.

pub mod change;
pub mod credential;
pub mod denomination;
pub mod ledger;
pub mod money;
pub mod ports;
pub mod sales;
