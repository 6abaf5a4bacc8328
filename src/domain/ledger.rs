use super::money::Money;
use serde::{Deserialize, Serialize};

/// Receipt number issued to the first transaction of a fresh ledger.
pub const INITIAL_RECEIPT_NO: u32 = 10000;

/// One completed transaction as persisted in the ledger.
///
/// Records are append-only; they are never updated or removed once written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRecord {
    pub receipt_no: u32,
    pub payable: Money,
    pub tendered: Money,
    pub change: Money,
}
