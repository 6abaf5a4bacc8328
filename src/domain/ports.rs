use super::ledger::LedgerRecord;
use crate::error::Result;
use async_trait::async_trait;

/// Append-only storage for completed transactions.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Appends one record. Either the whole line is stored or an error is returned.
    async fn append(&self, record: LedgerRecord) -> Result<()>;
    /// Receipt number of the most recently stored record, if any.
    async fn last_receipt_no(&self) -> Result<Option<u32>>;
    async fn records(&self) -> Result<Vec<LedgerRecord>>;
}

pub type LedgerStoreBox = Box<dyn LedgerStore>;
