use crate::domain::ledger::LedgerRecord;
use crate::domain::ports::LedgerStore;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory ledger.
///
/// Clones share the same records, so a test can keep a handle and inspect what the
/// register appended. Also backs `--dry-run`.
#[derive(Debug, Default, Clone)]
pub struct InMemoryLedger {
    records: Arc<RwLock<Vec<LedgerRecord>>>,
}

impl InMemoryLedger {
    /// Creates a new, empty in-memory ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a ledger pre-populated with `records`, oldest first.
    pub fn with_records(records: Vec<LedgerRecord>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
        }
    }
}

#[async_trait]
impl LedgerStore for InMemoryLedger {
    async fn append(&self, record: LedgerRecord) -> Result<()> {
        self.records.write().await.push(record);
        Ok(())
    }

    async fn last_receipt_no(&self) -> Result<Option<u32>> {
        let records = self.records.read().await;
        Ok(records.iter().map(|record| record.receipt_no).max())
    }

    async fn records(&self) -> Result<Vec<LedgerRecord>> {
        Ok(self.records.read().await.clone())
    }
}
