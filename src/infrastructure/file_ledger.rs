use crate::domain::ledger::LedgerRecord;
use crate::domain::ports::LedgerStore;
use crate::error::{Result, TillError};
use crate::interfaces::csv::ledger_reader::LedgerReader;
use crate::interfaces::csv::ledger_writer::LedgerWriter;
use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

/// A ledger kept as a flat, append-only CSV file.
///
/// The header line is written together with the first record when the file is
/// missing or empty. Each record is appended with a single write.
#[derive(Debug, Clone)]
pub struct FileLedger {
    path: PathBuf,
}

impl FileLedger {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn is_fresh(&self) -> io::Result<bool> {
        match tokio::fs::metadata(&self.path).await {
            Ok(metadata) => Ok(metadata.len() == 0),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(true),
            Err(e) => Err(e),
        }
    }

    async fn read_contents(&self) -> Result<Vec<u8>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl LedgerStore for FileLedger {
    async fn append(&self, record: LedgerRecord) -> Result<()> {
        let fresh = self.is_fresh().await.map_err(TillError::WriteFailure)?;

        let mut writer = LedgerWriter::new(Vec::new());
        if fresh {
            writer.write_header()?;
        }
        writer.write_record(&record)?;
        let line = writer.into_inner()?;

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(TillError::WriteFailure)?;
        file.write_all(&line)
            .await
            .map_err(TillError::WriteFailure)?;
        file.flush().await.map_err(TillError::WriteFailure)?;

        debug!(path = %self.path.display(), receipt_no = record.receipt_no, header = fresh, "Appended ledger line");
        Ok(())
    }

    async fn last_receipt_no(&self) -> Result<Option<u32>> {
        Ok(self
            .records()
            .await?
            .iter()
            .map(|record| record.receipt_no)
            .max())
    }

    async fn records(&self) -> Result<Vec<LedgerRecord>> {
        let contents = self.read_contents().await?;
        let mut records = Vec::new();
        for result in LedgerReader::new(contents.as_slice()).records() {
            match result {
                Ok(record) => records.push(record),
                Err(e) => warn!(error = %e, "Skipping unreadable ledger line"),
            }
        }
        Ok(records)
    }
}
