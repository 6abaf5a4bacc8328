use crate::domain::ledger::LedgerRecord;
use crate::error::{Result, TillError};
use std::io::Write;

/// Column titles written once at the top of a new ledger.
pub const LEDGER_HEADER: [&str; 4] = [
    "Receipt No",
    " Amount Payable",
    " Amount Tendered",
    " Change",
];

/// Writes ledger lines in the `receipt,payable,tendered,change` layout.
///
/// Amounts are always rendered with two decimal places.
pub struct LedgerWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> LedgerWriter<W> {
    pub fn new(sink: W) -> Self {
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(sink);
        Self { writer }
    }

    pub fn write_header(&mut self) -> Result<()> {
        self.writer.write_record(LEDGER_HEADER)?;
        Ok(())
    }

    pub fn write_record(&mut self, record: &LedgerRecord) -> Result<()> {
        self.writer.serialize(record)?;
        Ok(())
    }

    /// Flushes buffered lines and hands back the underlying sink.
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| TillError::IoError(e.into_error()))
    }
}
