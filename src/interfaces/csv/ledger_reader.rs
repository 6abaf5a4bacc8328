use crate::domain::ledger::LedgerRecord;
use crate::error::{Result, TillError};
use std::io::Read;

/// Reads records back from a ledger file.
///
/// Fields are matched by position. A first line that does not parse as a record is
/// the header and is dropped; files written without one are read in full.
pub struct LedgerReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> LedgerReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    pub fn records(self) -> impl Iterator<Item = Result<LedgerRecord>> {
        self.reader
            .into_records()
            .enumerate()
            .filter_map(|(index, result)| {
                let parsed = result
                    .and_then(|row| row.deserialize::<LedgerRecord>(None))
                    .map_err(TillError::from);
                match parsed {
                    Err(_) if index == 0 => None,
                    other => Some(other),
                }
            })
    }
}
