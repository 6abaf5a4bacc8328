use crate::error::{Result, TillError};
use std::io::Read;

/// Reads the raw rows of a monthly sales file.
///
/// Sales files come from different sources, so no header is assumed and rows may
/// have any number of fields. Interpretation is left to the aggregator.
pub struct SalesReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> SalesReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    pub fn rows(self) -> impl Iterator<Item = Result<Vec<String>>> {
        self.reader.into_records().map(|result| {
            result
                .map(|record| record.iter().map(str::to_string).collect())
                .map_err(TillError::from)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_keeps_every_row() {
        let data = "Date,Agent,Amount\n2024-01-02,Alice,\"1,200\"\nshort\n";
        let rows: Vec<Vec<String>> = SalesReader::new(data.as_bytes())
            .rows()
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec!["Date", "Agent", "Amount"]);
        assert_eq!(rows[1][2], "1,200");
        assert_eq!(rows[2], vec!["short"]);
    }

    #[test]
    fn test_reader_invalid_utf8() {
        let data: &[u8] = b"a,b,c\n\xff,\xfe,1\n";
        let results: Vec<Result<Vec<String>>> = SalesReader::new(data).rows().collect();

        assert!(results[0].is_ok());
        assert!(results[1].is_err());
    }
}
