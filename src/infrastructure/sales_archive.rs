use crate::domain::sales::{MONTHS, SalesAggregator, SalesSummary};
use crate::error::{Result, TillError};
use crate::interfaces::csv::sales_reader::SalesReader;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const MIN_YEAR: i32 = 2000;
pub const MAX_YEAR: i32 = 2100;

/// Result of storing a monthly sales file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOutcome {
    pub path: PathBuf,
    /// Whether a file for the same month was overwritten.
    pub replaced: bool,
}

/// A directory of monthly sales files named `SalesYYYYMM.csv`.
#[derive(Debug, Clone)]
pub struct SalesArchive {
    dir: PathBuf,
}

impl SalesArchive {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn file_name(year: i32, month: u32) -> String {
        format!("Sales{}{:02}.csv", year, month)
    }

    pub fn path_for(&self, year: i32, month: u32) -> PathBuf {
        self.dir.join(Self::file_name(year, month))
    }

    /// Copies `source` into the archive under the name for `year` and `month`.
    pub async fn import(&self, source: &Path, year: i32, month: u32) -> Result<ImportOutcome> {
        validate_period(year, month)?;

        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.path_for(year, month);
        let replaced = tokio::fs::try_exists(&path).await?;
        tokio::fs::copy(source, &path).await?;

        info!(path = %path.display(), replaced, "Stored sales file");
        Ok(ImportOutcome { path, replaced })
    }

    /// Totals every monthly file present for `year`.
    ///
    /// Missing months are simply absent. A file that cannot be read is counted as
    /// skipped and contributes nothing.
    pub async fn summary(&self, year: i32) -> Result<SalesSummary> {
        validate_year(year)?;
        let mut aggregator = SalesAggregator::new(year);

        for month in 1..=MONTHS as u32 {
            let path = self.path_for(year, month);
            let contents = match tokio::fs::read(&path).await {
                Ok(contents) => contents,
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping unreadable sales file");
                    aggregator.skip_file();
                    continue;
                }
            };

            match SalesReader::new(contents.as_slice())
                .rows()
                .collect::<Result<Vec<_>>>()
            {
                Ok(rows) => {
                    debug!(path = %path.display(), rows = rows.len(), "Aggregating sales file");
                    aggregator.add_file(month, rows);
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping malformed sales file");
                    aggregator.skip_file();
                }
            }
        }

        Ok(aggregator.finish())
    }
}

pub fn validate_year(year: i32) -> Result<()> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(TillError::ValidationError(format!(
            "Year must be between {} and {}: {}",
            MIN_YEAR, MAX_YEAR, year
        )));
    }
    Ok(())
}

pub fn validate_period(year: i32, month: u32) -> Result<()> {
    validate_year(year)?;
    if !(1..=MONTHS as u32).contains(&month) {
        return Err(TillError::ValidationError(format!(
            "Month must be between 1 and 12: {}",
            month
        )));
    }
    Ok(())
}
