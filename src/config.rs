use crate::domain::ledger::INITIAL_RECEIPT_NO;
use std::path::PathBuf;

pub const DEFAULT_LEDGER_PATH: &str = "collections.txt";
pub const DEFAULT_SALES_DIR: &str = "sales";

/// Settings for the cash register.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterConfig {
    /// Flat file the ledger is appended to.
    pub ledger_path: PathBuf,
    /// Receipt number used when the ledger holds no records yet.
    pub start_receipt: u32,
}

impl Default for RegisterConfig {
    fn default() -> Self {
        Self {
            ledger_path: PathBuf::from(DEFAULT_LEDGER_PATH),
            start_receipt: INITIAL_RECEIPT_NO,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesConfig {
    /// Directory holding the `SalesYYYYMM.csv` files.
    pub dir: PathBuf,
}

impl Default for SalesConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_SALES_DIR),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let register = RegisterConfig::default();
        assert_eq!(register.ledger_path, PathBuf::from("collections.txt"));
        assert_eq!(register.start_receipt, 10000);
        assert_eq!(SalesConfig::default().dir, PathBuf::from("sales"));
    }
}
