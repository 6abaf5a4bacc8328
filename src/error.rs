use crate::domain::money::Money;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TillError {
    #[error("Amount tendered ({tendered}) is less than amount payable ({payable})")]
    InsufficientPayment { payable: Money, tendered: Money },
    #[error("Failed to record transaction: {0}")]
    WriteFailure(#[source] std::io::Error),
    #[error("Remainder of {0} could not be dispensed")]
    ResidualRemainder(Money),
    #[error("Receipt numbers exhausted at {0}")]
    ReceiptsExhausted(u32),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Please enter both User ID and Password")]
    MissingCredentials,
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TillError>;
