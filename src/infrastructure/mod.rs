//! Storage adapters for the ledger port and the sales file archive.

pub mod file_ledger;
pub mod in_memory;
pub mod sales_archive;
