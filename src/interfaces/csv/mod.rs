pub mod ledger_reader;
pub mod ledger_writer;
pub mod sales_reader;
pub mod summary_writer;
