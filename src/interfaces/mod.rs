//! Adapters translating between external formats and domain types.

pub mod csv;
pub mod report;
