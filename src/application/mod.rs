//! Application layer orchestrating the domain rules.
//!
//! This module defines the `CashRegister`, the entry point for processing a payment.
//! It owns the ledger backend and serialises receipt numbering with a `tokio` mutex.

pub mod register;
