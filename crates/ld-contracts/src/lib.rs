//! # ld-contracts
//!
//! Validation contracts for LedgerDesk mutations. Contracts run before any
//! database call and reject requests with missing required fields or
//! non-positive amounts; everything else is the stored procedures' concern.

pub mod base;
pub mod transactions;
pub mod users;

pub use base::{Contract, ValidationResult};
