//! # ld-core
//!
//! Core building blocks for LedgerDesk:
//! - Numeric status-code taxonomy shared with the stored procedures
//! - Validation error collection
//! - Application configuration

pub mod config;
pub mod error;
pub mod status;
pub mod types;

pub use config::{AppConfig, ConfigError};
pub use error::ValidationErrors;
pub use status::{DbStatus, StatusLevel, TransAddStatus};
pub use types::{Id, SessionUser};
