//! Data-access error type.
//!
//! Errors are explicit so callers can always tell "no data" (`Ok` with an
//! empty result) from "operation failed" (`Err`). Nothing at this boundary
//! degrades to an empty result.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    /// Connection acquisition or pool construction failed. The only error
    /// class re-raised verbatim from the driver.
    #[error("database connection error: {0}")]
    Connection(#[source] sqlx::Error),

    /// A procedure call failed to execute.
    #[error("procedure {proc} failed: {source}")]
    Execute {
        proc: &'static str,
        #[source]
        source: sqlx::Error,
    },

    /// A procedure returned a row that does not match its documented
    /// output contract.
    #[error("procedure {proc} returned a malformed row: {detail}")]
    Contract { proc: &'static str, detail: String },

    /// A caller-supplied version token was not valid hexadecimal.
    #[error("invalid version token")]
    BadVersionToken,
}

pub type DbResult<T> = Result<T, DbError>;
