//! Numeric status codes shared with the stored procedures.
//!
//! Mutation procedures report their outcome as a single integer code; the
//! mapping below is the only place those codes are interpreted. Concurrency
//! violations and missing records carry distinct codes and stay
//! distinguishable all the way to the API layer.

use serde::Serialize;

/// Severity attached to a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusLevel {
    Info,
    Business,
    System,
    Critical,
}

/// Outcome codes returned by the general mutation procedures
/// (`sp_users_*`, `sp_transactions_*`, `sp_save_user_right`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbStatus {
    Success,
    ConcurrencyViolation,
    RecordNotFound,
    DuplicateEntry,
    AccessDenied,
    ForeignKeyConflict,
    PrimaryKeyViolation,
    DataTypeError,
    Unknown(i32),
}

impl DbStatus {
    pub const SUCCESS: i32 = 0;
    pub const CONCURRENCY_VIOLATION: i32 = 50_001;
    pub const RECORD_NOT_FOUND: i32 = 50_002;
    pub const DUPLICATE_ENTRY: i32 = 50_003;
    pub const ACCESS_DENIED: i32 = 50_004;
    pub const FOREIGN_KEY_CONFLICT: i32 = 547;
    pub const PRIMARY_KEY_VIOLATION: i32 = 2_627;
    pub const DATA_TYPE_ERROR: i32 = 8_114;

    pub fn from_code(code: i32) -> Self {
        match code {
            Self::SUCCESS => DbStatus::Success,
            Self::CONCURRENCY_VIOLATION => DbStatus::ConcurrencyViolation,
            Self::RECORD_NOT_FOUND => DbStatus::RecordNotFound,
            Self::DUPLICATE_ENTRY => DbStatus::DuplicateEntry,
            Self::ACCESS_DENIED => DbStatus::AccessDenied,
            Self::FOREIGN_KEY_CONFLICT => DbStatus::ForeignKeyConflict,
            Self::PRIMARY_KEY_VIOLATION => DbStatus::PrimaryKeyViolation,
            Self::DATA_TYPE_ERROR => DbStatus::DataTypeError,
            other => DbStatus::Unknown(other),
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            DbStatus::Success => Self::SUCCESS,
            DbStatus::ConcurrencyViolation => Self::CONCURRENCY_VIOLATION,
            DbStatus::RecordNotFound => Self::RECORD_NOT_FOUND,
            DbStatus::DuplicateEntry => Self::DUPLICATE_ENTRY,
            DbStatus::AccessDenied => Self::ACCESS_DENIED,
            DbStatus::ForeignKeyConflict => Self::FOREIGN_KEY_CONFLICT,
            DbStatus::PrimaryKeyViolation => Self::PRIMARY_KEY_VIOLATION,
            DbStatus::DataTypeError => Self::DATA_TYPE_ERROR,
            DbStatus::Unknown(code) => *code,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, DbStatus::Success)
    }

    pub fn level(&self) -> StatusLevel {
        match self {
            DbStatus::Success => StatusLevel::Info,
            DbStatus::ConcurrencyViolation
            | DbStatus::RecordNotFound
            | DbStatus::DuplicateEntry
            | DbStatus::AccessDenied => StatusLevel::Business,
            DbStatus::ForeignKeyConflict
            | DbStatus::PrimaryKeyViolation
            | DbStatus::DataTypeError => StatusLevel::System,
            DbStatus::Unknown(_) => StatusLevel::Critical,
        }
    }

    pub fn message(&self) -> String {
        match self {
            DbStatus::Success => "Operation completed.".into(),
            DbStatus::ConcurrencyViolation => {
                "Concurrency violation: this record was updated or deleted by another user. Refresh and try again.".into()
            }
            DbStatus::RecordNotFound => "Record not found: it no longer exists in the system.".into(),
            DbStatus::DuplicateEntry => "Duplicate entry: this data already exists in the system.".into(),
            DbStatus::AccessDenied => "Access denied: you are not allowed to perform this operation.".into(),
            DbStatus::ForeignKeyConflict => {
                "Database conflict: this record is referenced by another table and cannot be removed.".into()
            }
            DbStatus::PrimaryKeyViolation => "Primary key violation: duplicate identifier.".into(),
            DbStatus::DataTypeError => "Data type error: a value sent to the database has the wrong format.".into(),
            DbStatus::Unknown(code) => format!("SQL execution error ({code})"),
        }
    }
}

/// Return codes specific to the cash-entry procedure `sp_trans_add`.
///
/// These live in their own namespace; 101 is the only success code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransAddStatus {
    Saved,
    NotAdded,
    InsufficientFunds,
    UserLogFailure,
    Unknown(i32),
}

impl TransAddStatus {
    pub const SAVED: i32 = 101;
    pub const NOT_ADDED: i32 = 2_001;
    pub const INSUFFICIENT_FUNDS: i32 = 2_002;
    pub const USER_LOG_FAILURE: i32 = 2_004;

    pub fn from_code(code: i32) -> Self {
        match code {
            Self::SAVED => TransAddStatus::Saved,
            Self::NOT_ADDED => TransAddStatus::NotAdded,
            Self::INSUFFICIENT_FUNDS => TransAddStatus::InsufficientFunds,
            Self::USER_LOG_FAILURE => TransAddStatus::UserLogFailure,
            other => TransAddStatus::Unknown(other),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, TransAddStatus::Saved)
    }

    pub fn message(&self) -> String {
        match self {
            TransAddStatus::Saved => "Transaction saved successfully!".into(),
            TransAddStatus::NotAdded => "The record has not been added (database error).".into(),
            TransAddStatus::InsufficientFunds => {
                "Insufficient funds in the selected cost center.".into()
            }
            TransAddStatus::UserLogFailure => "User log failure.".into(),
            TransAddStatus::Unknown(code) => {
                format!("Failed to save transaction (code: {code})")
            }
        }
    }
}
