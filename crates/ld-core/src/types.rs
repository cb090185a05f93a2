//! Common types shared across LedgerDesk crates.

use serde::{Deserialize, Serialize};

/// Primary key type used by every stored procedure.
pub type Id = i64;

/// Identity established at login and carried by the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub user_id: Id,
    pub full_name: String,
    pub service_id: Id,
    pub service_name: String,
}
