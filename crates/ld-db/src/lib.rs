//! # ld-db
//!
//! Stored-procedure data access for LedgerDesk.
//!
//! Every piece of domain logic lives in PostgreSQL procedures; this crate
//! invokes them by fixed name with a fixed positional parameter order and
//! reshapes the returned rows into typed structs. Each repository method
//! documents its procedure's named-column output contract.
//!
//! ## Example
//!
//! ```ignore
//! use ld_db::{Database, DatabaseConfig, UserRepository};
//!
//! let db = Database::connect(&DatabaseConfig::from_app(&config)).await?;
//! let users = UserRepository::new(db.executor());
//! let rows = users.list_by_service(service_id).await?;
//! ```

pub mod error;
pub mod lookups;
pub mod menus;
pub mod pool;
pub mod procedure;
pub mod repository;
pub mod rights;
pub mod transactions;
pub mod users;

pub use error::{DbError, DbResult};
pub use lookups::{LookupItem, LookupRepository};
pub use menus::{MenuRepository, MenuRow};
pub use pool::{Database, DatabaseConfig};
pub use procedure::{first_non_empty, ProcParam, ProcValue, ProcedureExecutor, Record, StatusEnvelope};
pub use repository::{decode_version, MutationOutcome};
pub use rights::{RightRow, RightSpec, RightsRepository};
pub use transactions::{
    NewTransaction, TransAddOutcome, TransactionRepository, TransactionRow, TransactionUpdate,
};
pub use users::{AuthRow, InsertOutcome, NewUser, UserRepository, UserRow, UserUpdate};
