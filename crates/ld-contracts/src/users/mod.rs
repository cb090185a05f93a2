//! User mutation contracts.

mod create;
mod delete;
mod update;

pub use create::CreateUserContract;
pub use delete::DeleteUserContract;
pub use update::UpdateUserContract;

use ld_core::types::Id;

/// Fields supplied when creating or editing a user.
#[derive(Debug, Clone, Default)]
pub struct UserDraft {
    pub username: String,
    pub full_name: String,
    pub password: String,
    pub status_id: i64,
}

/// Identity of an existing user mutation: the target row and the version
/// stamp captured at the caller's last read.
#[derive(Debug, Clone)]
pub struct UserRef {
    pub user_id: Id,
    pub version_hex: String,
}
