//! User management services.

mod create;
mod delete;
mod list;
mod update;

pub use create::CreateUserService;
pub use delete::DeleteUserService;
pub use list::ListUsersService;
pub use update::UpdateUserService;

use ld_contracts::users::UserDraft;
use ld_core::types::Id;

/// Update payload carried from the API layer: the mutation identity plus
/// the replacement fields.
#[derive(Debug, Clone)]
pub struct UserUpdateInput {
    pub user_id: Id,
    pub version_hex: String,
    pub draft: UserDraft,
}
