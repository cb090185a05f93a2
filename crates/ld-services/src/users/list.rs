//! List service for users.

use ld_core::types::Id;
use ld_db::users::{UserRepository, UserRow};

use crate::result::ServiceResult;

pub struct ListUsersService<'a> {
    users: &'a UserRepository,
}

impl<'a> ListUsersService<'a> {
    pub fn new(users: &'a UserRepository) -> Self {
        Self { users }
    }

    /// All users of the session's service.
    pub async fn call(&self, service_id: Id) -> ServiceResult<Vec<UserRow>> {
        match self.users.list_by_service(service_id).await {
            Ok(rows) => ServiceResult::success(rows),
            Err(e) => {
                tracing::error!(error = %e, service_id, "user list failed");
                ServiceResult::failure_with_base_error(format!("System error: {e}"))
            }
        }
    }
}
