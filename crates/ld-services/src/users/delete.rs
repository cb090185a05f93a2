//! Delete service for users.

use ld_contracts::base::Contract;
use ld_contracts::users::{DeleteUserContract, UserRef};
use ld_core::types::Id;
use ld_db::users::UserRepository;
use ld_db::{DbError, MutationOutcome};

use crate::result::ServiceResult;

pub struct DeleteUserService<'a> {
    users: &'a UserRepository,
    contract: DeleteUserContract,
}

impl<'a> DeleteUserService<'a> {
    pub fn new(users: &'a UserRepository) -> Self {
        Self {
            users,
            contract: DeleteUserContract::new(),
        }
    }

    /// Delete a user under the same version-stamp contract as update.
    /// Whether the procedure soft-deletes or removes the row is its own
    /// concern; only the outcome code is interpreted here.
    pub async fn call(
        &self,
        service_id: Id,
        target: UserRef,
        requested_by: Id,
    ) -> ServiceResult<()> {
        if let Err(errors) = self.contract.validate(&target) {
            return ServiceResult::failure(errors);
        }

        match self
            .users
            .delete(service_id, target.user_id, &target.version_hex, requested_by)
            .await
        {
            Ok(MutationOutcome::Applied) => {
                ServiceResult::success_with_message((), "User deleted!")
            }
            Ok(outcome) => ServiceResult::failure_with_base_error(outcome.message()),
            Err(DbError::BadVersionToken) => {
                ServiceResult::failure_with_base_error("Invalid version token.")
            }
            Err(e) => {
                tracing::error!(error = %e, "user delete failed");
                ServiceResult::failure_with_base_error(format!("System error: {e}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;

    fn users_without_database() -> UserRepository {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unreachable")
            .unwrap();
        UserRepository::new(ld_db::ProcedureExecutor::new(pool))
    }

    #[tokio::test]
    async fn delete_requires_identity() {
        let users = users_without_database();
        let service = DeleteUserService::new(&users);

        let result = service
            .call(
                1,
                UserRef {
                    user_id: 0,
                    version_hex: String::new(),
                },
                1,
            )
            .await;
        assert!(result.is_failure());
        assert!(result.errors().has_error("user_id"));
    }
}
