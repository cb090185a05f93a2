//! Update service for users.

use ld_contracts::base::Contract;
use ld_contracts::users::{UpdateUserContract, UserRef};
use ld_core::types::Id;
use ld_db::users::{UserRepository, UserUpdate};
use ld_db::{DbError, MutationOutcome};

use crate::result::ServiceResult;
use super::UserUpdateInput;

pub struct UpdateUserService<'a> {
    users: &'a UserRepository,
    contract: UpdateUserContract,
}

impl<'a> UpdateUserService<'a> {
    pub fn new(users: &'a UserRepository) -> Self {
        Self {
            users,
            contract: UpdateUserContract::new(),
        }
    }

    /// Update a user. The caller must present the version stamp from its
    /// last read; the stored procedure decides whether it is still current.
    /// A stale stamp and a missing record produce different messages.
    pub async fn call(
        &self,
        service_id: Id,
        input: UserUpdateInput,
        changed_by: Id,
    ) -> ServiceResult<()> {
        let target = UserRef {
            user_id: input.user_id,
            version_hex: input.version_hex.clone(),
        };
        if let Err(errors) = self.contract.validate(&target) {
            return ServiceResult::failure(errors);
        }

        let update = UserUpdate {
            service_id,
            user_id: input.user_id,
            username: input.draft.username,
            full_name: input.draft.full_name,
            password: input.draft.password,
            status_id: input.draft.status_id,
            version_hex: input.version_hex,
            changed_by,
        };

        match self.users.update(&update).await {
            Ok(MutationOutcome::Applied) => {
                ServiceResult::success_with_message((), "User updated!")
            }
            Ok(outcome) => ServiceResult::failure_with_base_error(outcome.message()),
            Err(DbError::BadVersionToken) => {
                ServiceResult::failure_with_base_error("Invalid version token.")
            }
            Err(e) => {
                tracing::error!(error = %e, "user update failed");
                ServiceResult::failure_with_base_error(format!("System error: {e}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ld_contracts::users::UserDraft;
    use sqlx::postgres::PgPoolOptions;

    fn users_without_database() -> UserRepository {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unreachable")
            .unwrap();
        UserRepository::new(ld_db::ProcedureExecutor::new(pool))
    }

    #[tokio::test]
    async fn missing_version_stamp_rejected_before_any_db_call() {
        let users = users_without_database();
        let service = UpdateUserService::new(&users);

        let input = UserUpdateInput {
            user_id: 5,
            version_hex: String::new(),
            draft: UserDraft::default(),
        };
        let result = service.call(1, input, 1).await;
        assert!(result.is_failure());
        assert!(result.errors().has_error("version_hex"));
    }
}
