//! Create service for users.

use ld_contracts::base::Contract;
use ld_contracts::users::{CreateUserContract, UserDraft};
use ld_core::types::Id;
use ld_db::users::{InsertOutcome, NewUser, UserRepository};

use crate::result::ServiceResult;

pub struct CreateUserService<'a> {
    users: &'a UserRepository,
    contract: CreateUserContract,
}

impl<'a> CreateUserService<'a> {
    pub fn new(users: &'a UserRepository, password_min_length: usize) -> Self {
        Self {
            users,
            contract: CreateUserContract::new(password_min_length),
        }
    }

    /// Validate the draft and create the user. Returns the new user id.
    pub async fn call(
        &self,
        service_id: Id,
        draft: UserDraft,
        created_by: Id,
    ) -> ServiceResult<Id> {
        if let Err(errors) = self.contract.validate(&draft) {
            return ServiceResult::failure_with_message(errors, "All fields are required!");
        }

        let new_user = NewUser {
            service_id,
            username: draft.username,
            full_name: draft.full_name,
            password: draft.password,
            status_id: draft.status_id,
            created_by,
        };

        match self.users.insert(&new_user).await {
            Ok(InsertOutcome::Created { user_id }) => {
                ServiceResult::success_with_message(user_id, "User created!")
            }
            Ok(InsertOutcome::Rejected { message, .. }) => {
                ServiceResult::failure_with_base_error(message)
            }
            Err(e) => {
                tracing::error!(error = %e, "user insert failed");
                ServiceResult::failure_with_base_error(format!("System error: {e}"))
            }
        }
    }
}
