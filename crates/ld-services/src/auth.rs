//! Login service.

use ld_core::types::{Id, SessionUser};
use ld_db::users::UserRepository;

use crate::result::ServiceResult;

/// Credentials presented at login. `service_id` selects the tenant the
/// session operates on.
#[derive(Debug, Clone, Default)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
    pub service_id: Option<Id>,
}

pub struct LoginService<'a> {
    users: &'a UserRepository,
}

impl<'a> LoginService<'a> {
    pub fn new(users: &'a UserRepository) -> Self {
        Self { users }
    }

    /// Authenticate against `sp_authenticate_user`. All three inputs are
    /// required; zero rows from the procedure means the credentials or the
    /// service mapping are invalid.
    pub async fn call(&self, input: &LoginInput) -> ServiceResult<SessionUser> {
        let Some(service_id) = input.service_id else {
            return Self::required_fields();
        };
        if input.username.trim().is_empty() || input.password.trim().is_empty() {
            return Self::required_fields();
        }

        let row = match self
            .users
            .authenticate(input.username.trim(), input.password.trim(), service_id)
            .await
        {
            Ok(row) => row,
            Err(e) => {
                tracing::error!(error = %e, "login failed");
                return ServiceResult::failure_with_base_error(format!("System error: {e}"));
            }
        };

        match row {
            Some(auth) => ServiceResult::success(SessionUser {
                user_id: auth.user_id,
                full_name: auth.full_name,
                service_id: auth.service_id,
                service_name: auth.service_name,
            }),
            None => ServiceResult::failure_with_base_error(
                "Invalid credentials or service mapping.",
            ),
        }
    }

    fn required_fields() -> ServiceResult<SessionUser> {
        ServiceResult::failure_with_base_error("Username, password, and service are required.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;

    // A lazy pool never connects unless a query is issued, so these tests
    // exercise the validation path without a database.
    fn users_without_database() -> UserRepository {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unreachable")
            .unwrap();
        UserRepository::new(ld_db::ProcedureExecutor::new(pool))
    }

    #[tokio::test]
    async fn blank_username_rejected_before_any_db_call() {
        let users = users_without_database();
        let service = LoginService::new(&users);

        let result = service
            .call(&LoginInput {
                username: "  ".into(),
                password: "secret".into(),
                service_id: Some(1),
            })
            .await;

        assert!(result.is_failure());
        assert!(result.display_message().contains("required"));
    }

    #[tokio::test]
    async fn missing_service_rejected() {
        let users = users_without_database();
        let service = LoginService::new(&users);

        let result = service
            .call(&LoginInput {
                username: "jroe".into(),
                password: "secret".into(),
                service_id: None,
            })
            .await;

        assert!(result.is_failure());
    }
}
