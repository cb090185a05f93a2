//! Create contract for users.

use ld_core::error::ValidationErrors;

use crate::base::{is_blank, Contract, ValidationResult};
use super::UserDraft;

/// Contract for creating a new user. Username, full name, and password are
/// all required.
pub struct CreateUserContract {
    password_min_length: usize,
}

impl CreateUserContract {
    pub fn new(password_min_length: usize) -> Self {
        Self { password_min_length }
    }
}

impl Contract<UserDraft> for CreateUserContract {
    fn validate(&self, draft: &UserDraft) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        if is_blank(&draft.username) {
            errors.add("username", "is required");
        }
        if is_blank(&draft.full_name) {
            errors.add("full_name", "is required");
        }
        if is_blank(&draft.password) {
            errors.add("password", "is required");
        } else if draft.password.len() < self.password_min_length {
            errors.add(
                "password",
                format!("is too short (minimum is {} characters)", self.password_min_length),
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> UserDraft {
        UserDraft {
            username: "jroe".into(),
            full_name: "Jane Roe".into(),
            password: "secret".into(),
            status_id: 1,
        }
    }

    #[test]
    fn complete_draft_passes() {
        let contract = CreateUserContract::new(1);
        assert!(contract.validate(&valid_draft()).is_ok());
    }

    #[test]
    fn every_required_field_is_checked() {
        let contract = CreateUserContract::new(1);
        let draft = UserDraft::default();

        let errors = contract.validate(&draft).unwrap_err();
        assert!(errors.has_error("username"));
        assert!(errors.has_error("full_name"));
        assert!(errors.has_error("password"));
    }

    #[test]
    fn whitespace_only_counts_as_missing() {
        let contract = CreateUserContract::new(1);
        let draft = UserDraft {
            username: "   ".into(),
            ..valid_draft()
        };
        assert!(contract.validate(&draft).unwrap_err().has_error("username"));
    }

    #[test]
    fn short_password_rejected_when_minimum_configured() {
        let contract = CreateUserContract::new(8);
        let draft = UserDraft {
            password: "short".into(),
            ..valid_draft()
        };
        let errors = contract.validate(&draft).unwrap_err();
        assert!(errors.has_error("password"));
    }
}
