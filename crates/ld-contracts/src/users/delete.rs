//! Delete contract for users.

use ld_core::error::ValidationErrors;

use crate::base::{is_blank, Contract, ValidationResult};
use super::UserRef;

/// Contract for deleting a user: same mutation-identity rules as update.
#[derive(Default)]
pub struct DeleteUserContract;

impl DeleteUserContract {
    pub fn new() -> Self {
        Self
    }
}

impl Contract<UserRef> for DeleteUserContract {
    fn validate(&self, target: &UserRef) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        if target.user_id <= 0 {
            errors.add("user_id", "is required");
        }
        if is_blank(&target.version_hex) {
            errors.add("version_hex", "is required");
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

    #[test]
    fn requires_id_and_stamp() {
        let contract = DeleteUserContract::new();
        let target = UserRef {
            user_id: 0,
            version_hex: "".into(),
        };
        let errors = contract.validate(&target).unwrap_err();
        assert!(errors.has_error("user_id"));
        assert!(errors.has_error("version_hex"));
    }
}
