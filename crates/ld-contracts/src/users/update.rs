//! Update contract for users.

use ld_core::error::ValidationErrors;

use crate::base::{is_blank, Contract, ValidationResult};
use super::UserRef;

/// Contract for updating an existing user. Only the mutation identity is
/// validated here: the target id and the version stamp from the last read.
/// Field-level rules are the stored procedure's concern.
#[derive(Default)]
pub struct UpdateUserContract;

impl UpdateUserContract {
    pub fn new() -> Self {
        Self
    }
}

impl Contract<UserRef> for UpdateUserContract {
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
