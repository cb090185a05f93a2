//! Service result envelope.
//!
//! Every service call resolves to a `ServiceResult`: a success flag, an
//! optional value, validation errors, and an optional display message. The
//! API layer serializes this into the `{status|success, message, ...}`
//! envelope the clients consume.

use ld_core::error::ValidationErrors;
use std::fmt;

#[derive(Debug)]
pub struct ServiceResult<T> {
    success: bool,
    result: Option<T>,
    errors: ValidationErrors,
    message: Option<String>,
}

impl<T> ServiceResult<T> {
    pub fn success(result: T) -> Self {
        Self {
            success: true,
            result: Some(result),
            errors: ValidationErrors::new(),
            message: None,
        }
    }

    pub fn success_with_message(result: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            result: Some(result),
            errors: ValidationErrors::new(),
            message: Some(message.into()),
        }
    }

    pub fn failure(errors: ValidationErrors) -> Self {
        Self {
            success: false,
            result: None,
            errors,
            message: None,
        }
    }

    pub fn failure_with_base_error(message: impl Into<String>) -> Self {
        let message = message.into();
        let mut errors = ValidationErrors::new();
        errors.add_base(message.clone());
        Self {
            success: false,
            result: None,
            errors,
            message: Some(message),
        }
    }

    pub fn failure_with_message(errors: ValidationErrors, message: impl Into<String>) -> Self {
        Self {
            success: false,
            result: None,
            errors,
            message: Some(message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn is_failure(&self) -> bool {
        !self.success
    }

    pub fn result(&self) -> Option<&T> {
        self.result.as_ref()
    }

    pub fn take_result(&mut self) -> Option<T> {
        self.result.take()
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Display message for the envelope: the explicit message if one was
    /// set, otherwise the validation errors joined.
    pub fn display_message(&self) -> String {
        if let Some(ref message) = self.message {
            return message.clone();
        }
        if self.success {
            return String::new();
        }
        self.errors.full_messages().join(", ")
    }

    pub fn map<U, F>(self, f: F) -> ServiceResult<U>
    where
        F: FnOnce(T) -> U,
    {
        ServiceResult {
            success: self.success,
            result: self.result.map(f),
            errors: self.errors,
            message: self.message,
        }
    }
}

impl<T> From<Result<T, ValidationErrors>> for ServiceResult<T> {
    fn from(result: Result<T, ValidationErrors>) -> Self {
        match result {
            Ok(value) => ServiceResult::success(value),
            Err(errors) => ServiceResult::failure(errors),
        }
    }
}

impl<T: fmt::Display> fmt::Display for ServiceResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.success {
            match self.result {
                Some(ref result) => write!(f, "Success: {}", result),
                None => write!(f, "Success"),
            }
        } else {
            write!(f, "Failure: {}", self.display_message())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_result() {
        let result = ServiceResult::success(42);
        assert!(result.is_success());
        assert!(!result.is_failure());
        assert_eq!(result.result(), Some(&42));
        assert_eq!(result.display_message(), "");
    }

    #[test]
    fn failure_result() {
        let mut errors = ValidationErrors::new();
        errors.add("amount", "must be greater than zero");
        let result: ServiceResult<i32> = ServiceResult::failure(errors);

        assert!(result.is_failure());
        assert!(result.result().is_none());
        assert!(result.errors().has_error("amount"));
        assert!(result.display_message().contains("amount"));
    }

    #[test]
    fn failure_with_base_error_sets_message() {
        let result: ServiceResult<()> = ServiceResult::failure_with_base_error("Delete failed.");
        assert_eq!(result.message(), Some("Delete failed."));
        assert_eq!(result.display_message(), "Delete failed.");
    }

    #[test]
    fn explicit_message_wins_over_errors() {
        let mut errors = ValidationErrors::new();
        errors.add("username", "is required");
        let result: ServiceResult<()> =
            ServiceResult::failure_with_message(errors, "All fields are required!");
        assert_eq!(result.display_message(), "All fields are required!");
        assert!(result.errors().has_error("username"));
    }

    #[test]
    fn map_preserves_outcome() {
        let result = ServiceResult::success(21).map(|n| n * 2);
        assert_eq!(result.result(), Some(&42));

        let failed: ServiceResult<i32> = ServiceResult::failure_with_base_error("no");
        let mapped = failed.map(|n| n * 2);
        assert!(mapped.is_failure());
    }

    #[test]
    fn from_validation_result() {
        let ok: ServiceResult<i32> = Ok::<_, ValidationErrors>(5).into();
        assert!(ok.is_success());

        let mut errors = ValidationErrors::new();
        errors.add_base("bad");
        let err: ServiceResult<i32> = Err::<i32, _>(errors).into();
        assert!(err.is_failure());
    }
}
