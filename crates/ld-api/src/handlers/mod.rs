//! API handlers, grouped the way the routes are.

pub mod auth;
pub mod lookups;
pub mod rights;
pub mod transactions;
pub mod users;

use ld_services::ServiceResult;

/// `{"status": "success"|"error", "message": ...}` -- the envelope every
/// mutating endpoint returns.
pub(crate) fn status_envelope<T>(result: &ServiceResult<T>) -> serde_json::Value {
    serde_json::json!({
        "status": if result.is_success() { "success" } else { "error" },
        "message": result.display_message(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ld_core::status::DbStatus;

    #[test]
    fn stale_update_envelope_differs_from_not_found() {
        let stale: ServiceResult<()> =
            ServiceResult::failure_with_base_error(DbStatus::ConcurrencyViolation.message());
        let missing: ServiceResult<()> =
            ServiceResult::failure_with_base_error(DbStatus::RecordNotFound.message());

        let stale_env = status_envelope(&stale);
        let missing_env = status_envelope(&missing);

        assert_eq!(stale_env["status"], "error");
        assert_eq!(missing_env["status"], "error");
        assert_ne!(stale_env["message"], missing_env["message"]);
    }

    #[test]
    fn success_envelope_carries_the_message() {
        let result = ServiceResult::success_with_message((), "User updated!");
        let envelope = status_envelope(&result);
        assert_eq!(envelope["status"], "success");
        assert_eq!(envelope["message"], "User updated!");
    }
}
