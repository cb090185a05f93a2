//! Delete contract for cash transactions.

use ld_core::error::ValidationErrors;

use crate::base::{is_blank, Contract, ValidationResult};
use super::TransactionRef;

/// Contract for deleting a transaction: target id and version stamp.
#[derive(Default)]
pub struct DeleteTransactionContract;

impl DeleteTransactionContract {
    pub fn new() -> Self {
        Self
    }
}

impl Contract<TransactionRef> for DeleteTransactionContract {
    fn validate(&self, target: &TransactionRef) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        if target.trans_id <= 0 {
            errors.add("trans_id", "is required");
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
    fn requires_identity() {
        let contract = DeleteTransactionContract::new();
        let errors = contract
            .validate(&TransactionRef {
                trans_id: 0,
                version_hex: " ".into(),
            })
            .unwrap_err();
        assert!(errors.has_error("trans_id"));
        assert!(errors.has_error("version_hex"));
    }

    #[test]
    fn valid_reference_passes() {
        let contract = DeleteTransactionContract::new();
        assert!(contract
            .validate(&TransactionRef {
                trans_id: 3,
                version_hex: "0aff".into(),
            })
            .is_ok());
    }
}
