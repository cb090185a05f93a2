//! Update contract for cash transactions.

use ld_core::error::ValidationErrors;
use rust_decimal::Decimal;

use crate::base::{is_blank, Contract, ValidationResult};
use super::TransactionChange;

/// Contract for updating a transaction: mutation identity plus positivity
/// of the replacement amount. A non-positive amount is invalid whenever it
/// is supplied, not only at creation.
#[derive(Default)]
pub struct UpdateTransactionContract;

impl UpdateTransactionContract {
    pub fn new() -> Self {
        Self
    }
}

impl Contract<TransactionChange> for UpdateTransactionContract {
    fn validate(&self, change: &TransactionChange) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        if change.trans_id <= 0 {
            errors.add("trans_id", "is required");
        }
        if is_blank(&change.version_hex) {
            errors.add("version_hex", "is required");
        }
        if change.amount <= Decimal::ZERO {
            errors.add("amount", "must be greater than zero");
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
    fn valid_change_passes() {
        let contract = UpdateTransactionContract::new();
        let change = TransactionChange {
            trans_id: 7,
            version_hex: "ab12".into(),
            amount: Decimal::new(100, 0),
        };
        assert!(contract.validate(&change).is_ok());
    }

    #[test]
    fn stale_identity_and_bad_amount_all_reported() {
        let contract = UpdateTransactionContract::new();
        let change = TransactionChange {
            trans_id: 0,
            version_hex: "".into(),
            amount: Decimal::ZERO,
        };
        let errors = contract.validate(&change).unwrap_err();
        assert!(errors.has_error("trans_id"));
        assert!(errors.has_error("version_hex"));
        assert!(errors.has_error("amount"));
    }
}
