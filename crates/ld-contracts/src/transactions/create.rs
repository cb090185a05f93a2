//! Create contract for cash transactions.

use ld_core::error::ValidationErrors;
use rust_decimal::Decimal;

use crate::base::{Contract, ValidationResult};
use super::TransactionDraft;

/// Contract for entering a cash transaction: date, account, and amount are
/// required, and the amount must be strictly positive. Runs before any
/// database call.
#[derive(Default)]
pub struct CreateTransactionContract;

impl CreateTransactionContract {
    pub fn new() -> Self {
        Self
    }
}

impl Contract<TransactionDraft> for CreateTransactionContract {
    fn validate(&self, draft: &TransactionDraft) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        if draft.trans_date.is_none() {
            errors.add("date", "is required");
        }
        if draft.account_code.is_none() {
            errors.add("account", "is required");
        }
        match draft.amount {
            None => errors.add("amount", "is required"),
            Some(amount) if amount <= Decimal::ZERO => {
                errors.add("amount", "must be greater than zero")
            }
            Some(_) => {}
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
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn valid_draft() -> TransactionDraft {
        TransactionDraft {
            trans_date: NaiveDate::from_ymd_opt(2024, 3, 15),
            account_code: Some(12),
            amount: Some(Decimal::new(15_000, 2)),
            title: "Office supplies".into(),
            description: "March stationery".into(),
        }
    }

    #[test]
    fn complete_draft_passes() {
        let contract = CreateTransactionContract::new();
        assert!(contract.validate(&valid_draft()).is_ok());
    }

    #[test]
    fn missing_fields_rejected() {
        let contract = CreateTransactionContract::new();
        let errors = contract.validate(&TransactionDraft::default()).unwrap_err();
        assert!(errors.has_error("date"));
        assert!(errors.has_error("account"));
        assert!(errors.has_error("amount"));
    }

    #[test]
    fn zero_amount_rejected() {
        let contract = CreateTransactionContract::new();
        let draft = TransactionDraft {
            amount: Some(Decimal::ZERO),
            ..valid_draft()
        };
        assert!(contract.validate(&draft).unwrap_err().has_error("amount"));
    }

    #[test]
    fn negative_fraction_rejected() {
        let contract = CreateTransactionContract::new();
        let draft = TransactionDraft {
            amount: Some(Decimal::from_str("-0.01").unwrap()),
            ..valid_draft()
        };
        assert!(contract.validate(&draft).unwrap_err().has_error("amount"));
    }

    #[test]
    fn negative_whole_amount_rejected() {
        let contract = CreateTransactionContract::new();
        let draft = TransactionDraft {
            amount: Some(Decimal::from(-500)),
            ..valid_draft()
        };
        assert!(contract.validate(&draft).unwrap_err().has_error("amount"));
    }

    #[test]
    fn smallest_positive_amount_accepted() {
        let contract = CreateTransactionContract::new();
        let draft = TransactionDraft {
            amount: Some(Decimal::from_str("0.01").unwrap()),
            ..valid_draft()
        };
        assert!(contract.validate(&draft).is_ok());
    }
}
