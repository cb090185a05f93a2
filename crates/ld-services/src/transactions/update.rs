//! Update service for cash entries.

use chrono::NaiveDate;
use ld_contracts::base::Contract;
use ld_contracts::transactions::{TransactionChange, UpdateTransactionContract};
use ld_core::types::Id;
use ld_db::transactions::{TransactionRepository, TransactionUpdate};
use ld_db::{DbError, MutationOutcome};
use rust_decimal::Decimal;

use crate::result::ServiceResult;

/// Update payload from the API layer.
#[derive(Debug, Clone)]
pub struct TransactionUpdateInput {
    pub trans_id: Id,
    pub version_hex: String,
    pub trans_date: NaiveDate,
    pub account_id: Id,
    pub description: String,
    pub amount: Decimal,
}

pub struct UpdateCashEntryService<'a> {
    transactions: &'a TransactionRepository,
    contract: UpdateTransactionContract,
}

impl<'a> UpdateCashEntryService<'a> {
    pub fn new(transactions: &'a TransactionRepository) -> Self {
        Self {
            transactions,
            contract: UpdateTransactionContract::new(),
        }
    }

    /// Update a cash entry, threading the version stamp through to the
    /// procedure. Stale-stamp and missing-record outcomes surface with
    /// their own messages.
    pub async fn call(
        &self,
        service_id: Id,
        input: TransactionUpdateInput,
        changed_by: Id,
    ) -> ServiceResult<()> {
        let change = TransactionChange {
            trans_id: input.trans_id,
            version_hex: input.version_hex.clone(),
            amount: input.amount,
        };
        if let Err(errors) = self.contract.validate(&change) {
            return ServiceResult::failure(errors);
        }

        let update = TransactionUpdate {
            service_id,
            trans_id: input.trans_id,
            trans_date: input.trans_date,
            account_id: input.account_id,
            description: input.description,
            amount: input.amount,
            version_hex: input.version_hex,
            changed_by,
        };

        match self.transactions.update(&update).await {
            Ok(MutationOutcome::Applied) => {
                ServiceResult::success_with_message((), "Transaction updated!")
            }
            Ok(outcome) => ServiceResult::failure_with_base_error(outcome.message()),
            Err(DbError::BadVersionToken) => {
                ServiceResult::failure_with_base_error("Invalid version token.")
            }
            Err(e) => {
                tracing::error!(error = %e, "transaction update failed");
                ServiceResult::failure_with_base_error(format!("System error: {e}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;

    fn transactions_without_database() -> TransactionRepository {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unreachable")
            .unwrap();
        TransactionRepository::new(ld_db::ProcedureExecutor::new(pool))
    }

    #[tokio::test]
    async fn non_positive_amount_rejected_before_any_db_call() {
        let transactions = transactions_without_database();
        let service = UpdateCashEntryService::new(&transactions);

        let input = TransactionUpdateInput {
            trans_id: 3,
            version_hex: "ab12".into(),
            trans_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            account_id: 12,
            description: String::new(),
            amount: Decimal::ZERO,
        };
        let result = service.call(1, input, 1).await;
        assert!(result.is_failure());
        assert!(result.errors().has_error("amount"));
    }
}
