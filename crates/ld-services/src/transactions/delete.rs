//! Delete service for cash entries.

use ld_contracts::base::Contract;
use ld_contracts::transactions::{DeleteTransactionContract, TransactionRef};
use ld_core::types::Id;
use ld_db::transactions::TransactionRepository;
use ld_db::{DbError, MutationOutcome};

use crate::result::ServiceResult;

pub struct DeleteCashEntryService<'a> {
    transactions: &'a TransactionRepository,
    contract: DeleteTransactionContract,
}

impl<'a> DeleteCashEntryService<'a> {
    pub fn new(transactions: &'a TransactionRepository) -> Self {
        Self {
            transactions,
            contract: DeleteTransactionContract::new(),
        }
    }

    pub async fn call(
        &self,
        service_id: Id,
        target: TransactionRef,
        requested_by: Id,
    ) -> ServiceResult<()> {
        if let Err(errors) = self.contract.validate(&target) {
            return ServiceResult::failure(errors);
        }

        match self
            .transactions
            .delete(service_id, target.trans_id, &target.version_hex, requested_by)
            .await
        {
            Ok(MutationOutcome::Applied) => {
                ServiceResult::success_with_message((), "Transaction deleted!")
            }
            Ok(outcome) => ServiceResult::failure_with_base_error(outcome.message()),
            Err(DbError::BadVersionToken) => {
                ServiceResult::failure_with_base_error("Invalid version token.")
            }
            Err(e) => {
                tracing::error!(error = %e, "transaction delete failed");
                ServiceResult::failure_with_base_error(format!("System error: {e}"))
            }
        }
    }
}
