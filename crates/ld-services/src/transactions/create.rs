//! Create service for cash entries.

use ld_contracts::base::Contract;
use ld_contracts::transactions::{CreateTransactionContract, TransactionDraft};
use ld_core::types::Id;
use ld_db::transactions::{NewTransaction, TransAddOutcome, TransactionRepository};
use serde::Serialize;

use crate::result::ServiceResult;

/// Everything the entry form submits for a new cash transaction.
#[derive(Debug, Clone)]
pub struct CashEntryInput {
    pub draft: TransactionDraft,
    pub voucher_type_code: i32,
    pub department_code: i32,
    pub cost_center_code: i32,
    pub account_mode_code: i32,
    /// Fiscal year slice; the form default is 10.
    pub year_slice_code: i32,
    pub invoice_no: String,
}

/// Identifiers assigned by the procedure on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedEntry {
    pub trans_id: Id,
    pub voucher_no: String,
}

pub struct CreateCashEntryService<'a> {
    transactions: &'a TransactionRepository,
    contract: CreateTransactionContract,
}

impl<'a> CreateCashEntryService<'a> {
    pub fn new(transactions: &'a TransactionRepository) -> Self {
        Self {
            transactions,
            contract: CreateTransactionContract::new(),
        }
    }

    /// Validate the entry (date, account, and a strictly positive amount)
    /// and hand it to `sp_trans_add`. The procedure's return code decides
    /// between success and a specific business rejection such as
    /// insufficient funds.
    pub async fn call(&self, input: CashEntryInput, created_by: Id) -> ServiceResult<CreatedEntry> {
        if let Err(errors) = self.contract.validate(&input.draft) {
            return ServiceResult::failure_with_message(
                errors,
                "Date, account, and amount are required!",
            );
        }

        // The contract guarantees these are present.
        let (Some(trans_date), Some(account_code), Some(amount)) = (
            input.draft.trans_date,
            input.draft.account_code,
            input.draft.amount,
        ) else {
            return ServiceResult::failure_with_base_error("Date, account, and amount are required!");
        };

        let entry = NewTransaction {
            user_code: created_by,
            voucher_type_code: input.voucher_type_code,
            trans_date,
            account_code,
            department_code: input.department_code,
            title: input.draft.title,
            description: input.draft.description,
            amount,
            cost_center_code: input.cost_center_code,
            invoice_no: input.invoice_no,
            account_mode_code: input.account_mode_code,
            year_slice_code: input.year_slice_code,
        };

        match self.transactions.insert(&entry).await {
            Ok(TransAddOutcome::Saved { trans_id, voucher_no }) => {
                ServiceResult::success_with_message(
                    CreatedEntry { trans_id, voucher_no },
                    "Transaction saved successfully!",
                )
            }
            Ok(TransAddOutcome::Rejected { message, .. }) => {
                ServiceResult::failure_with_base_error(message)
            }
            Err(e) => {
                tracing::error!(error = %e, "cash entry insert failed");
                ServiceResult::failure_with_base_error(format!("System error: {e}"))
            }
        }
    }
}
