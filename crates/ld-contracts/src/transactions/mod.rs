//! Cash-transaction contracts.

mod create;
mod delete;
mod update;

pub use create::CreateTransactionContract;
pub use delete::DeleteTransactionContract;
pub use update::UpdateTransactionContract;

use chrono::NaiveDate;
use ld_core::types::Id;
use rust_decimal::Decimal;

/// Fields supplied when entering a new cash transaction. Optional fields
/// model what the form may leave out; the create contract decides which
/// are required.
#[derive(Debug, Clone, Default)]
pub struct TransactionDraft {
    pub trans_date: Option<NaiveDate>,
    pub account_code: Option<i32>,
    pub amount: Option<Decimal>,
    pub title: String,
    pub description: String,
}

/// Identity of an existing transaction mutation.
#[derive(Debug, Clone)]
pub struct TransactionRef {
    pub trans_id: Id,
    pub version_hex: String,
}

/// Update payload: identity plus the replacement amount.
#[derive(Debug, Clone)]
pub struct TransactionChange {
    pub trans_id: Id,
    pub version_hex: String,
    pub amount: Decimal,
}
