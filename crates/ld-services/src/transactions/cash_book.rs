//! Cash-book listing service.

use chrono::{Datelike, NaiveDate};
use ld_core::types::Id;
use ld_db::transactions::{TransactionRepository, TransactionRow};

use crate::result::ServiceResult;

/// Default reporting window: first of the current month through today.
pub fn default_range(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first_of_month = today.with_day(1).unwrap_or(today);
    (first_of_month, today)
}

pub struct CashBookService<'a> {
    transactions: &'a TransactionRepository,
}

impl<'a> CashBookService<'a> {
    pub fn new(transactions: &'a TransactionRepository) -> Self {
        Self { transactions }
    }

    /// Ledger for a service. Missing dates fall back to the default range;
    /// the search term is applied by the procedure itself.
    pub async fn call(
        &self,
        service_id: Id,
        from_date: Option<NaiveDate>,
        to_date: Option<NaiveDate>,
        search: &str,
    ) -> ServiceResult<Vec<TransactionRow>> {
        let today = chrono::Utc::now().date_naive();
        let (default_from, default_to) = default_range(today);
        let from = from_date.unwrap_or(default_from);
        let to = to_date.unwrap_or(default_to);

        match self.transactions.cash_book(service_id, from, to, search).await {
            Ok(rows) => ServiceResult::success(rows),
            Err(e) => {
                tracing::error!(error = %e, service_id, "cash book fetch failed");
                ServiceResult::failure_with_base_error(format!("System error: {e}"))
            }
        }
    }
}
