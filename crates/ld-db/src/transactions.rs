//! Cash-book transaction repository.
//!
//! Wraps `sp_trans_get_list`, `sp_trans_add`, `sp_transactions_update`,
//! and `sp_transactions_delete`.

use chrono::NaiveDate;
use ld_core::status::TransAddStatus;
use ld_core::types::Id;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{DbError, DbResult};
use crate::procedure::{ProcParam, ProcedureExecutor, Record};
use crate::repository::{decode_version, MutationOutcome};

/// Row returned by `sp_trans_get_list`.
///
/// Output contract: `transid bigint, transdate date, account text,
/// department text, costcenter text, vouchertype text, voucherno text,
/// title text, description text, amount numeric, versionid bytea`.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionRow {
    pub trans_id: Id,
    pub trans_date: Option<NaiveDate>,
    pub account: Option<String>,
    pub department: Option<String>,
    pub cost_center: Option<String>,
    pub voucher_type: Option<String>,
    pub voucher_no: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub amount: Decimal,
    pub version_hex: Option<String>,
}

impl TransactionRow {
    fn from_record(record: &Record, proc: &'static str) -> DbResult<Self> {
        let trans_id = record.get_i64("transid").ok_or_else(|| DbError::Contract {
            proc,
            detail: "missing `transid` column".into(),
        })?;
        Ok(Self {
            trans_id,
            trans_date: record.get_date("transdate"),
            account: record.get_str("account").map(str::to_owned),
            department: record.get_str("department").map(str::to_owned),
            cost_center: record.get_str("costcenter").map(str::to_owned),
            voucher_type: record.get_str("vouchertype").map(str::to_owned),
            voucher_no: record.get_str("voucherno").map(str::to_owned),
            title: record.get_str("title").map(str::to_owned),
            description: record.get_str("description").map(str::to_owned),
            amount: record.get_decimal("amount").unwrap_or_default(),
            version_hex: record.get_str("version_hex").map(str::to_owned),
        })
    }
}

/// Input for `sp_trans_add`.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub user_code: Id,
    pub voucher_type_code: i32,
    pub trans_date: NaiveDate,
    pub account_code: i32,
    pub department_code: i32,
    pub title: String,
    pub description: String,
    pub amount: Decimal,
    pub cost_center_code: i32,
    pub invoice_no: String,
    pub account_mode_code: i32,
    pub year_slice_code: i32,
}

/// Outcome of `sp_trans_add`: its `retval` codes are a namespace of their
/// own (101 saved, 2001 not added, 2002 insufficient funds, 2004 user log
/// failure).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransAddOutcome {
    Saved {
        trans_id: Id,
        voucher_no: String,
    },
    Rejected {
        status: TransAddStatus,
        message: String,
    },
}

/// Input for `sp_transactions_update`.
#[derive(Debug, Clone)]
pub struct TransactionUpdate {
    pub service_id: Id,
    pub trans_id: Id,
    pub trans_date: NaiveDate,
    pub account_id: Id,
    pub description: String,
    pub amount: Decimal,
    pub version_hex: String,
    pub changed_by: Id,
}

pub struct TransactionRepository {
    exec: ProcedureExecutor,
}

impl TransactionRepository {
    pub fn new(exec: ProcedureExecutor) -> Self {
        Self { exec }
    }

    /// Cash-book ledger for a service within a date range, optionally
    /// filtered by a search term the procedure applies.
    pub async fn cash_book(
        &self,
        service_id: Id,
        from_date: NaiveDate,
        to_date: NaiveDate,
        search: &str,
    ) -> DbResult<Vec<TransactionRow>> {
        const PROC: &str = "sp_trans_get_list";
        let records = self
            .exec
            .fetch_rows(
                PROC,
                &[
                    ProcParam::bigint(service_id),
                    ProcParam::date(from_date),
                    ProcParam::date(to_date),
                    ProcParam::text(search),
                ],
            )
            .await?;
        records
            .iter()
            .map(|record| TransactionRow::from_record(record, PROC))
            .collect()
    }

    /// Create a cash entry.
    ///
    /// The procedure takes the full historical parameter list in fixed
    /// order; positions the web layer never populates are sent as zeros or
    /// empty strings. Output contract: `retval int, trans_code bigint,
    /// voucher_no text`.
    pub async fn insert(&self, entry: &NewTransaction) -> DbResult<TransAddOutcome> {
        const PROC: &str = "sp_trans_add";
        let params = [
            ProcParam::bigint(entry.user_code),        // user code
            ProcParam::int(entry.voucher_type_code),   // voucher type
            ProcParam::int(0),                         // reversal flag
            ProcParam::date(entry.trans_date),         // transaction date
            ProcParam::int(entry.account_code),        // account
            ProcParam::int(entry.department_code),     // department
            ProcParam::text(entry.title.clone()),      // title
            ProcParam::text(entry.description.clone()), // description
            ProcParam::decimal(entry.amount),          // amount
            ProcParam::int(entry.cost_center_code),    // cost center
            ProcParam::text(entry.invoice_no.clone()), // invoice
            ProcParam::text(""),                       // cheque detail
            ProcParam::text(""),                       // month tag
            ProcParam::int(entry.account_mode_code),   // account mode
            ProcParam::int(0),                         // vendor code
            ProcParam::int(entry.year_slice_code),     // year slice
            ProcParam::int(0),                         // version seed
        ];

        let record = self
            .exec
            .fetch_one(PROC, &params)
            .await?
            .ok_or(DbError::Contract {
                proc: PROC,
                detail: "procedure returned no status row".into(),
            })?;

        let retval = record
            .get_i32("retval")
            .ok_or(DbError::Contract {
                proc: PROC,
                detail: "status row is missing `retval`".into(),
            })?;
        let status = TransAddStatus::from_code(retval);

        if status.is_success() {
            let trans_id = record.get_i64("trans_code").ok_or(DbError::Contract {
                proc: PROC,
                detail: "success row is missing `trans_code`".into(),
            })?;
            Ok(TransAddOutcome::Saved {
                trans_id,
                voucher_no: record.get_str("voucher_no").unwrap_or_default().to_owned(),
            })
        } else {
            Ok(TransAddOutcome::Rejected {
                status,
                message: status.message(),
            })
        }
    }

    /// Update a cash entry, presenting the version stamp from the last
    /// read. Output contract: `code int, message text`.
    pub async fn update(&self, update: &TransactionUpdate) -> DbResult<MutationOutcome> {
        const PROC: &str = "sp_transactions_update";
        let version = decode_version(&update.version_hex)?;
        let envelope = self
            .exec
            .execute(
                PROC,
                &[
                    ProcParam::bigint(update.service_id),
                    ProcParam::bigint(update.trans_id),
                    ProcParam::date(update.trans_date),
                    ProcParam::bigint(update.account_id),
                    ProcParam::text(update.description.clone()),
                    ProcParam::decimal(update.amount),
                    ProcParam::bytes(version),
                    ProcParam::bigint(update.changed_by),
                ],
            )
            .await?;
        Ok(MutationOutcome::from_envelope(&envelope))
    }

    /// Delete a cash entry; same version-stamp contract as update.
    pub async fn delete(
        &self,
        service_id: Id,
        trans_id: Id,
        version_hex: &str,
        requested_by: Id,
    ) -> DbResult<MutationOutcome> {
        const PROC: &str = "sp_transactions_delete";
        let version = decode_version(version_hex)?;
        let envelope = self
            .exec
            .execute(
                PROC,
                &[
                    ProcParam::bigint(service_id),
                    ProcParam::bigint(trans_id),
                    ProcParam::bytes(version),
                    ProcParam::bigint(requested_by),
                ],
            )
            .await?;
        Ok(MutationOutcome::from_envelope(&envelope))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::procedure::ProcValue;
    use rust_decimal::Decimal;

    #[test]
    fn transaction_row_decodes_amount_and_stamp() {
        let mut record = Record::new();
        record.push("TransID", ProcValue::Int(77));
        record.push("Amount", ProcValue::Decimal(Decimal::new(12_550, 2)));
        record.push("Title", ProcValue::Text("Office supplies".into()));
        record.push("versionid", ProcValue::Bytes(vec![0x0a]));
        record.push("version_hex", ProcValue::Text("0a".into()));

        let row = TransactionRow::from_record(&record, "sp_trans_get_list").unwrap();
        assert_eq!(row.trans_id, 77);
        assert_eq!(row.amount, Decimal::new(12_550, 2));
        assert_eq!(row.version_hex.as_deref(), Some("0a"));
    }

    #[test]
    fn transaction_row_requires_id() {
        let mut record = Record::new();
        record.push("Amount", ProcValue::Decimal(Decimal::ONE));
        assert!(TransactionRow::from_record(&record, "sp_trans_get_list").is_err());
    }
}
