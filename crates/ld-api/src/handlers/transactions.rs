//! Cash-book handlers.

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use ld_contracts::transactions::{TransactionDraft, TransactionRef};
use ld_core::types::Id;
use ld_db::transactions::TransactionRepository;
use ld_services::transactions::{
    CashBookService, CashEntryInput, CreateCashEntryService, DeleteCashEntryService,
    TransactionUpdateInput, UpdateCashEntryService,
};
use rust_decimal::Decimal;
use serde::Deserialize;

use super::status_envelope;
use crate::extractors::{AppState, AuthenticatedSession};

#[derive(Debug, Deserialize)]
pub struct CashBookQuery {
    #[serde(default)]
    pub from_date: Option<NaiveDate>,
    #[serde(default)]
    pub to_date: Option<NaiveDate>,
    #[serde(default)]
    pub search: Option<String>,
}

/// GET /transactions/cash-book?from_date=&to_date=&search=
///
/// Dates default to the first of the current month through today.
pub async fn cash_book(
    State(state): State<AppState>,
    session: AuthenticatedSession,
    Query(query): Query<CashBookQuery>,
) -> impl IntoResponse {
    let transactions = TransactionRepository::new(state.executor());
    let service = CashBookService::new(&transactions);

    let mut result = service
        .call(
            session.service_id,
            query.from_date,
            query.to_date,
            query.search.as_deref().unwrap_or(""),
        )
        .await;

    match result.take_result() {
        Some(rows) => Json(serde_json::json!({
            "success": true,
            "transactions": rows,
        })),
        None => Json(serde_json::json!({
            "success": false,
            "message": result.display_message(),
        })),
    }
}

#[derive(Debug, Deserialize)]
pub struct AddTransactionRequest {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub account_id: Option<i32>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub voucher_type_id: Option<i32>,
    #[serde(default)]
    pub department_id: Option<i32>,
    #[serde(default)]
    pub cost_center_id: Option<i32>,
    #[serde(default)]
    pub account_mode_id: Option<i32>,
    #[serde(default)]
    pub year_slice_id: Option<i32>,
    #[serde(default)]
    pub invoice: Option<String>,
}

/// POST /transactions/add
pub async fn add_transaction(
    State(state): State<AppState>,
    session: AuthenticatedSession,
    Json(body): Json<AddTransactionRequest>,
) -> impl IntoResponse {
    let transactions = TransactionRepository::new(state.executor());
    let service = CreateCashEntryService::new(&transactions);

    let input = CashEntryInput {
        draft: TransactionDraft {
            trans_date: body.date,
            account_code: body.account_id,
            amount: body.amount,
            title: body.title.unwrap_or_default(),
            description: body.description.unwrap_or_default(),
        },
        voucher_type_code: body.voucher_type_id.unwrap_or(0),
        department_code: body.department_id.unwrap_or(0),
        cost_center_code: body.cost_center_id.unwrap_or(0),
        account_mode_code: body.account_mode_id.unwrap_or(0),
        year_slice_code: body.year_slice_id.unwrap_or(10),
        invoice_no: body.invoice.unwrap_or_default(),
    };

    let mut result = service.call(input, session.user_id).await;

    let mut envelope = status_envelope(&result);
    if let Some(created) = result.take_result() {
        envelope["new_id"] = serde_json::json!(created.trans_id);
        envelope["voucher_no"] = serde_json::json!(created.voucher_no);
    }
    Json(envelope)
}

#[derive(Debug, Deserialize)]
pub struct UpdateTransactionRequest {
    #[serde(default)]
    pub trans_id: Option<Id>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub account_id: Option<Id>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub version_hex: Option<String>,
}

/// POST /transactions/update
pub async fn update_transaction(
    State(state): State<AppState>,
    session: AuthenticatedSession,
    Json(body): Json<UpdateTransactionRequest>,
) -> impl IntoResponse {
    let Some(date) = body.date else {
        return Json(serde_json::json!({
            "status": "error",
            "message": "Date is required!",
        }));
    };

    let transactions = TransactionRepository::new(state.executor());
    let service = UpdateCashEntryService::new(&transactions);

    let input = TransactionUpdateInput {
        trans_id: body.trans_id.unwrap_or(0),
        version_hex: body.version_hex.unwrap_or_default(),
        trans_date: date,
        account_id: body.account_id.unwrap_or(0),
        description: body.description.unwrap_or_default(),
        amount: body.amount.unwrap_or_default(),
    };

    let result = service
        .call(session.service_id, input, session.user_id)
        .await;
    Json(status_envelope(&result))
}

#[derive(Debug, Deserialize)]
pub struct DeleteTransactionRequest {
    #[serde(default)]
    pub trans_id: Option<Id>,
    #[serde(default)]
    pub version_hex: Option<String>,
}

/// POST /transactions/delete
pub async fn delete_transaction(
    State(state): State<AppState>,
    session: AuthenticatedSession,
    Json(body): Json<DeleteTransactionRequest>,
) -> impl IntoResponse {
    let transactions = TransactionRepository::new(state.executor());
    let service = DeleteCashEntryService::new(&transactions);

    let target = TransactionRef {
        trans_id: body.trans_id.unwrap_or(0),
        version_hex: body.version_hex.unwrap_or_default(),
    };

    let result = service
        .call(session.service_id, target, session.user_id)
        .await;
    Json(status_envelope(&result))
}
