//! Generic lookup handler.

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use ld_db::lookups::LookupRepository;
use ld_services::lookups::LookupService;
use serde::Deserialize;

use crate::extractors::{AppState, AuthenticatedSession};

#[derive(Debug, Deserialize)]
pub struct LookupQuery {
    #[serde(rename = "type")]
    pub lookup_type: Option<String>,
    #[serde(default)]
    pub q: Option<String>,
}

/// GET /common/lookup?type=&q= -- id/text pairs for selection inputs.
pub async fn lookup(
    State(state): State<AppState>,
    _session: AuthenticatedSession,
    Query(query): Query<LookupQuery>,
) -> impl IntoResponse {
    let lookups = LookupRepository::new(state.executor());
    let service = LookupService::new(&lookups);

    let mut result = service
        .call(
            query.lookup_type.as_deref().unwrap_or(""),
            query.q.as_deref().filter(|q| !q.is_empty()),
        )
        .await;

    match result.take_result() {
        Some(items) => Json(serde_json::json!({ "results": items })),
        None => Json(serde_json::json!({
            "results": [],
            "success": false,
            "message": result.display_message(),
        })),
    }
}
