//! Rights-matrix handlers.

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use ld_core::types::Id;
use ld_db::rights::RightsRepository;
use ld_services::rights::{RightInput, RightsMatrixService, SaveAllRightsService};
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::extractors::{AppState, AuthenticatedSession};

#[derive(Debug, Deserialize)]
pub struct RightsQuery {
    pub user_id: Option<Id>,
}

/// GET /users/rights?user_id= -- the full grid for one user.
pub async fn rights_matrix(
    State(state): State<AppState>,
    _session: AuthenticatedSession,
    Query(query): Query<RightsQuery>,
) -> ApiResult<impl IntoResponse> {
    let user_id = query
        .user_id
        .ok_or_else(|| ApiError::bad_request("User ID missing"))?;

    let rights = RightsRepository::new(state.executor());
    let service = RightsMatrixService::new(&rights);
    let mut result = service.call(user_id).await;

    match result.take_result() {
        Some(rows) => Ok(Json(serde_json::json!({
            "success": true,
            "rights": rows,
        }))),
        None => Ok(Json(serde_json::json!({
            "success": false,
            "message": result.display_message(),
        }))),
    }
}

/// One row of the submitted grid; key names match the form payload.
#[derive(Debug, Deserialize)]
pub struct RightPayload {
    #[serde(default)]
    pub rightid: Option<i64>,
    pub menuid: Option<Id>,
    #[serde(default)]
    pub canview: bool,
    #[serde(default)]
    pub cancreate: bool,
    #[serde(default)]
    pub canedit: bool,
    #[serde(default)]
    pub candelete: bool,
}

#[derive(Debug, Deserialize)]
pub struct SaveRightsRequest {
    #[serde(default, alias = "userId")]
    pub user_id: Option<Id>,
    #[serde(default)]
    pub rights: Vec<RightPayload>,
}

/// POST /users/rights/save
///
/// Saves the batch row by row (fail-fast; no batch atomicity) and, on
/// success, invalidates the saved user's sidebar cache entry so the next
/// fetch reflects the updated rights.
pub async fn save_rights(
    State(state): State<AppState>,
    _session: AuthenticatedSession,
    Json(body): Json<SaveRightsRequest>,
) -> ApiResult<impl IntoResponse> {
    let user_id = body
        .user_id
        .ok_or_else(|| ApiError::bad_request("User ID missing in payload"))?;

    let mut inputs = Vec::with_capacity(body.rights.len());
    for right in &body.rights {
        let Some(menu_id) = right.menuid else {
            return Ok(Json(serde_json::json!({
                "success": false,
                "message": "Invalid data format.",
            })));
        };
        inputs.push(RightInput {
            right_id: right.rightid.unwrap_or(0),
            menu_id,
            can_view: right.canview,
            can_create: right.cancreate,
            can_edit: right.canedit,
            can_delete: right.candelete,
        });
    }

    let rights = RightsRepository::new(state.executor());
    let service = SaveAllRightsService::new(&rights);
    let result = service.call(user_id, &inputs).await;

    if result.is_success() {
        state.sidebar.invalidate(user_id);
    }

    Ok(Json(serde_json::json!({
        "success": result.is_success(),
        "message": result.display_message(),
    })))
}
