//! User CRUD handlers.

use axum::{extract::State, response::IntoResponse, Json};
use ld_contracts::users::{UserDraft, UserRef};
use ld_core::types::Id;
use ld_db::users::UserRepository;
use ld_services::users::{
    CreateUserService, DeleteUserService, ListUsersService, UpdateUserService, UserUpdateInput,
};
use serde::Deserialize;

use super::status_envelope;
use crate::extractors::{AppState, AuthenticatedSession};

/// GET /users -- all users of the session's service.
pub async fn list_users(
    State(state): State<AppState>,
    session: AuthenticatedSession,
) -> impl IntoResponse {
    let users = UserRepository::new(state.executor());
    let service = ListUsersService::new(&users);
    let mut result = service.call(session.service_id).await;

    match result.take_result() {
        Some(rows) => Json(serde_json::json!({
            "success": true,
            "users": rows,
        })),
        None => Json(serde_json::json!({
            "success": false,
            "message": result.display_message(),
        })),
    }
}

#[derive(Debug, Deserialize)]
pub struct AddUserRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub status_id: Option<i64>,
}

/// POST /users/add
pub async fn add_user(
    State(state): State<AppState>,
    session: AuthenticatedSession,
    Json(body): Json<AddUserRequest>,
) -> impl IntoResponse {
    let users = UserRepository::new(state.executor());
    let service = CreateUserService::new(&users, state.config.auth.password_min_length);

    let draft = UserDraft {
        username: body.username.unwrap_or_default(),
        full_name: body.full_name.unwrap_or_default(),
        password: body.password.unwrap_or_default(),
        status_id: body.status_id.unwrap_or(1),
    };

    let mut result = service
        .call(session.service_id, draft, session.user_id)
        .await;

    let mut envelope = status_envelope(&result);
    if let Some(new_id) = result.take_result() {
        envelope["new_id"] = serde_json::json!(new_id);
    }
    Json(envelope)
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub user_id: Option<Id>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub status_id: Option<i64>,
    #[serde(default)]
    pub version_hex: Option<String>,
}

/// POST /users/update -- the caller must echo back the `version_hex` from
/// its last read; a stale stamp yields the concurrency message, distinct
/// from not-found.
pub async fn update_user(
    State(state): State<AppState>,
    session: AuthenticatedSession,
    Json(body): Json<UpdateUserRequest>,
) -> impl IntoResponse {
    let users = UserRepository::new(state.executor());
    let service = UpdateUserService::new(&users);

    let input = UserUpdateInput {
        user_id: body.user_id.unwrap_or(0),
        version_hex: body.version_hex.unwrap_or_default(),
        draft: UserDraft {
            username: body.username.unwrap_or_default(),
            full_name: body.full_name.unwrap_or_default(),
            password: body.password.unwrap_or_default(),
            status_id: body.status_id.unwrap_or(1),
        },
    };

    let result = service
        .call(session.service_id, input, session.user_id)
        .await;
    Json(status_envelope(&result))
}

#[derive(Debug, Deserialize)]
pub struct DeleteUserRequest {
    #[serde(default)]
    pub user_id: Option<Id>,
    #[serde(default)]
    pub version_hex: Option<String>,
}

/// POST /users/delete
pub async fn delete_user(
    State(state): State<AppState>,
    session: AuthenticatedSession,
    Json(body): Json<DeleteUserRequest>,
) -> impl IntoResponse {
    let users = UserRepository::new(state.executor());
    let service = DeleteUserService::new(&users);

    let target = UserRef {
        user_id: body.user_id.unwrap_or(0),
        version_hex: body.version_hex.unwrap_or_default(),
    };

    let result = service
        .call(session.service_id, target, session.user_id)
        .await;
    Json(status_envelope(&result))
}
