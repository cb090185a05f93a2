//! Login, logout, and the sidebar endpoint.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use ld_auth::session::Session;
use ld_core::types::Id;
use ld_db::menus::MenuRepository;
use ld_db::users::UserRepository;
use ld_services::auth::{LoginInput, LoginService};
use ld_services::{build_hierarchy, Hierarchy};
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::extractors::{AppState, AuthenticatedSession};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub service_id: Option<Id>,
}

/// POST /auth/login
///
/// Authenticates, creates the server-side session, computes and caches the
/// sidebar hierarchy, and sets the session cookie.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> ApiResult<Response> {
    let users = UserRepository::new(state.executor());
    let service = LoginService::new(&users);

    let input = LoginInput {
        username: body.username.unwrap_or_default(),
        password: body.password.unwrap_or_default(),
        service_id: body.service_id,
    };
    let mut result = service.call(&input).await;

    if result.is_failure() {
        return Ok(Json(serde_json::json!({
            "success": false,
            "message": result.display_message(),
        }))
        .into_response());
    }

    let user = result
        .take_result()
        .ok_or_else(|| ApiError::internal("login succeeded without a user"))?;

    let hierarchy = compute_sidebar(&state, user.user_id).await;
    state.sidebar.put(user.user_id, hierarchy.clone());

    let session = Session::new(user.clone(), state.config.auth.session_lifetime_secs);
    let cookie = state.cookies.build_cookie(&session.id);
    state
        .sessions
        .set(session)
        .map_err(|e| ApiError::internal(format!("session store failure: {e}")))?;

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(serde_json::json!({
            "success": true,
            "user": user,
            "sidebar": hierarchy,
        })),
    )
        .into_response())
}

/// POST /auth/logout
pub async fn logout(
    State(state): State<AppState>,
    session: AuthenticatedSession,
) -> impl IntoResponse {
    if let Err(e) = state.sessions.delete(&session.id) {
        tracing::warn!(error = %e, "session delete failed");
    }
    state.sidebar.invalidate(session.user_id);

    (
        StatusCode::OK,
        [(header::SET_COOKIE, state.cookies.build_clear_cookie())],
        Json(serde_json::json!({
            "success": true,
            "message": "Logged out.",
        })),
    )
}

/// GET /sidebar
///
/// The cached hierarchy for the session user; recomputed on cache miss.
pub async fn sidebar(
    State(state): State<AppState>,
    session: AuthenticatedSession,
) -> Json<serde_json::Value> {
    let hierarchy = match state.sidebar.get(session.user_id) {
        Some(cached) => cached,
        None => {
            let computed = compute_sidebar(&state, session.user_id).await;
            state.sidebar.put(session.user_id, computed.clone());
            computed
        }
    };

    Json(serde_json::json!({
        "success": true,
        "sidebar": hierarchy,
    }))
}

/// Fetch the flat rows and build the tree. A failure here must not block
/// login, so it degrades to an empty hierarchy with a log line.
async fn compute_sidebar(state: &AppState, user_id: Id) -> Hierarchy {
    let menus = MenuRepository::new(state.executor());
    match menus.sidebar_rows(user_id).await {
        Ok(rows) => build_hierarchy(&rows),
        Err(e) => {
            tracing::warn!(error = %e, user_id, "sidebar fetch failed");
            Hierarchy::new()
        }
    }
}
