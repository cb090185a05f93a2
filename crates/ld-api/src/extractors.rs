//! Axum extractors for API handlers.

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use ld_auth::session::{extract_session_id, CookieConfig, Session, SessionStore};
use ld_auth::SidebarCache;
use ld_core::config::AppConfig;
use ld_db::ProcedureExecutor;
use ld_services::Hierarchy;

use crate::error::ApiError;

/// Application state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    executor: ProcedureExecutor,
    pub sessions: Arc<dyn SessionStore>,
    pub sidebar: Arc<SidebarCache<Hierarchy>>,
    pub config: Arc<AppConfig>,
    pub cookies: CookieConfig,
}

impl AppState {
    pub fn new(
        executor: ProcedureExecutor,
        sessions: Arc<dyn SessionStore>,
        config: Arc<AppConfig>,
        cookies: CookieConfig,
    ) -> Self {
        Self {
            executor,
            sessions,
            sidebar: Arc::new(SidebarCache::new()),
            config,
            cookies,
        }
    }

    pub fn executor(&self) -> ProcedureExecutor {
        self.executor.clone()
    }
}

/// Extracts the valid session for the request, or rejects with the 401
/// envelope. Every protected handler takes this as an argument.
pub struct AuthenticatedSession(pub Session);

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedSession
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let cookie_header = parts
            .headers
            .get(header::COOKIE)
            .and_then(|value| value.to_str().ok())
            .ok_or(ApiError::Unauthorized)?;

        let session_id = extract_session_id(cookie_header, &app_state.cookies.name)
            .ok_or(ApiError::Unauthorized)?;

        app_state
            .sessions
            .get(&session_id)
            .map(AuthenticatedSession)
            .ok_or(ApiError::Unauthorized)
    }
}

impl std::ops::Deref for AuthenticatedSession {
    type Target = Session;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
