//! API routes.

use axum::{
    routing::{get, post},
    Router,
};

use crate::extractors::AppState;
use crate::handlers::{auth, lookups, rights, transactions, users};

/// Assemble the complete application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        // Authentication
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/sidebar", get(auth::sidebar))
        // User management
        .route("/users", get(users::list_users))
        .route("/users/add", post(users::add_user))
        .route("/users/update", post(users::update_user))
        .route("/users/delete", post(users::delete_user))
        // Rights matrix
        .route("/users/rights", get(rights::rights_matrix))
        .route("/users/rights/save", post(rights::save_rights))
        // Cash book
        .route("/transactions/cash-book", get(transactions::cash_book))
        .route("/transactions/add", post(transactions::add_transaction))
        .route("/transactions/update", post(transactions::update_transaction))
        .route("/transactions/delete", post(transactions::delete_transaction))
        // Lookups
        .route("/common/lookup", get(lookups::lookup))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use ld_auth::session::{CookieConfig, MemorySessionStore, Session, SessionStore};
    use ld_core::config::AppConfig;
    use ld_core::types::SessionUser;
    use ld_db::ProcedureExecutor;
    use ld_services::{Hierarchy, MenuNode, ModuleNode};
    use sqlx::postgres::PgPoolOptions;
    use std::collections::BTreeMap;
    use std::sync::Arc;
    use tower::ServiceExt;

    // A lazy pool lets the router run without a database; only handlers
    // that actually query would touch it.
    fn test_state() -> (AppState, Arc<MemorySessionStore>) {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unreachable")
            .unwrap();
        let sessions = Arc::new(MemorySessionStore::new());
        let state = AppState::new(
            ProcedureExecutor::new(pool),
            sessions.clone(),
            Arc::new(AppConfig::default()),
            CookieConfig::development(),
        );
        (state, sessions)
    }

    fn seeded_session(state: &AppState, sessions: &MemorySessionStore) -> Session {
        let session = Session::new(
            SessionUser {
                user_id: 7,
                full_name: "Jane Roe".into(),
                service_id: 2,
                service_name: "Head Office".into(),
            },
            state.config.auth.session_lifetime_secs,
        );
        sessions.set(session.clone()).unwrap();
        session
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn protected_endpoint_without_session_returns_401_envelope() {
        let (state, _) = test_state();
        let app = router(state);

        let response = app
            .oneshot(Request::builder().uri("/users").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Session expired");
    }

    #[tokio::test]
    async fn login_with_missing_fields_fails_before_the_database() {
        let (state, _) = test_state();
        let app = router(state);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/auth/login")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert!(json["message"].as_str().unwrap().contains("required"));
    }

    #[tokio::test]
    async fn sidebar_served_from_cache_without_touching_the_database() {
        let (state, sessions) = test_state();
        let session = seeded_session(&state, sessions.as_ref());

        let mut menus = BTreeMap::new();
        menus.insert(
            10,
            MenuNode {
                id: 10,
                name: "Users".into(),
                url: "/users".into(),
                icon: "bi-people".into(),
                parent_id: None,
                has_children: false,
            },
        );
        let mut hierarchy = Hierarchy::new();
        hierarchy.insert(
            1,
            ModuleNode {
                name: "Administration".into(),
                menus,
            },
        );
        state.sidebar.put(7, hierarchy);

        let cookie = format!("{}={}", state.cookies.name, session.id);
        let app = router(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/sidebar")
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["sidebar"]["1"]["menus"]["10"]["name"], "Users");
    }

    #[tokio::test]
    async fn logout_clears_the_session() {
        let (state, sessions) = test_state();
        let session = seeded_session(&state, sessions.as_ref());
        let cookie = format!("{}={}", state.cookies.name, session.id);
        let session_id = session.id.clone();
        let app = router(state);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/auth/logout")
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_owned();
        assert!(set_cookie.contains("Max-Age=0"));
        assert!(sessions.get(&session_id).is_none());
    }

    #[tokio::test]
    async fn rights_matrix_requires_user_id() {
        let (state, sessions) = test_state();
        let session = seeded_session(&state, sessions.as_ref());
        let cookie = format!("{}={}", state.cookies.name, session.id);
        let app = router(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/users/rights")
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["message"], "User ID missing");
    }

    #[tokio::test]
    async fn save_rights_with_malformed_row_reports_invalid_format() {
        let (state, sessions) = test_state();
        let session = seeded_session(&state, sessions.as_ref());
        let cookie = format!("{}={}", state.cookies.name, session.id);
        let app = router(state);

        // second row is missing its menu id
        let body = serde_json::json!({
            "userId": 7,
            "rights": [{ "menuid": 10, "canview": true }, { "canview": true }]
        });

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/users/rights/save")
                    .header(header::COOKIE, cookie)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Invalid data format.");
    }
}
