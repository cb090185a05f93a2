//! Health endpoints: a bare liveness probe and a readiness check that
//! pings the database pool.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use ld_db::Database;

/// State for the health routes.
pub struct HealthState {
    pub db: Arc<Database>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// GET /health/live
pub async fn liveness() -> &'static str {
    "OK"
}

/// GET /health/ready
pub async fn readiness(State(state): State<Arc<HealthState>>) -> (StatusCode, Json<HealthReport>) {
    let status = match state.db.ping().await {
        Ok(()) => HealthStatus::Healthy,
        Err(e) => {
            tracing::warn!(error = %e, "readiness ping failed");
            HealthStatus::Unhealthy
        }
    };

    let http_status = match status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (
        http_status,
        Json(HealthReport {
            status,
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: chrono::Utc::now(),
        }),
    )
}
