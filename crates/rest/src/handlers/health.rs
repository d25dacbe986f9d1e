//! Health check endpoint handlers.
//!
//! Simple endpoints for monitoring and load balancers. All of them are
//! reachable without a tenant context.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::error::RestResult;
use crate::state::AppState;

/// Handler for the basic health check.
///
/// # HTTP Request
///
/// `GET [base]/health`
pub async fn health_handler() -> impl IntoResponse {
    let body = serde_json::json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    });
    (StatusCode::OK, Json(body))
}

/// Handler for the database connectivity check.
///
/// # HTTP Request
///
/// `GET [base]/health/database`
///
/// # Response
///
/// - `200 OK` - Database reachable
/// - `503 Service Unavailable` - Database unreachable
pub async fn database_health_handler(State(state): State<AppState>) -> RestResult<Response> {
    debug!("Processing database health check");

    let (status, database) = match state.backend().health_check() {
        Ok(()) => (StatusCode::OK, "ok"),
        Err(_) => (StatusCode::SERVICE_UNAVAILABLE, "unavailable"),
    };

    let body = serde_json::json!({
        "status": if status == StatusCode::OK { "healthy" } else { "unhealthy" },
        "service": env!("CARGO_PKG_NAME"),
        "database": database,
        "timestamp": chrono::Utc::now().to_rfc3339()
    });
    Ok((status, Json(body)).into_response())
}

/// Handler for a liveness probe.
///
/// # HTTP Request
///
/// `GET [base]/health/liveness`
pub async fn liveness_handler() -> impl IntoResponse {
    StatusCode::OK
}

/// Handler for a readiness probe.
///
/// Ready means the storage backend answers queries.
///
/// # HTTP Request
///
/// `GET [base]/health/readiness`
pub async fn readiness_handler(State(state): State<AppState>) -> RestResult<Response> {
    debug!("Processing readiness check");

    match state.backend().health_check() {
        Ok(()) => {
            let body = serde_json::json!({
                "status": "ready",
                "checks": { "storage": "ok" }
            });
            Ok((StatusCode::OK, Json(body)).into_response())
        }
        Err(_) => {
            let body = serde_json::json!({
                "status": "not-ready",
                "checks": { "storage": "unavailable" }
            });
            Ok((StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response())
        }
    }
}
