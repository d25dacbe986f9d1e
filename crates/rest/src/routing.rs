//! Route configuration.

use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use crate::handlers;
use crate::middleware::bind_principal;
use crate::state::AppState;

/// Creates all API routes with the principal middleware installed.
///
/// Health endpoints are mounted both at the root (for load balancers)
/// and under `/api/v1` (for API clients).
pub fn create_routes(state: AppState) -> Router {
    let health = Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/health/database", get(handlers::database_health_handler))
        .route("/health/liveness", get(handlers::liveness_handler))
        .route("/health/readiness", get(handlers::readiness_handler));

    let tenants = Router::new()
        .route("/tenants", post(handlers::create_handler))
        .route("/tenants", get(handlers::list_handler))
        .route("/tenants/{id}", get(handlers::get_handler))
        .route("/tenants/{id}", put(handlers::update_handler))
        .route("/tenants/{id}", delete(handlers::delete_handler))
        .route("/tenants/{id}/hierarchy", get(handlers::hierarchy_handler));

    Router::new()
        .merge(health.clone())
        .nest("/api/v1", health.merge(tenants))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            bind_principal,
        ))
        .with_state(state)
}
