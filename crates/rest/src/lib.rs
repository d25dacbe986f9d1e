//! # atrium-rest - Tenant Directory HTTP API
//!
//! This crate exposes the Atrium tenant directory over HTTP. Every
//! request is bound to an acting principal before any handler runs, and
//! all data access goes through the policy-enforced session API of
//! `atrium-persistence`, so tenant isolation holds end to end.
//!
//! ## Principal Resolution
//!
//! The acting principal is taken from, in priority order:
//!
//! 1. the `X-Tenant-ID` header (configurable)
//! 2. the `tenant_id` cookie (configurable)
//! 3. a bearer token claim (reserved, not yet wired)
//!
//! Health endpoints and the tenant collection endpoints work without a
//! principal; all other routes reject unidentified requests with 400
//! unless a default principal is configured.
//!
//! ## API Endpoints
//!
//! | Operation | HTTP Method | URL Pattern |
//! |-----------|-------------|-------------|
//! | create | POST | `/api/v1/tenants` |
//! | list | GET | `/api/v1/tenants` |
//! | read | GET | `/api/v1/tenants/{id}` |
//! | update | PUT | `/api/v1/tenants/{id}` |
//! | delete | DELETE | `/api/v1/tenants/{id}` |
//! | hierarchy | GET | `/api/v1/tenants/{id}/hierarchy` |
//! | health | GET | `/health`, `/health/database`, `/health/liveness`, `/health/readiness` |
//!
//! Health endpoints are also mounted under `/api/v1`.
//!
//! ## Error Handling
//!
//! Errors are returned as `{"error": {"code": "...", "message": "..."}}`
//! with conventional status codes. A tenant outside the principal's
//! reach is always a 404, never a 403: the API does not reveal whether
//! an invisible row exists.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use atrium_rest::{ServerConfig, create_app};
//! use atrium_persistence::backends::sqlite::SqliteBackend;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = SqliteBackend::open("atrium.db")?;
//!     backend.init_schema()?;
//!
//!     let app = create_app(backend);
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`config`] - Server configuration
//! - [`error`] - Error types and HTTP mapping
//! - [`state`] - Application state (backend, configuration)
//! - [`middleware`] - Principal binding
//! - [`extractors`] - Principal extractor for handlers
//! - [`handlers`] - HTTP request handlers
//! - [`routing`] - Route configuration

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod routing;
pub mod state;

pub use config::ServerConfig;
pub use error::{RestError, RestResult};
pub use state::AppState;

use std::sync::Arc;

use atrium_persistence::backends::sqlite::SqliteBackend;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Creates the Axum application with default configuration.
///
/// For more control, use [`create_app_with_config`].
pub fn create_app(backend: SqliteBackend) -> Router {
    create_app_with_config(backend, ServerConfig::default())
}

/// Creates the Axum application with custom configuration.
///
/// Sets up all routes, the principal middleware, tracing, timeouts and
/// CORS.
pub fn create_app_with_config(backend: SqliteBackend, config: ServerConfig) -> Router {
    info!("Creating tenant directory API server");

    let state = AppState::new(Arc::new(backend), config.clone());

    let router = routing::create_routes(state);

    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            axum::http::StatusCode::REQUEST_TIMEOUT,
            std::time::Duration::from_secs(config.request_timeout),
        ));

    let router = if config.enable_cors {
        let cors = build_cors_layer(&config);
        router.layer(cors)
    } else {
        router
    };

    router.layer(service_builder)
}

/// Builds the CORS layer based on configuration.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let mut cors = CorsLayer::new();

    if config.cors_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    if config.cors_methods == "*" {
        cors = cors.allow_methods(Any);
    } else {
        let methods: Vec<_> = config
            .cors_methods
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_methods(methods);
    }

    if config.cors_headers == "*" {
        cors = cors.allow_headers(Any);
    } else {
        let headers: Vec<_> = config
            .cors_headers
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_headers(headers);
    }

    cors
}

/// Initializes the tracing subscriber for logging.
///
/// Call once at application startup.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("atrium_rest={},tower_http=debug", level)));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
