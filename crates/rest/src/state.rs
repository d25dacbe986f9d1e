//! Application state for the tenant directory API.

use std::sync::Arc;

use atrium_persistence::backends::sqlite::SqliteBackend;
use atrium_persistence::{Session, TenantId};

use crate::config::ServerConfig;
use crate::error::RestResult;

/// Shared application state for the API.
///
/// Holds the storage backend and server configuration; cloning is cheap
/// since both are behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    backend: Arc<SqliteBackend>,
    config: Arc<ServerConfig>,
}

impl AppState {
    /// Creates a new AppState with the given backend and configuration.
    pub fn new(backend: Arc<SqliteBackend>, config: ServerConfig) -> Self {
        Self {
            backend,
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the storage backend.
    pub fn backend(&self) -> &SqliteBackend {
        &self.backend
    }

    /// Returns a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Acquires a session bound to `principal`, or an unbound one when
    /// no principal was resolved for the request.
    pub fn session(&self, principal: Option<&TenantId>) -> RestResult<Session> {
        let mut session = self.backend.session()?;
        if let Some(id) = principal {
            session.set_context(id)?;
        }
        Ok(session)
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
