//! SQLite storage backend.
//!
//! Stores the tenant directory in a single shared-schema SQLite database
//! with a bounded r2d2 connection pool. Suitable for development and
//! single-node deployments; the in-memory mode backs the test suites.

mod backend;
pub(crate) mod schema;

pub use backend::{SqliteBackend, SqliteBackendConfig};
