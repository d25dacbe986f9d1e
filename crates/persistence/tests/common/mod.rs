//! Shared helpers for persistence integration tests.
//!
//! The in-memory backend holds a single pooled connection, so helpers take
//! and return sessions instead of hiding them; drop a session before
//! acquiring the next one.

use atrium_persistence::backends::sqlite::SqliteBackend;
use atrium_persistence::{NewTenant, Session, TenantId, TenantKind, TenantRecord};

pub fn memory_backend() -> SqliteBackend {
    let backend = SqliteBackend::in_memory().unwrap();
    backend.init_schema().unwrap();
    backend
}

pub fn create_parent(session: &mut Session, name: &str) -> TenantRecord {
    session
        .insert(NewTenant {
            name: name.to_string(),
            kind: TenantKind::Parent,
            parent_id: None,
            metadata: None,
        })
        .unwrap()
}

/// Creates a subsidiary under `parent`, binding the parent as principal.
///
/// Leaves the session bound to the parent.
pub fn create_child(session: &mut Session, parent: &TenantId, name: &str) -> TenantRecord {
    session.set_context(parent).unwrap();
    session
        .insert(NewTenant {
            name: name.to_string(),
            kind: TenantKind::Subsidiary,
            parent_id: Some(parent.clone()),
            metadata: None,
        })
        .unwrap()
}
