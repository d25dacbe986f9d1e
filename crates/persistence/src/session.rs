//! Sessions and the per-session context store.
//!
//! A [`Session`] is one unit of work: it owns one pooled connection plus
//! the mutable slot holding the currently bound principal. The slot lives
//! in the wrapper, not in any global or connection-level state, so when a
//! session is dropped and its connection returns to the pool, the next
//! session built on that same connection necessarily starts unbound. This
//! replaces the classic "session variable" pattern with state that the
//! borrow checker can see.
//!
//! Binding a principal validates that it names an existing tenant; the
//! access rules it unlocks are evaluated per operation in
//! [`crate::enforcer`], never cached.

use r2d2::PooledConnection;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use tracing::debug;

use crate::directory;
use crate::error::{StorageResult, TenantError};
use crate::tenant::TenantId;

/// One pooled unit of work with its bound principal.
///
/// Acquired from [`SqliteBackend::session`](crate::backends::sqlite::SqliteBackend::session).
/// All tenant operations are methods on this type; see [`crate::enforcer`].
pub struct Session {
    conn: PooledConnection<SqliteConnectionManager>,
    principal: Option<TenantId>,
}

impl Session {
    pub(crate) fn new(conn: PooledConnection<SqliteConnectionManager>) -> Self {
        Self {
            conn,
            principal: None,
        }
    }

    /// Binds `id` as the principal for the rest of this session.
    ///
    /// Fails with [`TenantError::InvalidContext`] when no such tenant
    /// exists. Rebinding over an existing principal is allowed.
    pub fn set_context(&mut self, id: &TenantId) -> StorageResult<()> {
        if directory::fetch(self.conn(), id)?.is_none() {
            return Err(TenantError::InvalidContext { id: id.clone() }.into());
        }
        debug!(tenant = %id, "bound session context");
        self.principal = Some(id.clone());
        Ok(())
    }

    /// Returns the currently bound principal, if any.
    pub fn context(&self) -> Option<&TenantId> {
        self.principal.as_ref()
    }

    /// Resets the principal slot.
    ///
    /// Dropping the session has the same effect; this exists for code
    /// that wants to keep the session but shed its identity mid-flight,
    /// for example on a rollback path.
    pub fn clear_context(&mut self) {
        if let Some(id) = self.principal.take() {
            debug!(tenant = %id, "cleared session context");
        }
    }

    /// Runs a trivial query to verify the underlying connection.
    pub fn ping(&self) -> StorageResult<()> {
        self.conn().query_row("SELECT 1", [], |_| Ok(()))?;
        Ok(())
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("principal", &self.principal)
            .finish_non_exhaustive()
    }
}
