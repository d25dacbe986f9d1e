//! SQLite schema definitions and migrations.

use rusqlite::Connection;

use crate::error::{BackendError, StorageError, StorageResult};

/// Current schema version.
pub const SCHEMA_VERSION: i32 = 1;

/// Initialize the database schema.
pub fn initialize_schema(conn: &Connection) -> StorageResult<()> {
    let current_version = get_schema_version(conn)?;

    if current_version == 0 {
        create_schema_v1(conn)?;
        set_schema_version(conn, 1)?;
    } else if current_version > SCHEMA_VERSION {
        return Err(internal(format!(
            "Database schema version {} is newer than supported version {}",
            current_version, SCHEMA_VERSION
        )));
    }

    Ok(())
}

fn internal(message: String) -> StorageError {
    StorageError::Backend(BackendError::Internal { message })
}

/// Get the current schema version.
fn get_schema_version(conn: &Connection) -> StorageResult<i32> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER NOT NULL
        )",
        [],
    )
    .map_err(|e| internal(format!("Failed to create schema_version table: {}", e)))?;

    let version: Option<i32> = conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get(0)
        })
        .ok();

    Ok(version.unwrap_or(0))
}

/// Set the schema version.
fn set_schema_version(conn: &Connection, version: i32) -> StorageResult<()> {
    conn.execute("DELETE FROM schema_version", [])
        .map_err(|e| internal(format!("Failed to clear schema_version: {}", e)))?;

    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )
    .map_err(|e| internal(format!("Failed to set schema_version: {}", e)))?;

    Ok(())
}

/// Create the initial schema (version 1).
///
/// The CHECK constraints duplicate the write validation engine's invariants
/// as a last line of defense; application code reports the violations with
/// proper error types before the database ever sees them.
fn create_schema_v1(conn: &Connection) -> StorageResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS tenants (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            kind TEXT NOT NULL,
            parent_id TEXT REFERENCES tenants(id),
            metadata TEXT NOT NULL DEFAULT '{}',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            CONSTRAINT ck_tenant_kind CHECK (kind IN ('parent', 'subsidiary')),
            CONSTRAINT ck_tenant_name_not_empty CHECK (length(trim(name)) > 0),
            CONSTRAINT ck_tenant_no_self_reference CHECK (id <> parent_id),
            CONSTRAINT ck_tenant_parent_logic CHECK (
                (kind = 'parent' AND parent_id IS NULL)
                OR (kind = 'subsidiary' AND parent_id IS NOT NULL)
            )
        )",
        [],
    )
    .map_err(|e| internal(format!("Failed to create tenants table: {}", e)))?;

    let indexes = [
        // Sibling-name uniqueness; COALESCE folds root-level tenants into
        // one scope since NULLs never compare equal in a unique index.
        "CREATE UNIQUE INDEX IF NOT EXISTS uq_tenant_name_per_parent
         ON tenants(name, COALESCE(parent_id, ''))",
        "CREATE INDEX IF NOT EXISTS idx_tenants_parent ON tenants(parent_id)",
        "CREATE INDEX IF NOT EXISTS idx_tenants_created ON tenants(created_at)",
    ];

    for index_sql in &indexes {
        conn.execute(index_sql, [])
            .map_err(|e| internal(format!("Failed to create index: {}", e)))?;
    }

    Ok(())
}
