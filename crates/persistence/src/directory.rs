//! Tenant directory: raw row access.
//!
//! These are the only functions that touch the `tenants` table, and they
//! apply no access policy at all. They are crate-private on purpose: the
//! sole public path to tenant data is the policy-enforced session API in
//! [`crate::enforcer`], so no caller can bypass isolation.

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, ErrorCode, OptionalExtension, Row, params};

use crate::error::{StorageError, StorageResult, ValidationError};
use crate::tenant::{TenantId, TenantKind, TenantRecord};

const COLUMNS: &str = "id, name, kind, parent_id, metadata, created_at, updated_at";

fn parse_timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn map_row(row: &Row<'_>) -> rusqlite::Result<TenantRecord> {
    let kind_raw: String = row.get(2)?;
    let kind = TenantKind::parse(&kind_raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            2,
            Type::Text,
            format!("unknown tenant kind '{}'", kind_raw).into(),
        )
    })?;

    let metadata_raw: String = row.get(4)?;
    let metadata = serde_json::from_str(&metadata_raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;

    Ok(TenantRecord {
        id: TenantId::new(row.get::<_, String>(0)?),
        name: row.get(1)?,
        kind,
        parent_id: row.get::<_, Option<String>>(3)?.map(TenantId::new),
        metadata,
        created_at: parse_timestamp(row, 5)?,
        updated_at: parse_timestamp(row, 6)?,
    })
}

/// Fetches a single row by id.
pub(crate) fn fetch(conn: &Connection, id: &TenantId) -> StorageResult<Option<TenantRecord>> {
    let sql = format!("SELECT {} FROM tenants WHERE id = ?1", COLUMNS);
    let row = conn
        .query_row(&sql, params![id.as_str()], map_row)
        .optional()?;
    Ok(row)
}

/// Returns true when `name` is already used by a sibling under `parent_id`.
///
/// `exclude` skips one row, so updates do not collide with themselves.
pub(crate) fn name_taken(
    conn: &Connection,
    name: &str,
    parent_id: Option<&TenantId>,
    exclude: Option<&TenantId>,
) -> StorageResult<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM tenants
         WHERE name = ?1
           AND COALESCE(parent_id, '') = COALESCE(?2, '')
           AND (?3 IS NULL OR id <> ?3)",
        params![
            name,
            parent_id.map(TenantId::as_str),
            exclude.map(TenantId::as_str)
        ],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Lists the direct subsidiaries of `parent_id`, oldest first.
pub(crate) fn children(
    conn: &Connection,
    parent_id: &TenantId,
) -> StorageResult<Vec<TenantRecord>> {
    let sql = format!(
        "SELECT {} FROM tenants WHERE parent_id = ?1 ORDER BY created_at ASC, rowid ASC",
        COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![parent_id.as_str()], map_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Counts the direct subsidiaries of `parent_id`.
pub(crate) fn child_count(conn: &Connection, parent_id: &TenantId) -> StorageResult<u64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM tenants WHERE parent_id = ?1",
        params![parent_id.as_str()],
        |row| row.get(0),
    )?;
    Ok(count as u64)
}

/// Lists all rows, newest first, optionally filtered by kind.
pub(crate) fn list(
    conn: &Connection,
    kind: Option<TenantKind>,
) -> StorageResult<Vec<TenantRecord>> {
    let sql = format!(
        "SELECT {} FROM tenants
         WHERE (?1 IS NULL OR kind = ?1)
         ORDER BY created_at DESC, rowid DESC",
        COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![kind.map(|k| k.as_str())], map_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Classifies a write failure.
///
/// The validators run before any statement, so a constraint violation
/// surfacing here is the sibling-name unique index losing a race with a
/// concurrent writer; report it as the same conflict the pre-check would
/// have raised instead of an internal error.
fn map_write_error(err: rusqlite::Error, name: &str) -> StorageError {
    match &err {
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation => {
            ValidationError::DuplicateName {
                name: name.to_string(),
            }
            .into()
        }
        _ => err.into(),
    }
}

/// Inserts a fully formed row.
pub(crate) fn insert(conn: &Connection, record: &TenantRecord) -> StorageResult<()> {
    conn.execute(
        "INSERT INTO tenants (id, name, kind, parent_id, metadata, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            record.id.as_str(),
            record.name,
            record.kind.as_str(),
            record.parent_id.as_ref().map(TenantId::as_str),
            serde_json::to_string(&record.metadata).unwrap_or_else(|_| "{}".to_string()),
            record.created_at.to_rfc3339(),
            record.updated_at.to_rfc3339(),
        ],
    )
    .map_err(|e| map_write_error(e, &record.name))?;
    Ok(())
}

/// Writes the mutable fields of a row, returning the affected row count.
pub(crate) fn update(conn: &Connection, record: &TenantRecord) -> StorageResult<usize> {
    let rows = conn
        .execute(
            "UPDATE tenants SET name = ?2, metadata = ?3, updated_at = ?4 WHERE id = ?1",
            params![
                record.id.as_str(),
                record.name,
                serde_json::to_string(&record.metadata).unwrap_or_else(|_| "{}".to_string()),
                record.updated_at.to_rfc3339(),
            ],
        )
        .map_err(|e| map_write_error(e, &record.name))?;
    Ok(rows)
}

/// Deletes a row, returning the affected row count.
pub(crate) fn delete(conn: &Connection, id: &TenantId) -> StorageResult<usize> {
    let rows = conn.execute("DELETE FROM tenants WHERE id = ?1", params![id.as_str()])?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::sqlite::schema;
    use serde_json::json;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        schema::initialize_schema(&conn).unwrap();
        conn
    }

    fn record(id: &str, name: &str, kind: TenantKind, parent: Option<&str>) -> TenantRecord {
        TenantRecord {
            id: TenantId::new(id),
            name: name.to_string(),
            kind,
            parent_id: parent.map(TenantId::new),
            metadata: json!({"region": "eu"}),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_insert_and_fetch_round_trip() {
        let conn = test_conn();
        let rec = record("p1", "Acme", TenantKind::Parent, None);
        insert(&conn, &rec).unwrap();

        let fetched = fetch(&conn, &rec.id).unwrap().unwrap();
        assert_eq!(fetched.id, rec.id);
        assert_eq!(fetched.name, "Acme");
        assert_eq!(fetched.kind, TenantKind::Parent);
        assert_eq!(fetched.metadata, json!({"region": "eu"}));
    }

    #[test]
    fn test_fetch_missing_returns_none() {
        let conn = test_conn();
        assert!(fetch(&conn, &TenantId::new("nope")).unwrap().is_none());
    }

    #[test]
    fn test_name_taken_scoped_by_parent() {
        let conn = test_conn();
        insert(&conn, &record("p1", "Acme", TenantKind::Parent, None)).unwrap();
        insert(
            &conn,
            &record("s1", "Ops", TenantKind::Subsidiary, Some("p1")),
        )
        .unwrap();

        let p1 = TenantId::new("p1");
        assert!(name_taken(&conn, "Acme", None, None).unwrap());
        assert!(name_taken(&conn, "Ops", Some(&p1), None).unwrap());
        // Same name in a different scope is free.
        assert!(!name_taken(&conn, "Ops", None, None).unwrap());
        assert!(!name_taken(&conn, "Acme", Some(&p1), None).unwrap());
    }

    #[test]
    fn test_name_taken_excludes_self() {
        let conn = test_conn();
        insert(&conn, &record("p1", "Acme", TenantKind::Parent, None)).unwrap();

        let p1 = TenantId::new("p1");
        assert!(!name_taken(&conn, "Acme", None, Some(&p1)).unwrap());
    }

    #[test]
    fn test_children_and_count() {
        let conn = test_conn();
        insert(&conn, &record("p1", "Acme", TenantKind::Parent, None)).unwrap();
        insert(
            &conn,
            &record("s1", "Ops", TenantKind::Subsidiary, Some("p1")),
        )
        .unwrap();
        insert(
            &conn,
            &record("s2", "Sales", TenantKind::Subsidiary, Some("p1")),
        )
        .unwrap();

        let p1 = TenantId::new("p1");
        assert_eq!(child_count(&conn, &p1).unwrap(), 2);
        let kids = children(&conn, &p1).unwrap();
        assert_eq!(kids.len(), 2);
        assert!(kids.iter().all(|k| k.parent_id == Some(p1.clone())));
    }

    #[test]
    fn test_list_filters_by_kind() {
        let conn = test_conn();
        insert(&conn, &record("p1", "Acme", TenantKind::Parent, None)).unwrap();
        insert(
            &conn,
            &record("s1", "Ops", TenantKind::Subsidiary, Some("p1")),
        )
        .unwrap();

        assert_eq!(list(&conn, None).unwrap().len(), 2);
        assert_eq!(list(&conn, Some(TenantKind::Parent)).unwrap().len(), 1);
        assert_eq!(list(&conn, Some(TenantKind::Subsidiary)).unwrap().len(), 1);
    }

    #[test]
    fn test_insert_name_collision_is_duplicate_name() {
        let conn = test_conn();
        insert(&conn, &record("p1", "Acme", TenantKind::Parent, None)).unwrap();

        // Second insert bypasses the pre-check and hits the unique index
        // directly, as a concurrent writer would.
        let result = insert(&conn, &record("p2", "Acme", TenantKind::Parent, None));
        assert!(matches!(
            result,
            Err(StorageError::Validation(
                ValidationError::DuplicateName { .. }
            ))
        ));
    }

    #[test]
    fn test_update_name_collision_is_duplicate_name() {
        let conn = test_conn();
        insert(&conn, &record("p1", "Acme", TenantKind::Parent, None)).unwrap();
        let mut other = record("p2", "Borealis", TenantKind::Parent, None);
        insert(&conn, &other).unwrap();

        other.name = "Acme".to_string();
        let result = update(&conn, &other);
        assert!(matches!(
            result,
            Err(StorageError::Validation(
                ValidationError::DuplicateName { .. }
            ))
        ));
    }

    #[test]
    fn test_update_and_delete_report_rows() {
        let conn = test_conn();
        let mut rec = record("p1", "Acme", TenantKind::Parent, None);
        insert(&conn, &rec).unwrap();

        rec.name = "Acme Holdings".to_string();
        assert_eq!(update(&conn, &rec).unwrap(), 1);
        assert_eq!(
            fetch(&conn, &rec.id).unwrap().unwrap().name,
            "Acme Holdings"
        );

        assert_eq!(delete(&conn, &rec.id).unwrap(), 1);
        assert_eq!(delete(&conn, &rec.id).unwrap(), 0);
    }
}
