//! Tenant records and write payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::TenantId;
use crate::policy::AccessTarget;

/// Position of a tenant in the two-level hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TenantKind {
    /// Root-level organization. Never has a parent.
    Parent,
    /// Direct child of a parent organization. Never has children.
    Subsidiary,
}

impl TenantKind {
    /// Returns the lowercase wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            TenantKind::Parent => "parent",
            TenantKind::Subsidiary => "subsidiary",
        }
    }

    /// Parses the lowercase wire representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "parent" => Some(TenantKind::Parent),
            "subsidiary" => Some(TenantKind::Subsidiary),
            _ => None,
        }
    }
}

impl fmt::Display for TenantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored tenant row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenantRecord {
    /// Unique identifier, generated on creation.
    pub id: TenantId,
    /// Display name, unique among siblings.
    pub name: String,
    /// Hierarchy position.
    pub kind: TenantKind,
    /// Owning parent, present iff `kind` is [`TenantKind::Subsidiary`].
    pub parent_id: Option<TenantId>,
    /// Opaque structured attributes.
    pub metadata: Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last mutation.
    pub updated_at: DateTime<Utc>,
}

impl TenantRecord {
    /// Returns the identity fields the access policy decides on.
    pub fn as_target(&self) -> AccessTarget<'_> {
        AccessTarget {
            id: &self.id,
            parent_id: self.parent_id.as_ref(),
        }
    }

    /// Returns true for root-level tenants.
    pub fn is_parent(&self) -> bool {
        self.kind == TenantKind::Parent
    }
}

/// Payload for creating a tenant.
///
/// The identifier and timestamps are assigned by the store; `type` and
/// `parent_id` are fixed for the lifetime of the row.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTenant {
    /// Requested display name. Trimmed and length-checked before insert.
    pub name: String,
    /// Hierarchy position.
    pub kind: TenantKind,
    /// Owning parent, required for subsidiaries.
    #[serde(default)]
    pub parent_id: Option<TenantId>,
    /// Opaque structured attributes, defaults to an empty object.
    #[serde(default)]
    pub metadata: Option<Value>,
}

/// Mutable fields of a tenant.
///
/// `kind` and `parent_id` are immutable post-creation by construction:
/// there is no way to express a change to them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TenantPatch {
    /// Replacement name, revalidated for sibling uniqueness.
    #[serde(default)]
    pub name: Option<String>,
    /// Replacement metadata object. Replaces the whole value.
    #[serde(default)]
    pub metadata: Option<Value>,
}

impl TenantPatch {
    /// Returns true when the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.metadata.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(kind: TenantKind, parent: Option<&str>) -> TenantRecord {
        TenantRecord {
            id: TenantId::new("t1"),
            name: "Acme".to_string(),
            kind,
            parent_id: parent.map(TenantId::new),
            metadata: json!({}),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&TenantKind::Parent).unwrap(),
            "\"parent\""
        );
        assert_eq!(
            serde_json::to_string(&TenantKind::Subsidiary).unwrap(),
            "\"subsidiary\""
        );
    }

    #[test]
    fn test_kind_parse_round_trip() {
        assert_eq!(TenantKind::parse("parent"), Some(TenantKind::Parent));
        assert_eq!(
            TenantKind::parse("subsidiary"),
            Some(TenantKind::Subsidiary)
        );
        assert_eq!(TenantKind::parse("PARENT"), None);
        assert_eq!(TenantKind::parse(""), None);
    }

    #[test]
    fn test_as_target() {
        let rec = record(TenantKind::Subsidiary, Some("p1"));
        let target = rec.as_target();
        assert_eq!(target.id, &rec.id);
        assert_eq!(target.parent_id, Some(&TenantId::new("p1")));
    }

    #[test]
    fn test_is_parent() {
        assert!(record(TenantKind::Parent, None).is_parent());
        assert!(!record(TenantKind::Subsidiary, Some("p1")).is_parent());
    }

    #[test]
    fn test_new_tenant_deserializes_with_defaults() {
        let new: NewTenant =
            serde_json::from_value(json!({"name": "Acme", "kind": "parent"})).unwrap();
        assert_eq!(new.name, "Acme");
        assert_eq!(new.kind, TenantKind::Parent);
        assert!(new.parent_id.is_none());
        assert!(new.metadata.is_none());
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(TenantPatch::default().is_empty());
        let patch = TenantPatch {
            name: Some("New".to_string()),
            metadata: None,
        };
        assert!(!patch.is_empty());
    }
}
