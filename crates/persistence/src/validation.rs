//! Write validation engine.
//!
//! Structural invariants enforced on every insert and update, independent
//! of access control:
//!
//! - names are non-empty after trimming and at most
//!   [`MAX_NAME_LENGTH`](crate::tenant::MAX_NAME_LENGTH) characters
//! - `parent` tenants carry no parent reference, `subsidiary` tenants
//!   require one
//! - a subsidiary's parent must exist and itself be a `parent` (the
//!   hierarchy is capped at two levels)
//! - no tenant references itself as its parent
//!
//! Sibling-name uniqueness is checked by the session operations against the
//! directory, since it needs a lookup; everything here is a pure check.

use crate::error::ValidationError;
use crate::tenant::{MAX_NAME_LENGTH, TenantId, TenantKind, TenantRecord};

/// Trims and length-checks a tenant name, returning the normalized form.
pub fn normalized_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    let length = trimmed.chars().count();
    if length > MAX_NAME_LENGTH {
        return Err(ValidationError::NameTooLong {
            length,
            max: MAX_NAME_LENGTH,
        });
    }
    Ok(trimmed.to_string())
}

/// Checks that the kind and parent reference are mutually consistent.
pub fn check_shape(kind: TenantKind, parent_id: Option<&TenantId>) -> Result<(), ValidationError> {
    match (kind, parent_id) {
        (TenantKind::Parent, Some(_)) => Err(ValidationError::UnexpectedParent),
        (TenantKind::Subsidiary, None) => Err(ValidationError::MissingParent),
        _ => Ok(()),
    }
}

/// Checks a resolved parent row against the depth cap.
///
/// The caller resolves `parent_id` to a row first; a missing row is
/// reported as [`ValidationError::ParentNotFound`] by the caller so that
/// "does not exist" and "not visible" stay indistinguishable.
pub fn check_parent(parent: &TenantRecord) -> Result<(), ValidationError> {
    if parent.kind != TenantKind::Parent {
        return Err(ValidationError::DepthExceeded {
            id: parent.id.clone(),
        });
    }
    Ok(())
}

/// Rejects a row that names itself as its parent.
pub fn check_self_reference(
    id: &TenantId,
    parent_id: Option<&TenantId>,
) -> Result<(), ValidationError> {
    if parent_id == Some(id) {
        return Err(ValidationError::SelfReference { id: id.clone() });
    }
    Ok(())
}
