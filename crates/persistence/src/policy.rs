//! Access policy engine.
//!
//! A single pure function decides every visibility question in the system:
//! may the bound principal see or mutate a given tenant row. The rules are
//! deliberately minimal and non-transitive:
//!
//! - no principal bound: deny (fail closed)
//! - a tenant always sees itself
//! - a parent sees its direct subsidiaries
//! - everything else: deny
//!
//! A subsidiary never sees its parent, its siblings, or anything else.
//! The function is re-evaluated on every operation and its result is never
//! cached across requests.

use crate::tenant::TenantId;

/// The identity fields of a candidate row, as seen by the policy.
///
/// Borrowed from a [`crate::tenant::TenantRecord`] via
/// [`TenantRecord::as_target`](crate::tenant::TenantRecord::as_target);
/// the policy needs nothing else about the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessTarget<'a> {
    /// The row's own identifier.
    pub id: &'a TenantId,
    /// The row's parent, if it is a subsidiary.
    pub parent_id: Option<&'a TenantId>,
}

/// Decides whether `principal` may see or mutate `target`.
pub fn can_access(principal: Option<&TenantId>, target: AccessTarget<'_>) -> bool {
    let Some(principal) = principal else {
        return false;
    };
    if principal == target.id {
        return true;
    }
    target.parent_id == Some(principal)
}
