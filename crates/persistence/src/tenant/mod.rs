//! Tenant identity and record types.
//!
//! A tenant is the sole entity the engine stores: an organization arranged
//! in a two-level hierarchy of parents and their direct subsidiaries. The
//! types here carry no access logic; visibility decisions live in
//! [`crate::policy`] and are applied by the session operations.

mod id;
mod record;

pub use id::TenantId;
pub use record::{NewTenant, TenantKind, TenantPatch, TenantRecord};

/// Maximum length of a tenant name, in characters.
pub const MAX_NAME_LENGTH: usize = 200;
