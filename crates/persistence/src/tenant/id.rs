//! Tenant identifier newtype.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier for a tenant.
///
/// Identifiers are generated as UUIDs on creation and never change. The
/// newtype keeps tenant identifiers from being confused with other strings
/// at API boundaries; nothing in the engine inspects their structure.
///
/// # Example
///
/// ```
/// use atrium_persistence::tenant::TenantId;
///
/// let id = TenantId::new("acme-corp");
/// assert_eq!(id.as_str(), "acme-corp");
///
/// let generated = TenantId::generate();
/// assert_ne!(generated, id);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(String);

impl TenantId {
    /// Creates a tenant ID from an existing identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh random tenant ID.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the ID and returns the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TenantId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TenantId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for TenantId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
