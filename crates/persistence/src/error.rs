//! Error types for the Atrium persistence layer.
//!
//! Errors are grouped by concern and wrapped in the top-level [`StorageError`]
//! enum. Most callers only need [`StorageResult`] and the `?` operator; the
//! REST layer pattern-matches the inner enums to pick status codes.
//!
//! Note that "row is not visible to the bound principal" is deliberately not
//! an error anywhere in this module: invisible rows surface as `Ok(None)` or
//! zero rows affected, indistinguishable from genuine non-existence.

use thiserror::Error;

use crate::tenant::TenantId;

/// Top-level error type for all storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Tenant context errors.
    #[error(transparent)]
    Tenant(#[from] TenantError),

    /// Write validation errors.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Backend errors.
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Errors binding or using a tenant context.
#[derive(Debug, Error)]
pub enum TenantError {
    /// The principal being bound does not name an existing tenant.
    #[error("Cannot bind context: tenant '{id}' does not exist")]
    InvalidContext {
        /// The rejected principal identifier.
        id: TenantId,
    },
}

/// Hierarchy and uniqueness invariant violations, raised at write time.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Tenant name is empty after trimming.
    #[error("Tenant name must not be empty")]
    EmptyName,

    /// Tenant name exceeds the maximum length.
    #[error("Tenant name is {length} characters, maximum is {max}")]
    NameTooLong {
        /// Actual length of the submitted name.
        length: usize,
        /// Maximum permitted length.
        max: usize,
    },

    /// Another tenant with the same name exists under the same parent.
    #[error("Tenant name '{name}' already exists under the same parent")]
    DuplicateName {
        /// The conflicting name.
        name: String,
    },

    /// A subsidiary was submitted without a parent reference.
    #[error("Subsidiary tenants require a parent_id")]
    MissingParent,

    /// A parent tenant was submitted with a parent reference.
    #[error("Parent tenants must not reference a parent_id")]
    UnexpectedParent,

    /// The referenced parent does not exist (or is not visible to the
    /// bound principal; the two cases are not distinguished).
    #[error("Parent tenant '{id}' not found")]
    ParentNotFound {
        /// The missing parent identifier.
        id: TenantId,
    },

    /// The referenced parent is itself a subsidiary. The hierarchy is
    /// capped at two levels.
    #[error("Tenant '{id}' is a subsidiary and cannot have subsidiaries of its own")]
    DepthExceeded {
        /// The subsidiary that was named as a parent.
        id: TenantId,
    },

    /// A tenant referenced itself as its parent.
    #[error("Tenant '{id}' cannot be its own parent")]
    SelfReference {
        /// The self-referencing identifier.
        id: TenantId,
    },

    /// Delete was blocked because subsidiaries still exist.
    #[error("Tenant '{id}' has {count} subsidiaries and cannot be deleted")]
    HasSubsidiaries {
        /// The parent tenant.
        id: TenantId,
        /// Number of remaining subsidiaries.
        count: u64,
    },
}

/// Backend infrastructure errors.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Failed to acquire a connection from the pool.
    #[error("Connection failed: {message}")]
    ConnectionFailed {
        /// Details of the failure.
        message: String,
    },

    /// An internal backend error.
    #[error("Internal backend error: {message}")]
    Internal {
        /// Details of the failure.
        message: String,
    },
}

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::Backend(BackendError::Internal {
            message: err.to_string(),
        })
    }
}

#[cfg(feature = "sqlite")]
impl From<r2d2::Error> for StorageError {
    fn from(err: r2d2::Error) -> Self {
        StorageError::Backend(BackendError::ConnectionFailed {
            message: err.to_string(),
        })
    }
}

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
