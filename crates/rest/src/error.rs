//! Error types for the tenant directory API.
//!
//! Storage errors from the persistence layer are mapped to HTTP status
//! codes and a JSON error body of the form
//! `{"error": {"code": "...", "message": "..."}}`.
//!
//! # Error Mapping
//!
//! | Storage Error | HTTP Status | Code |
//! |--------------|-------------|------|
//! | InvalidContext | 400 | invalid-context |
//! | DuplicateName | 409 | conflict |
//! | HasSubsidiaries | 409 | conflict |
//! | ParentNotFound | 404 | not-found |
//! | other validation errors | 400 | invalid |
//! | Backend errors | 500 | internal |
//!
//! Note that access denial never surfaces here: rows the principal may
//! not see are reported by handlers as plain 404s, so there is no
//! Forbidden variant to map.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use atrium_persistence::error::{BackendError, StorageError, TenantError, ValidationError};
use std::fmt;

/// The primary error type for API operations.
#[derive(Debug)]
pub enum RestError {
    /// Tenant not found (HTTP 404). Also covers tenants the acting
    /// principal is not allowed to see.
    NotFound {
        /// The tenant ID.
        id: String,
    },

    /// Bad request - validation error (HTTP 400).
    BadRequest {
        /// Error message.
        message: String,
    },

    /// Request named a principal that does not exist (HTTP 400).
    InvalidContext {
        /// The offending principal ID.
        id: String,
    },

    /// Request carried no principal where one is required (HTTP 400).
    MissingPrincipal,

    /// State conflict - duplicate name or blocked delete (HTTP 409).
    Conflict {
        /// Error message.
        message: String,
    },

    /// Internal server error (HTTP 500).
    InternalError {
        /// Error message.
        message: String,
    },
}

impl fmt::Display for RestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestError::NotFound { id } => {
                write!(f, "Tenant '{}' not found", id)
            }
            RestError::BadRequest { message } => {
                write!(f, "Bad request: {}", message)
            }
            RestError::InvalidContext { id } => {
                write!(f, "Invalid tenant context '{}'", id)
            }
            RestError::MissingPrincipal => {
                write!(f, "No tenant context supplied")
            }
            RestError::Conflict { message } => {
                write!(f, "Conflict: {}", message)
            }
            RestError::InternalError { message } => {
                write!(f, "Internal error: {}", message)
            }
        }
    }
}

impl std::error::Error for RestError {}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            RestError::NotFound { id } => (
                StatusCode::NOT_FOUND,
                "not-found",
                format!("Tenant '{}' not found", id),
            ),
            RestError::BadRequest { message } => {
                (StatusCode::BAD_REQUEST, "invalid", message.clone())
            }
            RestError::InvalidContext { id } => (
                StatusCode::BAD_REQUEST,
                "invalid-context",
                format!("Tenant context '{}' does not name a known tenant", id),
            ),
            RestError::MissingPrincipal => (
                StatusCode::BAD_REQUEST,
                "missing-context",
                "A tenant context is required for this request".to_string(),
            ),
            RestError::Conflict { message } => {
                (StatusCode::CONFLICT, "conflict", message.clone())
            }
            RestError::InternalError { message } => {
                tracing::error!(message = %message, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    "Internal server error".to_string(),
                )
            }
        };

        let body = serde_json::json!({
            "error": {
                "code": code,
                "message": message,
            }
        });
        (status, Json(body)).into_response()
    }
}

impl From<StorageError> for RestError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Tenant(e) => e.into(),
            StorageError::Validation(e) => e.into(),
            StorageError::Backend(e) => e.into(),
        }
    }
}

impl From<TenantError> for RestError {
    fn from(err: TenantError) -> Self {
        match err {
            TenantError::InvalidContext { id } => RestError::InvalidContext {
                id: id.into_string(),
            },
        }
    }
}

impl From<ValidationError> for RestError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::DuplicateName { .. } | ValidationError::HasSubsidiaries { .. } => {
                RestError::Conflict {
                    message: err.to_string(),
                }
            }
            // Conflated with plain non-existence so callers cannot use
            // subsidiary creation to probe for other parents.
            ValidationError::ParentNotFound { id } => RestError::NotFound {
                id: id.into_string(),
            },
            _ => RestError::BadRequest {
                message: err.to_string(),
            },
        }
    }
}

impl From<BackendError> for RestError {
    fn from(err: BackendError) -> Self {
        RestError::InternalError {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for RestError {
    fn from(err: serde_json::Error) -> Self {
        RestError::BadRequest {
            message: format!("Invalid JSON: {}", err),
        }
    }
}

/// Result type alias for REST operations.
pub type RestResult<T> = Result<T, RestError>;

#[cfg(test)]
mod tests {
    use super::*;
    use atrium_persistence::TenantId;

    #[test]
    fn test_not_found_display() {
        let err = RestError::NotFound {
            id: "t1".to_string(),
        };
        assert_eq!(err.to_string(), "Tenant 't1' not found");
    }

    #[test]
    fn test_duplicate_name_maps_to_conflict() {
        let err: RestError = StorageError::from(ValidationError::DuplicateName {
            name: "Acme".to_string(),
        })
        .into();
        assert!(matches!(err, RestError::Conflict { .. }));
    }

    #[test]
    fn test_parent_not_found_maps_to_not_found() {
        let err: RestError = StorageError::from(ValidationError::ParentNotFound {
            id: TenantId::new("p1"),
        })
        .into();
        assert!(matches!(err, RestError::NotFound { .. }));
    }

    #[test]
    fn test_invalid_context_maps_to_bad_request_variant() {
        let err: RestError = StorageError::from(TenantError::InvalidContext {
            id: TenantId::new("ghost"),
        })
        .into();
        assert!(matches!(err, RestError::InvalidContext { .. }));
    }

    #[test]
    fn test_shape_errors_map_to_bad_request() {
        let err: RestError = StorageError::from(ValidationError::EmptyName).into();
        assert!(matches!(err, RestError::BadRequest { .. }));
    }
}
