//! Atrium Persistence Layer
//!
//! This crate stores the tenant directory and enforces tenant isolation on
//! every read and write. Tenants form a two-level hierarchy of parent
//! organizations and their subsidiaries; the access policy lets a principal
//! see itself and its direct subsidiaries, nothing else.
//!
//! # Architecture
//!
//! - [`tenant`] - Tenant identifiers, records and input types
//! - [`policy`] - The pure access decision ([`policy::can_access`])
//! - [`validation`] - Write validation for names and hierarchy shape
//! - [`error`] - Error types for all operations
//! - [`backends`] - Storage backends (SQLite)
//! - [`session`] - Pooled sessions with a per-session principal slot
//! - [`enforcer`] - Policy-enforced tenant operations on [`session::Session`]
//!
//! Raw row access is crate-private; every public operation goes through the
//! enforcer, so isolation cannot be bypassed from outside the crate.
//!
//! # Quick Start
//!
//! ```no_run
//! use atrium_persistence::backends::sqlite::SqliteBackend;
//! use atrium_persistence::tenant::{NewTenant, TenantKind};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = SqliteBackend::in_memory()?;
//! backend.init_schema()?;
//!
//! let mut session = backend.session()?;
//! let parent = session.insert(NewTenant {
//!     name: "Acme".to_string(),
//!     kind: TenantKind::Parent,
//!     parent_id: None,
//!     metadata: None,
//! })?;
//!
//! // Operations act as the bound principal.
//! session.set_context(&parent.id)?;
//! let page = session.select(&Default::default())?;
//! assert_eq!(page.total, 1);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod backends;
pub mod error;
pub mod policy;
pub mod tenant;
pub mod validation;

#[cfg(feature = "sqlite")]
mod directory;
#[cfg(feature = "sqlite")]
pub mod enforcer;
#[cfg(feature = "sqlite")]
pub mod session;

pub use error::{BackendError, StorageError, StorageResult, TenantError, ValidationError};
pub use tenant::{NewTenant, TenantId, TenantKind, TenantPatch, TenantRecord};

#[cfg(feature = "sqlite")]
pub use enforcer::{TenantFilter, TenantPage};
#[cfg(feature = "sqlite")]
pub use session::Session;
