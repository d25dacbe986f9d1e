//! Axum middleware for the tenant directory API.

pub mod principal;

pub use principal::{ResolvedPrincipal, X_TENANT_ID, bind_principal};
