//! Axum extractors for the tenant directory API.

pub mod principal;

pub use principal::Principal;
