//! Principal extractor.
//!
//! Reads the [`ResolvedPrincipal`] request extension populated by
//! [`crate::middleware::bind_principal`].

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
};
use atrium_persistence::TenantId;

use crate::middleware::ResolvedPrincipal;

/// The acting principal for a request.
///
/// `None` only occurs on exempt routes; see the middleware for the
/// resolution rules.
///
/// # Example
///
/// ```rust,ignore
/// use atrium_rest::extractors::Principal;
///
/// async fn handler(principal: Principal) {
///     if let Some(id) = principal.get() {
///         println!("acting as {}", id);
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Principal(pub Option<TenantId>);

impl Principal {
    /// Returns the principal's tenant id, if one was resolved.
    pub fn get(&self) -> Option<&TenantId> {
        self.0.as_ref()
    }
}

impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<ResolvedPrincipal>() {
            Some(resolved) => Ok(Principal(resolved.0.clone())),
            // Reachable only if a route was mounted outside the
            // principal middleware.
            None => Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Principal middleware not installed",
            )),
        }
    }
}
