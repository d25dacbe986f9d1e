//! Principal binding middleware.
//!
//! Resolves the acting principal for every request before any handler
//! runs, from three sources in priority order:
//!
//! 1. the tenant header (`X-Tenant-ID` by default)
//! 2. the tenant cookie (`tenant_id` by default)
//! 3. a bearer token claim (not yet wired, see below)
//!
//! Health endpoints and the tenant collection endpoints are exempt from
//! the principal requirement; they still receive whatever principal the
//! request carried. Everything else either gets a principal, the
//! configured default, or a 400.
//!
//! The resolved value is stored as a [`ResolvedPrincipal`] request
//! extension and read back by the [`crate::extractors::Principal`]
//! extractor.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, Method, header::HeaderName},
    middleware::Next,
    response::Response,
};
use atrium_persistence::TenantId;
use tracing::debug;

use crate::error::RestError;
use crate::state::AppState;

/// Default header name for principal identification.
pub static X_TENANT_ID: HeaderName = HeaderName::from_static("x-tenant-id");

/// The principal resolved for a request, if any.
///
/// `None` only ever reaches handlers on exempt routes; everywhere else
/// the middleware has already rejected the request or substituted the
/// configured default.
#[derive(Debug, Clone)]
pub struct ResolvedPrincipal(pub Option<TenantId>);

/// Middleware that resolves and validates the request principal.
///
/// Use with `axum::middleware::from_fn_with_state`.
pub async fn bind_principal(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, RestError> {
    let config = state.config();

    let principal = principal_from_request(
        request.headers(),
        &config.tenant_header,
        &config.tenant_cookie,
    );

    let principal = match principal {
        Some(id) => Some(id),
        None if is_exempt(request.method(), request.uri().path()) => None,
        None if !config.require_principal => {
            config.default_principal.as_deref().map(TenantId::new)
        }
        None => return Err(RestError::MissingPrincipal),
    };

    if let Some(id) = &principal {
        debug!(tenant = %id, "resolved request principal");
    }

    request.extensions_mut().insert(ResolvedPrincipal(principal));
    Ok(next.run(request).await)
}

/// Extracts the principal from request headers, header before cookie.
fn principal_from_request(
    headers: &HeaderMap,
    header_name: &str,
    cookie_name: &str,
) -> Option<TenantId> {
    if let Some(value) = headers.get(header_name).and_then(|v| v.to_str().ok()) {
        let value = value.trim();
        if !value.is_empty() {
            return Some(TenantId::new(value));
        }
    }

    if let Some(value) = cookie_value(headers, cookie_name) {
        return Some(TenantId::new(value));
    }

    // TODO: read the tenant claim from Authorization: Bearer tokens once
    // token authentication is wired up.
    None
}

/// Pulls one cookie's value out of the Cookie header.
fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let raw = headers.get(http::header::COOKIE)?.to_str().ok()?;
    raw.split(';').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        if key.trim() == name {
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        } else {
            None
        }
    })
}

/// Routes reachable without a principal.
///
/// Health probes must work before any tenant exists, and the tenant
/// collection endpoints must be reachable to bootstrap the first parent
/// organization. Exempt requests that do carry a principal still get it
/// bound as usual.
fn is_exempt(method: &Method, path: &str) -> bool {
    let path = path.trim_end_matches('/');

    if path == "/health"
        || path.starts_with("/health/")
        || path == "/api/v1/health"
        || path.starts_with("/api/v1/health/")
    {
        return true;
    }

    path == "/api/v1/tenants" && (method == Method::GET || method == Method::POST)
}
