//! Tenant CRUD and hierarchy handlers.
//!
//! Every handler acquires a session bound to the request principal and
//! goes through the policy-enforced session API; nothing here can see a
//! row the principal cannot. Rows outside the principal's reach are
//! reported as 404, identically to rows that do not exist.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use atrium_persistence::{NewTenant, TenantFilter, TenantId, TenantKind, TenantPatch, TenantRecord};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{RestError, RestResult};
use crate::extractors::Principal;
use crate::state::AppState;

/// Query parameters for tenant listings.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Maximum rows per page.
    pub limit: Option<usize>,
    /// Rows skipped before the page starts.
    pub offset: Option<usize>,
    /// Restrict to one hierarchy kind.
    pub kind: Option<TenantKind>,
}

/// Response body for tenant listings.
#[derive(Debug, Serialize)]
pub struct ListResponse {
    /// Visible tenants, newest first.
    pub tenants: Vec<TenantRecord>,
    /// Total visible rows across all pages.
    pub total: u64,
    /// Page limit applied.
    pub limit: usize,
    /// Page offset applied.
    pub offset: usize,
}

/// Response body for deletions.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    /// Human-readable confirmation.
    pub message: String,
    /// The deleted tenant's id.
    pub tenant_id: TenantId,
}

/// Creates a tenant.
///
/// # HTTP Request
///
/// `POST [base]/api/v1/tenants`
///
/// # Response
///
/// - `201 Created` with the stored record
/// - `400 Bad Request` - validation failure
/// - `404 Not Found` - named parent missing or not visible
/// - `409 Conflict` - sibling name collision
pub async fn create_handler(
    State(state): State<AppState>,
    principal: Principal,
    Json(payload): Json<NewTenant>,
) -> RestResult<Response> {
    debug!(kind = %payload.kind, "Processing tenant create");

    let mut session = state.session(principal.get())?;
    let record = session.insert(payload)?;
    Ok((StatusCode::CREATED, Json(record)).into_response())
}

/// Lists tenants visible to the principal.
///
/// An exempt request without a principal gets an empty page, not an
/// error.
///
/// # HTTP Request
///
/// `GET [base]/api/v1/tenants?limit=&offset=&kind=`
pub async fn list_handler(
    State(state): State<AppState>,
    principal: Principal,
    Query(params): Query<ListParams>,
) -> RestResult<Json<ListResponse>> {
    let config = state.config();
    let limit = params.limit.unwrap_or(config.default_page_size);
    if limit == 0 || limit > config.max_page_size {
        return Err(RestError::BadRequest {
            message: format!("limit must be between 1 and {}", config.max_page_size),
        });
    }

    let filter = TenantFilter {
        kind: params.kind,
        limit,
        offset: params.offset.unwrap_or(0),
    };

    let session = state.session(principal.get())?;
    let page = session.select(&filter)?;

    Ok(Json(ListResponse {
        tenants: page.tenants,
        total: page.total,
        limit: page.limit,
        offset: page.offset,
    }))
}

/// Reads one tenant.
///
/// # HTTP Request
///
/// `GET [base]/api/v1/tenants/{id}`
pub async fn get_handler(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<String>,
) -> RestResult<Json<TenantRecord>> {
    let id = TenantId::new(id);
    let session = state.session(principal.get())?;

    match session.get(&id)? {
        Some(record) => Ok(Json(record)),
        None => Err(RestError::NotFound {
            id: id.into_string(),
        }),
    }
}

/// Updates a tenant's name and metadata.
///
/// The hierarchy kind and parent are immutable; the payload cannot
/// express a change to them.
///
/// # HTTP Request
///
/// `PUT [base]/api/v1/tenants/{id}`
pub async fn update_handler(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<String>,
    Json(patch): Json<TenantPatch>,
) -> RestResult<Json<TenantRecord>> {
    let id = TenantId::new(id);
    debug!(tenant = %id, "Processing tenant update");

    let mut session = state.session(principal.get())?;
    match session.update(&id, patch)? {
        Some(record) => Ok(Json(record)),
        None => Err(RestError::NotFound {
            id: id.into_string(),
        }),
    }
}

/// Deletes a tenant.
///
/// # HTTP Request
///
/// `DELETE [base]/api/v1/tenants/{id}`
///
/// # Response
///
/// - `200 OK` with a confirmation body
/// - `404 Not Found` - missing or not visible
/// - `409 Conflict` - the tenant still has subsidiaries
pub async fn delete_handler(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<String>,
) -> RestResult<Json<DeleteResponse>> {
    let id = TenantId::new(id);
    debug!(tenant = %id, "Processing tenant delete");

    let mut session = state.session(principal.get())?;
    if session.delete(&id)? {
        Ok(Json(DeleteResponse {
            message: format!("Tenant '{}' deleted", id),
            tenant_id: id,
        }))
    } else {
        Err(RestError::NotFound {
            id: id.into_string(),
        })
    }
}

/// Returns the visible hierarchy around a tenant.
///
/// # HTTP Request
///
/// `GET [base]/api/v1/tenants/{id}/hierarchy`
pub async fn hierarchy_handler(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<String>,
) -> RestResult<Json<Vec<TenantRecord>>> {
    let id = TenantId::new(id);
    let session = state.session(principal.get())?;

    match session.hierarchy(&id)? {
        Some(view) => Ok(Json(view)),
        None => Err(RestError::NotFound {
            id: id.into_string(),
        }),
    }
}
