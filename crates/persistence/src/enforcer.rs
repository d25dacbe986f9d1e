//! Policy-enforced tenant operations.
//!
//! Every public read and write against the tenant directory lives here, as
//! methods on [`Session`]. Each one consults the session's bound principal
//! and the access policy before touching a row; the raw accessors in
//! `directory` stay crate-private so nothing can route around these checks.
//!
//! Two reporting rules are deliberate and load-bearing:
//!
//! - a row the principal may not see is reported exactly like a row that
//!   does not exist (`Ok(None)`, empty page, zero rows affected), so
//!   callers cannot probe for the existence of other tenants
//! - missing visibility is never an error; errors are reserved for
//!   validation failures, context binding and backend faults

use tracing::debug;

use crate::directory;
use crate::error::{StorageResult, ValidationError};
use crate::policy::can_access;
use crate::session::Session;
use crate::tenant::{NewTenant, TenantId, TenantKind, TenantPatch, TenantRecord};
use crate::validation;

/// Filter and pagination options for [`Session::select`].
#[derive(Debug, Clone)]
pub struct TenantFilter {
    /// Restrict results to one hierarchy kind.
    pub kind: Option<TenantKind>,
    /// Maximum number of rows returned.
    pub limit: usize,
    /// Number of visible rows skipped before the page starts.
    pub offset: usize,
}

impl Default for TenantFilter {
    fn default() -> Self {
        Self {
            kind: None,
            limit: 100,
            offset: 0,
        }
    }
}

/// One page of visible tenants.
#[derive(Debug, Clone)]
pub struct TenantPage {
    /// The rows in this page, newest first.
    pub tenants: Vec<TenantRecord>,
    /// Total number of visible rows across all pages.
    pub total: u64,
    /// The limit the page was built with.
    pub limit: usize,
    /// The offset the page was built with.
    pub offset: usize,
}

impl Session {
    /// Lists the tenants visible to the bound principal.
    ///
    /// With no principal bound the page is always empty: absence of
    /// context never grants access. `total` counts visible rows after
    /// filtering, so pagination arithmetic is stable for the caller.
    pub fn select(&self, filter: &TenantFilter) -> StorageResult<TenantPage> {
        let principal = self.context();
        let visible: Vec<TenantRecord> = directory::list(self.conn(), filter.kind)?
            .into_iter()
            .filter(|row| can_access(principal, row.as_target()))
            .collect();

        let total = visible.len() as u64;
        let tenants = visible
            .into_iter()
            .skip(filter.offset)
            .take(filter.limit)
            .collect();

        Ok(TenantPage {
            tenants,
            total,
            limit: filter.limit,
            offset: filter.offset,
        })
    }

    /// Point lookup under the visibility filter.
    ///
    /// Returns `Ok(None)` both when the row does not exist and when it is
    /// not visible to the bound principal.
    pub fn get(&self, id: &TenantId) -> StorageResult<Option<TenantRecord>> {
        let row = directory::fetch(self.conn(), id)?;
        Ok(row.filter(|r| can_access(self.context(), r.as_target())))
    }

    /// Creates a tenant.
    ///
    /// Parent tenants may be created with or without a bound principal
    /// (bootstrap). Subsidiaries resolve their parent under the same
    /// visibility filter as any read, which means only the parent acting
    /// as itself can create its own subsidiaries: any other principal,
    /// or none, sees the parent as missing.
    pub fn insert(&mut self, new: NewTenant) -> StorageResult<TenantRecord> {
        let name = validation::normalized_name(&new.name)?;
        validation::check_shape(new.kind, new.parent_id.as_ref())?;

        if let Some(parent_id) = &new.parent_id {
            let parent = directory::fetch(self.conn(), parent_id)?
                .filter(|row| can_access(self.context(), row.as_target()))
                .ok_or_else(|| ValidationError::ParentNotFound {
                    id: parent_id.clone(),
                })?;
            validation::check_parent(&parent)?;
        }

        if directory::name_taken(self.conn(), &name, new.parent_id.as_ref(), None)? {
            return Err(ValidationError::DuplicateName { name }.into());
        }

        let id = TenantId::generate();
        validation::check_self_reference(&id, new.parent_id.as_ref())?;

        let now = chrono::Utc::now();
        let record = TenantRecord {
            id,
            name,
            kind: new.kind,
            parent_id: new.parent_id,
            metadata: new.metadata.unwrap_or_else(|| serde_json::json!({})),
            created_at: now,
            updated_at: now,
        };

        directory::insert(self.conn(), &record)?;
        debug!(tenant = %record.id, kind = %record.kind, "created tenant");
        Ok(record)
    }

    /// Updates a tenant's name and metadata.
    ///
    /// The target is located under the same visibility filter as
    /// [`Session::get`]; an invisible or missing row reports `Ok(None)`
    /// rather than an error. A changed name is revalidated for sibling
    /// uniqueness, excluding the row itself.
    pub fn update(
        &mut self,
        id: &TenantId,
        patch: TenantPatch,
    ) -> StorageResult<Option<TenantRecord>> {
        let Some(mut current) = self.get(id)? else {
            return Ok(None);
        };

        if let Some(name) = &patch.name {
            let name = validation::normalized_name(name)?;
            if name != current.name
                && directory::name_taken(self.conn(), &name, current.parent_id.as_ref(), Some(id))?
            {
                return Err(ValidationError::DuplicateName { name }.into());
            }
            current.name = name;
        }

        if let Some(metadata) = patch.metadata {
            current.metadata = metadata;
        }

        current.updated_at = chrono::Utc::now();

        let rows = directory::update(self.conn(), &current)?;
        if rows == 0 {
            // Row vanished between the visibility check and the write;
            // conflate with non-existence like every other read.
            return Ok(None);
        }

        debug!(tenant = %current.id, "updated tenant");
        Ok(Some(current))
    }

    /// Deletes a tenant.
    ///
    /// Returns `Ok(false)` when the target is missing or invisible.
    /// Deleting a parent that still has subsidiaries fails with
    /// [`ValidationError::HasSubsidiaries`] regardless of who asks.
    pub fn delete(&mut self, id: &TenantId) -> StorageResult<bool> {
        if self.get(id)?.is_none() {
            return Ok(false);
        }

        let count = directory::child_count(self.conn(), id)?;
        if count > 0 {
            return Err(ValidationError::HasSubsidiaries {
                id: id.clone(),
                count,
            }
            .into());
        }

        let rows = directory::delete(self.conn(), id)?;
        if rows > 0 {
            debug!(tenant = %id, "deleted tenant");
        }
        Ok(rows > 0)
    }

    /// Returns the visible hierarchy around a tenant.
    ///
    /// For a parent: the tenant followed by its visible subsidiaries. For
    /// a subsidiary: its parent (if visible), then the tenant, then its
    /// visible siblings. Under the standard policy a subsidiary principal
    /// therefore sees a hierarchy of exactly itself.
    pub fn hierarchy(&self, id: &TenantId) -> StorageResult<Option<Vec<TenantRecord>>> {
        let Some(root) = self.get(id)? else {
            return Ok(None);
        };

        let principal = self.context();
        let mut result = Vec::new();

        match &root.parent_id {
            None => {
                result.push(root.clone());
                for child in directory::children(self.conn(), &root.id)? {
                    if can_access(principal, child.as_target()) {
                        result.push(child);
                    }
                }
            }
            Some(parent_id) => {
                if let Some(parent) = directory::fetch(self.conn(), parent_id)?
                    .filter(|row| can_access(principal, row.as_target()))
                {
                    result.push(parent);
                }
                result.push(root.clone());
                for sibling in directory::children(self.conn(), parent_id)? {
                    if sibling.id != root.id && can_access(principal, sibling.as_target()) {
                        result.push(sibling);
                    }
                }
            }
        }

        Ok(Some(result))
    }
}
