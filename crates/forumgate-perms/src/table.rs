//! Grant tables.
//!
//! A [`GrantTable`] holds the grant rows a caller loaded for one request.
//! Filtering it by the actor's groups yields [`ActorGrants`], which answers
//! "which grants apply here?" for each step of the category walk.
//!
//! Grants that share a target are always returned in ascending [`GrantId`]
//! order, whatever order the rows were supplied in. When two of an actor's
//! groups have conflicting grants on the same category, the one with the
//! higher id is applied last and wins.

use std::collections::BTreeMap;

use forumgate_core::{CategoryId, GrantId, GroupId, PageId};

use crate::error::{PermsError, Result};
use crate::grant::{GrantTarget, PermissionGrant};

/// The grant rows relevant to a request.
#[derive(Debug, Clone, Default)]
pub struct GrantTable {
    /// All grants indexed by id.
    grants: BTreeMap<GrantId, PermissionGrant>,
}

impl GrantTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table, validating every row.
    pub fn from_grants(grants: impl IntoIterator<Item = PermissionGrant>) -> Result<Self> {
        let mut table = Self::new();
        for grant in grants {
            table.insert(grant)?;
        }
        Ok(table)
    }

    /// Build a table from CBOR-encoded rows.
    pub fn from_encoded_rows<B: AsRef<[u8]>>(rows: &[B]) -> Result<Self> {
        let mut table = Self::new();
        for row in rows {
            table.insert(PermissionGrant::from_bytes(row.as_ref())?)?;
        }
        Ok(table)
    }

    /// Add a grant.
    pub fn insert(&mut self, grant: PermissionGrant) -> Result<()> {
        grant.validate()?;
        if self.grants.contains_key(&grant.id) {
            return Err(PermsError::DuplicateGrant(grant.id));
        }
        self.grants.insert(grant.id, grant);
        Ok(())
    }

    /// Get a grant by id.
    pub fn get(&self, id: &GrantId) -> Option<&PermissionGrant> {
        self.grants.get(id)
    }

    pub fn len(&self) -> usize {
        self.grants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }

    /// All grants in id order.
    pub fn iter(&self) -> impl Iterator<Item = &PermissionGrant> {
        self.grants.values()
    }

    /// Keep only the grants addressed to one of the given groups.
    pub fn for_groups(&self, groups: &[GroupId]) -> ActorGrants<'_> {
        let mut by_target: BTreeMap<GrantTarget, Vec<&PermissionGrant>> = BTreeMap::new();
        // BTreeMap iteration is in id order, so every list stays sorted.
        for grant in self.grants.values().filter(|g| g.applies_to_any(groups)) {
            by_target.entry(grant.target).or_default().push(grant);
        }
        ActorGrants { by_target }
    }
}

/// The grants that apply to one actor, indexed by target.
#[derive(Debug, Clone, Default)]
pub struct ActorGrants<'a> {
    by_target: BTreeMap<GrantTarget, Vec<&'a PermissionGrant>>,
}

impl<'a> ActorGrants<'a> {
    /// Grants on a category, in id order.
    pub fn on_category(&self, category_id: CategoryId) -> &[&'a PermissionGrant] {
        self.on(GrantTarget::Category { category_id })
    }

    /// Grants on a page, in id order.
    pub fn on_page(&self, page_id: PageId) -> &[&'a PermissionGrant] {
        self.on(GrantTarget::Page { page_id })
    }

    /// Number of grants that apply to the actor anywhere.
    pub fn len(&self) -> usize {
        self.by_target.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_target.is_empty()
    }

    fn on(&self, target: GrantTarget) -> &[&'a PermissionGrant] {
        self.by_target
            .get(&target)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
