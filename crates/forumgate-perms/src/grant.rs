//! Permission grant rows.
//!
//! A grant adds and removes capabilities for the members of one group, on
//! one category or one page. Grants never target individual users.

use serde::{Deserialize, Serialize};

use forumgate_core::{Capability, CapabilityDelta, CategoryId, GrantId, GroupId, PageId};

use crate::error::{PermsError, Result};

/// An explicit permission rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionGrant {
    /// Identifies the row, and orders grants that share a target.
    pub id: GrantId,

    /// The group whose members the grant applies to.
    pub for_group: GroupId,

    /// Where the grant applies.
    pub target: GrantTarget,

    /// What it changes.
    pub delta: CapabilityDelta,
}

/// Scope of a permission grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GrantTarget {
    /// A category. Only that category's step of the walk applies it.
    Category {
        /// The category the grant is on.
        category_id: CategoryId,
    },

    /// A single page. Applied after the category walk.
    Page {
        /// The page the grant is on.
        page_id: PageId,
    },
}

impl GrantTarget {
    /// Check if this target is the given category.
    pub fn is_category(&self, id: CategoryId) -> bool {
        matches!(self, GrantTarget::Category { category_id } if *category_id == id)
    }

    /// Check if this target is the given page.
    pub fn is_page(&self, id: PageId) -> bool {
        matches!(self, GrantTarget::Page { page_id } if *page_id == id)
    }
}

impl PermissionGrant {
    /// Create a grant on a category.
    pub fn on_category(
        id: GrantId,
        for_group: GroupId,
        category_id: CategoryId,
        delta: CapabilityDelta,
    ) -> Self {
        Self {
            id,
            for_group,
            target: GrantTarget::Category { category_id },
            delta,
        }
    }

    /// Create a grant on a page.
    pub fn on_page(id: GrantId, for_group: GroupId, page_id: PageId, delta: CapabilityDelta) -> Self {
        Self {
            id,
            for_group,
            target: GrantTarget::Page { page_id },
            delta,
        }
    }

    /// Check that the grant does not both add and remove a capability.
    pub fn validate(&self) -> Result<()> {
        let overlap: Capability = self.delta.conflicts();
        if overlap.is_empty() {
            Ok(())
        } else {
            Err(PermsError::ConflictingDelta {
                grant: self.id,
                overlap,
            })
        }
    }

    /// Whether a member of the given groups is subject to this grant.
    pub fn applies_to_any(&self, groups: &[GroupId]) -> bool {
        groups.contains(&self.for_group)
    }

    /// Serialize to CBOR bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(self, &mut buf)
            .map_err(|e| PermsError::EncodingError(e.to_string()))?;
        Ok(buf)
    }

    /// Deserialize from CBOR bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        ciborium::from_reader(bytes).map_err(|e| PermsError::DecodingError(e.to_string()))
    }
}
