//! Categories: the nodes of the content tree.

use serde::{Deserialize, Serialize};

use crate::types::CategoryId;

/// A node in the category tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,

    /// Parent category, absent only for the root.
    pub parent_id: Option<CategoryId>,

    /// Deleted categories hide everything beneath them from non-staff.
    pub deleted: bool,

    /// Unlisted categories are hidden from non-staff unless the calling
    /// context allows unlisted content.
    pub unlisted: bool,

    /// Flags slated for removal. See [`LegacyFlags`].
    #[serde(default)]
    pub legacy: LegacyFlags,
}

/// Deprecated per-category restrictions.
///
/// These predate group grants and are kept only until existing categories
/// have been migrated to explicit grants. The walk reads them through
/// [`LegacyFlags::hides_from_non_staff`] and
/// [`LegacyFlags::blocks_non_staff_create`] so that removing them touches
/// nothing else.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyFlags {
    /// Only staff may see the category.
    pub staff_only: bool,

    /// Only staff may create pages in the category.
    pub only_staff_may_create: bool,
}

impl LegacyFlags {
    /// Whether the legacy staff-only flag hides the category from non-staff.
    pub fn hides_from_non_staff(&self) -> bool {
        self.staff_only
    }

    /// Whether the legacy flag stops non-staff from creating pages.
    pub fn blocks_non_staff_create(&self) -> bool {
        self.only_staff_may_create
    }
}

impl Category {
    /// A plain, listed, not deleted category.
    pub fn new(id: CategoryId, parent_id: Option<CategoryId>) -> Self {
        Self {
            id,
            parent_id,
            deleted: false,
            unlisted: false,
            legacy: LegacyFlags::default(),
        }
    }

    /// Whether this is the root of the tree.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Mark as deleted.
    pub fn deleted(mut self) -> Self {
        self.deleted = true;
        self
    }

    /// Mark as unlisted.
    pub fn unlisted(mut self) -> Self {
        self.unlisted = true;
        self
    }

    /// Set the legacy staff-only flag.
    pub fn legacy_staff_only(mut self) -> Self {
        self.legacy.staff_only = true;
        self
    }

    /// Set the legacy only-staff-may-create flag.
    pub fn legacy_only_staff_may_create(mut self) -> Self {
        self.legacy.only_staff_may_create = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_flags() {
        let cat = Category::new(CategoryId::new(2), Some(CategoryId::new(1)))
            .deleted()
            .unlisted()
            .legacy_staff_only();

        assert!(cat.deleted);
        assert!(cat.unlisted);
        assert!(cat.legacy.hides_from_non_staff());
        assert!(!cat.legacy.blocks_non_staff_create());
        assert!(!cat.is_root());
    }

    #[test]
    fn test_legacy_flags_default_off_when_missing() {
        let json = r#"{"id":3,"parent_id":1,"deleted":false,"unlisted":false}"#;
        let cat: Category = serde_json::from_str(json).unwrap();
        assert_eq!(cat.legacy, LegacyFlags::default());
    }
}
