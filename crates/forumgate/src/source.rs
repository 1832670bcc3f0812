//! Accessors the engine's callers implement.
//!
//! The engine never loads anything itself. These traits describe what a
//! caller must be able to supply, so that storage layers can be swapped
//! without touching the policy code. [`MemoryForum`](crate::MemoryForum) is
//! the in-memory implementation used by tests.
//!
//! # Design Notes
//!
//! - **Ancestor chains exclude the root** and list the nearest category first.
//!   Something filed in the root category is filed under `None`; the
//!   context loaders rewrite it that way before the engine sees it.
//! - **Grant sources return every row that might apply**; the engine does
//!   the per-actor filtering.
//! - **Guests have groups too**, typically a single "everyone" group.

use std::collections::BTreeSet;

use forumgate_core::{Actor, Category, CategoryId, GroupId, NewPage, PageId, PageMeta, UserId};
use forumgate_perms::GrantTable;

use crate::error::{PolicyError, Result};

/// Read access to the category tree.
pub trait CategoryTree {
    /// Look up a category.
    fn category(&self, id: CategoryId) -> Option<&Category>;

    /// Where something filed in `category_id` lives, with the root category
    /// mapped to `None` (directly under the root).
    fn filed_under(&self, category_id: Option<CategoryId>) -> Result<Option<CategoryId>> {
        match category_id {
            None => Ok(None),
            Some(id) => {
                let category = self
                    .category(id)
                    .ok_or(PolicyError::UnknownCategory(id))?;
                Ok((!category.is_root()).then_some(id))
            }
        }
    }

    /// The ancestor chain for something filed in `category_id`: that
    /// category first, then its parent, and so on up to but excluding the
    /// root. Empty for `None` or for the root itself.
    fn ancestors(&self, category_id: Option<CategoryId>) -> Result<Vec<Category>> {
        let mut chain = Vec::new();
        let mut seen = BTreeSet::new();
        let mut next = category_id;

        while let Some(id) = next {
            let category = self
                .category(id)
                .ok_or(PolicyError::UnknownCategory(id))?;
            if category.is_root() {
                break;
            }
            if !seen.insert(id) {
                return Err(PolicyError::CategoryCycle(id));
            }
            chain.push(category.clone());
            next = category.parent_id;
        }

        Ok(chain)
    }
}

/// Read access to permission grants.
pub trait GrantSource {
    /// Every grant on any of the given categories or on the given page.
    fn grants_for(&self, ancestors: &[Category], page: Option<PageId>) -> Result<GrantTable>;
}

/// Read access to actors and their groups.
pub trait MembershipSource {
    /// Look up an actor.
    fn actor(&self, id: UserId) -> Option<Actor>;

    /// The groups an actor belongs to. `None` means an anonymous visitor.
    fn groups_of(&self, actor: Option<&Actor>) -> Vec<GroupId>;
}

/// Everything needed to check access to one page.
#[derive(Debug, Clone)]
pub struct PageContext {
    /// The page, filed under `None` if it sits in the root category.
    pub page: PageMeta,
    pub ancestors: Vec<Category>,
    pub grants: GrantTable,
}

impl PageContext {
    /// Load the ancestor chain and grants for a page.
    pub fn load<S>(source: &S, page: &PageMeta) -> Result<Self>
    where
        S: CategoryTree + GrantSource,
    {
        let page = PageMeta {
            category_id: source.filed_under(page.category_id)?,
            ..page.clone()
        };
        let ancestors = source.ancestors(page.category_id)?;
        let grants = source.grants_for(&ancestors, Some(page.id))?;
        Ok(Self {
            page,
            ancestors,
            grants,
        })
    }
}

/// Everything needed to check the creation of one page.
#[derive(Debug, Clone)]
pub struct CategoryContext {
    /// The request, filed under `None` if it names the root category.
    pub new_page: NewPage,
    pub ancestors: Vec<Category>,
    pub grants: GrantTable,
}

impl CategoryContext {
    /// Load the ancestor chain and grants for the category a page would be
    /// created in.
    pub fn load<S>(source: &S, new_page: &NewPage) -> Result<Self>
    where
        S: CategoryTree + GrantSource,
    {
        let new_page = NewPage {
            category_id: source.filed_under(new_page.category_id)?,
            ..new_page.clone()
        };
        let ancestors = source.ancestors(new_page.category_id)?;
        let grants = source.grants_for(&ancestors, None)?;
        Ok(Self {
            new_page,
            ancestors,
            grants,
        })
    }
}
