//! In-memory implementation of the accessor traits.
//!
//! This is primarily for testing. It holds a whole forum (categories, pages,
//! grants, actors, group memberships) in plain maps and answers the engine's
//! accessor traits from them.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use forumgate_core::{Actor, Category, CategoryId, GrantId, GroupId, PageId, PageMeta, UserId};
use forumgate_perms::{GrantTable, PermissionGrant};

use crate::error::{PolicyError, Result};
use crate::source::{CategoryTree, GrantSource, MembershipSource};

/// An in-memory forum.
#[derive(Debug, Clone, Default)]
pub struct MemoryForum {
    categories: HashMap<CategoryId, Category>,
    pages: HashMap<PageId, PageMeta>,
    grants: BTreeMap<GrantId, PermissionGrant>,
    actors: HashMap<UserId, Actor>,
    memberships: HashMap<UserId, BTreeSet<GroupId>>,

    /// Group every actor, guests included, belongs to.
    everyone: Option<GroupId>,
}

impl MemoryForum {
    /// Create an empty forum.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the group every actor belongs to.
    pub fn with_everyone_group(mut self, group: GroupId) -> Self {
        self.everyone = Some(group);
        self
    }

    /// Add or replace a category.
    pub fn insert_category(&mut self, category: Category) {
        self.categories.insert(category.id, category);
    }

    /// Add or replace a page.
    pub fn insert_page(&mut self, page: PageMeta) {
        self.pages.insert(page.id, page);
    }

    /// Add or replace a grant.
    pub fn insert_grant(&mut self, grant: PermissionGrant) {
        self.grants.insert(grant.id, grant);
    }

    /// Add or replace an actor. Guests without identity cannot be stored.
    pub fn insert_actor(&mut self, actor: Actor) {
        if let Some(id) = actor.id {
            self.actors.insert(id, actor);
        }
    }

    /// Put a user in a group.
    pub fn add_member(&mut self, group: GroupId, user: UserId) {
        self.memberships.entry(user).or_default().insert(group);
    }

    /// Look up a page.
    pub fn page(&self, id: PageId) -> Result<&PageMeta> {
        self.pages.get(&id).ok_or(PolicyError::UnknownPage(id))
    }
}

impl CategoryTree for MemoryForum {
    fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.get(&id)
    }
}

impl GrantSource for MemoryForum {
    fn grants_for(&self, ancestors: &[Category], page: Option<PageId>) -> Result<GrantTable> {
        let relevant = self.grants.values().filter(|g| {
            ancestors.iter().any(|c| g.target.is_category(c.id))
                || page.map_or(false, |p| g.target.is_page(p))
        });
        Ok(GrantTable::from_grants(relevant.cloned())?)
    }
}

impl MembershipSource for MemoryForum {
    fn actor(&self, id: UserId) -> Option<Actor> {
        self.actors.get(&id).cloned()
    }

    fn groups_of(&self, actor: Option<&Actor>) -> Vec<GroupId> {
        let mut groups: BTreeSet<GroupId> = self.everyone.into_iter().collect();
        if let Some(id) = actor.and_then(|a| a.id) {
            if let Some(own) = self.memberships.get(&id) {
                groups.extend(own.iter().copied());
            }
        }
        groups.into_iter().collect()
    }
}
