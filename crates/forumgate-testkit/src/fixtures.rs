//! Test fixtures and helpers.
//!
//! [`ForumFixture`] builds a small forum in memory and runs policy checks
//! against it the way a request handler would: load the ancestor chain and
//! grants, look up the actor's groups, call the engine.

use forumgate::{
    CategoryContext, CategoryTree, MemoryForum, MembershipSource, PageContext, PolicyEngine,
    Requester, Result,
};
use forumgate_core::{
    Actor, Capability, CapabilityDelta, CapabilitySet, Category, CategoryId, Decision, GrantId,
    GroupId, NewPage, PageId, PageMeta, PageType, PostId, PostMeta, UserId,
};
use forumgate_perms::PermissionGrant;

/// A forum with a root category and an "everyone" group.
pub struct ForumFixture {
    pub forum: MemoryForum,
    pub engine: PolicyEngine,
    next_id: u64,
}

impl ForumFixture {
    /// The root category.
    pub const ROOT: CategoryId = CategoryId::new(1);

    /// The group every actor belongs to.
    pub const EVERYONE: GroupId = GroupId::new(1);

    /// Create a forum containing only the root category.
    pub fn new() -> Self {
        Self::with_engine(PolicyEngine::default())
    }

    /// Create with a specific engine configuration.
    pub fn with_engine(engine: PolicyEngine) -> Self {
        let mut forum = MemoryForum::new().with_everyone_group(Self::EVERYONE);
        forum.insert_category(Category::new(Self::ROOT, None));
        Self {
            forum,
            engine,
            next_id: 100,
        }
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Building the forum
    // ─────────────────────────────────────────────────────────────────────────

    /// Add a category under `parent`, or under the root if `None`.
    pub fn category(&mut self, parent: Option<CategoryId>) -> CategoryId {
        self.category_with(parent, |c| c)
    }

    /// Add a category, adjusting it before insertion.
    pub fn category_with(
        &mut self,
        parent: Option<CategoryId>,
        adjust: impl FnOnce(Category) -> Category,
    ) -> CategoryId {
        let id = CategoryId::new(self.next_id());
        let category = Category::new(id, Some(parent.unwrap_or(Self::ROOT)));
        self.forum.insert_category(adjust(category));
        id
    }

    /// Change an existing category.
    pub fn modify_category(&mut self, id: CategoryId, adjust: impl FnOnce(Category) -> Category) {
        if let Some(category) = self.forum.category(id).cloned() {
            self.forum.insert_category(adjust(category));
        }
    }

    /// A chain of `depth` nested categories under the root, outermost first.
    pub fn nested_categories(&mut self, depth: usize) -> Vec<CategoryId> {
        let mut ids: Vec<CategoryId> = Vec::with_capacity(depth);
        for _ in 0..depth {
            let parent = ids.last().copied();
            ids.push(self.category(parent));
        }
        ids
    }

    /// Add a page. `None` files it directly under the root.
    pub fn page(
        &mut self,
        category: Option<CategoryId>,
        page_type: PageType,
        author: UserId,
    ) -> PageMeta {
        let page = PageMeta::new(PageId::new(self.next_id()), category, page_type, author);
        self.forum.insert_page(page.clone());
        page
    }

    /// Add a private group talk page.
    pub fn private_talk(
        &mut self,
        author: UserId,
        participants: impl IntoIterator<Item = UserId>,
    ) -> PageMeta {
        let page = PageMeta::private_talk(
            PageId::new(self.next_id()),
            PageType::FormalMessage,
            author,
            participants,
        );
        self.forum.insert_page(page.clone());
        page
    }

    /// A reply on a page.
    pub fn reply(&mut self, page: &PageMeta, author: UserId) -> PostMeta {
        PostMeta::reply(PostId::new(self.next_id()), page.id, author)
    }

    /// A fresh member.
    pub fn member(&mut self) -> Actor {
        let actor = Actor::member(UserId::new(self.next_id()));
        self.forum.insert_actor(actor.clone());
        actor
    }

    /// A fresh moderator.
    pub fn moderator(&mut self) -> Actor {
        let actor = Actor::moderator(UserId::new(self.next_id()));
        self.forum.insert_actor(actor.clone());
        actor
    }

    /// A fresh administrator.
    pub fn admin(&mut self) -> Actor {
        let actor = Actor::admin(UserId::new(self.next_id()));
        self.forum.insert_actor(actor.clone());
        actor
    }

    /// A fresh group containing the given actors.
    pub fn group(&mut self, members: &[&Actor]) -> GroupId {
        let group = GroupId::new(self.next_id());
        for actor in members {
            if let Some(id) = actor.id {
                self.forum.add_member(group, id);
            }
        }
        group
    }

    /// Grant on a category.
    pub fn grant(&mut self, group: GroupId, category: CategoryId, delta: CapabilityDelta) -> GrantId {
        let id = GrantId::new(self.next_id());
        self.forum
            .insert_grant(PermissionGrant::on_category(id, group, category, delta));
        id
    }

    /// Revoke capabilities on a category.
    pub fn revoke(&mut self, group: GroupId, category: CategoryId, caps: Capability) -> GrantId {
        self.grant(group, category, CapabilityDelta::removing(caps))
    }

    /// Grant on a page.
    pub fn page_grant(&mut self, group: GroupId, page: PageId, delta: CapabilityDelta) -> GrantId {
        let id = GrantId::new(self.next_id());
        self.forum
            .insert_grant(PermissionGrant::on_page(id, group, page, delta));
        id
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Running checks
    // ─────────────────────────────────────────────────────────────────────────

    /// Groups of an actor, "everyone" included.
    pub fn groups(&self, actor: Option<&Actor>) -> Vec<GroupId> {
        self.forum.groups_of(actor)
    }

    /// Load what a page check needs.
    pub fn page_context(&self, page: &PageMeta) -> Result<PageContext> {
        PageContext::load(&self.forum, page)
    }

    /// Run the walk for a page.
    pub fn resolve(&self, actor: Option<&Actor>, page: &PageMeta) -> Result<CapabilitySet> {
        let ctx = self.page_context(page)?;
        let groups = self.groups(actor);
        self.engine.resolve(
            requester(actor, &groups),
            Some(&ctx.page),
            &ctx.ancestors,
            &ctx.grants,
        )
    }

    pub fn see_page(&self, actor: Option<&Actor>, page: &PageMeta) -> Result<Decision> {
        let ctx = self.page_context(page)?;
        let groups = self.groups(actor);
        self.engine
            .may_see_page(requester(actor, &groups), &ctx.page, &ctx.ancestors, &ctx.grants)
    }

    pub fn create_page(&self, actor: Option<&Actor>, new_page: &NewPage) -> Result<Decision> {
        let ctx = CategoryContext::load(&self.forum, new_page)?;
        let groups = self.groups(actor);
        self.engine.may_create_page(
            requester(actor, &groups),
            &ctx.new_page,
            &ctx.ancestors,
            &ctx.grants,
        )
    }

    pub fn post_reply(&self, actor: Option<&Actor>, page: &PageMeta) -> Result<Decision> {
        let ctx = self.page_context(page)?;
        let groups = self.groups(actor);
        self.engine
            .may_post_reply(requester(actor, &groups), &ctx.page, &ctx.ancestors, &ctx.grants)
    }

    pub fn submit_form(&self, actor: Option<&Actor>, page: &PageMeta) -> Result<Decision> {
        let ctx = self.page_context(page)?;
        let groups = self.groups(actor);
        self.engine.may_submit_custom_form(
            requester(actor, &groups),
            &ctx.page,
            &ctx.ancestors,
            &ctx.grants,
        )
    }

    pub fn flag_post(&self, actor: Option<&Actor>, post: &PostMeta, page: &PageMeta) -> Result<Decision> {
        let ctx = self.page_context(page)?;
        let groups = self.groups(actor);
        self.engine.may_flag_post(
            requester(actor, &groups),
            post,
            &ctx.page,
            &ctx.ancestors,
            &ctx.grants,
        )
    }

    pub fn see_post(&self, actor: Option<&Actor>, post: &PostMeta, page: &PageMeta) -> Result<Decision> {
        let ctx = self.page_context(page)?;
        let groups = self.groups(actor);
        self.engine.may_see_post(
            requester(actor, &groups),
            post,
            &ctx.page,
            &ctx.ancestors,
            &ctx.grants,
        )
    }

    pub fn edit_post(&self, actor: Option<&Actor>, post: &PostMeta, page: &PageMeta) -> Result<Decision> {
        let ctx = self.page_context(page)?;
        let groups = self.groups(actor);
        self.engine.may_edit_post(
            requester(actor, &groups),
            post,
            &ctx.page,
            &ctx.ancestors,
            &ctx.grants,
        )
    }

    pub fn delete_post(&self, actor: Option<&Actor>, post: &PostMeta, page: &PageMeta) -> Result<Decision> {
        let ctx = self.page_context(page)?;
        let groups = self.groups(actor);
        self.engine.may_delete_post(
            requester(actor, &groups),
            post,
            &ctx.page,
            &ctx.ancestors,
            &ctx.grants,
        )
    }
}

impl Default for ForumFixture {
    fn default() -> Self {
        Self::new()
    }
}

fn requester<'a>(actor: Option<&'a Actor>, groups: &'a [GroupId]) -> Requester<'a> {
    Requester { actor, groups }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_categories_are_linked() {
        let mut fx = ForumFixture::new();
        let ids = fx.nested_categories(3);
        let chain = fx.forum.ancestors(Some(ids[2])).unwrap();

        let chain_ids: Vec<_> = chain.iter().map(|c| c.id).collect();
        assert_eq!(chain_ids, vec![ids[2], ids[1], ids[0]]);
    }

    #[test]
    fn test_fixture_page_is_visible() {
        let mut fx = ForumFixture::new();
        let cat = fx.category(None);
        let member = fx.member();
        let page = fx.page(Some(cat), PageType::Discussion, member.id.unwrap());

        assert_eq!(fx.see_page(Some(&member), &page).unwrap(), Decision::Allowed);
        assert_eq!(fx.see_page(None, &page).unwrap(), Decision::Allowed);
    }

    #[test]
    fn test_group_membership() {
        let mut fx = ForumFixture::new();
        let a = fx.member();
        let b = fx.member();
        let group = fx.group(&[&a]);

        assert!(fx.groups(Some(&a)).contains(&group));
        assert!(!fx.groups(Some(&b)).contains(&group));
        assert!(fx.groups(None).contains(&ForumFixture::EVERYONE));
    }

    #[test]
    fn test_modify_category() {
        let mut fx = ForumFixture::new();
        let cat = fx.category(None);
        fx.modify_category(cat, Category::deleted);
        assert!(fx.forum.category(cat).unwrap().deleted);
    }
}
