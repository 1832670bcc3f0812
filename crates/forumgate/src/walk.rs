//! The category ancestor walk.
//!
//! [`resolve_capabilities`] decides what an actor may do on a page (or in a
//! category, when creating a page) by walking the page's ancestor categories
//! from the root-most one down to the page's own category:
//!
//! ```text
//! admin?            -> everything
//! page checks       -> admin-only types, private talk participants
//! baseline          -> everything for staff, see/post/create for others
//! deleted page?     -> nothing unless author or staff
//! for each category, root-most first:
//!     apply the actor's grants on it (staff included)
//!     deleted / unlisted / legacy staff-only -> nothing for non-staff
//!     legacy staff-only-create -> no page creation for non-staff
//!     cannot see any more? -> stop, descendants stay invisible
//! apply the actor's grants on the page itself
//! ```
//!
//! The walk is a pure function of its inputs. It allocates only the grant
//! index for the actor and runs in time linear in the chain length plus the
//! number of grants.

use forumgate_core::{
    codes, validate_chain, validate_page, Actor, Capability, CapabilitySet, Category, GroupId,
    PageMeta,
};
use forumgate_perms::GrantTable;

use crate::error::Result;

/// Everything the walk looks at.
#[derive(Debug, Clone, Copy)]
pub struct AccessRequest<'a> {
    /// The actor, or `None` for an anonymous visitor.
    pub actor: Option<&'a Actor>,

    /// The actor's groups. Only grants to these groups apply.
    pub groups: &'a [GroupId],

    /// The page acted on. `None` when only the category matters.
    pub page: Option<&'a PageMeta>,

    /// Ancestor categories, nearest first, root excluded.
    pub ancestors: &'a [Category],

    /// Grant rows for the request.
    pub grants: &'a GrantTable,

    /// Whether non-staff may see unlisted categories in this context.
    pub see_unlisted: bool,
}

impl<'a> AccessRequest<'a> {
    fn is_staff(&self) -> bool {
        self.actor.map_or(false, Actor::is_staff)
    }

    fn is_admin(&self) -> bool {
        self.actor.map_or(false, Actor::is_admin)
    }
}

/// Resolve what the actor may do.
///
/// Returns an error only if the inputs are inconsistent: a chain that is not
/// linked, includes the root, or does not start at the page's category, or a
/// participant set that does not match the page type.
pub fn resolve_capabilities(req: &AccessRequest<'_>) -> Result<CapabilitySet> {
    if req.is_admin() {
        return Ok(CapabilitySet::EVERYTHING.traced(codes::ADMIN));
    }

    validate_chain(req.ancestors)?;

    if let Some(page) = req.page {
        validate_page(page, req.ancestors)?;

        if page.page_type.is_admin_only() {
            return Ok(hidden(codes::ADMIN_ONLY_PAGE));
        }

        if page.page_type.is_private_group_talk() {
            if let Some(code) = private_talk_exclusion(req.actor, page) {
                return Ok(hidden(code));
            }
        }
    }

    let is_staff = req.is_staff();
    let grants = req.grants.for_groups(req.groups);

    let mut caps = if is_staff {
        CapabilitySet::EVERYTHING.traced(codes::STAFF_BASELINE)
    } else {
        CapabilitySet::new(Capability::MEMBER_DEFAULT, codes::MEMBER_BASELINE)
    };

    let mut deleted_seen = false;

    if let Some(page) = req.page {
        if page.deleted {
            let is_author = req.actor.map_or(false, |a| a.is(page.author_id));
            if !is_author && !is_staff {
                return Ok(hidden(codes::PAGE_DELETED));
            }
            deleted_seen = true;
        }
    }

    for category in req.ancestors.iter().rev() {
        for grant in grants.on_category(category.id) {
            caps = caps.apply_delta(&grant.delta, codes::CATEGORY_GRANT);
        }

        if category.deleted {
            deleted_seen = true;
            if !is_staff {
                return Ok(hidden(codes::CATEGORY_DELETED));
            }
        }

        if category.unlisted && !req.see_unlisted && !is_staff {
            return Ok(hidden(codes::CATEGORY_UNLISTED));
        }

        if legacy::hides_category(category, is_staff) {
            return Ok(hidden(codes::CATEGORY_STAFF_ONLY));
        }

        if legacy::blocks_page_creation(category, is_staff) {
            caps = caps.block_page_creation(codes::CREATE_STAFF_ONLY_CATEGORY);
        }

        if !caps.may_see() {
            tracing::debug!(category = %category.id, code = caps.trace(), "category not visible");
            return Ok(caps);
        }
    }

    if let Some(page) = req.page {
        for grant in grants.on_page(page.id) {
            caps = caps.apply_delta(&grant.delta, codes::PAGE_GRANT);
        }
        if !caps.may_see() {
            tracing::debug!(page = %page.id, code = caps.trace(), "page not visible");
            return Ok(caps);
        }
    }

    if deleted_seen {
        caps = caps.mark_deleted();
    }

    Ok(caps)
}

/// Why an actor is kept out of a private talk page, if they are.
fn private_talk_exclusion(actor: Option<&Actor>, page: &PageMeta) -> Option<&'static str> {
    let actor = match actor {
        Some(actor) if !actor.is_guest() => actor,
        _ => return Some(codes::PRIVATE_NO_ACTOR),
    };
    if !actor.is_member() {
        return Some(codes::PRIVATE_NOT_MEMBER);
    }
    match actor.id {
        Some(id) if page.has_participant(id) => None,
        _ => Some(codes::PRIVATE_NOT_PARTICIPANT),
    }
}

fn hidden(code: &'static str) -> CapabilitySet {
    tracing::debug!(code, "content hidden from actor");
    CapabilitySet::NOTHING.traced(code)
}

/// Checks for the deprecated per-category flags. Delete this module, and
/// its two call sites above, once categories use grants instead.
mod legacy {
    use forumgate_core::Category;

    pub(super) fn hides_category(category: &Category, is_staff: bool) -> bool {
        category.legacy.hides_from_non_staff() && !is_staff
    }

    pub(super) fn blocks_page_creation(category: &Category, is_staff: bool) -> bool {
        category.legacy.blocks_non_staff_create() && !is_staff
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forumgate_core::{CapabilityDelta, CategoryId, GrantId, PageId, PageType, UserId};
    use forumgate_perms::PermissionGrant;

    const MEMBERS: GroupId = GroupId::new(10);

    /// Chain for a page in category 3, whose parent is 2, whose parent is
    /// the root 1.
    fn chain() -> Vec<Category> {
        vec![
            Category::new(CategoryId::new(3), Some(CategoryId::new(2))),
            Category::new(CategoryId::new(2), Some(CategoryId::new(1))),
        ]
    }

    fn page() -> PageMeta {
        PageMeta::new(
            PageId::new(100),
            Some(CategoryId::new(3)),
            PageType::Discussion,
            UserId::new(50),
        )
    }

    fn resolve(
        actor: Option<&Actor>,
        page: Option<&PageMeta>,
        ancestors: &[Category],
        grants: &GrantTable,
    ) -> CapabilitySet {
        resolve_capabilities(&AccessRequest {
            actor,
            groups: &[MEMBERS],
            page,
            ancestors,
            grants,
            see_unlisted: false,
        })
        .unwrap()
    }

    #[test]
    fn test_member_baseline() {
        let actor = Actor::member(UserId::new(7));
        let caps = resolve(Some(&actor), Some(&page()), &chain(), &GrantTable::new());

        assert_eq!(caps.flags(), Capability::MEMBER_DEFAULT);
        assert!(!caps.content_deleted());
    }

    #[test]
    fn test_staff_baseline_is_everything() {
        let actor = Actor::moderator(UserId::new(7));
        let caps = resolve(Some(&actor), Some(&page()), &chain(), &GrantTable::new());
        assert_eq!(caps.flags(), Capability::all());
    }

    #[test]
    fn test_admin_ignores_everything() {
        let admin = Actor::admin(UserId::new(1));
        let mut ancestors = chain();
        ancestors[1].deleted = true;
        ancestors[0].legacy.staff_only = true;
        let grants = GrantTable::from_grants([PermissionGrant::on_category(
            GrantId::new(1),
            MEMBERS,
            CategoryId::new(3),
            CapabilityDelta::removing(Capability::all()),
        )])
        .unwrap();

        let caps = resolve(Some(&admin), Some(&page().deleted()), &ancestors, &grants);
        assert_eq!(caps, CapabilitySet::EVERYTHING.traced(codes::ADMIN));
    }

    #[test]
    fn test_deeper_grant_overrides_ancestor_grant() {
        let grants = GrantTable::from_grants([
            // Child category grant has the lower id, but is applied later
            // because the walk goes root first.
            PermissionGrant::on_category(
                GrantId::new(1),
                MEMBERS,
                CategoryId::new(3),
                CapabilityDelta::adding(Capability::POST_COMMENT),
            ),
            PermissionGrant::on_category(
                GrantId::new(2),
                MEMBERS,
                CategoryId::new(2),
                CapabilityDelta::removing(Capability::POST_COMMENT),
            ),
        ])
        .unwrap();

        let actor = Actor::member(UserId::new(7));
        let caps = resolve(Some(&actor), Some(&page()), &chain(), &grants);
        assert!(caps.may_post_comment());
    }

    #[test]
    fn test_invisible_ancestor_cannot_be_restored() {
        let grants = GrantTable::from_grants([
            PermissionGrant::on_category(
                GrantId::new(1),
                MEMBERS,
                CategoryId::new(2),
                CapabilityDelta::removing(Capability::SEE),
            ),
            PermissionGrant::on_category(
                GrantId::new(2),
                MEMBERS,
                CategoryId::new(3),
                CapabilityDelta::adding(Capability::SEE),
            ),
        ])
        .unwrap();

        let actor = Actor::member(UserId::new(7));
        let caps = resolve(Some(&actor), Some(&page()), &chain(), &grants);
        assert!(!caps.may_see());
        assert_eq!(caps.trace(), codes::CATEGORY_GRANT);
    }

    #[test]
    fn test_grants_apply_to_staff() {
        let grants = GrantTable::from_grants([PermissionGrant::on_category(
            GrantId::new(1),
            MEMBERS,
            CategoryId::new(3),
            CapabilityDelta::removing(Capability::POST_COMMENT),
        )])
        .unwrap();

        let moderator = Actor::moderator(UserId::new(7));
        let caps = resolve(Some(&moderator), Some(&page()), &chain(), &grants);
        assert!(!caps.may_post_comment());
        assert!(caps.may_see());
    }

    #[test]
    fn test_grants_for_other_groups_ignored() {
        let grants = GrantTable::from_grants([PermissionGrant::on_category(
            GrantId::new(1),
            GroupId::new(99),
            CategoryId::new(3),
            CapabilityDelta::removing(Capability::SEE),
        )])
        .unwrap();

        let actor = Actor::member(UserId::new(7));
        assert!(resolve(Some(&actor), Some(&page()), &chain(), &grants).may_see());
    }

    #[test]
    fn test_deleted_page_visible_to_author_only() {
        let deleted = page().deleted();

        let author = Actor::member(UserId::new(50));
        let caps = resolve(Some(&author), Some(&deleted), &chain(), &GrantTable::new());
        assert!(caps.may_see());
        assert!(caps.content_deleted());

        let other = Actor::member(UserId::new(51));
        let caps = resolve(Some(&other), Some(&deleted), &chain(), &GrantTable::new());
        assert_eq!(caps.trace(), codes::PAGE_DELETED);
        assert!(!caps.may_see());
    }

    #[test]
    fn test_deleted_ancestor_hides_from_non_staff() {
        let mut ancestors = chain();
        ancestors[1].deleted = true;

        let member = Actor::member(UserId::new(50));
        let caps = resolve(Some(&member), Some(&page()), &ancestors, &GrantTable::new());
        assert_eq!(caps.trace(), codes::CATEGORY_DELETED);

        let moderator = Actor::moderator(UserId::new(5));
        let caps = resolve(Some(&moderator), Some(&page()), &ancestors, &GrantTable::new());
        assert!(caps.may_see());
        assert!(caps.content_deleted());
    }

    #[test]
    fn test_unlisted_category() {
        let mut ancestors = chain();
        ancestors[0].unlisted = true;
        let member = Actor::member(UserId::new(8));
        let grants = GrantTable::new();

        let hidden = resolve(Some(&member), Some(&page()), &ancestors, &grants);
        assert_eq!(hidden.trace(), codes::CATEGORY_UNLISTED);

        let listed = resolve_capabilities(&AccessRequest {
            actor: Some(&member),
            groups: &[MEMBERS],
            page: Some(&page()),
            ancestors: &ancestors,
            grants: &grants,
            see_unlisted: true,
        })
        .unwrap();
        assert!(listed.may_see());
    }

    #[test]
    fn test_legacy_staff_only_flags() {
        let member = Actor::member(UserId::new(8));
        let grants = GrantTable::new();

        let mut ancestors = chain();
        ancestors[1].legacy.staff_only = true;
        let caps = resolve(Some(&member), Some(&page()), &ancestors, &grants);
        assert_eq!(caps.trace(), codes::CATEGORY_STAFF_ONLY);

        let mut ancestors = chain();
        ancestors[0].legacy.only_staff_may_create = true;
        let caps = resolve(Some(&member), None, &ancestors, &grants);
        assert!(caps.may_see());
        assert!(!caps.may_create_page());
        assert_eq!(caps.trace(), codes::CREATE_STAFF_ONLY_CATEGORY);
    }

    #[test]
    fn test_creation_block_outlives_later_grants() {
        let grants = GrantTable::from_grants([PermissionGrant::on_category(
            GrantId::new(1),
            MEMBERS,
            CategoryId::new(3),
            CapabilityDelta::adding(Capability::EDIT_WIKI),
        )])
        .unwrap();
        let member = Actor::member(UserId::new(8));

        let mut ancestors = chain();
        ancestors[1].legacy.only_staff_may_create = true;
        let caps = resolve(Some(&member), None, &ancestors, &grants);
        assert!(!caps.may_create_page());
        assert!(caps.page_creation_blocked());
        assert_eq!(caps.trace(), codes::CATEGORY_GRANT);
    }

    #[test]
    fn test_creation_already_revoked_is_not_blocked() {
        let grants = GrantTable::from_grants([PermissionGrant::on_category(
            GrantId::new(1),
            MEMBERS,
            CategoryId::new(2),
            CapabilityDelta::removing(Capability::CREATE_PAGE),
        )])
        .unwrap();
        let member = Actor::member(UserId::new(8));

        let mut ancestors = chain();
        ancestors[0].legacy.only_staff_may_create = true;
        let caps = resolve(Some(&member), None, &ancestors, &grants);
        assert!(!caps.may_create_page());
        assert!(!caps.page_creation_blocked());
        assert_eq!(caps.trace(), codes::CATEGORY_GRANT);
    }

    #[test]
    fn test_page_grant_applied_after_categories() {
        let grants = GrantTable::from_grants([
            PermissionGrant::on_page(
                GrantId::new(1),
                MEMBERS,
                PageId::new(100),
                CapabilityDelta::adding(Capability::EDIT_WIKI),
            ),
            PermissionGrant::on_category(
                GrantId::new(2),
                MEMBERS,
                CategoryId::new(3),
                CapabilityDelta::removing(Capability::EDIT_WIKI),
            ),
        ])
        .unwrap();

        let member = Actor::member(UserId::new(8));
        let caps = resolve(Some(&member), Some(&page()), &chain(), &grants);
        assert!(caps.may_edit_wiki());
        assert_eq!(caps.trace(), codes::PAGE_GRANT);
    }

    #[test]
    fn test_admin_only_page_hidden_from_staff() {
        let moderator = Actor::moderator(UserId::new(2));
        let mut code_page = page();
        code_page.page_type = PageType::Code;
        let caps = resolve(Some(&moderator), Some(&code_page), &chain(), &GrantTable::new());
        assert_eq!(caps.trace(), codes::ADMIN_ONLY_PAGE);
    }

    #[test]
    fn test_private_talk_participants_only() {
        let talk = PageMeta::private_talk(
            PageId::new(5),
            PageType::FormalMessage,
            UserId::new(1),
            [UserId::new(1), UserId::new(2)],
        );
        let grants = GrantTable::new();

        let guest = Actor::guest();
        assert_eq!(
            resolve(Some(&guest), Some(&talk), &[], &grants).trace(),
            codes::PRIVATE_NO_ACTOR
        );
        assert_eq!(
            resolve(None, Some(&talk), &[], &grants).trace(),
            codes::PRIVATE_NO_ACTOR
        );

        let mut not_member = Actor::member(UserId::new(2));
        not_member.member = false;
        assert_eq!(
            resolve(Some(&not_member), Some(&talk), &[], &grants).trace(),
            codes::PRIVATE_NOT_MEMBER
        );

        let outsider = Actor::moderator(UserId::new(3));
        assert_eq!(
            resolve(Some(&outsider), Some(&talk), &[], &grants).trace(),
            codes::PRIVATE_NOT_PARTICIPANT
        );

        let participant = Actor::member(UserId::new(2));
        assert!(resolve(Some(&participant), Some(&talk), &[], &grants).may_see());
    }

    #[test]
    fn test_mismatched_chain_is_contract_violation() {
        let mut wrong = page();
        wrong.category_id = Some(CategoryId::new(2));
        let grants = GrantTable::new();
        let actor = Actor::member(UserId::new(1));

        let err = resolve_capabilities(&AccessRequest {
            actor: Some(&actor),
            groups: &[],
            page: Some(&wrong),
            ancestors: &chain(),
            grants: &grants,
            see_unlisted: false,
        })
        .unwrap_err();

        assert!(err.is_contract_violation());
    }

    #[test]
    fn test_deterministic() {
        let member = Actor::member(UserId::new(8));
        let grants = GrantTable::new();
        let a = resolve(Some(&member), Some(&page()), &chain(), &grants);
        let b = resolve(Some(&member), Some(&page()), &chain(), &grants);
        assert_eq!(a, b);
    }
}
