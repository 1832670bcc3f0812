//! Policy entry points.
//!
//! Each check runs the ancestor walk and then applies the rules specific to
//! one action. All checks return a [`Decision`]:
//!
//! - `NotFound` whenever the actor may not see the content. Which rule hid
//!   it is recorded only in the internal trace code.
//! - `Denied` when the actor can see the content but may not do this.
//! - `Allowed` otherwise.
//!
//! A [`PolicyError`](crate::PolicyError) means the caller passed inconsistent
//! inputs, and the request should fail with an internal error.

use forumgate_core::{
    codes, Actor, CapabilitySet, Category, CoreError, Decision, GroupId, NewPage, PageMeta,
    PageType, PostMeta,
};
use forumgate_perms::GrantTable;

use crate::config::PolicyConfig;
use crate::error::Result;
use crate::walk::{resolve_capabilities, AccessRequest};

/// Who is asking: the actor, if any, and the groups it belongs to.
#[derive(Debug, Clone, Copy)]
pub struct Requester<'a> {
    pub actor: Option<&'a Actor>,
    pub groups: &'a [GroupId],
}

impl<'a> Requester<'a> {
    /// A known actor.
    pub fn new(actor: &'a Actor, groups: &'a [GroupId]) -> Self {
        Self {
            actor: Some(actor),
            groups,
        }
    }

    /// An anonymous visitor, in the given groups (typically just "everyone").
    pub fn anonymous(groups: &'a [GroupId]) -> Self {
        Self {
            actor: None,
            groups,
        }
    }

    fn is_staff(&self) -> bool {
        self.actor.map_or(false, Actor::is_staff)
    }

    fn is_guest(&self) -> bool {
        self.actor.map_or(true, Actor::is_guest)
    }

    fn is_author_of(&self, post: &PostMeta) -> bool {
        self.actor.map_or(false, |a| a.is(post.author_id))
    }

    fn is_author_of_page(&self, page: &PageMeta) -> bool {
        self.actor.map_or(false, |a| a.is(page.author_id))
    }
}

/// The policy engine.
///
/// Holds only configuration, so it is cheap to clone and safe to share
/// between threads. Every check is a pure function of its arguments.
#[derive(Debug, Clone, Default)]
pub struct PolicyEngine {
    config: PolicyConfig,
}

impl PolicyEngine {
    /// Create an engine with the given configuration.
    pub fn new(config: PolicyConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    /// A copy of this engine for a context that does or does not show
    /// unlisted categories to non-staff.
    pub fn with_unlisted_visible(&self, visible: bool) -> Self {
        let mut config = self.config.clone();
        config.see_unlisted_categories = visible;
        Self { config }
    }

    /// Run the ancestor walk.
    pub fn resolve(
        &self,
        who: Requester<'_>,
        page: Option<&PageMeta>,
        ancestors: &[Category],
        grants: &GrantTable,
    ) -> Result<CapabilitySet> {
        resolve_capabilities(&AccessRequest {
            actor: who.actor,
            groups: who.groups,
            page,
            ancestors,
            grants,
            see_unlisted: self.config.see_unlisted_categories,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Pages
    // ─────────────────────────────────────────────────────────────────────────

    /// May the actor see the page?
    pub fn may_see_page(
        &self,
        who: Requester<'_>,
        page: &PageMeta,
        ancestors: &[Category],
        grants: &GrantTable,
    ) -> Result<Decision> {
        let caps = self.resolve(who, Some(page), ancestors, grants)?;
        if !caps.may_see() {
            return Ok(Decision::not_found(caps.trace()));
        }
        Ok(Decision::Allowed)
    }

    /// May the actor create a page in the category at the head of `ancestors`?
    pub fn may_create_page(
        &self,
        who: Requester<'_>,
        new_page: &NewPage,
        ancestors: &[Category],
        grants: &GrantTable,
    ) -> Result<Decision> {
        let head = ancestors.first().map(|c| c.id);
        if new_page.category_id != head {
            return Err(CoreError::CategoryChainMismatch {
                expected: new_page.category_id,
                actual: head,
            }
            .into());
        }

        let caps = self.resolve(who, None, ancestors, grants)?;
        if !caps.may_see() {
            return Ok(Decision::not_found(caps.trace()));
        }
        if !caps.may_create_page() {
            let code = if caps.page_creation_blocked() {
                codes::CREATE_STAFF_ONLY_CATEGORY
            } else {
                codes::CREATE_NO_CAPABILITY
            };
            return Ok(Decision::denied(
                code,
                "You may not create pages in this category",
            ));
        }

        if who.is_staff() {
            return Ok(Decision::Allowed);
        }

        let page_type = new_page.page_type;
        if ancestors.is_empty() && !page_type.is_private_group_talk() {
            return Ok(Decision::denied(
                codes::CREATE_OUTSIDE_CATEGORY,
                "Pages must be created in a category",
            ));
        }
        if new_page.slug.is_some() {
            return Ok(Decision::denied(
                codes::CREATE_WITH_SLUG,
                "Only staff may choose the URL of a page",
            ));
        }
        if page_type.is_staff_only_to_create() {
            return Ok(Decision::denied(
                codes::CREATE_STAFF_ONLY_TYPE,
                "Only staff may create this kind of page",
            ));
        }
        if page_type.is_private_group_talk() && who.is_guest() {
            return Ok(Decision::denied(
                codes::CREATE_PRIVATE_AS_GUEST,
                "Guests may not start private conversations",
            ));
        }

        Ok(Decision::Allowed)
    }

    /// May the actor reply on the page?
    pub fn may_post_reply(
        &self,
        who: Requester<'_>,
        page: &PageMeta,
        ancestors: &[Category],
        grants: &GrantTable,
    ) -> Result<Decision> {
        let caps = self.resolve(who, Some(page), ancestors, grants)?;
        if !caps.may_see() {
            return Ok(Decision::not_found(caps.trace()));
        }
        if !page.page_type.can_have_replies() {
            return Ok(Decision::denied(
                codes::REPLY_NOT_REPLYABLE,
                "This kind of page does not take replies",
            ));
        }
        if !caps.may_post_comment() {
            return Ok(Decision::denied(
                codes::REPLY_NO_CAPABILITY,
                "You may not reply here",
            ));
        }
        if page.page_type == PageType::MindMap
            && !who.is_staff()
            && !who.is_author_of_page(page)
        {
            return Ok(Decision::denied(
                codes::REPLY_MIND_MAP,
                "Only the author may edit this mind map",
            ));
        }
        Ok(Decision::Allowed)
    }

    /// May the actor submit the form on the page?
    pub fn may_submit_custom_form(
        &self,
        who: Requester<'_>,
        page: &PageMeta,
        ancestors: &[Category],
        grants: &GrantTable,
    ) -> Result<Decision> {
        let caps = self.resolve(who, Some(page), ancestors, grants)?;
        if !caps.may_see() {
            return Ok(Decision::not_found(caps.trace()));
        }
        if !page.page_type.is_form() {
            return Ok(Decision::denied(
                codes::FORM_NOT_A_FORM,
                "This page is not a form",
            ));
        }
        if !page.page_type.can_have_replies() {
            return Err(CoreError::FormCannotHoldReplies(page.page_type).into());
        }
        if !caps.may_post_comment() {
            return Ok(Decision::denied(
                codes::REPLY_NO_CAPABILITY,
                "You may not submit this form",
            ));
        }
        Ok(Decision::Allowed)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Posts
    // ─────────────────────────────────────────────────────────────────────────

    /// May the actor flag the post?
    ///
    /// Actors at or above the configured threat level are turned away before
    /// anything else is looked at.
    pub fn may_flag_post(
        &self,
        who: Requester<'_>,
        post: &PostMeta,
        page: &PageMeta,
        ancestors: &[Category],
        grants: &GrantTable,
    ) -> Result<Decision> {
        if let Some(actor) = who.actor {
            if actor.threat_level >= self.config.flag_threat_cutoff {
                return Ok(Decision::denied(
                    codes::FLAG_THREAT,
                    "You may not flag posts",
                ));
            }
        }
        if who.is_guest() {
            return Ok(Decision::denied(
                codes::FLAG_GUEST,
                "Log in to flag posts",
            ));
        }

        let caps = self.post_visibility(who, post, page, ancestors, grants)?;
        if !caps.may_see() {
            return Ok(Decision::not_found(caps.trace()));
        }
        if post.deleted && !self.config.deleted_posts_flaggable {
            return Ok(Decision::denied(
                codes::FLAG_DELETED_POST,
                "The post has been deleted",
            ));
        }
        Ok(Decision::Allowed)
    }

    /// May the actor see the post?
    pub fn may_see_post(
        &self,
        who: Requester<'_>,
        post: &PostMeta,
        page: &PageMeta,
        ancestors: &[Category],
        grants: &GrantTable,
    ) -> Result<Decision> {
        let caps = self.post_visibility(who, post, page, ancestors, grants)?;
        if !caps.may_see() {
            return Ok(Decision::not_found(caps.trace()));
        }
        Ok(Decision::Allowed)
    }

    /// May the actor edit the post?
    pub fn may_edit_post(
        &self,
        who: Requester<'_>,
        post: &PostMeta,
        page: &PageMeta,
        ancestors: &[Category],
        grants: &GrantTable,
    ) -> Result<Decision> {
        let caps = self.post_visibility(who, post, page, ancestors, grants)?;
        if !caps.may_see() {
            return Ok(Decision::not_found(caps.trace()));
        }
        if (post.deleted || caps.content_deleted()) && !who.is_staff() {
            return Ok(Decision::denied(
                codes::EDIT_DELETED,
                "Deleted content cannot be edited",
            ));
        }
        if who.is_author_of(post) {
            return Ok(Decision::Allowed);
        }

        let by_role = if post.is_orig_post {
            caps.may_edit_page()
        } else {
            caps.may_edit_comment()
        };
        if by_role || (post.is_wiki && caps.may_edit_wiki()) {
            return Ok(Decision::Allowed);
        }
        Ok(Decision::denied(
            codes::EDIT_NO_CAPABILITY,
            "You may not edit this post",
        ))
    }

    /// May the actor delete the post?
    pub fn may_delete_post(
        &self,
        who: Requester<'_>,
        post: &PostMeta,
        page: &PageMeta,
        ancestors: &[Category],
        grants: &GrantTable,
    ) -> Result<Decision> {
        let caps = self.post_visibility(who, post, page, ancestors, grants)?;
        if !caps.may_see() {
            return Ok(Decision::not_found(caps.trace()));
        }
        if post.deleted {
            return Ok(Decision::denied(
                codes::DELETE_ALREADY_DELETED,
                "The post is already deleted",
            ));
        }
        if who.is_author_of(post) {
            return Ok(Decision::Allowed);
        }

        let by_role = if post.is_orig_post {
            caps.may_delete_page()
        } else {
            caps.may_delete_comment()
        };
        if by_role {
            return Ok(Decision::Allowed);
        }
        Ok(Decision::denied(
            codes::DELETE_NO_CAPABILITY,
            "You may not delete this post",
        ))
    }

    /// Page capabilities, narrowed to nothing if the post itself is deleted
    /// and the actor is neither its author nor staff.
    fn post_visibility(
        &self,
        who: Requester<'_>,
        post: &PostMeta,
        page: &PageMeta,
        ancestors: &[Category],
        grants: &GrantTable,
    ) -> Result<CapabilitySet> {
        if post.page_id != page.id {
            return Err(CoreError::PostPageMismatch {
                post: post.id,
                post_page: post.page_id,
                page: page.id,
            }
            .into());
        }

        let caps = self.resolve(who, Some(page), ancestors, grants)?;
        if caps.may_see() && post.deleted && !who.is_staff() && !who.is_author_of(post) {
            tracing::debug!(post = %post.id, "deleted post hidden from actor");
            return Ok(CapabilitySet::NOTHING.traced(codes::POST_DELETED));
        }
        Ok(caps)
    }
}
