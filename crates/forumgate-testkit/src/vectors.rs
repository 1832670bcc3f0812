//! Decision vectors.
//!
//! Each vector builds a small forum, runs one check, and names the decision
//! that check must produce. They pin down the observable behavior of the
//! engine: if any of them changes, so has the policy.

use forumgate::Result;
use forumgate_core::{
    codes, Actor, Capability, CapabilityDelta, Category, Decision, NewPage, PageType, PostMeta,
    PostId, ThreatLevel, UserId,
};

use crate::fixtures::ForumFixture;

/// A named policy check and the decision it must produce.
pub struct DecisionVector {
    pub name: &'static str,
    pub description: &'static str,
    pub run: fn() -> Result<Decision>,
    pub expected: Decision,
}

impl DecisionVector {
    /// Run the check and compare. Returns the actual decision on mismatch.
    pub fn verify(&self) -> std::result::Result<(), String> {
        match (self.run)() {
            Ok(actual) if actual == self.expected => Ok(()),
            Ok(actual) => Err(format!("expected {:?}, got {:?}", self.expected, actual)),
            Err(e) => Err(format!("check failed: {}", e)),
        }
    }
}

/// Every vector.
pub fn all_vectors() -> Vec<DecisionVector> {
    vec![
        DecisionVector {
            name: "create_in_public_category",
            description: "A non-staff actor creates a page in an ordinary category",
            run: || {
                let mut fx = ForumFixture::new();
                let cat = fx.category(None);
                let user = fx.member();
                fx.create_page(Some(&user), &NewPage::new(PageType::Discussion, Some(cat)))
            },
            expected: Decision::Allowed,
        },
        DecisionVector {
            name: "guest_private_talk",
            description: "A guest asks for a private conversation",
            run: || {
                let mut fx = ForumFixture::new();
                let a = fx.member();
                let b = fx.member();
                let page = fx.private_talk(user_id(&a), [user_id(&a), user_id(&b)]);
                fx.see_page(Some(&Actor::guest()), &page)
            },
            expected: Decision::not_found(codes::PRIVATE_NO_ACTOR),
        },
        DecisionVector {
            name: "staff_in_unlisted_category",
            description: "Staff see pages in unlisted categories",
            run: || {
                let mut fx = ForumFixture::new();
                let cat = fx.category_with(None, Category::unlisted);
                let moderator = fx.moderator();
                let author = fx.member();
                let page = fx.page(Some(cat), PageType::Discussion, user_id(&author));
                fx.see_page(Some(&moderator), &page)
            },
            expected: Decision::Allowed,
        },
        DecisionVector {
            name: "deleted_grandparent",
            description: "Deleting a category hides everything below it",
            run: || {
                let mut fx = ForumFixture::new();
                let ids = fx.nested_categories(3);
                fx.modify_category(ids[0], Category::deleted);
                let user = fx.member();
                let author = fx.member();
                let page = fx.page(Some(ids[2]), PageType::Question, user_id(&author));
                fx.see_page(Some(&user), &page)
            },
            expected: Decision::not_found(codes::CATEGORY_DELETED),
        },
        DecisionVector {
            name: "severe_threat_flag",
            description: "A dangerous actor may not flag even a visible post",
            run: || {
                let mut fx = ForumFixture::new();
                let cat = fx.category(None);
                let author = fx.member();
                let page = fx.page(Some(cat), PageType::Discussion, user_id(&author));
                let post = fx.reply(&page, user_id(&author));
                let actor = fx.member().with_threat_level(ThreatLevel::SevereThreat);
                fx.flag_post(Some(&actor), &post, &page)
            },
            expected: Decision::denied(codes::FLAG_THREAT, "You may not flag posts"),
        },
        DecisionVector {
            name: "admin_sees_deleted_everything",
            description: "Admins see pages in deleted, unlisted, staff-only categories",
            run: || {
                let mut fx = ForumFixture::new();
                let cat = fx.category_with(None, |c| c.deleted().unlisted().legacy_staff_only());
                let admin = fx.admin();
                let author = fx.member();
                let page = fx.page(Some(cat), PageType::Discussion, user_id(&author));
                fx.see_page(Some(&admin), &page.deleted())
            },
            expected: Decision::Allowed,
        },
        DecisionVector {
            name: "deleted_page_non_author",
            description: "Only the author and staff see a deleted page",
            run: || {
                let mut fx = ForumFixture::new();
                let cat = fx.category(None);
                let author = fx.member();
                let page = fx.page(Some(cat), PageType::Idea, user_id(&author)).deleted();
                let other = fx.member();
                fx.see_page(Some(&other), &page)
            },
            expected: Decision::not_found(codes::PAGE_DELETED),
        },
        DecisionVector {
            name: "revoked_see_on_parent",
            description: "Revoking see on a parent hides its children",
            run: || {
                let mut fx = ForumFixture::new();
                let ids = fx.nested_categories(2);
                fx.revoke(ForumFixture::EVERYONE, ids[0], Capability::SEE);
                let user = fx.member();
                let author = fx.member();
                let page = fx.page(Some(ids[1]), PageType::Discussion, user_id(&author));
                fx.see_page(Some(&user), &page)
            },
            expected: Decision::not_found(codes::CATEGORY_GRANT),
        },
        DecisionVector {
            name: "child_grant_cannot_restore_see",
            description: "A child category cannot restore what a parent hid",
            run: || {
                let mut fx = ForumFixture::new();
                let ids = fx.nested_categories(2);
                fx.revoke(ForumFixture::EVERYONE, ids[0], Capability::SEE);
                fx.grant(
                    ForumFixture::EVERYONE,
                    ids[1],
                    CapabilityDelta::adding(Capability::SEE),
                );
                let user = fx.member();
                let author = fx.member();
                let page = fx.page(Some(ids[1]), PageType::Discussion, user_id(&author));
                fx.see_page(Some(&user), &page)
            },
            expected: Decision::not_found(codes::CATEGORY_GRANT),
        },
        DecisionVector {
            name: "staff_reply_revoked",
            description: "Grants apply to staff too",
            run: || {
                let mut fx = ForumFixture::new();
                let cat = fx.category(None);
                let moderator = fx.moderator();
                let group = fx.group(&[&moderator]);
                fx.revoke(group, cat, Capability::POST_COMMENT);
                let author = fx.member();
                let page = fx.page(Some(cat), PageType::Discussion, user_id(&author));
                fx.post_reply(Some(&moderator), &page)
            },
            expected: Decision::denied(codes::REPLY_NO_CAPABILITY, "You may not reply here"),
        },
        DecisionVector {
            name: "legacy_staff_only_create",
            description: "Legacy staff-only-create categories stay readable",
            run: || {
                let mut fx = ForumFixture::new();
                let cat = fx.category_with(None, Category::legacy_only_staff_may_create);
                let user = fx.member();
                fx.create_page(Some(&user), &NewPage::new(PageType::Idea, Some(cat)))
            },
            expected: Decision::denied(
                codes::CREATE_STAFF_ONLY_CATEGORY,
                "You may not create pages in this category",
            ),
        },
        DecisionVector {
            name: "admin_only_page_type",
            description: "Only admins see code and special-content pages",
            run: || {
                let mut fx = ForumFixture::new();
                let moderator = fx.moderator();
                let page = fx.page(None, PageType::Code, user_id(&moderator));
                fx.see_page(Some(&moderator), &page)
            },
            expected: Decision::not_found(codes::ADMIN_ONLY_PAGE),
        },
        DecisionVector {
            name: "form_submission_by_guest",
            description: "Guests may submit forms in visible categories",
            run: || {
                let mut fx = ForumFixture::new();
                let cat = fx.category(None);
                let author = fx.moderator();
                let page = fx.page(Some(cat), PageType::Form, user_id(&author));
                fx.submit_form(None, &page)
            },
            expected: Decision::Allowed,
        },
        DecisionVector {
            name: "flag_deleted_reply_by_stranger",
            description: "A deleted reply is invisible to other members",
            run: || {
                let mut fx = ForumFixture::new();
                let cat = fx.category(None);
                let author = fx.member();
                let page = fx.page(Some(cat), PageType::Discussion, user_id(&author));
                let post = PostMeta::reply(PostId::new(9000), page.id, user_id(&author)).deleted();
                let other = fx.member();
                fx.flag_post(Some(&other), &post, &page)
            },
            expected: Decision::not_found(codes::POST_DELETED),
        },
    ]
}

/// Run every vector. Returns `(name, passed, detail)` per vector.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .iter()
        .map(|v| match v.verify() {
            Ok(()) => (v.name.to_string(), true, "ok".to_string()),
            Err(detail) => (v.name.to_string(), false, detail),
        })
        .collect()
}

fn user_id(actor: &Actor) -> UserId {
    actor.id.unwrap_or(UserId::new(0))
}
