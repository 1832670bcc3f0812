//! Property-based testing generators using proptest.
//!
//! Strategies produce well-formed inputs: linked ancestor chains, pages that
//! match their chain, and participant sets that match their page type. Any
//! contract violation the engine reports for these is a bug in the engine.

use std::collections::BTreeSet;

use proptest::prelude::*;

use forumgate_core::{
    Actor, Capability, CapabilityDelta, Category, CategoryId, GrantId, GroupId, PageId, PageMeta,
    PageType, ThreatLevel, TrustLevel, UserId,
};
use forumgate_perms::{GrantTable, PermissionGrant};

/// Root category every generated chain hangs from.
pub const ROOT: CategoryId = CategoryId::new(1);

/// Groups generated actors and grants draw from.
pub const GROUPS: [GroupId; 3] = [GroupId::new(1), GroupId::new(2), GroupId::new(3)];

/// Users generated actors and authors draw from.
pub fn user_id() -> impl Strategy<Value = UserId> {
    (1u64..=8).prop_map(UserId::new)
}

pub fn trust_level() -> impl Strategy<Value = TrustLevel> {
    prop_oneof![
        Just(TrustLevel::Stranger),
        Just(TrustLevel::New),
        Just(TrustLevel::Basic),
        Just(TrustLevel::FullMember),
        Just(TrustLevel::Trusted),
        Just(TrustLevel::Regular),
        Just(TrustLevel::CoreMember),
    ]
}

pub fn threat_level() -> impl Strategy<Value = ThreatLevel> {
    prop_oneof![
        Just(ThreatLevel::HopefullySafe),
        Just(ThreatLevel::MildThreat),
        Just(ThreatLevel::ModerateThreat),
        Just(ThreatLevel::SevereThreat),
    ]
}

/// Any actor: guests, members, moderators, admins, at any trust and threat.
pub fn actor() -> impl Strategy<Value = Actor> {
    (
        proptest::option::weighted(0.85, user_id()),
        trust_level(),
        threat_level(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(id, trust_level, threat_level, admin, staff, member)| Actor {
            id,
            trust_level,
            threat_level,
            admin,
            staff,
            member,
        })
}

/// An actor that is not staff (and so not an admin).
pub fn non_staff_actor() -> impl Strategy<Value = Actor> {
    actor().prop_map(|mut a| {
        a.admin = false;
        a.staff = false;
        a
    })
}

/// An administrator.
pub fn admin_actor() -> impl Strategy<Value = Actor> {
    (user_id(), threat_level()).prop_map(|(id, threat)| Actor::admin(id).with_threat_level(threat))
}

/// A subset of [`GROUPS`], sorted.
pub fn groups() -> impl Strategy<Value = Vec<GroupId>> {
    proptest::sample::subsequence(GROUPS.to_vec(), 0..=GROUPS.len())
}

pub fn capability() -> impl Strategy<Value = Capability> {
    any::<u16>().prop_map(Capability::from_bits_truncate)
}

/// A delta whose add and remove sets do not overlap.
pub fn delta() -> impl Strategy<Value = CapabilityDelta> {
    (capability(), capability()).prop_map(|(add, remove)| CapabilityDelta {
        add: add - remove,
        remove,
    })
}

pub fn page_type() -> impl Strategy<Value = PageType> {
    proptest::sample::select(vec![
        PageType::Question,
        PageType::Problem,
        PageType::Idea,
        PageType::ToDo,
        PageType::MindMap,
        PageType::Discussion,
        PageType::EmbeddedComments,
        PageType::About,
        PageType::WebPage,
        PageType::CustomHtmlPage,
        PageType::Code,
        PageType::SpecialContent,
        PageType::Form,
        PageType::OpenChat,
        PageType::PrivateChat,
        PageType::FormalMessage,
        PageType::Forum,
        PageType::Blog,
    ])
}

/// A linked ancestor chain of up to `max_depth` categories, nearest first.
///
/// Category ids count up from 2 starting at the root-most one, so the
/// nearest category has the largest id.
pub fn ancestor_chain(max_depth: usize) -> impl Strategy<Value = Vec<Category>> {
    proptest::collection::vec(
        (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()),
        0..=max_depth,
    )
    .prop_map(|flags| {
        let mut chain: Vec<Category> = Vec::with_capacity(flags.len());
        let mut parent = ROOT;
        for (i, (deleted, unlisted, staff_only, staff_create)) in flags.into_iter().enumerate() {
            let id = CategoryId::new(i as u64 + 2);
            let mut category = Category::new(id, Some(parent));
            // Keep most categories plain so the walk gets past them.
            category.deleted = deleted && unlisted && staff_only;
            category.unlisted = unlisted && staff_create;
            category.legacy.staff_only = staff_only && staff_create && deleted;
            category.legacy.only_staff_may_create = staff_create;
            chain.push(category);
            parent = id;
        }
        chain.reverse();
        chain
    })
}

/// Distinct user ids.
pub fn participants() -> impl Strategy<Value = BTreeSet<UserId>> {
    proptest::collection::btree_set(user_id(), 1..5)
}

/// A page filed at the head of `chain`, with a matching participant set.
pub fn page_for(chain: &[Category]) -> impl Strategy<Value = PageMeta> {
    let category = chain.first().map(|c| c.id);
    (
        1u64..1000,
        page_type(),
        user_id(),
        any::<bool>(),
        participants(),
    )
        .prop_map(move |(id, page_type, author, deleted, participants)| {
            let mut page = if page_type.is_private_group_talk() {
                PageMeta::private_talk(PageId::new(id), page_type, author, participants)
            } else {
                PageMeta::new(PageId::new(id), category, page_type, author)
            };
            page.deleted = deleted;
            page
        })
}

/// A page filed in the root category by id rather than under `None`, the
/// way stored data often names it.
pub fn root_filed_page() -> impl Strategy<Value = PageMeta> {
    (
        1u64..1000,
        page_type().prop_filter("filed in a category", |t| !t.is_private_group_talk()),
        user_id(),
        any::<bool>(),
    )
        .prop_map(|(id, page_type, author, deleted)| {
            let mut page = PageMeta::new(PageId::new(id), Some(ROOT), page_type, author);
            page.deleted = deleted;
            page
        })
}

/// Grants on the chain's categories and on `page`, for [`GROUPS`].
pub fn grant_table(chain: &[Category], page: PageId) -> impl Strategy<Value = GrantTable> {
    let categories: Vec<CategoryId> = chain.iter().map(|c| c.id).collect();
    proptest::collection::vec(
        (
            proptest::sample::select(GROUPS.to_vec()),
            proptest::option::weighted(0.8, 0..categories.len().max(1)),
            delta(),
        ),
        0..8,
    )
    .prop_map(move |rows| {
        let grants = rows
            .into_iter()
            .enumerate()
            .map(|(i, (group, target, delta))| {
                let id = GrantId::new(i as u64 + 1);
                match target.and_then(|t| categories.get(t)) {
                    Some(&category) => PermissionGrant::on_category(id, group, category, delta),
                    None => PermissionGrant::on_page(id, group, page, delta),
                }
            });
        // Ids are unique and deltas never conflict.
        GrantTable::from_grants(grants).unwrap_or_default()
    })
}

/// A complete, well-formed access scenario.
#[derive(Debug, Clone)]
pub struct ScenarioParams {
    pub actor: Option<Actor>,
    pub groups: Vec<GroupId>,
    pub ancestors: Vec<Category>,
    pub page: PageMeta,
    pub grants: GrantTable,
}

impl ScenarioParams {
    /// Participant sets and chains are already consistent; this only checks
    /// the invariants the strategies rely on.
    pub fn is_well_formed(&self) -> bool {
        let head = self.ancestors.first().map(|c| c.id);
        let page_ok = if self.page.page_type.is_private_group_talk() {
            self.page.category_id.is_none() && self.page.participants.is_some()
        } else {
            self.page.category_id == head && self.page.participants.is_none()
        };
        let chain_ok = self
            .ancestors
            .windows(2)
            .all(|w| w[0].parent_id == Some(w[1].id));
        page_ok && chain_ok
    }
}

/// Scenario with a specific chain depth.
pub fn scenario(max_depth: usize) -> BoxedStrategy<ScenarioParams> {
    ancestor_chain(max_depth)
        .prop_flat_map(|chain| {
            let page = page_for(&chain);
            (Just(chain), page)
        })
        .prop_flat_map(|(chain, page)| {
            // Private talk pages live outside the category tree.
            let chain = if page.category_id.is_none() {
                Vec::new()
            } else {
                chain
            };
            let grants = grant_table(&chain, page.id);
            (
                proptest::option::weighted(0.9, actor()),
                groups(),
                Just(chain),
                Just(page),
                grants,
            )
        })
        .prop_map(|(actor, groups, ancestors, page, grants)| ScenarioParams {
            actor,
            groups,
            ancestors,
            page,
            grants,
        })
        .boxed()
}

impl Arbitrary for ScenarioParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        scenario(4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn scenarios_are_well_formed(params in any::<ScenarioParams>()) {
            prop_assert!(params.is_well_formed());
        }

        #[test]
        fn deltas_never_conflict(d in delta()) {
            prop_assert!(d.conflicts().is_empty());
        }

        #[test]
        fn chains_exclude_root(chain in ancestor_chain(6)) {
            prop_assert!(chain.iter().all(|c| !c.is_root()));
            if let Some(last) = chain.last() {
                prop_assert_eq!(last.parent_id, Some(ROOT));
            }
        }

        #[test]
        fn root_filed_pages_name_root(page in root_filed_page()) {
            prop_assert_eq!(page.category_id, Some(ROOT));
            prop_assert!(page.participants.is_none());
        }

        #[test]
        fn non_staff_actors_are_not_staff(a in non_staff_actor()) {
            prop_assert!(!a.is_staff());
            prop_assert!(!a.is_admin());
        }
    }
}
