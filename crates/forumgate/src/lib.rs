//! # Forumgate
//!
//! Decides whether an actor may see, create, reply to, flag, edit, or delete
//! forum content.
//!
//! ## Overview
//!
//! Access is resolved by walking a page's ancestor categories from the
//! root-most one down, merging the grants that apply to the actor's groups
//! and honoring the categories' structural flags (deleted, unlisted, legacy
//! staff-only). The result is a
//! [`CapabilitySet`](forumgate_core::CapabilitySet), which the entry points
//! on [`PolicyEngine`] turn into a [`Decision`](forumgate_core::Decision).
//!
//! ## Key Concepts
//!
//! - **Deny by default for hidden content**: anything an actor may not see
//!   is reported as `NotFound`, exactly as if it did not exist.
//! - **Staff is a default, not an override**: staff start with every
//!   capability, but explicit grants still apply to them.
//! - **Admins see everything**, regardless of grants and flags.
//! - **Pure**: no I/O, no shared state. Callers load the data (see
//!   [`source`]) and may call the engine from any thread.
//!
//! ## Usage
//!
//! ```rust
//! use forumgate::{PolicyEngine, Requester};
//! use forumgate::core::{Actor, Category, CategoryId, GroupId, PageId, PageMeta, PageType, UserId};
//! use forumgate::perms::GrantTable;
//!
//! let engine = PolicyEngine::default();
//! let actor = Actor::member(UserId::new(7));
//! let groups = [GroupId::new(1)];
//!
//! let ancestors = vec![Category::new(CategoryId::new(2), Some(CategoryId::new(1)))];
//! let page = PageMeta::new(PageId::new(10), Some(CategoryId::new(2)), PageType::Question, UserId::new(3));
//!
//! let decision = engine
//!     .may_post_reply(Requester::new(&actor, &groups), &page, &ancestors, &GrantTable::new())
//!     .unwrap();
//! assert!(decision.is_allowed());
//! ```
//!
//! ## Re-exports
//!
//! - `forumgate::core` - Data model (actors, categories, pages, capabilities, decisions)
//! - `forumgate::perms` - Grants and grant tables

pub mod config;
pub mod error;
pub mod memory;
pub mod policy;
pub mod source;
pub mod walk;

// Re-export component crates
pub use forumgate_core as core;
pub use forumgate_perms as perms;

// Re-export main types for convenience
pub use config::PolicyConfig;
pub use error::{PolicyError, Result};
pub use memory::MemoryForum;
pub use policy::{PolicyEngine, Requester};
pub use source::{CategoryContext, CategoryTree, GrantSource, MembershipSource, PageContext};
pub use walk::{resolve_capabilities, AccessRequest};

pub use forumgate_core::{
    Actor, Capability, CapabilityDelta, CapabilitySet, Category, Decision, NewPage, PageMeta,
    PageType, PostMeta, ThreatLevel, TrustLevel,
};
pub use forumgate_perms::{GrantTable, PermissionGrant};
