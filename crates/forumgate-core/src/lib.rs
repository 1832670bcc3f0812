//! # Forumgate Core
//!
//! The data model for forum permission checks: actors, categories, pages,
//! capabilities, and decisions.
//!
//! This crate contains no I/O and no policy. It is plain data plus the
//! structural checks callers' inputs must pass.
//!
//! ## Key Types
//!
//! - [`Actor`] - A user or anonymous visitor
//! - [`Category`] - A node in the category tree
//! - [`PageMeta`] / [`PostMeta`] - The content being acted on
//! - [`CapabilitySet`] - What an actor may do somewhere
//! - [`Decision`] - Allowed, denied with a reason, or not found

pub mod actor;
pub mod capability;
pub mod category;
pub mod codes;
pub mod decision;
pub mod error;
pub mod page;
pub mod types;
pub mod validation;

pub use actor::{Actor, ThreatLevel, TrustLevel};
pub use capability::{Capability, CapabilityDelta, CapabilitySet};
pub use category::{Category, LegacyFlags};
pub use decision::Decision;
pub use error::{CoreError, Result};
pub use page::{NewPage, PageMeta, PageType, PostMeta};
pub use types::{CategoryId, GrantId, GroupId, PageId, PostId, UserId};
pub use validation::{validate_chain, validate_page};
