//! # Forumgate Permissions
//!
//! Permission grants and the tables that hold them.
//!
//! ## Overview
//!
//! Access is granted to groups, never to individual users. Each
//! [`PermissionGrant`] targets one category or one page and carries a
//! capability delta: capabilities to add and capabilities to remove.
//!
//! ## Key Concepts
//!
//! - **Grant**: a row adding and removing capabilities for one group
//! - **GrantTable**: the rows loaded for a request, validated on insert
//! - **ActorGrants**: a table filtered down to one actor's groups
//!
//! Grant storage and indexing across requests belong to the caller. This
//! crate only validates rows and orders them deterministically.
//!
//! ## Usage
//!
//! ```rust
//! use forumgate_core::{Capability, CapabilityDelta, CategoryId, GrantId, GroupId};
//! use forumgate_perms::{GrantTable, PermissionGrant};
//!
//! let table = GrantTable::from_grants([PermissionGrant::on_category(
//!     GrantId::new(1),
//!     GroupId::new(10),
//!     CategoryId::new(3),
//!     CapabilityDelta::removing(Capability::POST_COMMENT),
//! )])
//! .unwrap();
//!
//! let mine = table.for_groups(&[GroupId::new(10)]);
//! assert_eq!(mine.on_category(CategoryId::new(3)).len(), 1);
//! ```

pub mod error;
pub mod grant;
pub mod table;

pub use error::{PermsError, Result};
pub use grant::{GrantTarget, PermissionGrant};
pub use table::{ActorGrants, GrantTable};
