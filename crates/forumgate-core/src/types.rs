//! Strong identifier types.
//!
//! All identifiers are newtypes over `u64` so that a category id can never be
//! passed where a page id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// Create an id from its raw value.
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            /// Get the raw value.
            pub const fn get(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $prefix, self.0)
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }
    };
}

define_id!(
    /// Identifies a registered user or a guest with an identity.
    UserId,
    "user:"
);

define_id!(
    /// Identifies a group. Grants are always addressed to groups, never to
    /// individual users.
    GroupId,
    "group:"
);

define_id!(
    /// Identifies a category in the content tree.
    CategoryId,
    "cat:"
);

define_id!(
    /// Identifies a page.
    PageId,
    "page:"
);

define_id!(
    /// Identifies a post on a page.
    PostId,
    "post:"
);

define_id!(
    /// Identifies a permission grant row. Grant ids also fix the order in
    /// which grants on the same scope are applied.
    GrantId,
    "grant:"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display_has_prefix() {
        assert_eq!(CategoryId::new(7).to_string(), "cat:7");
        assert_eq!(PageId::new(12).to_string(), "page:12");
        assert_eq!(GrantId::new(3).to_string(), "grant:3");
    }

    #[test]
    fn test_id_debug() {
        let debug = format!("{:?}", UserId::new(42));
        assert_eq!(debug, "UserId(42)");
    }

    #[test]
    fn test_grant_ids_order_numerically() {
        let mut ids = vec![GrantId::new(10), GrantId::new(2), GrantId::new(7)];
        ids.sort();
        assert_eq!(ids, vec![GrantId::new(2), GrantId::new(7), GrantId::new(10)]);
    }

    #[test]
    fn test_id_serializes_transparently() {
        let json = serde_json::to_string(&GroupId::new(5)).unwrap();
        assert_eq!(json, "5");
        let back: GroupId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, GroupId::new(5));
    }
}
