//! Capabilities and capability sets.
//!
//! A [`Capability`] is a fixed set of yes/no flags. A [`CapabilitySet`] is the
//! accumulated state of a permission walk: the flags currently granted, plus
//! whether deleted content was seen on the way and a trace code telling
//! which step produced the set.
//!
//! Capability sets are values. Every step of the walk produces a new set;
//! nothing is mutated in place.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::codes;

bitflags! {
    /// Actions an actor may take on forum content.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Capability: u16 {
        const SEE            = 0b0000_0001;
        const POST_COMMENT   = 0b0000_0010;
        const CREATE_PAGE    = 0b0000_0100;
        const EDIT_PAGE      = 0b0000_1000;
        const EDIT_COMMENT   = 0b0001_0000;
        const EDIT_WIKI      = 0b0010_0000;
        const DELETE_PAGE    = 0b0100_0000;
        const DELETE_COMMENT = 0b1000_0000;
    }
}

impl Capability {
    /// What a non-staff actor may do before any grant applies.
    pub const MEMBER_DEFAULT: Self = Self::SEE
        .union(Self::POST_COMMENT)
        .union(Self::CREATE_PAGE);
}

/// Capabilities to add and to remove, as carried by a grant.
///
/// Applied add-first, so a flag present in both sets ends up removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CapabilityDelta {
    pub add: Capability,
    pub remove: Capability,
}

impl CapabilityDelta {
    /// A delta that only adds.
    pub fn adding(add: Capability) -> Self {
        Self {
            add,
            remove: Capability::empty(),
        }
    }

    /// A delta that only removes.
    pub fn removing(remove: Capability) -> Self {
        Self {
            add: Capability::empty(),
            remove,
        }
    }

    /// Also remove these.
    pub fn and_removing(mut self, remove: Capability) -> Self {
        self.remove |= remove;
        self
    }

    /// Flags both added and removed.
    pub fn conflicts(&self) -> Capability {
        self.add & self.remove
    }

    /// Apply to a set of flags.
    pub fn apply(&self, flags: Capability) -> Capability {
        (flags | self.add) - self.remove
    }
}

/// The result of resolving what an actor may do somewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilitySet {
    flags: Capability,
    content_deleted: bool,
    create_blocked: bool,
    trace: &'static str,
}

impl CapabilitySet {
    /// Nothing allowed, not even seeing.
    pub const NOTHING: Self = Self {
        flags: Capability::empty(),
        content_deleted: false,
        create_blocked: false,
        trace: codes::NOTHING,
    };

    /// Everything allowed.
    pub const EVERYTHING: Self = Self {
        flags: Capability::all(),
        content_deleted: false,
        create_blocked: false,
        trace: codes::EVERYTHING,
    };

    /// A set with the given flags.
    pub const fn new(flags: Capability, trace: &'static str) -> Self {
        Self {
            flags,
            content_deleted: false,
            create_blocked: false,
            trace,
        }
    }

    /// The same flags with another trace code.
    pub const fn traced(self, trace: &'static str) -> Self {
        Self { trace, ..self }
    }

    /// Apply a capability delta, producing a new set.
    ///
    /// The deleted-content flag is carried forward unchanged. A creation
    /// block lasts until a delta hands page creation back.
    pub fn apply_delta(&self, delta: &CapabilityDelta, trace: &'static str) -> Self {
        let flags = delta.apply(self.flags);
        Self {
            flags,
            content_deleted: self.content_deleted,
            create_blocked: self.create_blocked && !flags.contains(Capability::CREATE_PAGE),
            trace,
        }
    }

    /// Record that deleted content was encountered, leaving the flags alone.
    pub fn mark_deleted(self) -> Self {
        Self {
            content_deleted: true,
            ..self
        }
    }

    /// Take page creation away because the category reserves it for staff.
    ///
    /// A set that could not create pages anyway is returned as is, so the
    /// reason it lost the capability stays the earlier one.
    pub fn block_page_creation(self, trace: &'static str) -> Self {
        if !self.may_create_page() {
            return self;
        }
        Self {
            flags: self.flags - Capability::CREATE_PAGE,
            create_blocked: true,
            trace,
            ..self
        }
    }

    pub fn flags(&self) -> Capability {
        self.flags
    }

    pub fn allows(&self, capability: Capability) -> bool {
        self.flags.contains(capability)
    }

    pub fn may_see(&self) -> bool {
        self.allows(Capability::SEE)
    }

    pub fn may_post_comment(&self) -> bool {
        self.allows(Capability::POST_COMMENT)
    }

    pub fn may_create_page(&self) -> bool {
        self.allows(Capability::CREATE_PAGE)
    }

    pub fn may_edit_page(&self) -> bool {
        self.allows(Capability::EDIT_PAGE)
    }

    pub fn may_edit_comment(&self) -> bool {
        self.allows(Capability::EDIT_COMMENT)
    }

    pub fn may_edit_wiki(&self) -> bool {
        self.allows(Capability::EDIT_WIKI)
    }

    pub fn may_delete_page(&self) -> bool {
        self.allows(Capability::DELETE_PAGE)
    }

    pub fn may_delete_comment(&self) -> bool {
        self.allows(Capability::DELETE_COMMENT)
    }

    /// Whether deleted content (the page or an ancestor category) was seen.
    pub fn content_deleted(&self) -> bool {
        self.content_deleted
    }

    /// Whether a staff-only category took page creation away.
    pub fn page_creation_blocked(&self) -> bool {
        self.create_blocked
    }

    /// Internal trace code naming the step that produced this set.
    pub fn trace(&self) -> &'static str {
        self.trace
    }
}
