//! Actors: the users and anonymous visitors on whose behalf access is checked.

use serde::{Deserialize, Serialize};

use crate::types::UserId;

/// How far the community trusts an actor.
///
/// Ordered from least to most trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TrustLevel {
    /// Someone without an identity, or a guest.
    Stranger,
    New,
    Basic,
    FullMember,
    Trusted,
    Regular,
    CoreMember,
}

/// How likely an actor is to cause harm.
///
/// Ordered from safest to most dangerous, so cutoffs can be expressed as
/// `level >= ThreatLevel::SevereThreat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ThreatLevel {
    HopefullySafe,
    MildThreat,
    ModerateThreat,
    SevereThreat,
}

/// A user or anonymous visitor.
///
/// A guest is an actor without an identity. Whatever the raw fields say, a
/// guest is never a member and always has the lowest trust level: use
/// [`Actor::is_member`] and [`Actor::trust_level`] rather than the fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The actor's identity, absent for guests.
    pub id: Option<UserId>,

    /// Trust level as recorded for the account.
    pub trust_level: TrustLevel,

    /// Threat level as recorded for the account.
    pub threat_level: ThreatLevel,

    /// Site administrator.
    pub admin: bool,

    /// Staff: administrators and moderators.
    pub staff: bool,

    /// Has a full account, as opposed to a guest identity.
    pub member: bool,
}

impl Actor {
    /// An anonymous visitor.
    pub fn guest() -> Self {
        Self {
            id: None,
            trust_level: TrustLevel::Stranger,
            threat_level: ThreatLevel::HopefullySafe,
            admin: false,
            staff: false,
            member: false,
        }
    }

    /// A regular member with the given identity.
    pub fn member(id: UserId) -> Self {
        Self {
            id: Some(id),
            trust_level: TrustLevel::New,
            threat_level: ThreatLevel::HopefullySafe,
            admin: false,
            staff: false,
            member: true,
        }
    }

    /// A moderator.
    pub fn moderator(id: UserId) -> Self {
        Self {
            staff: true,
            ..Self::member(id)
        }
    }

    /// An administrator. Administrators are staff too.
    pub fn admin(id: UserId) -> Self {
        Self {
            admin: true,
            staff: true,
            ..Self::member(id)
        }
    }

    /// Set the trust level.
    pub fn with_trust_level(mut self, level: TrustLevel) -> Self {
        self.trust_level = level;
        self
    }

    /// Set the threat level.
    pub fn with_threat_level(mut self, level: ThreatLevel) -> Self {
        self.threat_level = level;
        self
    }

    /// Whether this actor has no identity.
    pub fn is_guest(&self) -> bool {
        self.id.is_none()
    }

    /// Whether this actor is a site administrator.
    pub fn is_admin(&self) -> bool {
        self.id.is_some() && self.admin
    }

    /// Whether this actor is staff. Administrators always are.
    pub fn is_staff(&self) -> bool {
        self.id.is_some() && (self.staff || self.admin)
    }

    /// Whether this actor has a full account.
    pub fn is_member(&self) -> bool {
        self.id.is_some() && self.member
    }

    /// Effective trust level: guests are always strangers.
    pub fn trust_level(&self) -> TrustLevel {
        if self.id.is_none() {
            TrustLevel::Stranger
        } else {
            self.trust_level
        }
    }

    /// Whether this actor is the given user.
    pub fn is(&self, user: UserId) -> bool {
        self.id == Some(user)
    }
}
