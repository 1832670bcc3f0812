//! Policy configuration.

use serde::{Deserialize, Serialize};

use forumgate_core::ThreatLevel;

use crate::error::Result;

/// Configuration for the policy engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Whether non-staff may see unlisted categories in this context.
    pub see_unlisted_categories: bool,
    /// Actors at or above this threat level may not flag posts.
    pub flag_threat_cutoff: ThreatLevel,
    /// Whether posts that are already deleted may be flagged.
    pub deleted_posts_flaggable: bool,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            see_unlisted_categories: false,
            flag_threat_cutoff: ThreatLevel::SevereThreat,
            deleted_posts_flaggable: false,
        }
    }
}

impl PolicyConfig {
    /// Parse from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
