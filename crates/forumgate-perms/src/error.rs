//! Error types for the permissions module.

use forumgate_core::{Capability, GrantId};
use thiserror::Error;

/// Errors that can occur while building or decoding grants.
#[derive(Debug, Error)]
pub enum PermsError {
    /// A grant both adds and removes the same capabilities.
    #[error("grant {grant} both adds and removes {overlap:?}")]
    ConflictingDelta { grant: GrantId, overlap: Capability },

    /// Two grants share an id.
    #[error("duplicate grant id: {0}")]
    DuplicateGrant(GrantId),

    /// Grant row could not be encoded.
    #[error("encoding error: {0}")]
    EncodingError(String),

    /// Grant row could not be decoded.
    #[error("decoding error: {0}")]
    DecodingError(String),
}

/// Result type for permission operations.
pub type Result<T> = std::result::Result<T, PermsError>;
