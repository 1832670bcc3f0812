//! Error types for policy evaluation.
//!
//! A [`PolicyError`] never means "access denied". Denials are
//! [`Decision`](forumgate_core::Decision)s. An error means the request must be
//! aborted with an internal error: the caller supplied inconsistent inputs,
//! or an accessor could not produce them.

use forumgate_core::{CategoryId, CoreError, PageId};
use forumgate_perms::PermsError;
use thiserror::Error;

/// Errors that can occur while evaluating a policy.
#[derive(Debug, Error)]
pub enum PolicyError {
    /// The caller broke a precondition of the engine.
    #[error("contract violation [{code}]: {source}")]
    ContractViolation {
        code: &'static str,
        #[source]
        source: CoreError,
    },

    /// Grant rows were invalid.
    #[error("permission error: {0}")]
    Permission(#[from] PermsError),

    /// An accessor was asked for a category it does not know.
    #[error("category not found: {0}")]
    UnknownCategory(CategoryId),

    /// An accessor found a cycle in the category tree.
    #[error("category cycle through {0}")]
    CategoryCycle(CategoryId),

    /// An accessor was asked for a page it does not know.
    #[error("page not found: {0}")]
    UnknownPage(PageId),

    /// Configuration could not be parsed.
    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

impl PolicyError {
    /// Whether this is a caller bug rather than an accessor failure.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, PolicyError::ContractViolation { .. })
    }
}

impl From<CoreError> for PolicyError {
    fn from(e: CoreError) -> Self {
        tracing::warn!(code = e.code(), "caller contract violated: {}", e);
        PolicyError::ContractViolation {
            code: e.code(),
            source: e,
        }
    }
}

/// Result type for policy operations.
pub type Result<T> = std::result::Result<T, PolicyError>;
