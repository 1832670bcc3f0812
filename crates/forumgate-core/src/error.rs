//! Error types for the core data model.

use thiserror::Error;

use crate::page::PageType;
use crate::types::{CategoryId, PageId, PostId};

/// Inconsistent inputs: the caller broke a precondition.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("page {page} is in {expected:?} but the ancestor chain starts at {actual:?}")]
    ChainHeadMismatch {
        page: PageId,
        expected: Option<CategoryId>,
        actual: Option<CategoryId>,
    },

    #[error("new page targets {expected:?} but the ancestor chain starts at {actual:?}")]
    CategoryChainMismatch {
        expected: Option<CategoryId>,
        actual: Option<CategoryId>,
    },

    #[error("post {post} belongs to {post_page}, not to {page}")]
    PostPageMismatch {
        post: PostId,
        post_page: PageId,
        page: PageId,
    },

    #[error("page type {0:?} is treated as a form but cannot hold replies")]
    FormCannotHoldReplies(PageType),

    #[error("ancestor chain broken: {child} has parent {parent:?}, next in chain is {next}")]
    ChainBroken {
        child: CategoryId,
        parent: Option<CategoryId>,
        next: CategoryId,
    },

    #[error("ancestor chain includes the root category {0}")]
    ChainIncludesRoot(CategoryId),

    #[error("private talk page {0} has no participant set")]
    MissingParticipants(PageId),

    #[error("page {0} has a participant set but is not private talk")]
    UnexpectedParticipants(PageId),
}

impl CoreError {
    /// The stable trace code for this violation.
    pub fn code(&self) -> &'static str {
        use crate::codes;
        match self {
            CoreError::ChainHeadMismatch { .. } | CoreError::CategoryChainMismatch { .. } => {
                codes::CHAIN_HEAD_MISMATCH
            }
            CoreError::PostPageMismatch { .. } => codes::POST_PAGE_MISMATCH,
            CoreError::FormCannotHoldReplies(_) => codes::FORM_UNREPLYABLE,
            CoreError::ChainBroken { .. } => codes::CHAIN_BROKEN,
            CoreError::ChainIncludesRoot(_) => codes::CHAIN_HAS_ROOT,
            CoreError::MissingParticipants(_) => codes::PARTICIPANTS_MISSING,
            CoreError::UnexpectedParticipants(_) => codes::PARTICIPANTS_UNEXPECTED,
        }
    }
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
