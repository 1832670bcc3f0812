//! Access decisions.
//!
//! A [`Decision`] is the outward result of every policy check:
//!
//! - [`Decision::Allowed`]: go ahead.
//! - [`Decision::Denied`]: the actor can see the content but may not do
//!   this. The message explains why and is safe to show.
//! - [`Decision::NotFound`]: the actor may not see the content. Callers must
//!   respond exactly as if the content did not exist. The trace code is for
//!   internal diagnostics and is never rendered by [`Display`](fmt::Display).

use std::fmt;

use crate::codes;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    Denied {
        code: &'static str,
        message: &'static str,
    },
    NotFound {
        code: &'static str,
    },
}

impl Decision {
    /// A denial with a message safe to show the actor.
    pub const fn denied(code: &'static str, message: &'static str) -> Self {
        Decision::Denied { code, message }
    }

    /// A not-found decision.
    pub const fn not_found(code: &'static str) -> Self {
        Decision::NotFound { code }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allowed)
    }

    pub fn is_denied(&self) -> bool {
        matches!(self, Decision::Denied { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Decision::NotFound { .. })
    }

    /// The internal trace code. Never show this to the actor.
    pub fn trace_code(&self) -> &'static str {
        match self {
            Decision::Allowed => codes::ALLOWED,
            Decision::Denied { code, .. } => code,
            Decision::NotFound { code } => code,
        }
    }

    /// Text that may be shown to the actor.
    pub fn public_message(&self) -> &'static str {
        match self {
            Decision::Allowed => "allowed",
            Decision::Denied { message, .. } => message,
            Decision::NotFound { .. } => "not found",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Allowed => write!(f, "allowed"),
            Decision::Denied { code, message } => write!(f, "denied: {} [{}]", message, code),
            Decision::NotFound { .. } => write!(f, "not found"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display_hides_code() {
        let a = Decision::not_found(codes::CATEGORY_DELETED);
        let b = Decision::not_found(codes::PRIVATE_NOT_PARTICIPANT);

        assert_eq!(a.to_string(), "not found");
        assert_eq!(a.to_string(), b.to_string());
        assert_eq!(a.public_message(), b.public_message());
        assert_eq!(a.trace_code(), codes::CATEGORY_DELETED);
    }

    #[test]
    fn test_denied_display_includes_reason() {
        let d = Decision::denied(codes::REPLY_MIND_MAP, "Only the author may edit this mind map");
        assert!(d.is_denied());
        assert!(d.to_string().contains("mind map"));
        assert!(d.to_string().contains(codes::REPLY_MIND_MAP));
    }

    #[test]
    fn test_allowed() {
        assert!(Decision::Allowed.is_allowed());
        assert_eq!(Decision::Allowed.trace_code(), codes::ALLOWED);
    }
}
