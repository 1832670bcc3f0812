//! Stable trace codes.
//!
//! Every capability set and every decision carries one of these. They are
//! for support and debugging only. Codes attached to a not-found decision
//! must never reach the actor, since they tell why something is hidden.

// Capability set origins.
pub const NOTHING: &str = "FG-CAP-NOTHING";
pub const EVERYTHING: &str = "FG-CAP-EVERYTHING";
pub const ADMIN: &str = "FG-CAP-ADMIN";
pub const STAFF_BASELINE: &str = "FG-CAP-STAFF";
pub const MEMBER_BASELINE: &str = "FG-CAP-DEFAULT";
pub const CATEGORY_GRANT: &str = "FG-CAP-CATGRANT";
pub const PAGE_GRANT: &str = "FG-CAP-PAGEGRANT";

// Visibility, surfaced only as not-found.
pub const ADMIN_ONLY_PAGE: &str = "FG-0SEE-ADMONLY";
pub const PRIVATE_NO_ACTOR: &str = "FG-0SEE-PRIVGST";
pub const PRIVATE_NOT_MEMBER: &str = "FG-0SEE-PRIVNMB";
pub const PRIVATE_NOT_PARTICIPANT: &str = "FG-0SEE-PRIVOUT";
pub const PAGE_DELETED: &str = "FG-0SEE-PAGEDLD";
pub const CATEGORY_DELETED: &str = "FG-0SEE-CATDLD";
pub const CATEGORY_UNLISTED: &str = "FG-0SEE-CATUNL";
pub const CATEGORY_STAFF_ONLY: &str = "FG-0SEE-CATSTF";
pub const POST_DELETED: &str = "FG-0SEE-POSTDLD";

// Legacy category flag.
pub const CREATE_STAFF_ONLY_CATEGORY: &str = "FG-0CRT-CATSTF";

// Denials, safe to show to actors who can see the content.
pub const CREATE_NO_CAPABILITY: &str = "FG-0CRT-NOCAP";
pub const CREATE_OUTSIDE_CATEGORY: &str = "FG-0CRT-NOCAT";
pub const CREATE_WITH_SLUG: &str = "FG-0CRT-SLUG";
pub const CREATE_STAFF_ONLY_TYPE: &str = "FG-0CRT-TYPE";
pub const CREATE_PRIVATE_AS_GUEST: &str = "FG-0CRT-PRIVGST";
pub const REPLY_NO_CAPABILITY: &str = "FG-0RE-NOCAP";
pub const REPLY_MIND_MAP: &str = "FG-0RE-MINDMAP";
pub const REPLY_NOT_REPLYABLE: &str = "FG-0RE-TYPE";
pub const FORM_NOT_A_FORM: &str = "FG-0FRM-TYPE";
pub const FLAG_THREAT: &str = "FG-0FLG-THREAT";
pub const FLAG_GUEST: &str = "FG-0FLG-GUEST";
pub const FLAG_DELETED_POST: &str = "FG-0FLG-DLD";
pub const EDIT_NO_CAPABILITY: &str = "FG-0ED-NOCAP";
pub const EDIT_DELETED: &str = "FG-0ED-DLD";
pub const DELETE_NO_CAPABILITY: &str = "FG-0DL-NOCAP";
pub const DELETE_ALREADY_DELETED: &str = "FG-0DL-DLD";

// Allowed.
pub const ALLOWED: &str = "FG-OK";

// Contract violations.
pub const CHAIN_HEAD_MISMATCH: &str = "FG-BUG-CHAINHEAD";
pub const CHAIN_BROKEN: &str = "FG-BUG-CHAINLINK";
pub const CHAIN_HAS_ROOT: &str = "FG-BUG-CHAINROOT";
pub const PARTICIPANTS_MISSING: &str = "FG-BUG-NOPARTS";
pub const PARTICIPANTS_UNEXPECTED: &str = "FG-BUG-PARTS";
pub const FORM_UNREPLYABLE: &str = "FG-BUG-FORMTYPE";
pub const POST_PAGE_MISMATCH: &str = "FG-BUG-POSTPAGE";
