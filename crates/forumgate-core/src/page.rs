//! Pages, posts, and page types.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::types::{CategoryId, PageId, PostId, UserId};

/// What kind of page something is. Several access rules depend on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PageType {
    Question,
    Problem,
    Idea,
    ToDo,
    /// Only the original author and staff may add to a mind map.
    MindMap,
    Discussion,
    EmbeddedComments,
    /// The description page of a category.
    About,
    WebPage,
    CustomHtmlPage,
    /// Site configuration such as stylesheets. Admins only.
    Code,
    /// Built-in texts and templates. Admins only.
    SpecialContent,
    /// A page whose replies are form submissions.
    Form,
    OpenChat,
    /// A chat visible only to its participants.
    PrivateChat,
    /// A direct message visible only to its participants.
    FormalMessage,
    /// The section page of a forum.
    Forum,
    /// The section page of a blog.
    Blog,
}

impl PageType {
    /// Content nobody but administrators may see.
    pub fn is_admin_only(self) -> bool {
        matches!(self, PageType::Code | PageType::SpecialContent)
    }

    /// Private multi-party talk, visible to participants only.
    pub fn is_private_group_talk(self) -> bool {
        matches!(self, PageType::PrivateChat | PageType::FormalMessage)
    }

    /// Page types only staff may create.
    pub fn is_staff_only_to_create(self) -> bool {
        matches!(
            self,
            PageType::Forum
                | PageType::Blog
                | PageType::About
                | PageType::WebPage
                | PageType::CustomHtmlPage
                | PageType::Code
                | PageType::SpecialContent
        )
    }

    /// Whether pages of this type hold replies at all.
    pub fn can_have_replies(self) -> bool {
        !matches!(
            self,
            PageType::WebPage
                | PageType::CustomHtmlPage
                | PageType::Code
                | PageType::SpecialContent
                | PageType::Forum
                | PageType::Blog
        )
    }

    /// Pages whose replies are form submissions.
    pub fn is_form(self) -> bool {
        matches!(self, PageType::Form)
    }
}

/// Metadata about an existing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub id: PageId,

    /// The page's direct category. `None` if filed directly under the root.
    pub category_id: Option<CategoryId>,

    pub page_type: PageType,

    pub author_id: UserId,

    pub deleted: bool,

    /// Who takes part in a private group talk. Present if and only if the
    /// page type is private group talk.
    pub participants: Option<BTreeSet<UserId>>,
}

impl PageMeta {
    /// A page that is not private group talk.
    pub fn new(
        id: PageId,
        category_id: Option<CategoryId>,
        page_type: PageType,
        author_id: UserId,
    ) -> Self {
        Self {
            id,
            category_id,
            page_type,
            author_id,
            deleted: false,
            participants: None,
        }
    }

    /// A private group talk page with the given participants.
    pub fn private_talk(
        id: PageId,
        page_type: PageType,
        author_id: UserId,
        participants: impl IntoIterator<Item = UserId>,
    ) -> Self {
        Self {
            id,
            category_id: None,
            page_type,
            author_id,
            deleted: false,
            participants: Some(participants.into_iter().collect()),
        }
    }

    /// Mark as deleted.
    pub fn deleted(mut self) -> Self {
        self.deleted = true;
        self
    }

    /// Whether the given user takes part in this page's private talk.
    pub fn has_participant(&self, user: UserId) -> bool {
        self.participants
            .as_ref()
            .map(|p| p.contains(&user))
            .unwrap_or(false)
    }
}

/// Metadata about a post on a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostMeta {
    pub id: PostId,
    pub page_id: PageId,
    pub author_id: UserId,
    pub deleted: bool,

    /// The page body, as opposed to a reply.
    pub is_orig_post: bool,

    /// Anyone with the wiki edit capability may edit it.
    pub is_wiki: bool,
}

impl PostMeta {
    /// A reply on the given page.
    pub fn reply(id: PostId, page_id: PageId, author_id: UserId) -> Self {
        Self {
            id,
            page_id,
            author_id,
            deleted: false,
            is_orig_post: false,
            is_wiki: false,
        }
    }

    /// The original post (page body) of the given page.
    pub fn orig_post(id: PostId, page: &PageMeta) -> Self {
        Self {
            is_orig_post: true,
            ..Self::reply(id, page.id, page.author_id)
        }
    }

    /// Mark as deleted.
    pub fn deleted(mut self) -> Self {
        self.deleted = true;
        self
    }

    /// Mark as wiki.
    pub fn wiki(mut self) -> Self {
        self.is_wiki = true;
        self
    }
}

/// A page someone wants to create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPage {
    pub page_type: PageType,

    /// The category to create the page in, `None` for directly under the root.
    pub category_id: Option<CategoryId>,

    /// An explicitly requested URL slug.
    pub slug: Option<String>,
}

impl NewPage {
    pub fn new(page_type: PageType, category_id: Option<CategoryId>) -> Self {
        Self {
            page_type,
            category_id,
            slug: None,
        }
    }

    /// Request an explicit URL slug.
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }
}
