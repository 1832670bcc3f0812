//! Structural checks on caller-supplied inputs.
//!
//! These detect inputs that no well-behaved caller produces: an ancestor
//! chain that does not belong to the page, a chain whose links do not
//! connect, or a participant set on the wrong kind of page. A failure here
//! is a bug in the caller, not something an actor did.

use crate::category::Category;
use crate::error::{CoreError, Result};
use crate::page::PageMeta;

/// Check that an ancestor chain, nearest first, is linked and excludes the root.
pub fn validate_chain(ancestors: &[Category]) -> Result<()> {
    for (i, cat) in ancestors.iter().enumerate() {
        if cat.is_root() {
            return Err(CoreError::ChainIncludesRoot(cat.id));
        }
        if let Some(next) = ancestors.get(i + 1) {
            if cat.parent_id != Some(next.id) {
                return Err(CoreError::ChainBroken {
                    child: cat.id,
                    parent: cat.parent_id,
                    next: next.id,
                });
            }
        }
    }
    Ok(())
}

/// Check that a page belongs to its ancestor chain and that its participant
/// set matches its type.
pub fn validate_page(page: &PageMeta, ancestors: &[Category]) -> Result<()> {
    let head = ancestors.first().map(|c| c.id);
    if page.category_id != head {
        return Err(CoreError::ChainHeadMismatch {
            page: page.id,
            expected: page.category_id,
            actual: head,
        });
    }

    match (page.page_type.is_private_group_talk(), &page.participants) {
        (true, None) => Err(CoreError::MissingParticipants(page.id)),
        (false, Some(_)) => Err(CoreError::UnexpectedParticipants(page.id)),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::PageType;
    use crate::types::{CategoryId, PageId, UserId};

    fn chain() -> Vec<Category> {
        // 3 -> 2 -> (root 1)
        vec![
            Category::new(CategoryId::new(3), Some(CategoryId::new(2))),
            Category::new(CategoryId::new(2), Some(CategoryId::new(1))),
        ]
    }

    #[test]
    fn test_valid_chain() {
        assert_eq!(validate_chain(&chain()), Ok(()));
        assert_eq!(validate_chain(&[]), Ok(()));
    }

    #[test]
    fn test_chain_with_gap() {
        let mut c = chain();
        c[0].parent_id = Some(CategoryId::new(9));
        assert!(matches!(
            validate_chain(&c),
            Err(CoreError::ChainBroken { .. })
        ));
    }

    #[test]
    fn test_chain_with_root() {
        let mut c = chain();
        c.push(Category::new(CategoryId::new(1), None));
        assert_eq!(
            validate_chain(&c),
            Err(CoreError::ChainIncludesRoot(CategoryId::new(1)))
        );
    }

    #[test]
    fn test_page_head_mismatch() {
        let page = PageMeta::new(
            PageId::new(1),
            Some(CategoryId::new(2)),
            PageType::Discussion,
            UserId::new(5),
        );
        let err = validate_page(&page, &chain()).unwrap_err();
        assert_eq!(err.code(), crate::codes::CHAIN_HEAD_MISMATCH);
    }

    #[test]
    fn test_page_under_root_needs_empty_chain() {
        let page = PageMeta::new(PageId::new(1), None, PageType::Discussion, UserId::new(5));
        assert_eq!(validate_page(&page, &[]), Ok(()));
        assert!(validate_page(&page, &chain()).is_err());
    }

    #[test]
    fn test_private_talk_needs_participants() {
        let mut page = PageMeta::new(PageId::new(1), None, PageType::FormalMessage, UserId::new(5));
        assert_eq!(
            validate_page(&page, &[]),
            Err(CoreError::MissingParticipants(PageId::new(1)))
        );
        page.participants = Some(Default::default());
        assert_eq!(validate_page(&page, &[]), Ok(()));
    }

    #[test]
    fn test_participants_on_public_page() {
        let mut page = PageMeta::new(PageId::new(1), None, PageType::Question, UserId::new(5));
        page.participants = Some([UserId::new(5)].into_iter().collect());
        assert_eq!(
            validate_page(&page, &[]),
            Err(CoreError::UnexpectedParticipants(PageId::new(1)))
        );
    }
}
