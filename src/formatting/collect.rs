// src/formatting/collect.rs
//! Phase 1 of rendering: a pure pre-pass that gathers everything the
//! enrichment phase must resolve over the network.
//!
//! Collection and rendering walk the same immutable forest separately
//! on purpose: fusing them would force the renderer to await mid
//! traversal, which is exactly what the phase split avoids.

use crate::model::Block;
use crate::types::{rich_text::plain_text_of, BlockId};
use indexmap::IndexSet;

/// An image slot found in the forest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub block_id: BlockId,
    pub url: String,
    pub caption: String,
}

/// Everything in a forest that needs network enrichment.
#[derive(Debug, Default)]
pub struct CollectedRefs {
    /// Bookmark and link-preview URLs, de-duplicated in first-seen
    /// order. One entry means one metadata fetch, however many nodes
    /// reference the URL.
    pub urls: IndexSet<String>,
    pub images: Vec<ImageRef>,
}

/// Walks the forest collecting link URLs and image slots.
pub fn collect_references(blocks: &[Block]) -> CollectedRefs {
    let mut refs = CollectedRefs::default();
    walk(blocks, &mut refs);
    refs
}

fn walk(blocks: &[Block], refs: &mut CollectedRefs) {
    for block in blocks {
        match block {
            Block::Bookmark(b) => {
                if !b.url.is_empty() {
                    refs.urls.insert(b.url.clone());
                }
            }
            Block::LinkPreview(b) => {
                if !b.url.is_empty() {
                    refs.urls.insert(b.url.clone());
                }
            }
            Block::Image(b) => {
                if !b.url.is_empty() {
                    refs.images.push(ImageRef {
                        block_id: b.common.id.clone(),
                        url: b.url.clone(),
                        caption: plain_text_of(&b.caption),
                    });
                }
            }
            _ => {}
        }
        walk(block.children(), refs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::blocks::*;
    use crate::model::BlockCommon;
    use crate::types::{BlockId, RichTextItem};

    fn bookmark(url: &str) -> Block {
        Block::Bookmark(BookmarkBlock {
            common: BlockCommon::new(BlockId::new_v4()),
            url: url.to_string(),
            caption: vec![],
        })
    }

    fn toggle_with(children: Vec<Block>) -> Block {
        Block::Toggle(ToggleBlock {
            common: BlockCommon::new(BlockId::new_v4()).with_children(children),
            content: TextBlockContent {
                rich_text: vec![RichTextItem::plain_text("more")],
            },
        })
    }

    #[test]
    fn duplicate_urls_collect_once_in_first_seen_order() {
        let blocks = vec![
            bookmark("https://a.example"),
            bookmark("https://b.example"),
            bookmark("https://a.example"),
        ];
        let refs = collect_references(&blocks);
        let urls: Vec<_> = refs.urls.iter().cloned().collect();
        assert_eq!(urls, vec!["https://a.example", "https://b.example"]);
    }

    #[test]
    fn collection_descends_into_children() {
        let image = Block::Image(ImageBlock {
            common: BlockCommon::new(BlockId::new_v4()),
            url: "https://img.example/pic.png".to_string(),
            caption: vec![RichTextItem::plain_text("a picture")],
        });
        let blocks = vec![toggle_with(vec![image, bookmark("https://nested.example")])];

        let refs = collect_references(&blocks);
        assert_eq!(refs.urls.len(), 1);
        assert_eq!(refs.images.len(), 1);
        assert_eq!(refs.images[0].caption, "a picture");
    }

    #[test]
    fn empty_urls_are_skipped() {
        let blocks = vec![bookmark("")];
        let refs = collect_references(&blocks);
        assert!(refs.urls.is_empty());
    }
}
