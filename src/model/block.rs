// src/model/block.rs
use super::blocks::*;
use super::common::BlockCommon;
use crate::types::BlockId;
use serde::{Deserialize, Serialize};

/// Macro to reduce boilerplate in Block enum methods
macro_rules! match_all_blocks {
    ($self:expr, $pattern:pat => $result:expr) => {
        match $self {
            Block::Paragraph($pattern) => $result,
            Block::Heading1($pattern) => $result,
            Block::Heading2($pattern) => $result,
            Block::Heading3($pattern) => $result,
            Block::BulletedListItem($pattern) => $result,
            Block::NumberedListItem($pattern) => $result,
            Block::Quote($pattern) => $result,
            Block::Divider($pattern) => $result,
            Block::Callout($pattern) => $result,
            Block::Toggle($pattern) => $result,
            Block::Code($pattern) => $result,
            Block::Bookmark($pattern) => $result,
            Block::LinkPreview($pattern) => $result,
            Block::Embed($pattern) => $result,
            Block::Image($pattern) => $result,
            Block::Table($pattern) => $result,
            Block::TableRow($pattern) => $result,
            Block::Unsupported($pattern) => $result,
        }
    };
}

/// Block represents every node kind the renderer models.
///
/// The enum is closed on purpose: a new upstream kind lands in
/// `Unsupported` at parse time, and every match over `Block` stays
/// exhaustive so a newly modeled kind without a render case is a
/// build-time error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Block {
    Paragraph(ParagraphBlock),
    Heading1(HeadingBlock),
    Heading2(HeadingBlock),
    Heading3(HeadingBlock),
    BulletedListItem(BulletedListItemBlock),
    NumberedListItem(NumberedListItemBlock),
    Quote(QuoteBlock),
    Divider(DividerBlock),
    Callout(CalloutBlock),
    Toggle(ToggleBlock),
    Code(CodeBlock),
    Bookmark(BookmarkBlock),
    LinkPreview(LinkPreviewBlock),
    Embed(EmbedBlock),
    Image(ImageBlock),
    Table(TableBlock),
    TableRow(TableRowBlock),
    Unsupported(UnsupportedBlock),
}

impl Block {
    /// Get the block's ID
    pub fn id(&self) -> &BlockId {
        match_all_blocks!(self, b => &b.common.id)
    }

    /// Get the block's children
    pub fn children(&self) -> &Vec<Block> {
        match_all_blocks!(self, b => &b.common.children)
    }

    /// Get mutable reference to children
    #[allow(dead_code)]
    pub fn children_mut(&mut self) -> &mut Vec<Block> {
        match_all_blocks!(self, b => &mut b.common.children)
    }

    /// Check if block has children
    pub fn has_children(&self) -> bool {
        self.common().has_children
    }

    /// Get common block data
    pub fn common(&self) -> &BlockCommon {
        match_all_blocks!(self, b => &b.common)
    }

    /// Get mutable common block data
    pub fn common_mut(&mut self) -> &mut BlockCommon {
        match_all_blocks!(self, b => &mut b.common)
    }

    /// Set children
    pub fn set_children(&mut self, children: Vec<Block>) {
        self.common_mut().children = children;
    }

    /// Get block type name
    #[allow(dead_code)]
    pub fn block_type(&self) -> &str {
        match self {
            Block::Paragraph(_) => "paragraph",
            Block::Heading1(_) => "heading_1",
            Block::Heading2(_) => "heading_2",
            Block::Heading3(_) => "heading_3",
            Block::BulletedListItem(_) => "bulleted_list_item",
            Block::NumberedListItem(_) => "numbered_list_item",
            Block::Quote(_) => "quote",
            Block::Divider(_) => "divider",
            Block::Callout(_) => "callout",
            Block::Toggle(_) => "toggle",
            Block::Code(_) => "code",
            Block::Bookmark(_) => "bookmark",
            Block::LinkPreview(_) => "link_preview",
            Block::Embed(_) => "embed",
            Block::Image(_) => "image",
            Block::Table(_) => "table",
            Block::TableRow(_) => "table_row",
            Block::Unsupported(b) => &b.block_type,
        }
    }
}
