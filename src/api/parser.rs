// src/api/parser.rs
//! Maps raw Notion API JSON into the domain model.
//!
//! Pages decode through the best-effort property decoders; the only way
//! parsing a page can fail is a missing or invalid envelope id. Blocks
//! of kinds the renderer does not model become `Unsupported` rather
//! than errors, so content gaps surface in output instead of aborting
//! the run.

use super::properties;
use crate::error::AppError;
use crate::model::blocks::*;
use crate::model::{Article, Block, BlockCommon, Bookmark, Project, ProjectStatus};
use crate::types::{Annotations, BlockId, PageId, RichTextItem};
use serde_json::Value;

/// Decodes a page object into an article record.
pub fn parse_article(page: &Value) -> Result<Article, AppError> {
    let id = parse_page_id(page)?;
    let props = properties_of(page);

    let related = properties::relation(props, "relatedProject");

    Ok(Article {
        id,
        title: properties::text(props, "Title"),
        slug: properties::text(props, "slug"),
        excerpt: properties::text(props, "excerpt"),
        tags: properties::multi_select(props, "tags"),
        thumbnail: properties::url(props, "thumbnail"),
        published: properties::checkbox(props, "published"),
        created_at: properties::created_time(page),
        updated_at: properties::last_edited_time(page),
        related_project: related.into_iter().next(),
        reading_time: None,
    })
}

/// Decodes a page object into a project record.
pub fn parse_project(page: &Value) -> Result<Project, AppError> {
    let id = parse_page_id(page)?;
    let props = properties_of(page);

    let status = properties::select(props, "status")
        .as_deref()
        .and_then(ProjectStatus::from_select_label);

    Ok(Project {
        id,
        title: properties::text(props, "Title"),
        slug: properties::text(props, "slug"),
        description: properties::text(props, "description"),
        period: properties::date(props, "period"),
        roles: properties::multi_select(props, "role"),
        status,
        tech_stack: properties::multi_select(props, "techStack"),
        github: properties::url(props, "github"),
        demo: properties::url(props, "demo"),
        thumbnail: properties::url(props, "thumbnail"),
        published: properties::checkbox(props, "published"),
        created_at: properties::created_time(page),
        updated_at: properties::last_edited_time(page),
        related_posts: properties::relation(props, "relatedPosts"),
    })
}

/// Decodes a page object into a bookmark record.
pub fn parse_bookmark(page: &Value) -> Result<Bookmark, AppError> {
    let id = parse_page_id(page)?;
    let props = properties_of(page);

    Ok(Bookmark {
        id,
        title: properties::text(props, "Title"),
        url: properties::url(props, "url").unwrap_or_default(),
        category: properties::select(props, "category"),
        tags: properties::multi_select(props, "tags"),
        description: properties::text(props, "description"),
        published: properties::checkbox(props, "published"),
        created_at: properties::created_time(page),
        updated_at: properties::last_edited_time(page),
    })
}

fn parse_page_id(page: &Value) -> Result<PageId, AppError> {
    let raw = page
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| AppError::MalformedResponse("page object without id".to_string()))?;
    PageId::parse(raw).map_err(AppError::ValidationError)
}

fn properties_of(page: &Value) -> &Value {
    page.get("properties").unwrap_or(&Value::Null)
}

// ---------------------------------------------------------------------------
// Blocks
// ---------------------------------------------------------------------------

/// Decodes one block object. Children are attached later by the fetch
/// loop; here the block arrives childless.
pub fn parse_block(block: &Value) -> Result<Block, AppError> {
    let raw_id = block
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| AppError::MalformedResponse("block object without id".to_string()))?;
    let id = BlockId::parse(raw_id).map_err(AppError::ValidationError)?;

    let common = BlockCommon {
        id,
        children: Vec::new(),
        has_children: block
            .get("has_children")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        archived: block
            .get("archived")
            .and_then(Value::as_bool)
            .unwrap_or(false),
    };

    let block_type = block
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or("unsupported");
    let payload = block.get(block_type).unwrap_or(&Value::Null);

    let parsed = match block_type {
        "paragraph" => Block::Paragraph(ParagraphBlock {
            common,
            content: parse_text_content(payload),
        }),
        "heading_1" => Block::Heading1(parse_heading(common, payload)),
        "heading_2" => Block::Heading2(parse_heading(common, payload)),
        "heading_3" => Block::Heading3(parse_heading(common, payload)),
        "bulleted_list_item" => Block::BulletedListItem(BulletedListItemBlock {
            common,
            content: parse_text_content(payload),
        }),
        "numbered_list_item" => Block::NumberedListItem(NumberedListItemBlock {
            common,
            content: parse_text_content(payload),
        }),
        "quote" => Block::Quote(QuoteBlock {
            common,
            content: parse_text_content(payload),
        }),
        "divider" => Block::Divider(DividerBlock { common }),
        "callout" => Block::Callout(CalloutBlock {
            common,
            icon: parse_icon(payload),
            content: parse_text_content(payload),
        }),
        "toggle" => Block::Toggle(ToggleBlock {
            common,
            content: parse_text_content(payload),
        }),
        "code" => Block::Code(CodeBlock {
            common,
            language: payload
                .get("language")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            caption: parse_rich_text(payload.get("caption")),
            content: parse_text_content(payload),
        }),
        "bookmark" => Block::Bookmark(BookmarkBlock {
            common,
            url: string_field(payload, "url"),
            caption: parse_rich_text(payload.get("caption")),
        }),
        "link_preview" => Block::LinkPreview(LinkPreviewBlock {
            common,
            url: string_field(payload, "url"),
        }),
        "embed" => Block::Embed(EmbedBlock {
            common,
            url: string_field(payload, "url"),
        }),
        "image" => Block::Image(ImageBlock {
            common,
            url: parse_file_url(payload),
            caption: parse_rich_text(payload.get("caption")),
        }),
        "table" => Block::Table(TableBlock {
            common,
            has_column_header: payload
                .get("has_column_header")
                .and_then(Value::as_bool)
                .unwrap_or(false),
        }),
        "table_row" => Block::TableRow(TableRowBlock {
            common,
            cells: payload
                .get("cells")
                .and_then(Value::as_array)
                .map(|rows| rows.iter().map(|cell| parse_rich_text(Some(cell))).collect())
                .unwrap_or_default(),
        }),
        other => Block::Unsupported(UnsupportedBlock {
            common,
            block_type: other.to_string(),
        }),
    };

    Ok(parsed)
}

fn parse_heading(common: BlockCommon, payload: &Value) -> HeadingBlock {
    HeadingBlock {
        common,
        content: parse_text_content(payload),
        is_toggleable: payload
            .get("is_toggleable")
            .and_then(Value::as_bool)
            .unwrap_or(false),
    }
}

fn parse_text_content(payload: &Value) -> TextBlockContent {
    TextBlockContent {
        rich_text: parse_rich_text(payload.get("rich_text")),
    }
}

/// A Notion file object holds its URL under `file` (hosted, expiring)
/// or `external` (user-provided).
fn parse_file_url(payload: &Value) -> String {
    let inner = match payload.get("type").and_then(Value::as_str) {
        Some("external") => payload.get("external"),
        _ => payload.get("file"),
    };
    inner
        .and_then(|f| f.get("url"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Callout icons: emoji renders directly, file-backed icons fall back
/// to the default at render time.
fn parse_icon(payload: &Value) -> Option<String> {
    let icon = payload.get("icon")?;
    match icon.get("type").and_then(Value::as_str) {
        Some("emoji") => icon
            .get("emoji")
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}

fn string_field(payload: &Value, name: &str) -> String {
    payload
        .get(name)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Decodes a rich text array; mentions and equations flatten to their
/// plain text.
pub fn parse_rich_text(value: Option<&Value>) -> Vec<RichTextItem> {
    let Some(items) = value.and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .map(|item| {
            let annotations = item
                .get("annotations")
                .map(parse_annotations)
                .unwrap_or_default();

            let href = item
                .get("href")
                .and_then(Value::as_str)
                .map(str::to_string)
                .or_else(|| {
                    item.get("text")
                        .and_then(|t| t.get("link"))
                        .and_then(|l| l.get("url"))
                        .and_then(Value::as_str)
                        .map(str::to_string)
                });

            RichTextItem {
                plain_text: item
                    .get("plain_text")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                annotations,
                href,
            }
        })
        .collect()
}

fn parse_annotations(value: &Value) -> Annotations {
    let flag = |name: &str| value.get(name).and_then(Value::as_bool).unwrap_or(false);
    Annotations {
        bold: flag("bold"),
        italic: flag("italic"),
        strikethrough: flag("strikethrough"),
        underline: flag("underline"),
        code: flag("code"),
        color: value
            .get("color")
            .and_then(Value::as_str)
            .unwrap_or("default")
            .to_string(),
    }
}
