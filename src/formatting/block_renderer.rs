// src/formatting/block_renderer.rs
//! Phase 3 of rendering: the synchronous walk that turns an enriched
//! block forest into MDX.
//!
//! The match over `Block` is exhaustive with no catch-all arm, so a
//! newly modeled kind without a render case is a build-time error. Only
//! kinds genuinely absent from the model reach the `Unsupported`
//! marker.

use super::enrich::{EnrichedRefs, MigratedImage};
use super::rich_text::rich_text_to_mdx;
use crate::constants::{CHARS_PER_BLOCK_ESTIMATE, CHILD_INDENT, DEFAULT_CALLOUT_ICON};
use crate::metadata::LinkMetadata;
use crate::model::blocks::{CalloutBlock, CodeBlock, HeadingBlock, QuoteBlock, TableBlock, ToggleBlock};
use crate::model::Block;
use crate::types::rich_text::plain_text_of;
use crate::types::{BlockId, RichTextItem};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Read-only lookup context threaded through the render walk.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub links: &'a IndexMap<String, LinkMetadata>,
    pub images: &'a HashMap<BlockId, MigratedImage>,
}

impl<'a> RenderContext<'a> {
    pub fn new(enriched: &'a EnrichedRefs) -> Self {
        Self {
            links: &enriched.links,
            images: &enriched.images,
        }
    }
}

/// Renders a whole forest to normalized MDX.
pub fn render_document(blocks: &[Block], ctx: &RenderContext) -> String {
    normalize_whitespace(&render_forest(blocks, ctx))
}

/// Renders a forest without document-level normalization; recursive
/// child renders come through here.
fn render_forest(blocks: &[Block], ctx: &RenderContext) -> String {
    let mut parts = Vec::with_capacity(blocks.len());
    for block in blocks {
        if let Some(rendered) = render_block(block, ctx) {
            parts.push(rendered);
        }
    }
    let mut output = String::with_capacity(parts.len() * CHARS_PER_BLOCK_ESTIMATE);
    output.push_str(&parts.join("\n\n"));
    output
}

fn render_block(block: &Block, ctx: &RenderContext) -> Option<String> {
    match block {
        Block::Paragraph(b) => Some(rich_text_to_mdx(&b.content.rich_text)),
        Block::Heading1(b) => Some(render_heading(b, 1, ctx)),
        Block::Heading2(b) => Some(render_heading(b, 2, ctx)),
        Block::Heading3(b) => Some(render_heading(b, 3, ctx)),
        Block::BulletedListItem(b) => {
            Some(render_list_item("-", &b.content.rich_text, &b.common.children, ctx))
        }
        Block::NumberedListItem(b) => {
            Some(render_list_item("1.", &b.content.rich_text, &b.common.children, ctx))
        }
        Block::Quote(b) => Some(render_quote(b, ctx)),
        Block::Divider(_) => Some("---".to_string()),
        Block::Callout(b) => Some(render_callout(b, ctx)),
        Block::Toggle(b) => Some(render_toggle(b, ctx)),
        Block::Code(b) => Some(render_code(b)),
        Block::Bookmark(b) => Some(render_link_card(&b.url, ctx)),
        Block::LinkPreview(b) => Some(render_link_card(&b.url, ctx)),
        Block::Embed(b) => Some(format!("<Embed url=\"{}\" />", escape_attribute(&b.url))),
        Block::Image(b) => Some(render_image(&b.common.id, ctx)),
        Block::Table(b) => render_table(b, ctx),
        // Rows only ever render through their parent table.
        Block::TableRow(_) => None,
        Block::Unsupported(b) => Some(format!("{{/* Unsupported: {} */}}", b.block_type)),
    }
}

fn render_heading(heading: &HeadingBlock, level: usize, ctx: &RenderContext) -> String {
    let line = format!(
        "{} {}",
        "#".repeat(level),
        rich_text_to_mdx(&heading.content.rich_text)
    );

    if !heading.is_toggleable || heading.common.children.is_empty() {
        return line;
    }

    let children = render_forest(&heading.common.children, ctx);
    format!(
        "<Toggle>\n<summary>{}</summary>\n\n{}\n\n</Toggle>",
        line, children
    )
}

fn render_list_item(
    marker: &str,
    rich_text: &[RichTextItem],
    children: &[Block],
    ctx: &RenderContext,
) -> String {
    let line = format!("{} {}", marker, rich_text_to_mdx(rich_text));
    let nested = render_children_indented(children, ctx);
    if nested.is_empty() {
        line
    } else {
        format!("{}\n{}", line, nested)
    }
}

/// Renders child blocks one indent unit deeper; nesting compounds
/// because every level re-applies the unit to all of its child lines.
fn render_children_indented(children: &[Block], ctx: &RenderContext) -> String {
    let mut indented = Vec::new();
    for child in children {
        if let Some(rendered) = render_block(child, ctx) {
            let block = rendered
                .split('\n')
                .map(|line| format!("{}{}", CHILD_INDENT, line))
                .collect::<Vec<_>>()
                .join("\n");
            indented.push(block);
        }
    }
    indented.join("\n")
}

fn render_quote(quote: &QuoteBlock, ctx: &RenderContext) -> String {
    let text = rich_text_to_mdx(&quote.content.rich_text);
    let mut lines: Vec<String> = text.split('\n').map(|line| format!("> {}", line)).collect();

    if !quote.common.children.is_empty() {
        let children = render_forest(&quote.common.children, ctx);
        if !children.is_empty() {
            lines.extend(children.split('\n').map(|line| format!("> {}", line)));
        }
    }

    lines.join("\n")
}

fn render_callout(callout: &CalloutBlock, ctx: &RenderContext) -> String {
    let icon = callout.icon.as_deref().unwrap_or(DEFAULT_CALLOUT_ICON);

    let mut body = Vec::new();
    let text = rich_text_to_mdx(&callout.content.rich_text);
    if !text.is_empty() {
        body.push(text);
    }
    let children = render_forest(&callout.common.children, ctx);
    if !children.is_empty() {
        body.push(children);
    }

    format!(
        "<Callout icon=\"{}\">\n\n{}\n\n</Callout>",
        escape_attribute(icon),
        body.join("\n\n")
    )
}

fn render_toggle(toggle: &ToggleBlock, ctx: &RenderContext) -> String {
    let summary = rich_text_to_mdx(&toggle.content.rich_text);
    let children = render_forest(&toggle.common.children, ctx);

    if children.is_empty() {
        format!("<Toggle>\n<summary>{}</summary>\n</Toggle>", summary)
    } else {
        format!(
            "<Toggle>\n<summary>{}</summary>\n\n{}\n\n</Toggle>",
            summary, children
        )
    }
}

fn render_code(code: &CodeBlock) -> String {
    let body = plain_text_of(&code.content.rich_text);
    let language = match code.language.as_str() {
        "plain text" => "text",
        other => other,
    };

    // Mermaid sources render client-side as diagrams, not as fences.
    if language == "mermaid" {
        return format!("<Mermaid chart={{`{}`}} />", escape_template_literal(&body));
    }

    let fence = format!("```{}\n{}\n```", language, body);
    let caption = plain_text_of(&code.caption);
    if caption.trim().is_empty() {
        fence
    } else {
        format!("{{/* {} */}}\n{}", caption.trim(), fence)
    }
}

fn render_link_card(url: &str, ctx: &RenderContext) -> String {
    match ctx.links.get(url) {
        Some(metadata) => {
            let mut attrs = vec![
                format!("url=\"{}\"", escape_attribute(&metadata.url)),
                format!("title=\"{}\"", escape_attribute(&metadata.title)),
            ];
            if let Some(description) = &metadata.description {
                attrs.push(format!("description=\"{}\"", escape_attribute(description)));
            }
            if let Some(image) = &metadata.image {
                attrs.push(format!("image=\"{}\"", escape_attribute(image)));
            }
            if let Some(favicon) = &metadata.favicon {
                attrs.push(format!("favicon=\"{}\"", escape_attribute(favicon)));
            }
            format!("<LinkCard {} />", attrs.join(" "))
        }
        None => format!(
            "<LinkCard url=\"{}\" title=\"{}\" />",
            escape_attribute(url),
            escape_attribute(url)
        ),
    }
}

fn render_image(block_id: &BlockId, ctx: &RenderContext) -> String {
    match ctx.images.get(block_id) {
        Some(MigratedImage { url, caption }) if caption.is_empty() => {
            format!("<Image src=\"{}\" />", escape_attribute(url))
        }
        Some(MigratedImage { url, caption }) => format!(
            "<Image src=\"{}\" alt=\"{}\" />",
            escape_attribute(url),
            escape_attribute(caption)
        ),
        None => format!("{{/* image not migrated: {} */}}", block_id),
    }
}

/// Pipe table with the first row as header, whatever the table node's
/// own header flag says.
fn render_table(table: &TableBlock, _ctx: &RenderContext) -> Option<String> {
    let rows: Vec<&Vec<Vec<RichTextItem>>> = table
        .common
        .children
        .iter()
        .filter_map(|child| match child {
            Block::TableRow(row) => Some(&row.cells),
            _ => None,
        })
        .collect();

    let (header, body) = rows.split_first()?;

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(format_table_row(header));
    lines.push(format!("|{}", " --- |".repeat(header.len())));
    for row in body {
        lines.push(format_table_row(row));
    }

    Some(lines.join("\n"))
}

fn format_table_row(cells: &[Vec<RichTextItem>]) -> String {
    let rendered: Vec<String> = cells
        .iter()
        .map(|cell| escape_table_cell(&plain_text_of(cell)))
        .collect();
    format!("| {} |", rendered.join(" | "))
}

// ---------------------------------------------------------------------------
// Escaping
// ---------------------------------------------------------------------------

/// Escapes a string for embedding in a double-quoted JSX attribute.
fn escape_attribute(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace(['\n', '\r'], " ")
}

/// Escapes a code body for embedding in a JS template literal.
fn escape_template_literal(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace("${", "\\${")
}

/// Escapes a flattened cell for a pipe table.
fn escape_table_cell(value: &str) -> String {
    value.replace('|', "\\|").replace(['\n', '\r'], " ")
}

// ---------------------------------------------------------------------------
// Whitespace normalization
// ---------------------------------------------------------------------------

static BLANK_ONLY_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]+$").expect("valid blank-line regex"));
static EXCESS_NEWLINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{3,}").expect("valid newline regex"));

/// Drops blank-only lines and collapses 3+ newlines to exactly 2, so
/// structurally empty nodes leave no visible gaps.
pub fn normalize_whitespace(text: &str) -> String {
    let no_blank = BLANK_ONLY_LINE.replace_all(text, "");
    let collapsed = EXCESS_NEWLINES.replace_all(&no_blank, "\n\n");
    collapsed.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn normalization_collapses_newline_runs() {
        assert_eq!(normalize_whitespace("a\n\n\n\nb"), "a\n\nb");
    }

    #[test]
    fn normalization_drops_blank_only_lines() {
        assert_eq!(normalize_whitespace("a\n   \nb"), "a\n\nb");
        assert_eq!(normalize_whitespace("a\n \t \n\n\nb"), "a\n\nb");
    }

    #[test]
    fn attribute_escaping_handles_quotes_and_newlines() {
        assert_eq!(
            escape_attribute("He said \"hi\"\nthere"),
            "He said \\\"hi\\\" there"
        );
    }

    #[test]
    fn template_literal_escaping_handles_backticks_and_interpolation() {
        assert_eq!(
            escape_template_literal("a`b${c}\\d"),
            "a\\`b\\${c}\\\\d"
        );
    }

    #[test]
    fn table_cells_escape_pipes() {
        assert_eq!(escape_table_cell("a|b\nc"), "a\\|b c");
    }
}
