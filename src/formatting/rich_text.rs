// src/formatting/rich_text.rs
//! Rich text span composition for MDX output.
//!
//! Wrapping order is load-bearing: the link goes innermost, then code,
//! then emphasis, then strikethrough. Code must wrap before emphasis so
//! emphasis markers never land inside backticks and get read as code
//! content. Underline and background highlights have no markdown
//! syntax; those spans get a final `<Text>` component wrapper.

use crate::types::RichTextItem;

/// Renders a rich text run to MDX.
pub fn rich_text_to_mdx(items: &[RichTextItem]) -> String {
    items.iter().map(render_span).collect()
}

fn render_span(item: &RichTextItem) -> String {
    let mut text = item.plain_text.clone();
    if text.is_empty() {
        return String::new();
    }

    if let Some(href) = &item.href {
        text = format!("[{}]({})", text, href);
    }

    let annotations = &item.annotations;

    if annotations.code {
        text = format!("`{}`", text);
    }

    if annotations.bold && annotations.italic {
        text = format!("***{}***", text);
    } else if annotations.bold {
        text = format!("**{}**", text);
    } else if annotations.italic {
        text = format!("*{}*", text);
    }

    if annotations.strikethrough {
        text = format!("~~{}~~", text);
    }

    let needs_component = annotations.underline || annotations.has_background();
    if needs_component {
        let mut props = Vec::new();
        if annotations.underline {
            props.push("underline");
        }
        if annotations.has_background() {
            props.push("bg");
        }
        text = format!("<Text {}>{}</Text>", props.join(" "), text);
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Annotations;
    use pretty_assertions::assert_eq;

    fn span(text: &str, annotations: Annotations) -> RichTextItem {
        RichTextItem::styled(text, annotations)
    }

    #[test]
    fn code_wraps_before_bold() {
        let item = span(
            "x",
            Annotations {
                bold: true,
                code: true,
                ..Annotations::default()
            },
        );
        assert_eq!(rich_text_to_mdx(&[item]), "**`x`**");
    }

    #[test]
    fn bold_italic_uses_triple_marker() {
        let item = span(
            "both",
            Annotations {
                bold: true,
                italic: true,
                ..Annotations::default()
            },
        );
        assert_eq!(rich_text_to_mdx(&[item]), "***both***");
    }

    #[test]
    fn link_goes_innermost() {
        let mut item = RichTextItem::linked("docs", "https://docs.rs");
        item.annotations.bold = true;
        assert_eq!(rich_text_to_mdx(&[item]), "**[docs](https://docs.rs)**");
    }

    #[test]
    fn strikethrough_wraps_emphasis() {
        let item = span(
            "gone",
            Annotations {
                bold: true,
                strikethrough: true,
                ..Annotations::default()
            },
        );
        assert_eq!(rich_text_to_mdx(&[item]), "~~**gone**~~");
    }

    #[test]
    fn underline_and_background_wrap_in_text_component() {
        let item = span(
            "hi",
            Annotations {
                underline: true,
                color: "yellow_background".to_string(),
                ..Annotations::default()
            },
        );
        assert_eq!(rich_text_to_mdx(&[item]), "<Text underline bg>hi</Text>");
    }

    #[test]
    fn foreground_color_needs_no_component() {
        let item = span(
            "hi",
            Annotations {
                color: "yellow".to_string(),
                ..Annotations::default()
            },
        );
        assert_eq!(rich_text_to_mdx(&[item]), "hi");
    }

    #[test]
    fn spans_concatenate_in_order() {
        let items = vec![
            RichTextItem::plain_text("plain "),
            span(
                "bold",
                Annotations {
                    bold: true,
                    ..Annotations::default()
                },
            ),
        ];
        assert_eq!(rich_text_to_mdx(&items), "plain **bold**");
    }

    #[test]
    fn empty_span_renders_nothing() {
        let item = span(
            "",
            Annotations {
                bold: true,
                ..Annotations::default()
            },
        );
        assert_eq!(rich_text_to_mdx(&[item]), "");
    }
}
