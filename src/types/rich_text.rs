// src/types/rich_text.rs
//! Rich text spans and their formatting annotations.

use serde::{Deserialize, Serialize};

/// Formatting flags carried by a rich text span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
    pub color: String,
}

impl Default for Annotations {
    fn default() -> Self {
        Self {
            bold: false,
            italic: false,
            strikethrough: false,
            underline: false,
            code: false,
            color: "default".to_string(),
        }
    }
}

impl Annotations {
    /// Whether the span's color carries a background highlight.
    pub fn has_background(&self) -> bool {
        self.color.ends_with("_background")
    }
}

/// One run of text with uniform formatting and an optional link target.
///
/// Mentions and equations arrive from the API already flattened into
/// `plain_text`; this pipeline renders them as plain prose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RichTextItem {
    pub plain_text: String,
    pub annotations: Annotations,
    pub href: Option<String>,
}

impl RichTextItem {
    /// Create a plain text span — the most common rich text variant.
    ///
    /// This is the vocabulary for constructing rich text in tests and
    /// adapters. Instead of a struct literal with defaults, just:
    /// ```ignore
    /// RichTextItem::plain_text("hello")
    /// ```
    #[allow(dead_code)]
    pub fn plain_text(text: &str) -> Self {
        Self {
            plain_text: text.to_string(),
            annotations: Annotations::default(),
            href: None,
        }
    }

    /// Create a span with the given annotations.
    #[allow(dead_code)]
    pub fn styled(text: &str, annotations: Annotations) -> Self {
        Self {
            plain_text: text.to_string(),
            annotations,
            href: None,
        }
    }

    /// Create a span linking to a URL.
    #[allow(dead_code)]
    pub fn linked(text: &str, url: &str) -> Self {
        Self {
            plain_text: text.to_string(),
            annotations: Annotations::default(),
            href: Some(url.to_string()),
        }
    }
}

/// Concatenate the plain text of a span sequence.
pub fn plain_text_of(items: &[RichTextItem]) -> String {
    items.iter().map(|i| i.plain_text.as_str()).collect()
}
