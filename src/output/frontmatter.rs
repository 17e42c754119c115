// src/output/frontmatter.rs
//! Front-matter header generation for rendered MDX files.

use crate::model::Article;

/// Fixed-field front-matter header for an article body.
///
/// Field order is stable: title, excerpt, createdAt, updatedAt, tags,
/// then thumbnail only when present.
pub fn front_matter(article: &Article) -> String {
    let mut lines = vec![
        "---".to_string(),
        format!("title: \"{}\"", escape_quotes(&article.title)),
        format!("excerpt: \"{}\"", escape_quotes(&article.excerpt)),
        format!("createdAt: \"{}\"", article.created_at),
        format!("updatedAt: \"{}\"", article.updated_at),
        format!("tags: [{}]", quoted_list(&article.tags)),
    ];

    if let Some(thumbnail) = &article.thumbnail {
        lines.push(format!("thumbnail: \"{}\"", thumbnail));
    }

    lines.push("---".to_string());
    lines.join("\n")
}

fn escape_quotes(value: &str) -> String {
    value.replace('"', "\\\"")
}

fn quoted_list(values: &[String]) -> String {
    values
        .iter()
        .map(|v| format!("\"{}\"", v))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PageId;
    use pretty_assertions::assert_eq;

    fn article() -> Article {
        Article {
            id: PageId::parse("12345678123412341234123456789abc").unwrap(),
            title: "On \"Quotes\"".to_string(),
            excerpt: "A short intro".to_string(),
            tags: vec!["rust".to_string(), "notion".to_string()],
            slug: "on-quotes".to_string(),
            thumbnail: None,
            published: true,
            created_at: "2025-03-01T09:00:00.000Z".to_string(),
            updated_at: "2025-03-02T09:00:00.000Z".to_string(),
            related_project: None,
            reading_time: Some(2),
        }
    }

    #[test]
    fn quotes_in_title_are_escaped() {
        let header = front_matter(&article());
        let expected = "\
---
title: \"On \\\"Quotes\\\"\"
excerpt: \"A short intro\"
createdAt: \"2025-03-01T09:00:00.000Z\"
updatedAt: \"2025-03-02T09:00:00.000Z\"
tags: [\"rust\", \"notion\"]
---";
        assert_eq!(header, expected);
    }

    #[test]
    fn thumbnail_line_only_when_present() {
        let mut with_thumb = article();
        with_thumb.thumbnail = Some("https://cdn.example.com/t.png".to_string());
        assert!(front_matter(&with_thumb).contains("thumbnail: \"https://cdn.example.com/t.png\""));
        assert!(!front_matter(&article()).contains("thumbnail:"));
    }
}
