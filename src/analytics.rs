// src/analytics.rs
//! Derived content metrics.

use crate::constants::CHARS_PER_MINUTE;
use once_cell::sync::Lazy;
use regex::Regex;

static CODE_FENCES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```.*?```").expect("valid code fence regex"));
static INLINE_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"`[^`]*`").expect("valid inline code regex"));
static LINK_SYNTAX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]*)\]\([^)]*\)").expect("valid link regex"));
static MARKDOWN_PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[#*_~>\-|]").expect("valid punctuation regex"));
static TAGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Estimated reading time in minutes for a rendered MDX body.
///
/// Markup is stripped down to prose characters first: code fences and
/// inline code disappear, links keep only their text, markdown
/// punctuation and tags go, and whitespace does not count. The floor is
/// one minute so no article ever shows zero.
pub fn reading_time(content: &str) -> u32 {
    let stripped = CODE_FENCES.replace_all(content, "");
    let stripped = INLINE_CODE.replace_all(&stripped, "");
    let stripped = LINK_SYNTAX.replace_all(&stripped, "$1");
    let stripped = MARKDOWN_PUNCTUATION.replace_all(&stripped, "");
    let stripped = TAGS.replace_all(&stripped, "");
    let stripped = WHITESPACE.replace_all(&stripped, "");

    let chars = stripped.chars().count();
    let minutes = chars.div_ceil(CHARS_PER_MINUTE);
    minutes.max(1) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_floors_at_one_minute() {
        assert_eq!(reading_time("short text"), 1);
        assert_eq!(reading_time(""), 1);
    }

    #[test]
    fn code_and_markup_do_not_count() {
        let mdx = "```rust\nfn main() {}\n```\n\n# Title\n\n[link text](https://example.com)";
        // Only "Title" and "link text" survive stripping; well under a minute.
        assert_eq!(reading_time(mdx), 1);
    }

    #[test]
    fn long_prose_rounds_up() {
        let body = "가".repeat(501);
        assert_eq!(reading_time(&body), 2);

        let body = "가".repeat(1000);
        assert_eq!(reading_time(&body), 2);

        let body = "가".repeat(1001);
        assert_eq!(reading_time(&body), 3);
    }

    #[test]
    fn whitespace_does_not_count() {
        let body = format!("{} {}", "가".repeat(250), "가".repeat(250));
        assert_eq!(reading_time(&body), 1);
    }
}
