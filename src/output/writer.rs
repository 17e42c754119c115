// src/output/writer.rs
//! Executes output operations by performing actual file I/O.
//!
//! This module is the only place where artifact writes occur, keeping
//! the rest of the codebase pure and testable. Write failures are
//! fatal: a half-written artifact set must never look like a
//! successful sync.

use super::frontmatter::front_matter;
use crate::error::AppError;
use crate::model::Article;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Writes content to a file, creating parent directories as needed.
pub fn write_file(path: &Path, content: &str) -> Result<(), AppError> {
    log::debug!("Writing {} bytes to {}", content.len(), path.display());

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, content)?;
    log::info!("Wrote file: {}", path.display());
    Ok(())
}

/// Serializes a value as pretty JSON with a trailing newline.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(value)?;
    write_file(path, &format!("{}\n", json))
}

/// Writes an article's MDX file: front-matter, blank line, body.
pub fn write_mdx(dir: &Path, article: &Article, body: &str) -> Result<(), AppError> {
    let path = dir.join(format!("{}.mdx", article.slug));
    let content = format!("{}\n\n{}\n", front_matter(article), body);
    write_file(&path, &content)
}
