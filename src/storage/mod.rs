// src/storage/mod.rs
//! Durable object storage: content-addressed keys and the store seam.
//!
//! A destination key is a pure function of (file kind, content kind,
//! page id, block id, extension). Re-running the pipeline on unchanged
//! content always derives the same key, so an existence probe against
//! the store is the only "already uploaded" bookkeeping needed.

mod migrate;
mod s3;

pub use migrate::{AssetMigrator, MigrateAsset, MigrateOptions, UploadResult};
pub use s3::S3ObjectStore;

use crate::constants::{DOCUMENT_SIZE_LIMIT, IMAGE_SIZE_LIMIT, VIDEO_SIZE_LIMIT};
use crate::error::AppError;
use async_trait::async_trait;
use url::Url;

/// Which kind of document an asset belongs to; the second path segment
/// of every destination key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Posts,
    Projects,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Posts => "posts",
            Self::Projects => "projects",
        }
    }
}

/// File category bucket, derived from the extension; the first path
/// segment of every destination key and the source of the size ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Images,
    Videos,
    Documents,
}

impl FileKind {
    /// Category for an extension; anything unrecognized is treated as
    /// an image.
    pub fn from_extension(extension: &str) -> Self {
        match extension {
            ".png" | ".jpg" | ".jpeg" | ".gif" | ".webp" | ".svg" | ".ico" => Self::Images,
            ".mp4" | ".webm" | ".mov" => Self::Videos,
            ".pdf" => Self::Documents,
            _ => Self::Images,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Images => "images",
            Self::Videos => "videos",
            Self::Documents => "documents",
        }
    }

    /// Per-category upload size ceiling in bytes.
    pub fn size_limit(&self) -> usize {
        match self {
            Self::Images => IMAGE_SIZE_LIMIT,
            Self::Videos => VIDEO_SIZE_LIMIT,
            Self::Documents => DOCUMENT_SIZE_LIMIT,
        }
    }
}

/// MIME type for an extension; unknown extensions upload as opaque
/// bytes.
pub fn mime_for_extension(extension: &str) -> &'static str {
    match extension {
        ".png" => "image/png",
        ".jpg" | ".jpeg" => "image/jpeg",
        ".gif" => "image/gif",
        ".webp" => "image/webp",
        ".svg" => "image/svg+xml",
        ".ico" => "image/x-icon",
        ".mp4" => "video/mp4",
        ".webm" => "video/webm",
        ".mov" => "video/quicktime",
        ".pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

/// Extension (with leading dot, lowercased) parsed from a source URL's
/// path, or the pipeline default when none is present.
pub fn extension_from_url(source_url: &str) -> String {
    let path = match Url::parse(source_url) {
        Ok(url) => url.path().to_string(),
        Err(_) => return crate::constants::DEFAULT_ASSET_EXTENSION.to_string(),
    };

    path.rsplit('/')
        .next()
        .and_then(|file| file.rfind('.').map(|i| file[i..].to_lowercase()))
        .filter(|ext| ext.len() > 1 && ext[1..].chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or_else(|| crate::constants::DEFAULT_ASSET_EXTENSION.to_string())
}

/// Content-addressed destination key:
/// `{file_kind}/{content_kind}/{page_id}/{block_id}{extension}`.
pub fn object_key(
    file_kind: FileKind,
    content_kind: ContentKind,
    page_id: &str,
    block_id: &str,
    extension: &str,
) -> String {
    format!(
        "{}/{}/{}/{}{}",
        file_kind.as_str(),
        content_kind.as_str(),
        page_id,
        block_id,
        extension
    )
}

/// Capability seam over the destination store.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload an object, overwriting any existing one under the key.
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
        cache_control: &str,
    ) -> Result<(), AppError>;

    /// Probe whether an object exists under the key.
    async fn exists(&self, key: &str) -> Result<bool, AppError>;

    /// Remove an object; absent keys are not an error.
    async fn delete(&self, key: &str) -> Result<(), AppError>;

    /// Deterministic public URL for a key.
    fn public_url(&self, key: &str) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn object_key_is_a_pure_function_of_its_parts() {
        let key = object_key(
            FileKind::Images,
            ContentKind::Posts,
            "12345678123412341234123456789abc",
            "aaaabbbbccccddddaaaabbbbccccdddd",
            ".png",
        );
        assert_eq!(
            key,
            "images/posts/12345678123412341234123456789abc/aaaabbbbccccddddaaaabbbbccccdddd.png"
        );
    }

    #[test]
    fn extension_parses_from_url_path_ignoring_query() {
        assert_eq!(
            extension_from_url("https://cdn.example.com/a/photo.JPG?token=abc"),
            ".jpg"
        );
        assert_eq!(extension_from_url("https://cdn.example.com/a/photo"), ".png");
        assert_eq!(extension_from_url("not a url"), ".png");
    }

    #[test]
    fn unknown_extension_buckets_as_image() {
        assert_eq!(FileKind::from_extension(".xyz"), FileKind::Images);
        assert_eq!(FileKind::from_extension(".mov"), FileKind::Videos);
        assert_eq!(FileKind::from_extension(".pdf"), FileKind::Documents);
    }

    #[test]
    fn size_limits_follow_category() {
        assert_eq!(FileKind::Images.size_limit(), 10 * 1024 * 1024);
        assert_eq!(FileKind::Videos.size_limit(), 100 * 1024 * 1024);
        assert_eq!(FileKind::Documents.size_limit(), 50 * 1024 * 1024);
    }
}
