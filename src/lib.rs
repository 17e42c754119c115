// src/lib.rs
//! notion-sync library — pulls Notion content into filesystem artifacts.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling** — `AppError`, `ValidationError`
//! - **Configuration** — `SyncConfig`
//! - **Domain model** — `Article`, `Project`, `Bookmark`, `Block`
//! - **Domain types** — `PageId`, `BlockId`, `DatabaseId`, `RichTextItem`
//! - **Content client** — `NotionClient`, property decoders, parsers
//! - **Enrichment** — `ResolveLink`, `MigrateAsset`, `ObjectStore`
//! - **Formatting** — `convert_blocks`, `render_document`, `RenderContext`
//! - **Orchestration** — `SyncPipeline`

mod analytics;
mod api;
mod config;
mod constants;
mod error;
mod formatting;
mod metadata;
mod model;
mod output;
mod pipeline;
mod storage;
mod types;

// --- Error Handling ---
pub use crate::error::{AppError, NotionErrorCode};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{CommandLineInput, SyncConfig};

// --- Domain Model ---
pub use crate::model::{
    blocks, Article, Block, BlockCommon, Bookmark, DateRange, Project, ProjectStatus,
};

// --- Domain Types ---
pub use crate::types::{Annotations, ApiKey, BlockId, DatabaseId, PageId, RichTextItem};

// --- Content Client ---
pub use crate::api::{client::NotionHttpClient, parser, properties, NotionClient};

// --- Enrichment Services ---
pub use crate::metadata::{extract_metadata, HttpLinkResolver, LinkMetadata, ResolveLink};
pub use crate::storage::{
    extension_from_url, mime_for_extension, object_key, AssetMigrator, ContentKind, FileKind,
    MigrateAsset, MigrateOptions, ObjectStore, S3ObjectStore, UploadResult,
};

// --- Formatting ---
pub use crate::formatting::{
    collect_references, convert_blocks, enrich, normalize_whitespace, render_document,
    rich_text_to_mdx, CollectedRefs, EnrichOptions, EnrichedRefs, ImageRef, MigratedImage,
    RenderContext,
};

// --- Derived Metrics ---
pub use crate::analytics::reading_time;

// --- Output ---
pub use crate::output::{front_matter, sitemap, write_file, write_json, write_mdx};

// --- Orchestration ---
pub use crate::pipeline::SyncPipeline;
