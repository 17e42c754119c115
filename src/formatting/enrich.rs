// src/formatting/enrich.rs
//! Phase 2 of rendering: concurrent resolution of everything phase 1
//! collected.
//!
//! All metadata fetches and all image migrations for one document run
//! concurrently, and the two groups run concurrently with each other.
//! The render phase only starts after both lookup maps are complete, so
//! the tree walk itself never suspends.

use super::collect::{collect_references, ImageRef};
use crate::constants::THUMBNAIL_BLOCK_ID;
use crate::error::AppError;
use crate::metadata::{LinkMetadata, ResolveLink};
use crate::model::Block;
use crate::storage::{ContentKind, MigrateAsset, MigrateOptions};
use crate::types::{BlockId, PageId};
use futures::future::join_all;
use indexmap::IndexMap;
use std::collections::HashMap;

/// A migrated in-body image, ready for the render phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigratedImage {
    pub url: String,
    pub caption: String,
}

/// Read-only lookup maps consumed by the render walk.
#[derive(Debug, Default)]
pub struct EnrichedRefs {
    pub links: IndexMap<String, LinkMetadata>,
    pub images: HashMap<BlockId, MigratedImage>,
}

/// Addressing context for a document's enrichment.
#[derive(Debug, Clone, Copy)]
pub struct EnrichOptions<'a> {
    pub page_id: &'a PageId,
    pub content_kind: ContentKind,
}

/// Resolves every collected URL and migrates every collected image.
///
/// An oversized asset aborts the run; any other migration failure
/// degrades to a missing map entry, which the renderer surfaces as a
/// visible placeholder.
pub async fn enrich(
    blocks: &[Block],
    options: EnrichOptions<'_>,
    resolver: &dyn ResolveLink,
    migrator: &dyn MigrateAsset,
) -> Result<EnrichedRefs, AppError> {
    let refs = collect_references(blocks);

    log::debug!(
        "Enriching document {}: {} unique urls, {} images",
        options.page_id,
        refs.urls.len(),
        refs.images.len()
    );

    let link_futures = refs.urls.iter().map(|url| async move {
        let metadata = resolver.resolve(url).await;
        (url.clone(), metadata)
    });

    let image_futures = refs.images.iter().map(|image| async move {
        let result = migrate_image(image, options, migrator).await;
        (image, result)
    });

    let (resolved_links, migrated_images) =
        futures::join!(join_all(link_futures), join_all(image_futures));

    let mut enriched = EnrichedRefs {
        links: resolved_links.into_iter().collect(),
        images: HashMap::new(),
    };

    for (image, result) in migrated_images {
        match result {
            Ok(url) => {
                enriched.images.insert(
                    image.block_id.clone(),
                    MigratedImage {
                        url,
                        caption: image.caption.clone(),
                    },
                );
            }
            Err(e @ AppError::AssetTooLarge { .. }) => return Err(e),
            Err(e) => {
                log::warn!(
                    "Image migration failed for block {}: {}",
                    image.block_id,
                    e
                );
            }
        }
    }

    Ok(enriched)
}

async fn migrate_image(
    image: &ImageRef,
    options: EnrichOptions<'_>,
    migrator: &dyn MigrateAsset,
) -> Result<String, AppError> {
    debug_assert_ne!(image.block_id.as_str(), THUMBNAIL_BLOCK_ID);

    let result = migrator
        .migrate(
            &image.url,
            MigrateOptions {
                content_kind: options.content_kind,
                page_id: options.page_id.as_str(),
                block_id: image.block_id.as_str(),
                extension: None,
                skip_if_exists: true,
            },
        )
        .await?;
    Ok(result.url)
}
