// src/formatting/mod.rs
//! Block tree rendering: collect → enrich → render.
//!
//! Rendering a document is three phases over one immutable forest. The
//! pure collection pass gathers every URL and image the renderer will
//! need; enrichment resolves them concurrently; the render pass is then
//! fully synchronous with both lookup maps in hand. See the phase
//! modules for the reasoning behind the split.

pub mod block_renderer;
pub mod collect;
pub mod enrich;
pub mod rich_text;

pub use block_renderer::{normalize_whitespace, render_document, RenderContext};
pub use collect::{collect_references, CollectedRefs, ImageRef};
pub use enrich::{enrich, EnrichOptions, EnrichedRefs, MigratedImage};
pub use rich_text::rich_text_to_mdx;

use crate::error::AppError;
use crate::metadata::ResolveLink;
use crate::model::Block;
use crate::storage::MigrateAsset;

/// Converts a block forest to MDX: the full three-phase pipeline for
/// one document.
pub async fn convert_blocks(
    blocks: &[Block],
    options: EnrichOptions<'_>,
    resolver: &dyn ResolveLink,
    migrator: &dyn MigrateAsset,
) -> Result<String, AppError> {
    let enriched = enrich(blocks, options, resolver, migrator).await?;
    Ok(render_document(blocks, &RenderContext::new(&enriched)))
}
