// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role. Reading these constants should tell you the story of
//! how the pipeline operates: how much it fetches per round-trip, how
//! large an asset may be, how reading time is estimated.

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// How many objects the Notion API returns per page of results.
///
/// The Notion API maximum is 100. We use the maximum to minimize
/// round-trips while enumerating databases and block children.
pub const NOTION_API_PAGE_SIZE: usize = 100;

/// Timeout applied to every outbound HTTP request.
///
/// Neither the Notion API nor arbitrary bookmarked sites offer a
/// cancellation contract, so a hung connection would stall the whole
/// batch without this bound.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

// ---------------------------------------------------------------------------
// Asset migration boundaries
// ---------------------------------------------------------------------------

/// Upper size bound for migrated image assets.
pub const IMAGE_SIZE_LIMIT: usize = 10 * 1024 * 1024;

/// Upper size bound for migrated video assets.
pub const VIDEO_SIZE_LIMIT: usize = 100 * 1024 * 1024;

/// Upper size bound for migrated document assets.
pub const DOCUMENT_SIZE_LIMIT: usize = 50 * 1024 * 1024;

/// Cache-control directive attached to every uploaded asset.
///
/// Keys are content-addressed, so an object never changes once written;
/// one year of immutable caching is safe.
pub const ASSET_CACHE_CONTROL: &str = "public, max-age=31536000";

/// Extension assumed when the source URL carries none.
pub const DEFAULT_ASSET_EXTENSION: &str = ".png";

/// Reserved block id under which a document's thumbnail is stored.
///
/// In-body block ids come from Notion's UUID id space, which cannot
/// produce this literal, so the key namespace stays collision-free.
pub const THUMBNAIL_BLOCK_ID: &str = "thumbnail";

// ---------------------------------------------------------------------------
// Link metadata resolution
// ---------------------------------------------------------------------------

/// User agent presented when fetching bookmarked pages for metadata.
pub const METADATA_USER_AGENT: &str = "Mozilla/5.0 (compatible; NHJBot/1.0)";

// ---------------------------------------------------------------------------
// Formatting boundaries
// ---------------------------------------------------------------------------

/// Indentation unit for nested list children in rendered output.
pub const CHILD_INDENT: &str = "  ";

/// Icon used for callouts that carry none of their own.
pub const DEFAULT_CALLOUT_ICON: &str = "💡";

/// Estimated characters per block, used to pre-allocate output strings.
///
/// This is a performance hint, not a constraint. Over-estimating wastes
/// a little memory; under-estimating causes reallocation.
pub const CHARS_PER_BLOCK_ESTIMATE: usize = 256;

// ---------------------------------------------------------------------------
// Derived fields
// ---------------------------------------------------------------------------

/// Characters read per minute, for the reading-time estimate.
///
/// Calibrated for Korean prose; the estimate divides the stripped
/// character count by this and rounds up, with a floor of one minute.
pub const CHARS_PER_MINUTE: usize = 500;
