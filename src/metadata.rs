// src/metadata.rs
//! Open-Graph link metadata resolution for bookmark and link-preview
//! cards.
//!
//! One GET per URL, no retries, and no failure mode visible to callers:
//! anything short of a parsed page degrades to `{url, title: url}` so a
//! single dead link can never stall a document.

use crate::constants::{HTTP_TIMEOUT_SECS, METADATA_USER_AGENT};
use crate::error::AppError;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Resolved metadata for one external URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkMetadata {
    pub url: String,
    pub title: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub favicon: Option<String>,
}

impl LinkMetadata {
    /// The degraded record returned when a page cannot be fetched.
    pub fn fallback(url: &str) -> Self {
        Self {
            url: url.to_string(),
            title: url.to_string(),
            description: None,
            image: None,
            favicon: None,
        }
    }
}

/// Capability seam for link resolution, so rendering and tests depend
/// on the contract rather than on HTTP.
#[async_trait]
pub trait ResolveLink: Send + Sync {
    async fn resolve(&self, url: &str) -> LinkMetadata;
}

/// Production resolver backed by reqwest.
pub struct HttpLinkResolver {
    client: reqwest::Client,
}

impl HttpLinkResolver {
    pub fn new() -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .user_agent(METADATA_USER_AGENT)
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ResolveLink for HttpLinkResolver {
    async fn resolve(&self, url: &str) -> LinkMetadata {
        let response = match self.client.get(url).send().await {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                log::warn!("Metadata fetch for {} returned {}", url, response.status());
                return LinkMetadata::fallback(url);
            }
            Err(e) => {
                log::warn!("Metadata fetch for {} failed: {}", url, e);
                return LinkMetadata::fallback(url);
            }
        };

        match response.text().await {
            Ok(html) => extract_metadata(url, &html),
            Err(e) => {
                log::warn!("Metadata body read for {} failed: {}", url, e);
                LinkMetadata::fallback(url)
            }
        }
    }
}

static TITLE_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("valid title regex"));

/// Pulls title/description/image/favicon out of a page, trying
/// Open-Graph, then Twitter-card, then generic fallbacks.
pub fn extract_metadata(url: &str, html: &str) -> LinkMetadata {
    let title = meta_content(html, "og:title")
        .or_else(|| meta_content(html, "twitter:title"))
        .or_else(|| {
            TITLE_TAG
                .captures(html)
                .map(|c| decode_entities(c[1].trim()))
        })
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| url.to_string());

    let description = meta_content(html, "og:description")
        .or_else(|| meta_content(html, "twitter:description"))
        .or_else(|| meta_content(html, "description"))
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty());

    let image_path =
        meta_content(html, "og:image").or_else(|| meta_content(html, "twitter:image"));

    let favicon_path = icon_href(html, "icon")
        .or_else(|| icon_href(html, "shortcut icon"))
        .or_else(|| icon_href(html, "apple-touch-icon"))
        .unwrap_or_else(|| "/favicon.ico".to_string());

    // Meta tags routinely carry relative asset paths; resolve them
    // against the page's own URL before handing them to the renderer.
    let base = Url::parse(url).ok();
    let absolutize = |path: &str| -> Option<String> {
        match &base {
            Some(base) => base.join(path).ok().map(|u| u.to_string()),
            None => None,
        }
    };

    let image = image_path.as_deref().and_then(|path| absolutize(path));
    let favicon = absolutize(&favicon_path);

    LinkMetadata {
        url: url.to_string(),
        title: title.trim().to_string(),
        description,
        image,
        favicon,
    }
}

/// Content of a `<meta property|name="key" content="...">` tag,
/// tolerating either attribute order.
fn meta_content(html: &str, key: &str) -> Option<String> {
    let escaped = regex::escape(key);
    let patterns = [
        format!(
            r#"(?is)<meta[^>]*\b(?:property|name)\s*=\s*["']{}["'][^>]*\bcontent\s*=\s*["']([^"']*)["']"#,
            escaped
        ),
        format!(
            r#"(?is)<meta[^>]*\bcontent\s*=\s*["']([^"']*)["'][^>]*\b(?:property|name)\s*=\s*["']{}["']"#,
            escaped
        ),
    ];

    patterns.iter().find_map(|pattern| {
        Regex::new(pattern)
            .ok()?
            .captures(html)
            .map(|c| decode_entities(&c[1]))
    })
}

/// Href of a `<link rel="..." href="...">` tag, tolerating either
/// attribute order.
fn icon_href(html: &str, rel: &str) -> Option<String> {
    let escaped = regex::escape(rel);
    let patterns = [
        format!(
            r#"(?is)<link[^>]*\brel\s*=\s*["']{}["'][^>]*\bhref\s*=\s*["']([^"']*)["']"#,
            escaped
        ),
        format!(
            r#"(?is)<link[^>]*\bhref\s*=\s*["']([^"']*)["'][^>]*\brel\s*=\s*["']{}["']"#,
            escaped
        ),
    ];

    patterns.iter().find_map(|pattern| {
        Regex::new(pattern)
            .ok()?
            .captures(html)
            .map(|c| c[1].to_string())
    })
}

fn decode_entities(text: &str) -> String {
    text.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
}
