use async_trait::async_trait;
use notion_sync::blocks::*;
use notion_sync::{
    convert_blocks, object_key, AppError, Block, BlockCommon, BlockId, ContentKind, EnrichOptions,
    FileKind, LinkMetadata, MigrateAsset, MigrateOptions, PageId, ResolveLink, RichTextItem,
    UploadResult,
};
use pretty_assertions::assert_eq;
use std::collections::HashMap;
use std::sync::Mutex;

fn common() -> BlockCommon {
    BlockCommon::new(BlockId::new_v4())
}

fn bookmark(url: &str) -> Block {
    Block::Bookmark(BookmarkBlock {
        common: common(),
        url: url.to_string(),
        caption: vec![],
    })
}

fn image(id: BlockId, url: &str, caption: &str) -> Block {
    let caption = if caption.is_empty() {
        vec![]
    } else {
        vec![RichTextItem::plain_text(caption)]
    };
    Block::Image(ImageBlock {
        common: BlockCommon::new(id),
        url: url.to_string(),
        caption,
    })
}

fn page_id() -> PageId {
    PageId::parse("12345678123412341234123456789abc").unwrap()
}

/// Resolver that counts invocations per URL.
#[derive(Default)]
struct CountingResolver {
    calls: Mutex<HashMap<String, u32>>,
}

#[async_trait]
impl ResolveLink for CountingResolver {
    async fn resolve(&self, url: &str) -> LinkMetadata {
        *self.calls.lock().unwrap().entry(url.to_string()).or_insert(0) += 1;
        LinkMetadata {
            url: url.to_string(),
            title: format!("Title of {}", url),
            description: Some("desc".to_string()),
            image: None,
            favicon: None,
        }
    }
}

/// Migrator that derives keys like the real one but never touches the
/// network; can be primed to fail for specific source URLs.
#[derive(Default)]
struct StubMigrator {
    calls: Mutex<Vec<String>>,
    fail_with_download_error: Option<String>,
    fail_with_size_error: Option<String>,
}

#[async_trait]
impl MigrateAsset for StubMigrator {
    async fn migrate(
        &self,
        source_url: &str,
        options: MigrateOptions<'_>,
    ) -> Result<UploadResult, AppError> {
        self.calls.lock().unwrap().push(source_url.to_string());

        if self.fail_with_download_error.as_deref() == Some(source_url) {
            return Err(AppError::AssetDownload {
                url: source_url.to_string(),
                status: reqwest::StatusCode::NOT_FOUND,
            });
        }
        if self.fail_with_size_error.as_deref() == Some(source_url) {
            return Err(AppError::AssetTooLarge {
                kind: FileKind::Images.as_str(),
                size: 11 * 1024 * 1024,
                limit: 10 * 1024 * 1024,
            });
        }

        let key = object_key(
            FileKind::Images,
            options.content_kind,
            options.page_id,
            options.block_id,
            ".png",
        );
        Ok(UploadResult {
            url: format!("https://cdn.test/{}", key),
            key,
        })
    }
}

fn options(page_id: &PageId) -> EnrichOptions<'_> {
    EnrichOptions {
        page_id,
        content_kind: ContentKind::Posts,
    }
}

#[tokio::test]
async fn duplicate_bookmark_urls_resolve_once() {
    let blocks = vec![
        bookmark("https://a.example"),
        bookmark("https://a.example"),
        bookmark("https://b.example"),
        bookmark("https://a.example"),
    ];
    let resolver = CountingResolver::default();
    let migrator = StubMigrator::default();
    let id = page_id();

    let mdx = convert_blocks(&blocks, options(&id), &resolver, &migrator)
        .await
        .unwrap();

    let calls = resolver.calls.lock().unwrap();
    assert_eq!(calls.get("https://a.example"), Some(&1));
    assert_eq!(calls.get("https://b.example"), Some(&1));
    assert_eq!(mdx.matches("Title of https://a.example").count(), 3);
}

#[tokio::test]
async fn resolved_bookmark_renders_full_link_card() {
    let blocks = vec![bookmark("https://a.example")];
    let resolver = CountingResolver::default();
    let migrator = StubMigrator::default();
    let id = page_id();

    let mdx = convert_blocks(&blocks, options(&id), &resolver, &migrator)
        .await
        .unwrap();

    assert_eq!(
        mdx,
        "<LinkCard url=\"https://a.example\" title=\"Title of https://a.example\" description=\"desc\" />"
    );
}

#[tokio::test]
async fn migrated_image_renders_destination_url_and_alt() {
    let block_id = BlockId::parse("aaaabbbbccccddddaaaabbbbccccdddd").unwrap();
    let blocks = vec![image(
        block_id,
        "https://files.notion.so/secret/pic.png",
        "diagram",
    )];
    let resolver = CountingResolver::default();
    let migrator = StubMigrator::default();
    let id = page_id();

    let mdx = convert_blocks(&blocks, options(&id), &resolver, &migrator)
        .await
        .unwrap();

    assert_eq!(
        mdx,
        "<Image src=\"https://cdn.test/images/posts/12345678123412341234123456789abc/aaaabbbbccccddddaaaabbbbccccdddd.png\" alt=\"diagram\" />"
    );
}

#[tokio::test]
async fn failed_image_migration_degrades_to_placeholder() {
    let block_id = BlockId::parse("aaaabbbbccccddddaaaabbbbccccdddd").unwrap();
    let source = "https://files.notion.so/gone.png";
    let blocks = vec![image(block_id.clone(), source, "")];
    let resolver = CountingResolver::default();
    let migrator = StubMigrator {
        fail_with_download_error: Some(source.to_string()),
        ..StubMigrator::default()
    };
    let id = page_id();

    let mdx = convert_blocks(&blocks, options(&id), &resolver, &migrator)
        .await
        .unwrap();

    assert_eq!(
        mdx,
        format!("{{/* image not migrated: {} */}}", block_id)
    );
}

#[tokio::test]
async fn oversized_asset_aborts_the_document() {
    let source = "https://files.notion.so/huge.png";
    let blocks = vec![image(BlockId::new_v4(), source, "")];
    let resolver = CountingResolver::default();
    let migrator = StubMigrator {
        fail_with_size_error: Some(source.to_string()),
        ..StubMigrator::default()
    };
    let id = page_id();

    let result = convert_blocks(&blocks, options(&id), &resolver, &migrator).await;
    assert!(matches!(result, Err(AppError::AssetTooLarge { .. })));
}

#[tokio::test]
async fn unresolved_link_falls_back_to_raw_url_card() {
    // A link-preview block whose URL was never resolved (resolver
    // returned the degraded record) still renders a minimal card.
    struct FallbackResolver;

    #[async_trait]
    impl ResolveLink for FallbackResolver {
        async fn resolve(&self, url: &str) -> LinkMetadata {
            LinkMetadata::fallback(url)
        }
    }

    let blocks = vec![Block::LinkPreview(LinkPreviewBlock {
        common: common(),
        url: "https://unreachable.example".to_string(),
    })];
    let migrator = StubMigrator::default();
    let id = page_id();

    let mdx = convert_blocks(&blocks, options(&id), &FallbackResolver, &migrator)
        .await
        .unwrap();

    assert_eq!(
        mdx,
        "<LinkCard url=\"https://unreachable.example\" title=\"https://unreachable.example\" />"
    );
}

#[tokio::test]
async fn images_inside_children_are_migrated() {
    let block_id = BlockId::parse("aaaabbbbccccddddaaaabbbbccccdddd").unwrap();
    let nested = image(block_id, "https://files.notion.so/nested.png", "");
    let blocks = vec![Block::Toggle(ToggleBlock {
        common: common().with_children(vec![nested]),
        content: TextBlockContent {
            rich_text: vec![RichTextItem::plain_text("open me")],
        },
    })];
    let resolver = CountingResolver::default();
    let migrator = StubMigrator::default();
    let id = page_id();

    let mdx = convert_blocks(&blocks, options(&id), &resolver, &migrator)
        .await
        .unwrap();

    assert_eq!(migrator.calls.lock().unwrap().len(), 1);
    assert!(mdx.contains("<Image src=\"https://cdn.test/images/posts/"));
}
