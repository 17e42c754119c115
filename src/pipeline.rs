// src/pipeline.rs
//! Sync orchestrator: one full enumerate → transform → write batch.
//!
//! Articles are processed sequentially — one document's migrate, render
//! and write completes before the next begins. Only the enrichment
//! inside a single document fans out concurrently. Batch semantics are
//! all-or-nothing: any decode, query, size-limit or write failure
//! aborts the whole run rather than silently skipping a document.

use crate::analytics::reading_time;
use crate::api::NotionClient;
use crate::config::SyncConfig;
use crate::constants::THUMBNAIL_BLOCK_ID;
use crate::error::AppError;
use crate::formatting::{convert_blocks, EnrichOptions};
use crate::metadata::{HttpLinkResolver, ResolveLink};
use crate::model::{Article, Project};
use crate::output;
use crate::storage::{
    AssetMigrator, ContentKind, MigrateAsset, MigrateOptions, ObjectStore, S3ObjectStore,
};
use crate::types::PageId;
use std::sync::Arc;

/// Drives a complete sync run against the configured workspace.
pub struct SyncPipeline {
    notion: NotionClient,
    resolver: Box<dyn ResolveLink>,
    migrator: Box<dyn MigrateAsset>,
    config: SyncConfig,
}

impl SyncPipeline {
    /// Wires the production clients from a resolved configuration.
    pub fn new(config: SyncConfig) -> Result<Self, AppError> {
        let notion = NotionClient::new(&config.api_key)?;

        let store: Arc<dyn ObjectStore> = Arc::new(S3ObjectStore::new(
            &config.r2_endpoint,
            config.r2_bucket.clone(),
            config.r2_access_key_id.clone(),
            config.r2_secret_access_key.clone(),
            config.r2_public_url.clone(),
        )?);

        Ok(Self {
            notion,
            resolver: Box::new(HttpLinkResolver::new()?),
            migrator: Box::new(AssetMigrator::new(store)?),
            config,
        })
    }

    /// Runs the full batch: fetch, process, persist.
    pub async fn run(&self) -> Result<(), AppError> {
        log::info!("Starting Notion sync");

        log::info!("Fetching data from Notion...");
        let (articles, projects, bookmarks) = tokio::try_join!(
            self.notion.list_articles(&self.config.posts_db, self.config.limit),
            self.notion.list_projects(&self.config.projects_db, self.config.limit),
            self.notion.list_bookmarks(&self.config.bookmarks_db, self.config.limit),
        )?;
        log::info!(
            "Fetched {} posts, {} projects, {} bookmarks",
            articles.len(),
            projects.len(),
            bookmarks.len()
        );

        log::info!("Processing posts...");
        let mut processed_articles = Vec::with_capacity(articles.len());
        for article in articles {
            log::info!("- {}", article.title);
            let (article, mdx) = self.process_article(article).await?;
            output::write_mdx(&self.config.content_dir.join("posts"), &article, &mdx)?;
            processed_articles.push(article);
        }

        log::info!("Processing projects...");
        let mut processed_projects = Vec::with_capacity(projects.len());
        for project in projects {
            log::info!("- {}", project.title);
            processed_projects.push(self.process_project(project).await?);
        }

        log::info!("Saving metadata...");
        output::write_json(&self.config.content_dir.join("posts.json"), &processed_articles)?;
        output::write_json(
            &self.config.content_dir.join("projects.json"),
            &processed_projects,
        )?;
        output::write_json(&self.config.content_dir.join("bookmarks.json"), &bookmarks)?;

        log::info!("Generating sitemap...");
        let sitemap = output::sitemap::generate(&processed_articles, &self.config.site_url);
        output::write_file(&self.config.public_dir.join("sitemap.xml"), &sitemap)?;

        log::info!(
            "Sync complete: {} posts, {} projects, {} bookmarks",
            processed_articles.len(),
            processed_projects.len(),
            bookmarks.len()
        );
        Ok(())
    }

    /// Migrates an article's thumbnail, renders its block forest, and
    /// computes the derived reading time.
    async fn process_article(&self, mut article: Article) -> Result<(Article, String), AppError> {
        if let Some(thumbnail) = article.thumbnail.take() {
            log::info!("  uploading thumbnail...");
            article.thumbnail = Some(
                self.migrate_thumbnail(&thumbnail, &article.id, ContentKind::Posts)
                    .await?,
            );
        }

        let blocks = self.notion.block_forest(&article.id).await?;
        log::info!("  blocks: {}", blocks.len());

        let mdx = convert_blocks(
            &blocks,
            EnrichOptions {
                page_id: &article.id,
                content_kind: ContentKind::Posts,
            },
            self.resolver.as_ref(),
            self.migrator.as_ref(),
        )
        .await?;

        let minutes = reading_time(&mdx);
        log::info!("  reading time: {} min", minutes);
        article.reading_time = Some(minutes);

        Ok((article, mdx))
    }

    /// Projects carry no rich body; only the thumbnail migrates.
    async fn process_project(&self, mut project: Project) -> Result<Project, AppError> {
        if let Some(thumbnail) = project.thumbnail.take() {
            log::info!("  uploading thumbnail...");
            project.thumbnail = Some(
                self.migrate_thumbnail(&thumbnail, &project.id, ContentKind::Projects)
                    .await?,
            );
        }
        Ok(project)
    }

    /// Thumbnails share the idempotence guarantee through a reserved
    /// block id outside the upstream UUID space.
    async fn migrate_thumbnail(
        &self,
        source_url: &str,
        page_id: &PageId,
        content_kind: ContentKind,
    ) -> Result<String, AppError> {
        let result = self
            .migrator
            .migrate(
                source_url,
                MigrateOptions {
                    content_kind,
                    page_id: page_id.as_str(),
                    block_id: THUMBNAIL_BLOCK_ID,
                    extension: None,
                    skip_if_exists: true,
                },
            )
            .await?;
        Ok(result.url)
    }
}
