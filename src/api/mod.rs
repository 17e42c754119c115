// src/api/mod.rs
//! Structured content client for the Notion API.
//!
//! `NotionClient` is the only component that talks to the content
//! source. It enumerates typed collections (articles, projects,
//! bookmarks) with the published filter applied server-side, and
//! materializes full block forests with children resolved eagerly so
//! the renderer never sees a lazy cursor.

pub mod client;
pub mod parser;
pub mod properties;

use crate::constants::NOTION_API_PAGE_SIZE;
use crate::error::AppError;
use crate::model::{Article, Block, Bookmark, Project};
use crate::types::{ApiKey, DatabaseId, PageId};
use client::NotionHttpClient;
use futures::future::BoxFuture;
use futures::FutureExt;
use serde_json::{json, Value};

/// High-level Notion content client.
#[derive(Clone)]
pub struct NotionClient {
    http: NotionHttpClient,
}

impl NotionClient {
    pub fn new(api_key: &ApiKey) -> Result<Self, AppError> {
        Ok(Self {
            http: NotionHttpClient::new(api_key)?,
        })
    }

    /// Published articles, newest first.
    pub async fn list_articles(
        &self,
        db: &DatabaseId,
        limit: Option<usize>,
    ) -> Result<Vec<Article>, AppError> {
        let pages = self.query_published(db, limit).await?;
        pages.iter().map(parser::parse_article).collect()
    }

    /// Published projects, newest first.
    pub async fn list_projects(
        &self,
        db: &DatabaseId,
        limit: Option<usize>,
    ) -> Result<Vec<Project>, AppError> {
        let pages = self.query_published(db, limit).await?;
        pages.iter().map(parser::parse_project).collect()
    }

    /// Published bookmarks, newest first.
    pub async fn list_bookmarks(
        &self,
        db: &DatabaseId,
        limit: Option<usize>,
    ) -> Result<Vec<Bookmark>, AppError> {
        let pages = self.query_published(db, limit).await?;
        pages.iter().map(parser::parse_bookmark).collect()
    }

    /// Looks up a single published article by its slug.
    #[allow(dead_code)] // Queried by the serving layer, not by the batch run
    pub async fn find_article_by_slug(
        &self,
        db: &DatabaseId,
        slug: &str,
    ) -> Result<Option<Article>, AppError> {
        let pages = self.query_by_slug(db, slug).await?;
        pages.first().map(parser::parse_article).transpose()
    }

    /// Looks up a single published project by its slug.
    #[allow(dead_code)] // Queried by the serving layer, not by the batch run
    pub async fn find_project_by_slug(
        &self,
        db: &DatabaseId,
        slug: &str,
    ) -> Result<Option<Project>, AppError> {
        let pages = self.query_by_slug(db, slug).await?;
        pages.first().map(parser::parse_project).transpose()
    }

    /// Fetches a page's full block forest with children resolved eagerly.
    pub async fn block_forest(&self, page_id: &PageId) -> Result<Vec<Block>, AppError> {
        self.children_recursive(page_id.to_dashed()).await
    }

    /// Queries a database for published pages, newest first, following
    /// cursors until exhausted or `limit` is reached.
    async fn query_published(
        &self,
        db: &DatabaseId,
        limit: Option<usize>,
    ) -> Result<Vec<Value>, AppError> {
        let filter = json!({
            "property": "published",
            "checkbox": {"equals": true}
        });
        self.query_database(db, filter, limit).await
    }

    async fn query_by_slug(&self, db: &DatabaseId, slug: &str) -> Result<Vec<Value>, AppError> {
        let filter = json!({
            "and": [
                {"property": "slug", "rich_text": {"equals": slug}},
                {"property": "published", "checkbox": {"equals": true}}
            ]
        });
        self.query_database(db, filter, Some(1)).await
    }

    async fn query_database(
        &self,
        db: &DatabaseId,
        filter: Value,
        limit: Option<usize>,
    ) -> Result<Vec<Value>, AppError> {
        let endpoint = format!("databases/{}/query", db.to_dashed());
        let mut results = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let page_size = match limit {
                Some(limit) => NOTION_API_PAGE_SIZE.min(limit - results.len()),
                None => NOTION_API_PAGE_SIZE,
            };

            let mut body = json!({
                "filter": filter.clone(),
                "sorts": [{"timestamp": "created_time", "direction": "descending"}],
                "page_size": page_size,
            });
            if let Some(cursor) = &cursor {
                body["start_cursor"] = json!(cursor);
            }

            let response = self.http.post_json(&endpoint, &body).await?;
            collect_results(&response, &mut results)?;

            if let Some(limit) = limit {
                if results.len() >= limit {
                    results.truncate(limit);
                    break;
                }
            }

            match next_cursor(&response) {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        Ok(results)
    }

    /// Fetches children of one parent, recursing into every block that
    /// reports `has_children` so the returned forest is fully
    /// materialized.
    fn children_recursive(&self, parent_id: String) -> BoxFuture<'_, Result<Vec<Block>, AppError>> {
        async move {
            let mut raw_blocks = Vec::new();
            let mut cursor: Option<String> = None;

            loop {
                let endpoint = match &cursor {
                    Some(cursor) => format!(
                        "blocks/{}/children?page_size={}&start_cursor={}",
                        parent_id, NOTION_API_PAGE_SIZE, cursor
                    ),
                    None => format!(
                        "blocks/{}/children?page_size={}",
                        parent_id, NOTION_API_PAGE_SIZE
                    ),
                };

                let response = self.http.get_json(&endpoint).await?;
                collect_results(&response, &mut raw_blocks)?;

                match next_cursor(&response) {
                    Some(next) => cursor = Some(next),
                    None => break,
                }
            }

            let mut blocks = Vec::with_capacity(raw_blocks.len());
            for raw in &raw_blocks {
                let mut block = parser::parse_block(raw)?;
                if block.has_children() {
                    let children = self
                        .children_recursive(block.id().to_dashed())
                        .await?;
                    block.set_children(children);
                }
                blocks.push(block);
            }

            Ok(blocks)
        }
        .boxed()
    }
}

fn collect_results(response: &Value, into: &mut Vec<Value>) -> Result<(), AppError> {
    let results = response
        .get("results")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            AppError::MalformedResponse("paginated response without results array".to_string())
        })?;
    into.extend(results.iter().cloned());
    Ok(())
}

fn next_cursor(response: &Value) -> Option<String> {
    if !response
        .get("has_more")
        .and_then(Value::as_bool)
        .unwrap_or(false)
    {
        return None;
    }
    response
        .get("next_cursor")
        .and_then(Value::as_str)
        .map(str::to_string)
}
