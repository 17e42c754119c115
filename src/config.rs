// src/config.rs
use crate::error::AppError;
use crate::types::{ApiKey, DatabaseId};
use clap::Parser;
use std::path::PathBuf;

/// Parsed command-line input.
///
/// The sync is a no-argument batch run; flags only override where
/// artifacts land and how loud the logs are.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Directory for rendered MDX files and JSON metadata
    #[arg(long, default_value = "content")]
    pub content_dir: String,

    /// Directory for the generated sitemap
    #[arg(long, default_value = "public")]
    pub public_dir: String,

    /// Maximum number of documents to fetch per kind
    #[arg(long)]
    pub limit: Option<usize>,
}

/// Resolved sync configuration — validated and ready to drive a run.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub api_key: ApiKey,
    pub posts_db: DatabaseId,
    pub projects_db: DatabaseId,
    pub bookmarks_db: DatabaseId,
    pub r2_endpoint: String,
    pub r2_bucket: String,
    pub r2_access_key_id: String,
    pub r2_secret_access_key: String,
    pub r2_public_url: String,
    pub site_url: String,
    pub content_dir: PathBuf,
    pub public_dir: PathBuf,
    pub verbose: bool,
    pub limit: Option<usize>,
}

impl SyncConfig {
    /// Resolves a complete configuration from CLI input and environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        let api_key = ApiKey::new(require_env("NOTION_API_KEY")?)?;
        let posts_db = parse_db_id("POSTS_DB_ID")?;
        let projects_db = parse_db_id("PROJECTS_DB_ID")?;
        let bookmarks_db = parse_db_id("BOOKMARKS_DB_ID")?;

        let r2_account_id = require_env("R2_ACCOUNT_ID")?;
        let r2_endpoint = format!("https://{}.r2.cloudflarestorage.com", r2_account_id);

        let site_url = std::env::var("SITE_URL")
            .unwrap_or_else(|_| "https://hyeongjin.me".to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(SyncConfig {
            api_key,
            posts_db,
            projects_db,
            bookmarks_db,
            r2_endpoint,
            r2_bucket: require_env("R2_BUCKET_NAME")?,
            r2_access_key_id: require_env("R2_ACCESS_KEY_ID")?,
            r2_secret_access_key: require_env("R2_SECRET_ACCESS_KEY")?,
            r2_public_url: require_env("R2_PUBLIC_URL")?,
            site_url,
            content_dir: PathBuf::from(cli.content_dir),
            public_dir: PathBuf::from(cli.public_dir),
            verbose: cli.verbose,
            limit: cli.limit,
        })
    }
}

fn require_env(name: &str) -> Result<String, AppError> {
    std::env::var(name)
        .map_err(|_| AppError::MissingConfiguration(format!("{} environment variable not set", name)))
}

fn parse_db_id(name: &str) -> Result<DatabaseId, AppError> {
    let raw = require_env(name)?;
    DatabaseId::parse(&raw).map_err(AppError::ValidationError)
}
