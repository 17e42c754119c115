// src/storage/migrate.rs
//! Downloads a remote asset and re-homes it under a content-addressed
//! key in durable storage.

use super::{extension_from_url, mime_for_extension, object_key, ContentKind, FileKind, ObjectStore};
use crate::constants::{ASSET_CACHE_CONTROL, HTTP_TIMEOUT_SECS};
use crate::error::AppError;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Addressing inputs for one migration.
#[derive(Debug, Clone, Copy)]
pub struct MigrateOptions<'a> {
    pub content_kind: ContentKind,
    pub page_id: &'a str,
    pub block_id: &'a str,
    /// Overrides extension sniffing from the source URL.
    pub extension: Option<&'a str>,
    /// Probe the destination first and return the existing object's URL
    /// without transferring any bytes.
    pub skip_if_exists: bool,
}

/// Where a migrated asset ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResult {
    pub key: String,
    pub url: String,
}

/// Capability seam for asset migration, so rendering and tests depend
/// on the contract rather than on the store.
#[async_trait]
pub trait MigrateAsset: Send + Sync {
    async fn migrate(
        &self,
        source_url: &str,
        options: MigrateOptions<'_>,
    ) -> Result<UploadResult, AppError>;
}

/// Production migrator: download into memory, validate size, upload.
pub struct AssetMigrator {
    store: Arc<dyn ObjectStore>,
    client: reqwest::Client,
}

impl AssetMigrator {
    pub fn new(store: Arc<dyn ObjectStore>) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()?;
        Ok(Self { store, client })
    }
}

#[async_trait]
impl MigrateAsset for AssetMigrator {
    async fn migrate(
        &self,
        source_url: &str,
        options: MigrateOptions<'_>,
    ) -> Result<UploadResult, AppError> {
        let extension = options
            .extension
            .map(str::to_string)
            .unwrap_or_else(|| extension_from_url(source_url));
        let file_kind = FileKind::from_extension(&extension);
        let key = object_key(
            file_kind,
            options.content_kind,
            options.page_id,
            options.block_id,
            &extension,
        );

        if options.skip_if_exists && self.store.exists(&key).await? {
            log::debug!("Asset already migrated, skipping: {}", key);
            return Ok(UploadResult {
                url: self.store.public_url(&key),
                key,
            });
        }

        let response = self.client.get(source_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::AssetDownload {
                url: source_url.to_string(),
                status,
            });
        }

        let bytes = response.bytes().await?.to_vec();
        let limit = file_kind.size_limit();
        if bytes.len() > limit {
            return Err(AppError::AssetTooLarge {
                kind: file_kind.as_str(),
                size: bytes.len(),
                limit,
            });
        }

        self.store
            .put(&key, bytes, mime_for_extension(&extension), ASSET_CACHE_CONTROL)
            .await?;

        Ok(UploadResult {
            url: self.store.public_url(&key),
            key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory store recording puts and probe counts.
    #[derive(Default)]
    struct MemoryStore {
        objects: Mutex<HashMap<String, Vec<u8>>>,
        puts: Mutex<u32>,
    }

    #[async_trait]
    impl ObjectStore for MemoryStore {
        async fn put(
            &self,
            key: &str,
            bytes: Vec<u8>,
            _content_type: &str,
            _cache_control: &str,
        ) -> Result<(), AppError> {
            *self.puts.lock().unwrap() += 1;
            self.objects.lock().unwrap().insert(key.to_string(), bytes);
            Ok(())
        }

        async fn exists(&self, key: &str) -> Result<bool, AppError> {
            Ok(self.objects.lock().unwrap().contains_key(key))
        }

        async fn delete(&self, key: &str) -> Result<(), AppError> {
            self.objects.lock().unwrap().remove(key);
            Ok(())
        }

        fn public_url(&self, key: &str) -> String {
            format!("https://cdn.test/{}", key)
        }
    }

    #[tokio::test]
    async fn skip_if_exists_returns_without_fetching() {
        let store = Arc::new(MemoryStore::default());
        store
            .objects
            .lock()
            .unwrap()
            .insert("images/posts/page/block.png".to_string(), vec![1, 2, 3]);

        let migrator = AssetMigrator::new(store.clone()).unwrap();
        // Source URL is unreachable on purpose: the probe must hit first.
        let result = migrator
            .migrate(
                "http://127.0.0.1:1/missing.png",
                MigrateOptions {
                    content_kind: ContentKind::Posts,
                    page_id: "page",
                    block_id: "block",
                    extension: Some(".png"),
                    skip_if_exists: true,
                },
            )
            .await
            .unwrap();

        assert_eq!(result.key, "images/posts/page/block.png");
        assert_eq!(result.url, "https://cdn.test/images/posts/page/block.png");
        assert_eq!(*store.puts.lock().unwrap(), 0);
    }
}
