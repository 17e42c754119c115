// src/types/mod.rs
//! Strongly-typed domain primitives shared across the pipeline.

mod ids;
pub mod rich_text;

pub use ids::{BlockId, DatabaseId, Id, PageId};
pub use rich_text::{Annotations, RichTextItem};

use thiserror::Error;

/// Validation failures for domain primitives.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid Notion ID format: {0}")]
    InvalidId(String),

    #[error("Invalid API key format: {reason}")]
    InvalidApiKey { reason: String },
}

/// Notion integration token, validated at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Create a new API key with validation.
    pub fn new(key: impl Into<String>) -> Result<Self, ValidationError> {
        let key = key.into();

        if key.is_empty() {
            return Err(ValidationError::InvalidApiKey {
                reason: "API key cannot be empty".to_string(),
            });
        }

        if !key.starts_with("secret_") && !key.starts_with("ntn_") {
            return Err(ValidationError::InvalidApiKey {
                reason: "API key must start with 'secret_' or 'ntn_'".to_string(),
            });
        }

        Ok(Self(key))
    }

    /// Get the API key as a string reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Never leak the token through debug/display formatting of wrappers.
impl std::fmt::Display for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ApiKey(***)")
    }
}
