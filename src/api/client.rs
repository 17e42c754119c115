// src/api/client.rs
//! Pure HTTP client wrapper for the Notion API.
//!
//! This module provides a thin wrapper around reqwest for making HTTP
//! requests to the Notion API. It handles authentication, the API
//! version header, and error-body mapping, without parsing or business
//! logic.

use crate::constants::HTTP_TIMEOUT_SECS;
use crate::error::{AppError, NotionErrorCode};
use crate::types::ApiKey;
use reqwest::{header, Client, Response};
use serde::Serialize;
use std::time::Duration;

const NOTION_VERSION: &str = "2022-06-28";
const API_BASE_URL: &str = "https://api.notion.com/v1";

/// A thin wrapper around reqwest Client for Notion API requests.
#[derive(Clone)]
pub struct NotionHttpClient {
    client: Client,
}

impl NotionHttpClient {
    /// Creates a new HTTP client with Notion API authentication.
    pub fn new(api_key: &ApiKey) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(api_key)?)
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client })
    }

    /// Creates the default headers for Notion API requests.
    fn create_headers(api_key: &ApiKey) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", api_key.as_str());
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header).map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid API token format: {}", e))
            })?,
        );

        headers.insert(
            "Notion-Version",
            header::HeaderValue::from_static(NOTION_VERSION),
        );

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    /// Makes a GET request to the specified endpoint, returning the body
    /// as parsed JSON. Non-success responses map to `AppError`.
    pub async fn get_json(&self, endpoint: &str) -> Result<serde_json::Value, AppError> {
        let url = format!("{}/{}", API_BASE_URL, endpoint);
        log::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        extract_json(response).await
    }

    /// Makes a POST request with a JSON body, returning the response body
    /// as parsed JSON. Non-success responses map to `AppError`.
    pub async fn post_json<T: Serialize>(
        &self,
        endpoint: &str,
        body: &T,
    ) -> Result<serde_json::Value, AppError> {
        let url = format!("{}/{}", API_BASE_URL, endpoint);
        log::debug!("POST {}", url);
        let response = self.client.post(url).json(body).send().await?;
        extract_json(response).await
    }
}

/// Reads a response body, mapping Notion error envelopes into the typed
/// error vocabulary.
async fn extract_json(response: Response) -> Result<serde_json::Value, AppError> {
    let status = response.status();
    let body = response.text().await?;

    if status.is_success() {
        return serde_json::from_str(&body).map_err(|e| {
            AppError::MalformedResponse(format!("invalid JSON from Notion API: {}", e))
        });
    }

    // Notion error bodies carry {"code": "...", "message": "..."}
    let (code, message) = match serde_json::from_str::<serde_json::Value>(&body) {
        Ok(err) => {
            let code = err
                .get("code")
                .and_then(|c| c.as_str())
                .map(NotionErrorCode::from_api_response)
                .unwrap_or_else(|| NotionErrorCode::from_http_status(status.as_u16()));
            let message = err
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("no message")
                .to_string();
            (code, message)
        }
        Err(_) => (
            NotionErrorCode::from_http_status(status.as_u16()),
            format!("HTTP {}", status),
        ),
    };

    log::error!("Notion API error ({}): {}", code, message);
    Err(AppError::NotionService {
        code,
        message,
        status,
    })
}
