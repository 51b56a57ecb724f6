//! News search providers.
//!
//! Each provider is wrapped in an adapter implementing [`SourceAdapter`]:
//! it turns a brand query into the provider's request and maps the
//! provider's response items into canonical [`Article`] values.
//!
//! # Supported Sources
//!
//! | Source | Module | Credential | Notes |
//! |--------|--------|------------|-------|
//! | NewsData | [`newsdata`] | `apikey` | Results under `results` |
//! | Mediastack | [`mediastack`] | `access_key` | Results under `data` |
//!
//! # Common Patterns
//!
//! Adapters:
//! - Make exactly one request per call (no retries)
//! - Omit the language parameter when no language restriction is set
//! - Keep at most `cap` items, in provider order
//! - Substitute empty strings for missing or non-string fields
//! - Only look at the first `cap` items, so a bad item further down is ignored
//! - Report every failure as a [`FetchError`]; the pipeline decides what to do with it

use crate::models::Article;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

pub mod mediastack;
pub mod newsdata;

pub use mediastack::MediastackSource;
pub use newsdata::NewsDataSource;

/// Why a provider call produced no articles.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP status {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("provider error: {0}")]
    Provider(String),
    #[error("timed out after {0:?}")]
    Timeout(Duration),
    #[error("invalid endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
}

/// A news provider that can be searched for articles.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Short label identifying the provider in logs and reports.
    fn name(&self) -> &str;

    /// Search the provider for `query`, returning at most `cap` articles.
    ///
    /// `language` of `None` means no language restriction.
    async fn fetch(
        &self,
        query: &str,
        cap: usize,
        language: Option<&str>,
    ) -> Result<Vec<Article>, FetchError>;
}

/// Build the HTTP client shared by the adapters.
pub fn http_client(timeout: Duration) -> Result<reqwest::Client, FetchError> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// Send a request and return the body of a successful response.
///
/// Request URLs carry credentials, so they are stripped from transport errors.
pub(crate) async fn get_text(request: reqwest::RequestBuilder) -> Result<String, FetchError> {
    let response = request.send().await.map_err(reqwest::Error::without_url)?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status));
    }
    Ok(response.text().await.map_err(reqwest::Error::without_url)?)
}

/// Extract a human-readable message from a provider error object.
pub(crate) fn error_message(error: &serde_json::Value) -> String {
    error
        .get("message")
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| error.to_string())
}

/// Read a string field of a provider item, `""` when absent or not a string.
pub(crate) fn text_field(item: &serde_json::Value, key: &str) -> String {
    item.get(key)
        .and_then(serde_json::Value::as_str)
        .unwrap_or_default()
        .to_string()
}
