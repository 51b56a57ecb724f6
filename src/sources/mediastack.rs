//! Mediastack search adapter.
//!
//! Queries the [Mediastack](https://mediastack.com) `news` endpoint. Articles
//! are listed under `data`; failures come back as an `error` object.
//! The free tier only serves plain HTTP, hence the `http://` default.
//!
//! # Field mapping
//!
//! | Mediastack | Article |
//! |------------|---------|
//! | `published_at` | `published_at` |
//! | `title` | `title` |
//! | `description` | `summary` |
//! | `source` | `source_name` |
//! | `url` | `url` |

use super::{FetchError, SourceAdapter, error_message, get_text, text_field};
use crate::models::Article;
use crate::utils::truncate_for_log;
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, instrument};
use url::Url;

pub const DEFAULT_ENDPOINT: &str = "http://api.mediastack.com/v1/news";

#[derive(Debug, Deserialize)]
struct MediastackResponse {
    #[serde(default)]
    data: Value,
    #[serde(default)]
    error: Option<Value>,
}

fn article_from(item: &Value) -> Article {
    Article::new(
        text_field(item, "published_at"),
        text_field(item, "title"),
        text_field(item, "description"),
        text_field(item, "source"),
        text_field(item, "url"),
    )
}

/// Mediastack adapter.
#[derive(Debug)]
pub struct MediastackSource {
    client: reqwest::Client,
    access_key: SecretString,
    endpoint: Url,
}

impl MediastackSource {
    pub fn new(client: reqwest::Client, access_key: SecretString) -> Result<Self, FetchError> {
        Ok(Self {
            client,
            access_key,
            endpoint: Url::parse(DEFAULT_ENDPOINT)?,
        })
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Result<Self, FetchError> {
        self.endpoint = Url::parse(endpoint)?;
        Ok(self)
    }
}

fn parse_response(body: &str, cap: usize) -> Result<Vec<Article>, FetchError> {
    let response: MediastackResponse = serde_json::from_str(body)?;
    if let Some(error) = response.error.filter(|e| !e.is_null()) {
        return Err(FetchError::Provider(error_message(&error)));
    }
    if response.data.is_null() {
        return Ok(Vec::new());
    }
    let items: Vec<Value> = serde_json::from_value(response.data)?;
    Ok(items.iter().take(cap).map(article_from).collect())
}

#[async_trait]
impl SourceAdapter for MediastackSource {
    fn name(&self) -> &str {
        "mediastack"
    }

    #[instrument(level = "info", skip_all, fields(source = "mediastack", %query, cap = cap, language = ?language))]
    async fn fetch(
        &self,
        query: &str,
        cap: usize,
        language: Option<&str>,
    ) -> Result<Vec<Article>, FetchError> {
        let mut params = vec![
            ("access_key", self.access_key.expose_secret()),
            ("keywords", query),
        ];
        if let Some(language) = language {
            params.push(("languages", language));
        }

        let body = get_text(self.client.get(self.endpoint.clone()).query(&params)).await?;
        let articles = parse_response(&body, cap).inspect_err(|e| {
            debug!(error = %e, response_preview = %truncate_for_log(&body, 300), "Unusable Mediastack response");
        })?;

        info!(count = articles.len(), "Fetched Mediastack articles");
        Ok(articles)
    }
}
