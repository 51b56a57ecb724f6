//! NewsData.io search adapter.
//!
//! Queries the [NewsData](https://newsdata.io) `news` endpoint. Successful
//! responses list articles under `results`; failed ones set
//! `"status": "error"` and put an error object in `results` instead.
//!
//! # Field mapping
//!
//! | NewsData | Article |
//! |----------|---------|
//! | `pubDate` | `published_at` |
//! | `title` | `title` |
//! | `description` | `summary` |
//! | `source_id` | `source_name` |
//! | `link` | `url` |

use super::{FetchError, SourceAdapter, error_message, get_text, text_field};
use crate::models::Article;
use crate::utils::truncate_for_log;
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, instrument};
use url::Url;

pub const DEFAULT_ENDPOINT: &str = "https://newsdata.io/api/1/news";

#[derive(Debug, Deserialize)]
struct NewsDataResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    results: Value,
}

fn article_from(item: &Value) -> Article {
    Article::new(
        text_field(item, "pubDate"),
        text_field(item, "title"),
        text_field(item, "description"),
        text_field(item, "source_id"),
        text_field(item, "link"),
    )
}

/// NewsData.io adapter.
#[derive(Debug)]
pub struct NewsDataSource {
    client: reqwest::Client,
    api_key: SecretString,
    endpoint: Url,
}

impl NewsDataSource {
    pub fn new(client: reqwest::Client, api_key: SecretString) -> Result<Self, FetchError> {
        Ok(Self {
            client,
            api_key,
            endpoint: Url::parse(DEFAULT_ENDPOINT)?,
        })
    }

    /// Point the adapter at a different endpoint (proxies, test servers).
    pub fn with_endpoint(mut self, endpoint: &str) -> Result<Self, FetchError> {
        self.endpoint = Url::parse(endpoint)?;
        Ok(self)
    }
}

/// Map a NewsData response body to at most `cap` articles.
fn parse_response(body: &str, cap: usize) -> Result<Vec<Article>, FetchError> {
    let response: NewsDataResponse = serde_json::from_str(body)?;
    if response.status.as_deref() == Some("error") {
        return Err(FetchError::Provider(error_message(&response.results)));
    }
    if response.results.is_null() {
        return Ok(Vec::new());
    }
    let items: Vec<Value> = serde_json::from_value(response.results)?;
    Ok(items.iter().take(cap).map(article_from).collect())
}

#[async_trait]
impl SourceAdapter for NewsDataSource {
    fn name(&self) -> &str {
        "newsdata"
    }

    #[instrument(level = "info", skip_all, fields(source = "newsdata", %query, cap = cap, language = ?language))]
    async fn fetch(
        &self,
        query: &str,
        cap: usize,
        language: Option<&str>,
    ) -> Result<Vec<Article>, FetchError> {
        let mut params = vec![("apikey", self.api_key.expose_secret()), ("q", query)];
        if let Some(language) = language {
            params.push(("language", language));
        }

        let body = get_text(self.client.get(self.endpoint.clone()).query(&params)).await?;
        let articles = parse_response(&body, cap).inspect_err(|e| {
            debug!(error = %e, response_preview = %truncate_for_log(&body, 300), "Unusable NewsData response");
        })?;

        info!(count = articles.len(), "Fetched NewsData articles");
        Ok(articles)
    }
}
