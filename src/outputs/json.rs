//! JSON output for scripting and piping into other tools.
//!
//! # Document shape
//!
//! ```text
//! {
//!   "generated_at": "2024-01-10T08:00:00Z",
//!   "brand": "Tesla",
//!   "model_filter": "ALL",
//!   "language": "ALL",
//!   "result_cap": 10,
//!   "count": 2,
//!   "sources": [ { "source": "newsdata", "status": "fetched", "count": 1 }, ... ],
//!   "articles": [ { "published_at": ..., "published": ..., "title": ..., ... } ]
//! }
//! ```

use crate::models::{Article, ResultSet, SourceReport};
use crate::query::Query;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, instrument};

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    generated_at: DateTime<Utc>,
    brand: &'a str,
    model_filter: String,
    language: String,
    result_cap: usize,
    count: usize,
    sources: &'a [SourceReport],
    articles: &'a [Article],
}

/// Serialize a run and the query that produced it as pretty JSON.
#[instrument(level = "debug", skip_all, fields(brand = %result.brand, count = result.len()))]
pub fn render_json(query: &Query, result: &ResultSet) -> Result<String, serde_json::Error> {
    let report = JsonReport {
        generated_at: Utc::now(),
        brand: &result.brand,
        model_filter: query.model_filter().to_string(),
        language: query.language().to_string(),
        result_cap: query.result_cap(),
        count: result.len(),
        sources: &result.sources,
        articles: &result.articles,
    };
    let json = serde_json::to_string_pretty(&report)?;
    debug!(bytes = json.len(), "Rendered JSON report");
    Ok(json)
}
