//! Data models for fetched articles and the results of a monitoring run.
//!
//! This module defines the values that flow through the pipeline:
//! - [`Article`]: A news item normalized from any provider's response shape
//! - [`SourceReport`]: What one provider contributed to a run
//! - [`ResultSet`]: The ordered, tagged and filtered articles of a run
//!
//! Articles are plain values. Adapters create them, the pipeline tags and
//! dates them, and the presentation layer only reads them.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Model label for articles that do not mention any known model.
pub const GLOBAL_MODEL: &str = "Global";

/// A news article in canonical form.
///
/// Provider adapters fill the raw fields (substituting empty strings for
/// anything the provider left out). The pipeline then sets `published` and
/// `model` exactly once per article.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Article {
    /// Publication date/time as the provider returned it. May be empty or malformed.
    pub published_at: String,
    /// Parsed publication timestamp, `None` when `published_at` is not a date.
    pub published: Option<DateTime<Utc>>,
    /// The article headline.
    pub title: String,
    /// Short description or lead paragraph.
    pub summary: String,
    /// Name or identifier of the publishing outlet.
    pub source_name: String,
    /// Link to the full article.
    pub url: String,
    /// Detected product model, or [`GLOBAL_MODEL`].
    pub model: String,
}

impl Article {
    /// Build an untagged article from provider fields.
    pub fn new(
        published_at: impl Into<String>,
        title: impl Into<String>,
        summary: impl Into<String>,
        source_name: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            published_at: published_at.into(),
            published: None,
            title: title.into(),
            summary: summary.into(),
            source_name: source_name.into(),
            url: url.into(),
            model: GLOBAL_MODEL.to_string(),
        }
    }
}

/// Outcome of one provider call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SourceStatus {
    /// The provider answered and contributed `count` articles.
    Fetched { count: usize },
    /// The provider call failed; it contributed nothing.
    Failed { reason: String },
}

/// Per-provider entry of a [`ResultSet`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceReport {
    pub source: String,
    #[serde(flatten)]
    pub status: SourceStatus,
}

impl SourceReport {
    pub fn fetched(source: impl Into<String>, count: usize) -> Self {
        Self {
            source: source.into(),
            status: SourceStatus::Fetched { count },
        }
    }

    pub fn failed(source: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            status: SourceStatus::Failed {
                reason: reason.into(),
            },
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, SourceStatus::Failed { .. })
    }
}

/// The articles produced by one monitoring run, newest first.
///
/// An empty `ResultSet` is a valid outcome (nothing was found), distinct from
/// not having run at all, which callers represent as the absence of a value.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResultSet {
    /// Brand the run was for.
    pub brand: String,
    /// Final articles after tagging, sorting and filtering.
    pub articles: Vec<Article>,
    /// One report per registered source, in registration order.
    pub sources: Vec<SourceReport>,
}

impl ResultSet {
    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Article> {
        self.articles.iter()
    }

    /// Total number of articles the sources returned before filtering.
    pub fn fetched_total(&self) -> usize {
        self.sources
            .iter()
            .map(|report| match report.status {
                SourceStatus::Fetched { count } => count,
                SourceStatus::Failed { .. } => 0,
            })
            .sum()
    }
}
