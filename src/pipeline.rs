//! The aggregation pipeline: fan out to every source, merge, tag, sort, filter.
//!
//! # Stages
//!
//! 1. **Fetching**: every registered source is queried concurrently, each
//!    under its own deadline
//! 2. **Merging**: results are concatenated in registration order, keeping
//!    each source's own ordering
//! 3. **Tagging**: each article gets the model its title mentions
//! 4. **Dating**: raw publication dates are parsed; unparseable ones become `None`
//! 5. **Sorting**: newest first, undated articles last (stable)
//! 6. **Filtering**: the query's model filter is applied
//!
//! A failing source never fails the run. It is logged, recorded in the
//! [`ResultSet`]'s source reports, and contributes no articles.

use crate::catalog::BrandCatalog;
use crate::models::{Article, ResultSet, SourceReport};
use crate::query::Query;
use crate::sources::{FetchError, SourceAdapter};
use crate::tagger::ModelTagger;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use futures::future::join_all;
use std::cmp::Ordering;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::{debug, info, instrument, warn};

/// Deadline applied to each source call.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(8);

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Orchestrates one monitoring run over a fixed set of sources.
pub struct Pipeline {
    catalog: BrandCatalog,
    sources: Vec<Box<dyn SourceAdapter>>,
    fetch_timeout: Duration,
}

impl Pipeline {
    pub fn new(catalog: BrandCatalog) -> Self {
        Self {
            catalog,
            sources: Vec::new(),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    /// Register a source. Results are merged in registration order.
    pub fn with_source(mut self, source: impl SourceAdapter + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    pub fn with_fetch_timeout(mut self, fetch_timeout: Duration) -> Self {
        self.fetch_timeout = fetch_timeout;
        self
    }

    pub fn catalog(&self) -> &BrandCatalog {
        &self.catalog
    }

    pub fn source_names(&self) -> impl Iterator<Item = &str> {
        self.sources.iter().map(|s| s.name())
    }

    /// Run the query against every source and return the final articles.
    #[instrument(
        level = "info",
        skip_all,
        fields(
            brand = %query.brand(),
            model = %query.model_filter(),
            language = %query.language(),
            cap = query.result_cap()
        )
    )]
    pub async fn run(&self, query: &Query) -> ResultSet {
        let t0 = Instant::now();

        // ---- Fetch (concurrently) ----
        let fetches = self.sources.iter().map(|source| async move {
            let call = source.fetch(
                query.brand(),
                query.result_cap(),
                query.language().code(),
            );
            let outcome = match timeout(self.fetch_timeout, call).await {
                Ok(outcome) => outcome,
                Err(_) => Err(FetchError::Timeout(self.fetch_timeout)),
            };
            (source.name(), outcome)
        });
        let outcomes = join_all(fetches).await;

        // ---- Merge ----
        let mut articles: Vec<Article> = Vec::new();
        let mut reports = Vec::with_capacity(outcomes.len());
        for (name, outcome) in outcomes {
            match outcome {
                Ok(batch) => {
                    debug!(source = name, count = batch.len(), "Source returned articles");
                    reports.push(SourceReport::fetched(name, batch.len()));
                    articles.extend(batch);
                }
                Err(e) => {
                    warn!(source = name, error = %e, "Source failed; contributing no articles");
                    reports.push(SourceReport::failed(name, e.to_string()));
                }
            }
        }

        if articles.is_empty() {
            info!(
                elapsed_ms = t0.elapsed().as_millis() as u64,
                "No articles returned by any source"
            );
            return ResultSet {
                brand: query.brand().to_string(),
                articles,
                sources: reports,
            };
        }
        let merged = articles.len();

        // ---- Tag and date ----
        let tagger = ModelTagger::new(&self.catalog);
        for article in &mut articles {
            article.model = tagger
                .detect_model(&article.title, query.brand())
                .to_string();
            article.published = parse_published(&article.published_at);
        }

        // ---- Sort and filter ----
        sort_newest_first(&mut articles);
        articles.retain(|article| query.model_filter().matches(&article.model));

        info!(
            merged,
            kept = articles.len(),
            failed_sources = reports.iter().filter(|r| r.is_failed()).count(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Completed monitoring run"
        );

        ResultSet {
            brand: query.brand().to_string(),
            articles,
            sources: reports,
        }
    }
}

/// Parse a provider publication date into UTC.
///
/// Accepts RFC 3339, RFC 2822, `YYYY-MM-DD HH:MM:SS` style timestamps (read
/// as UTC when they carry no offset) and bare dates. Anything else is `None`.
pub fn parse_published(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%z") {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Order two optional timestamps newest first, with `None` after every date.
fn newest_first(a: &Option<DateTime<Utc>>, b: &Option<DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Stable sort, newest first; undated articles keep their merge order at the end.
pub fn sort_newest_first(articles: &mut [Article]) {
    articles.sort_by(|a, b| newest_first(&a.published, &b.published));
}
