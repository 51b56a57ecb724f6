//! # Brand Watch
//!
//! A brand-monitoring tool that searches several news APIs for coverage of an
//! automotive brand, merges the results, tags each article with the model it
//! mentions and prints a sortable table (or JSON) for the operator.
//!
//! ## Features
//!
//! - Queries NewsData.io and Mediastack concurrently, each with a bounded timeout
//! - Normalizes both response shapes into one article record
//! - Tags articles with the brand model named in their title
//! - Sorts newest first (undated articles last) and filters by model
//! - Keeps running when a provider fails; the failure is reported, not fatal
//!
//! ## Usage
//!
//! ```sh
//! API_KEY_NEWSDATA=... MEDIASTACK_API_KEY=... brand_watch -b Tesla -m "Model Y"
//! ```
//!
//! ## Architecture
//!
//! 1. **Query**: Validate brand, model filter, language and cap against the catalog
//! 2. **Fetching**: Fan out to every configured provider
//! 3. **Processing**: Merge, tag, date, sort and filter
//! 4. **Output**: Render the result as a table or JSON on stdout

use clap::Parser;
use secrecy::SecretString;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod catalog;
mod cli;
mod models;
mod outputs;
mod pipeline;
mod query;
mod sources;
mod tagger;
mod utils;

use catalog::BrandCatalog;
use cli::Cli;
use outputs::{OutputFormat, json, table};
use pipeline::Pipeline;
use query::{LanguageFilter, ModelFilter, Query};
use sources::{MediastackSource, NewsDataSource};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init (stderr, so stdout only carries the report) ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("brand_watch starting up");

    let args = Cli::parse();
    debug!(
        brand = ?args.brand,
        model = %args.model,
        language = %args.language,
        max_results = args.max_results,
        format = ?args.format,
        "Parsed CLI arguments"
    );

    // ---- Catalog ----
    let catalog = match &args.catalog {
        Some(path) => BrandCatalog::load(path).await?,
        None => BrandCatalog::default(),
    };

    if args.list_brands {
        print!("{}", table::render_catalog(&catalog));
        println!("Languages: {}", catalog::LANGUAGES.join(", "));
        return Ok(());
    }

    if catalog.is_empty() {
        warn!("Brand catalog is empty; no brand can be monitored");
    }

    // ---- Sources ----
    let pipeline = build_pipeline(&args, catalog)?;
    if pipeline.source_names().next().is_none() {
        warn!("No news source is configured; set API_KEY_NEWSDATA and/or MEDIASTACK_API_KEY");
    }

    // ---- Query ----
    let brand = args.brand.clone().ok_or("a brand is required")?;
    let model_filter: ModelFilter = args.model.parse()?;
    let language: LanguageFilter = args.language.parse()?;
    let query = Query::new(
        pipeline.catalog(),
        brand,
        model_filter,
        language,
        args.max_results,
    )?;

    // ---- Run ----
    let result = pipeline.run(&query).await;

    // ---- Output ----
    match args.format {
        OutputFormat::Table => print!("{}", table::render_table(&result)),
        OutputFormat::Json => println!("{}", json::render_json(&query, &result)?),
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        articles = result.len(),
        fetched = result.fetched_total(),
        "Execution complete"
    );

    Ok(())
}

/// Register every provider that has credentials, in fixed order.
///
/// A provider without a key is skipped with a warning instead of failing the run.
fn build_pipeline(args: &Cli, catalog: BrandCatalog) -> Result<Pipeline, Box<dyn Error>> {
    let timeout = Duration::from_secs(args.timeout_secs);
    let client = sources::http_client(timeout)?;
    let mut pipeline = Pipeline::new(catalog).with_fetch_timeout(timeout);

    match &args.newsdata_api_key {
        Some(key) if !key.trim().is_empty() => {
            let source = NewsDataSource::new(client.clone(), SecretString::from(key.clone()))?
                .with_endpoint(&args.newsdata_url)?;
            pipeline = pipeline.with_source(source);
        }
        _ => warn!("API_KEY_NEWSDATA not set; NewsData source disabled"),
    }

    match &args.mediastack_api_key {
        Some(key) if !key.trim().is_empty() => {
            let source = MediastackSource::new(client, SecretString::from(key.clone()))?
                .with_endpoint(&args.mediastack_url)?;
            pipeline = pipeline.with_source(source);
        }
        _ => warn!("MEDIASTACK_API_KEY not set; Mediastack source disabled"),
    }

    info!(
        sources = ?pipeline.source_names().collect::<Vec<_>>(),
        timeout_secs = args.timeout_secs,
        "Pipeline configured"
    );
    Ok(pipeline)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(newsdata: Option<&str>, mediastack: Option<&str>) -> Cli {
        let mut cli = Cli::parse_from(["brand_watch", "--brand", "Tesla"]);
        cli.newsdata_api_key = newsdata.map(str::to_string);
        cli.mediastack_api_key = mediastack.map(str::to_string);
        cli
    }

    #[test]
    fn test_build_pipeline_registers_sources_in_order() {
        let cli = args(Some("nd"), Some("ms"));
        let pipeline = build_pipeline(&cli, BrandCatalog::default()).unwrap();
        assert_eq!(
            pipeline.source_names().collect::<Vec<_>>(),
            ["newsdata", "mediastack"]
        );
    }

    #[test]
    fn test_build_pipeline_skips_missing_keys() {
        let cli = args(None, Some("ms"));
        let pipeline = build_pipeline(&cli, BrandCatalog::default()).unwrap();
        assert_eq!(pipeline.source_names().collect::<Vec<_>>(), ["mediastack"]);

        let cli = args(Some("  "), None);
        let pipeline = build_pipeline(&cli, BrandCatalog::default()).unwrap();
        assert!(pipeline.source_names().next().is_none());
    }

    #[test]
    fn test_build_pipeline_rejects_bad_endpoint() {
        let mut cli = args(Some("nd"), None);
        cli.newsdata_url = "not a url".to_string();
        assert!(build_pipeline(&cli, BrandCatalog::default()).is_err());
    }
}
