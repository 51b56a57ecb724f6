//! Command-line interface definitions for Brand Watch.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Every option can also be provided through an environment variable, which
//! is how API keys are expected to be supplied.

use crate::outputs::OutputFormat;
use crate::query::DEFAULT_RESULT_CAP;
use clap::Parser;
use clap::builder::TypedValueParser;
use std::path::PathBuf;

/// Command-line arguments for the Brand Watch application.
///
/// # Examples
///
/// ```sh
/// # Latest Tesla coverage from both providers
/// brand_watch --brand Tesla
///
/// # Only French articles mentioning the DS 7, 20 per provider, as JSON
/// brand_watch -b "DS Automobiles" -m DS7 -l fr -n 20 --format json
///
/// # Show the brands and models that can be monitored
/// brand_watch --list-brands
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Brand to monitor (see --list-brands)
    #[arg(short, long, env = "BRAND_WATCH_BRAND", required_unless_present = "list_brands")]
    pub brand: Option<String>,

    /// Only keep articles about this model ("all" keeps everything)
    #[arg(short, long, default_value = "all")]
    pub model: String,

    /// Restrict providers to one language code ("all" for no restriction)
    #[arg(short, long, default_value = "all")]
    pub language: String,

    /// Maximum number of articles requested from each provider
    #[arg(
        short = 'n',
        long,
        default_value_t = DEFAULT_RESULT_CAP,
        value_parser = clap::value_parser!(u16).range(5..=30).map(usize::from)
    )]
    pub max_results: usize,

    /// NewsData.io API key
    #[arg(long, env = "API_KEY_NEWSDATA", hide_env_values = true)]
    pub newsdata_api_key: Option<String>,

    /// Mediastack access key
    #[arg(long, env = "MEDIASTACK_API_KEY", hide_env_values = true)]
    pub mediastack_api_key: Option<String>,

    /// Override the NewsData endpoint
    #[arg(long, env = "NEWSDATA_URL", default_value = crate::sources::newsdata::DEFAULT_ENDPOINT)]
    pub newsdata_url: String,

    /// Override the Mediastack endpoint
    #[arg(long, env = "MEDIASTACK_URL", default_value = crate::sources::mediastack::DEFAULT_ENDPOINT)]
    pub mediastack_url: String,

    /// Per-provider timeout in seconds
    #[arg(long, env = "BRAND_WATCH_TIMEOUT_SECS", default_value_t = 8, value_parser = clap::value_parser!(u64).range(1..=60))]
    pub timeout_secs: u64,

    /// Optional path to a YAML brand catalog replacing the built-in one
    #[arg(short, long, env = "BRAND_WATCH_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Print the known brands and their models, then exit
    #[arg(long)]
    pub list_brands: bool,
}
