//! Rendering of a [`ResultSet`](crate::models::ResultSet) for the operator.
//!
//! # Submodules
//!
//! - [`table`]: Fixed-width text table, one row per article
//! - [`json`]: Pretty-printed JSON document for scripting
//!
//! Both write to stdout only; nothing is persisted between runs.

pub mod json;
pub mod table;

use clap::ValueEnum;

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}
