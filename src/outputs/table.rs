//! Plain-text table output.
//!
//! Columns follow the dashboard layout: date, title, model, summary, source
//! and link. Long cells are shortened by character count so multi-byte
//! titles keep the columns aligned; links are never shortened.

use crate::catalog::BrandCatalog;
use crate::models::{Article, ResultSet, SourceStatus};
use crate::utils::{ellipsize, pad_right};
use itertools::Itertools;
use std::fmt::Write;

/// Shown in place of the table when a run found nothing.
pub const EMPTY_MESSAGE: &str = "No articles found.";

const UNDATED: &str = "-";
const COLUMN_GAP: &str = "  ";

/// (header, width) per column; the link column is unbounded.
const COLUMNS: [(&str, Option<usize>); 6] = [
    ("Date", Some(16)),
    ("Title", Some(60)),
    ("Model", Some(14)),
    ("Summary", Some(50)),
    ("Source", Some(16)),
    ("Link", None),
];

fn row(cells: [String; 6]) -> String {
    cells
        .iter()
        .zip(COLUMNS)
        .map(|(cell, (_, width))| match width {
            Some(width) => pad_right(&ellipsize(cell, width), width),
            None => cell.clone(),
        })
        .join(COLUMN_GAP)
        .trim_end()
        .to_string()
}

fn article_cells(article: &Article) -> [String; 6] {
    let date = article
        .published
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| UNDATED.to_string());
    [
        date,
        article.title.clone(),
        article.model.clone(),
        article.summary.clone(),
        article.source_name.clone(),
        article.url.clone(),
    ]
}

/// One-line summary of what each source contributed.
pub fn render_sources(result: &ResultSet) -> String {
    let parts = result
        .sources
        .iter()
        .map(|report| match &report.status {
            SourceStatus::Fetched { count } => format!("{}: {count} fetched", report.source),
            SourceStatus::Failed { reason } => format!("{}: failed ({reason})", report.source),
        })
        .join(", ");
    format!("Sources: {parts}")
}

/// Render a result set as a text table followed by the source summary.
pub fn render_table(result: &ResultSet) -> String {
    let mut out = String::new();
    if result.is_empty() {
        writeln!(out, "{EMPTY_MESSAGE}").unwrap();
    } else {
        let header = COLUMNS.map(|(name, _)| name.to_string());
        let rule = COLUMNS.map(|(name, width)| "-".repeat(width.unwrap_or(name.len())));
        writeln!(out, "{}", row(header)).unwrap();
        writeln!(out, "{}", row(rule)).unwrap();
        for article in result.iter() {
            writeln!(out, "{}", row(article_cells(article))).unwrap();
        }
        writeln!(out).unwrap();
        writeln!(out, "{} article(s) for {}", result.len(), result.brand).unwrap();
    }
    if !result.sources.is_empty() {
        writeln!(out, "{}", render_sources(result)).unwrap();
    }
    out
}

/// List every brand with its models, one brand per line.
pub fn render_catalog(catalog: &BrandCatalog) -> String {
    let mut out = String::new();
    for brand in catalog.brands() {
        let models = catalog.models(brand);
        if models.is_empty() {
            writeln!(out, "{brand}").unwrap();
        } else {
            writeln!(out, "{brand}: {}", models.iter().join(", ")).unwrap();
        }
    }
    out
}
