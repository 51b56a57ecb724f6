//! Brand catalog: the known brands and the model names/aliases of each.
//!
//! The catalog drives both the choices offered to the operator and model
//! tagging. It is built once at start-up (either the built-in table or a
//! YAML file) and then only read.
//!
//! # YAML format
//!
//! ```yaml
//! brands:
//!   - name: Tesla
//!     models: [Model 3, Model Y, Model S, Model X]
//!   - name: Volvo
//!     models: [XC40, XC60]
//! ```

use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;
use tracing::{info, instrument};

/// Languages suggested to the operator by `--list-brands`. `all` means no restriction.
///
/// This is a shortlist, not a whitelist: any code accepted by
/// [`LanguageFilter`](crate::query::LanguageFilter) is passed on to the providers.
pub const LANGUAGES: &[&str] = &["all", "fr", "en", "de", "es", "it", "pt", "nl"];

const BUILTIN_BRANDS: &[(&str, &[&str])] = &[
    (
        "DS Automobiles",
        &["DS3", "DS4", "DS7", "DS9", "Jules Verne", "N°4", "Numero 4", "N4"],
    ),
    ("Volvo", &["XC40", "XC60", "EX30", "EX90"]),
    ("BMW", &["iX", "X1", "X3", "X5"]),
    ("Audi", &["Q3", "Q5", "Q7", "A3", "A4"]),
    ("Mercedes-Benz", &["EQB", "GLA", "GLC", "Classe A"]),
    ("Peugeot", &["2008", "3008", "508"]),
    ("Renault", &["Austral", "Megane E-Tech", "Scenic", "Captur"]),
    ("Citroën", &["C3", "C4", "C5", "Ami"]),
    ("Lexus", &["UX", "NX", "RX"]),
    ("Jaguar", &["E-PACE", "F-PACE", "I-PACE"]),
    ("Tesla", &["Model 3", "Model Y", "Model S", "Model X"]),
];

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid catalog YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("brand {0:?} is listed more than once")]
    DuplicateBrand(String),
    #[error("catalog contains a brand with an empty name")]
    EmptyBrandName,
}

/// One brand and its ordered model aliases.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Brand {
    pub name: String,
    #[serde(default)]
    pub models: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    brands: Vec<Brand>,
}

/// Immutable brand → model-alias mapping, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandCatalog {
    brands: Vec<Brand>,
}

impl BrandCatalog {
    /// Build a catalog from a list of brands, rejecting duplicate or empty names.
    pub fn new(brands: Vec<Brand>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for brand in &brands {
            if brand.name.trim().is_empty() {
                return Err(CatalogError::EmptyBrandName);
            }
            if !seen.insert(brand.name.as_str()) {
                return Err(CatalogError::DuplicateBrand(brand.name.clone()));
            }
        }
        Ok(Self { brands })
    }

    /// Parse a catalog from YAML text.
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_yaml::from_str(yaml)?;
        Self::new(file.brands)
    }

    /// Load a catalog from a YAML file on disk.
    #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let yaml = tokio::fs::read_to_string(path.as_ref()).await?;
        let catalog = Self::from_yaml(&yaml)?;
        info!(brands = catalog.brands.len(), "Loaded brand catalog");
        Ok(catalog)
    }

    /// Brand names in display order.
    pub fn brands(&self) -> impl Iterator<Item = &str> {
        self.brands.iter().map(|b| b.name.as_str())
    }

    pub fn contains(&self, brand: &str) -> bool {
        self.brands.iter().any(|b| b.name == brand)
    }

    /// Model aliases for `brand`, in match-priority order. Unknown brands have none.
    pub fn models(&self, brand: &str) -> &[String] {
        self.brands
            .iter()
            .find(|b| b.name == brand)
            .map(|b| b.models.as_slice())
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.brands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.brands.is_empty()
    }
}

impl Default for BrandCatalog {
    fn default() -> Self {
        let brands = BUILTIN_BRANDS
            .iter()
            .map(|(name, models)| Brand {
                name: (*name).to_string(),
                models: models.iter().map(|m| (*m).to_string()).collect(),
            })
            .collect();
        Self { brands }
    }
}
