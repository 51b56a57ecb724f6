//! Query parameters for a monitoring run.
//!
//! A [`Query`] is validated against the [`BrandCatalog`] when it is built and
//! is immutable afterwards. It is the only input the pipeline needs besides
//! the catalog and the registered sources.

use crate::catalog::BrandCatalog;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;
use thiserror::Error;

/// Allowed range for the per-source article cap.
pub const RESULT_CAP_RANGE: RangeInclusive<usize> = 5..=30;

/// Default per-source article cap.
pub const DEFAULT_RESULT_CAP: usize = 10;

const WILDCARD: &str = "all";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("unknown brand {0:?}")]
    UnknownBrand(String),
    #[error("model {model:?} is not a known model of {brand:?}")]
    UnknownModel { brand: String, model: String },
    #[error("result cap {0} is outside the allowed range 5..=30")]
    CapOutOfRange(usize),
    #[error("invalid language code {0:?}")]
    InvalidLanguage(String),
}

/// Restriction of the results to one model of the brand.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModelFilter {
    #[default]
    All,
    Only(String),
}

impl ModelFilter {
    pub fn matches(&self, model: &str) -> bool {
        match self {
            ModelFilter::All => true,
            ModelFilter::Only(wanted) => wanted == model,
        }
    }
}

impl FromStr for ModelFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case(WILDCARD) {
            Ok(ModelFilter::All)
        } else {
            Ok(ModelFilter::Only(s.to_string()))
        }
    }
}

impl fmt::Display for ModelFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelFilter::All => f.write_str("ALL"),
            ModelFilter::Only(model) => f.write_str(model),
        }
    }
}

/// Restriction of provider results to one language.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LanguageFilter {
    #[default]
    All,
    Code(String),
}

impl LanguageFilter {
    /// The language code to send to providers, if any.
    pub fn code(&self) -> Option<&str> {
        match self {
            LanguageFilter::All => None,
            LanguageFilter::Code(code) => Some(code.as_str()),
        }
    }
}

/// Accepts `all` (any case, or an empty string) and any 2–3 letter ISO 639
/// code, lowercased. Codes outside [`LANGUAGES`](crate::catalog::LANGUAGES)
/// are allowed; that list only shapes what the operator is offered, while the
/// providers support more languages and reject unknown codes themselves.
impl FromStr for LanguageFilter {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case(WILDCARD) {
            return Ok(LanguageFilter::All);
        }
        let valid = (2..=3).contains(&s.len()) && s.chars().all(|c| c.is_ascii_alphabetic());
        if !valid {
            return Err(QueryError::InvalidLanguage(s.to_string()));
        }
        Ok(LanguageFilter::Code(s.to_ascii_lowercase()))
    }
}

impl fmt::Display for LanguageFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LanguageFilter::All => f.write_str("ALL"),
            LanguageFilter::Code(code) => f.write_str(code),
        }
    }
}

/// One validated monitoring request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    brand: String,
    model_filter: ModelFilter,
    language: LanguageFilter,
    result_cap: usize,
}

impl Query {
    pub fn new(
        catalog: &BrandCatalog,
        brand: impl Into<String>,
        model_filter: ModelFilter,
        language: LanguageFilter,
        result_cap: usize,
    ) -> Result<Self, QueryError> {
        let brand = brand.into();
        if !catalog.contains(&brand) {
            return Err(QueryError::UnknownBrand(brand));
        }
        if let ModelFilter::Only(model) = &model_filter {
            if !catalog.models(&brand).iter().any(|m| m == model) {
                return Err(QueryError::UnknownModel {
                    brand,
                    model: model.clone(),
                });
            }
        }
        if !RESULT_CAP_RANGE.contains(&result_cap) {
            return Err(QueryError::CapOutOfRange(result_cap));
        }
        Ok(Self {
            brand,
            model_filter,
            language,
            result_cap,
        })
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }

    pub fn model_filter(&self) -> &ModelFilter {
        &self.model_filter
    }

    pub fn language(&self) -> &LanguageFilter {
        &self.language
    }

    pub fn result_cap(&self) -> usize {
        self.result_cap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tesla(model: ModelFilter, cap: usize) -> Result<Query, QueryError> {
        Query::new(
            &BrandCatalog::default(),
            "Tesla",
            model,
            LanguageFilter::All,
            cap,
        )
    }

    #[test]
    fn test_valid_query() {
        let query = tesla(ModelFilter::Only("Model Y".into()), 10).unwrap();
        assert_eq!(query.brand(), "Tesla");
        assert_eq!(query.result_cap(), 10);
        assert_eq!(query.model_filter(), &ModelFilter::Only("Model Y".into()));
        assert_eq!(query.language().code(), None);
    }

    #[test]
    fn test_unknown_brand() {
        let err = Query::new(
            &BrandCatalog::default(),
            "Skoda",
            ModelFilter::All,
            LanguageFilter::All,
            10,
        )
        .unwrap_err();
        assert_eq!(err, QueryError::UnknownBrand("Skoda".into()));
    }

    #[test]
    fn test_model_must_belong_to_brand() {
        let err = tesla(ModelFilter::Only("XC40".into()), 10).unwrap_err();
        assert_eq!(
            err,
            QueryError::UnknownModel {
                brand: "Tesla".into(),
                model: "XC40".into()
            }
        );
    }

    #[test]
    fn test_cap_bounds() {
        assert!(tesla(ModelFilter::All, 5).is_ok());
        assert!(tesla(ModelFilter::All, 30).is_ok());
        assert_eq!(tesla(ModelFilter::All, 4), Err(QueryError::CapOutOfRange(4)));
        assert_eq!(tesla(ModelFilter::All, 31), Err(QueryError::CapOutOfRange(31)));
    }

    #[test]
    fn test_model_filter_parsing() {
        assert_eq!("ALL".parse::<ModelFilter>(), Ok(ModelFilter::All));
        assert_eq!("all".parse::<ModelFilter>(), Ok(ModelFilter::All));
        assert_eq!(
            " Model 3 ".parse::<ModelFilter>(),
            Ok(ModelFilter::Only("Model 3".into()))
        );
        assert!(ModelFilter::All.matches("Global"));
        assert!(!ModelFilter::Only("Model 3".into()).matches("Model Y"));
    }

    #[test]
    fn test_language_filter_parsing() {
        assert_eq!("all".parse::<LanguageFilter>(), Ok(LanguageFilter::All));
        assert_eq!("".parse::<LanguageFilter>(), Ok(LanguageFilter::All));
        assert_eq!(
            "FR".parse::<LanguageFilter>(),
            Ok(LanguageFilter::Code("fr".into()))
        );
        assert_eq!(
            "fr,en".parse::<LanguageFilter>(),
            Err(QueryError::InvalidLanguage("fr,en".into()))
        );
        assert_eq!(
            "french".parse::<LanguageFilter>(),
            Err(QueryError::InvalidLanguage("french".into()))
        );
    }

    #[test]
    fn test_language_outside_suggested_list() {
        assert!(!crate::catalog::LANGUAGES.contains(&"sv"));
        assert_eq!(
            " SV ".parse::<LanguageFilter>(),
            Ok(LanguageFilter::Code("sv".into()))
        );
        for suggested in crate::catalog::LANGUAGES {
            assert!(suggested.parse::<LanguageFilter>().is_ok());
        }
    }

    #[test]
    fn test_filter_display() {
        assert_eq!(ModelFilter::All.to_string(), "ALL");
        assert_eq!(LanguageFilter::Code("de".into()).to_string(), "de");
    }
}
