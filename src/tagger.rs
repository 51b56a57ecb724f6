//! Model detection from article titles.
//!
//! Matching is a case-insensitive substring test against the brand's model
//! aliases, in catalog order; the first alias found wins. There is no word
//! boundary check, so short aliases (e.g. `N4`, `UX`) can match inside longer
//! unrelated words. Callers wanting stricter matching should order or choose
//! aliases accordingly.

use crate::catalog::BrandCatalog;
use crate::models::GLOBAL_MODEL;

/// Tags articles with the model they mention, using one brand catalog.
#[derive(Debug, Clone, Copy)]
pub struct ModelTagger<'a> {
    catalog: &'a BrandCatalog,
}

impl<'a> ModelTagger<'a> {
    pub fn new(catalog: &'a BrandCatalog) -> Self {
        Self { catalog }
    }

    /// Return the first alias of `brand` contained in `title`, or [`GLOBAL_MODEL`].
    pub fn detect_model(&self, title: &str, brand: &str) -> &'a str {
        let title = title.to_lowercase();
        self.catalog
            .models(brand)
            .iter()
            .find(|alias| title.contains(&alias.to_lowercase()))
            .map(String::as_str)
            .unwrap_or(GLOBAL_MODEL)
    }
}
