//! Optional filter restricting results to one language.

use crate::traits::Filter;
use catalog::{Language, ScoredResource};

/// Keeps only resources in the requested language.
pub struct LanguageFilter {
    language: Language,
}

impl LanguageFilter {
    pub fn new(language: Language) -> Self {
        Self { language }
    }
}

impl Filter for LanguageFilter {
    fn name(&self) -> &str {
        "LanguageFilter"
    }

    fn apply(&self, resources: Vec<ScoredResource>) -> Vec<ScoredResource> {
        resources
            .into_iter()
            .filter(|resource| resource.metadata.language == self.language)
            .collect()
    }
}
