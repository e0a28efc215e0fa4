//! Trust/relevance scoring of resources.
//!
//! This module computes a score in [0, 1] for each resource from its
//! platform's prior weight and its metadata.

use catalog::{
    Language, PlatformTable, Resource, ResourceMetadata, ScoredResource, ScoringWeights,
};
use rayon::prelude::*;
use std::sync::Arc;

/// Per-component view of a score, for explanations.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub platform: String,
    pub base: f64,
    pub language_bonus: f64,
    pub rating_bonus: f64,
    pub topic_bonus: f64,
    /// Sum of the components, clamped to [0, 1]
    pub total: f64,
}

/// Scores resources against an injected platform table.
///
/// ## Performance Note
/// Batches are scored with Rayon. Output order always matches input order,
/// so parallelism never changes ranking results.
#[derive(Debug, Clone)]
pub struct ResourceScorer {
    platforms: Arc<PlatformTable>,
    weights: ScoringWeights,
}

impl ResourceScorer {
    /// Create a new ResourceScorer.
    pub fn new(platforms: Arc<PlatformTable>, weights: ScoringWeights) -> Self {
        Self { platforms, weights }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn platforms(&self) -> &PlatformTable {
        &self.platforms
    }

    /// Score one resource. Malformed or untrusted links score 0.
    pub fn score(&self, url: &str, metadata: &ResourceMetadata) -> f64 {
        self.breakdown(url, metadata)
            .map(|b| b.total)
            .unwrap_or(0.0)
    }

    /// Compute the score components, or `None` when the link does not
    /// resolve to a trusted platform.
    ///
    /// ## Algorithm
    /// 1. base = platform weight
    /// 2. + language bonus for Arabic content
    /// 3. + (rating / scale) * rating weight, rating capped at the scale
    /// 4. + min(topics * step, cap)
    /// 5. clamp to [0, 1]
    pub fn breakdown(&self, url: &str, metadata: &ResourceMetadata) -> Option<ScoreBreakdown> {
        let platform = match linkcheck::resolve_platform(url, &self.platforms) {
            Ok(platform) => platform,
            Err(err) => {
                tracing::debug!("scoring {:?} as 0: {}", url, err);
                return None;
            }
        };

        let w = &self.weights;
        let language_bonus = if metadata.language == Language::Arabic {
            w.language_bonus
        } else {
            0.0
        };
        let rating_bonus = self.rating_bonus(metadata.rating);
        let topic_bonus = (metadata.topics.len() as f64 * w.topic_step).min(w.topic_cap);

        let raw = platform.base_weight + language_bonus + rating_bonus + topic_bonus;
        Some(ScoreBreakdown {
            platform: platform.display_name.clone(),
            base: platform.base_weight,
            language_bonus,
            rating_bonus,
            topic_bonus,
            total: raw.clamp(0.0, 1.0),
        })
    }

    /// Zero for a missing, zero, negative or non-finite rating.
    fn rating_bonus(&self, rating: Option<f64>) -> f64 {
        let w = &self.weights;
        match rating {
            Some(r) if r.is_finite() && r > 0.0 => {
                (r.min(w.rating_scale) / w.rating_scale) * w.rating_weight
            }
            _ => 0.0,
        }
    }

    /// Score a batch in parallel, preserving order.
    pub fn score_all(&self, resources: Vec<Resource>) -> Vec<ScoredResource> {
        resources
            .into_par_iter()
            .map(|resource| {
                let score = self.score(&resource.url, &resource.metadata);
                ScoredResource {
                    url: resource.url,
                    metadata: resource.metadata,
                    score,
                }
            })
            .collect()
    }
}

impl Default for ResourceScorer {
    fn default() -> Self {
        Self::new(Arc::new(PlatformTable::builtin()), ScoringWeights::default())
    }
}
