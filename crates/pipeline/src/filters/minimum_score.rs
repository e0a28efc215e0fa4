//! Filter to enforce the quality floor.
//!
//! Low-trust and unmatched links never surface: anything scoring at or
//! below the threshold is dropped.

use crate::traits::Filter;
use catalog::ScoredResource;

/// Removes resources whose score is not strictly above `threshold`.
pub struct MinimumScoreFilter {
    threshold: f64,
}

impl MinimumScoreFilter {
    /// Create a new MinimumScoreFilter.
    ///
    /// # Arguments
    /// * `threshold` - Exclusive lower bound on the score (typically 0.5)
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl Filter for MinimumScoreFilter {
    fn name(&self) -> &str {
        "MinimumScoreFilter"
    }

    fn apply(&self, resources: Vec<ScoredResource>) -> Vec<ScoredResource> {
        resources
            .into_iter()
            .filter(|resource| {
                let keep = resource.score > self.threshold;
                if !keep {
                    tracing::debug!(
                        "dropping {} (score {:.2} <= {:.2})",
                        resource.url,
                        resource.score,
                        self.threshold
                    );
                }
                keep
            })
            .collect()
    }
}
