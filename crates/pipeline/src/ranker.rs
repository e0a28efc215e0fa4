//! Ranking: score, filter, then order.

use crate::filter_pipeline::FilterPipeline;
use crate::filters::MinimumScoreFilter;
use crate::scorer::ResourceScorer;
use crate::traits::Filter;
use catalog::{Resource, ScoredResource};

/// Produces the filtered, ordered view of a batch of resources.
///
/// The quality floor (`MinimumScoreFilter` at the configured `min_score`)
/// is always the first stage; extra filters run after it in the order they
/// were added.
pub struct ResourceRanker {
    scorer: ResourceScorer,
    pipeline: FilterPipeline,
}

impl ResourceRanker {
    pub fn new(scorer: ResourceScorer) -> Self {
        let floor = MinimumScoreFilter::new(scorer.weights().min_score);
        Self {
            scorer,
            pipeline: FilterPipeline::new().add_filter(floor),
        }
    }

    /// Append a filter stage (builder pattern).
    pub fn with_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.pipeline = self.pipeline.add_filter(filter);
        self
    }

    pub fn scorer(&self) -> &ResourceScorer {
        &self.scorer
    }

    pub fn pipeline(&self) -> &FilterPipeline {
        &self.pipeline
    }

    /// Score every resource, drop those at or below the floor, and sort the
    /// rest by descending score.
    ///
    /// The sort is stable: equal scores keep their input order. A NaN score
    /// left by a custom filter sorts last.
    pub fn filter_and_sort(&self, resources: Vec<Resource>) -> Vec<ScoredResource> {
        let scored = self.scorer.score_all(resources);
        let mut kept = self.pipeline.apply(scored);
        kept.sort_by(|a, b| sort_key(b.score).total_cmp(&sort_key(a.score)));
        kept
    }

    /// `filter_and_sort`, truncated to the best `limit` entries.
    pub fn top(&self, resources: Vec<Resource>, limit: usize) -> Vec<ScoredResource> {
        let mut ranked = self.filter_and_sort(resources);
        ranked.truncate(limit);
        ranked
    }
}

fn sort_key(score: f64) -> f64 {
    if score.is_nan() {
        f64::NEG_INFINITY
    } else {
        score
    }
}

impl Default for ResourceRanker {
    fn default() -> Self {
        Self::new(ResourceScorer::default())
    }
}
