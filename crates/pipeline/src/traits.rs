//! Core traits for the ranking pipeline.
//!
//! `Filter` lets scored resources pass through composable, extensible
//! stages. `Preferable` is the view of an item that the preference sort
//! needs.

use catalog::{AiTool, Pricing, ScoredResource};

/// Core trait for filtering scored resources.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - `Send + Sync` allows a ranker to be shared across threads
/// - Filters take ownership of the Vec and return the survivors, so no
///   cloning is needed
/// - Filters cannot fail: anything they dislike is simply dropped
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter, returning the resources that survive in their
    /// original relative order.
    fn apply(&self, resources: Vec<ScoredResource>) -> Vec<ScoredResource>;
}

/// The signals `sort_by_preference` orders by.
pub trait Preferable {
    fn recommended(&self) -> bool;
    fn rating(&self) -> Option<f64>;
    fn arabic_support(&self) -> bool;
    fn popularity(&self) -> f64;
    fn pricing(&self) -> Pricing;
}

impl Preferable for AiTool {
    fn recommended(&self) -> bool {
        self.recommended
    }

    fn rating(&self) -> Option<f64> {
        self.rating
    }

    fn arabic_support(&self) -> bool {
        self.arabic_support
    }

    fn popularity(&self) -> f64 {
        self.popularity
    }

    fn pricing(&self) -> Pricing {
        self.pricing
    }
}
