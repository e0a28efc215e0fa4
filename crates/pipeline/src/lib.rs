//! Pipeline for scoring, filtering and ranking learning resources.
//!
//! This crate provides:
//! - ResourceScorer for computing trust/relevance scores
//! - Filter trait and implementations for dropping resources
//! - FilterPipeline for composing filters
//! - ResourceRanker tying the three together
//! - A preference sort for AI tool recommendations
//!
//! ## Architecture
//! Resources are processed in stages:
//! 1. ResourceScorer assigns each resource a score in [0, 1]
//! 2. Filters remove unwanted resources (below the quality floor, wrong
//!    language, duplicates)
//! 3. The survivors are stably sorted by descending score
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{ResourceRanker, ResourceScorer};
//! use pipeline::filters::*;
//!
//! let scorer = ResourceScorer::new(platforms.clone(), config.scoring);
//! let ranker = ResourceRanker::new(scorer)
//!     .with_filter(DuplicateLinkFilter);
//!
//! let ranked = ranker.filter_and_sort(resources);
//! ```

pub mod filter_pipeline;
pub mod filters;
pub mod preference;
pub mod ranker;
pub mod scorer;
pub mod traits;

// Re-export main types
pub use filter_pipeline::FilterPipeline;
pub use preference::{compare_preference, contains_arabic, sort_by_preference};
pub use ranker::ResourceRanker;
pub use scorer::{ResourceScorer, ScoreBreakdown};
pub use traits::{Filter, Preferable};
