//! Filter implementations for the ranking pipeline.
//!
//! This module contains all the concrete filter implementations
//! that can be composed into a FilterPipeline.

pub mod duplicate_link;
pub mod language;
pub mod minimum_score;

// Re-export for convenience
pub use duplicate_link::DuplicateLinkFilter;
pub use language::LanguageFilter;
pub use minimum_score::MinimumScoreFilter;
