//! Planner crate for learnpath.
//!
//! This crate turns model output into ranked results:
//! - `ResponseSource` supplies raw model text (a hosted API client, or
//!   `StaticSource` for fixed responses)
//! - `ResponseCache` keeps recent responses for a TTL
//! - `PlanOrchestrator` parses, validates and ranks plans and tool lists
//! - `PlanStore` persists saved plans per user

pub mod cache;
pub mod orchestrator;
pub mod source;
pub mod store;

pub use cache::ResponseCache;
pub use orchestrator::{PlanOrchestrator, RequestError};
pub use source::{GenerationRequest, RequestKind, ResponseSource, SourceError, StaticSource};
pub use store::{PlanStore, SaveOutcome, StoreError};
