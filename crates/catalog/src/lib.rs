//! # Catalog Crate
//!
//! Domain model for the learning assistant: resources, trusted platforms,
//! AI tools and learning plans, plus the code that builds them from model
//! output and configuration.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (ResourceMetadata, AiTool, LearningPlan, ...)
//! - **platforms**: The immutable trusted-platform table
//! - **config**: TOML ranking configuration (weights, platforms, cache TTL)
//! - **parser**: Tolerant parsing of model responses
//! - **error**: Error types for parsing and configuration
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{config, parser};
//!
//! let cfg = config::load_or_default(None)?;
//! let table = cfg.platform_table()?;
//!
//! let text = parser::unwrap_envelope(&body)?;
//! let plan = parser::parse_plan(&text, chrono::Utc::now())?;
//! println!("{} resources for {}", plan.resource_count(), plan.topic);
//! ```

// Public modules
pub mod config;
pub mod error;
pub mod parser;
pub mod platforms;
pub mod types;

// Re-export commonly used types for convenience
pub use config::{RankingConfig, ScoringWeights};
pub use error::{ApiErrorKind, ConfigError, ParseError, Result};
pub use platforms::{PlatformTable, TrustedPlatform};
pub use types::{
    // Resources
    Resource,
    ResourceMetadata,
    ScoredResource,
    // Tools
    AiTool,
    // Plans
    LearningPath,
    LearningPlan,
    LearningResource,
    PlanPaths,
    // Enums
    Access,
    Language,
    Level,
    Pricing,
    ResourceKind,
};
