//! Core domain types for learning resources, AI tools and learning plans.
//!
//! Everything here is plain data: values are produced by the parser (from
//! model output) or by callers, then handed to the validator and ranker.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Resource Metadata
// =============================================================================

/// Broad category of a learning resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Video,
    Course,
    Article,
    Documentation,
}

/// Difficulty level. Also names the three paths of a learning plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    /// All levels in plan order.
    pub const ALL: [Level; 3] = [Level::Beginner, Level::Intermediate, Level::Advanced];

    /// The lowercase key used in model output and config files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Beginner => "beginner",
            Level::Intermediate => "intermediate",
            Level::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content language. Arabic content earns a ranking bonus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Arabic,
    English,
}

/// Descriptive metadata of a single resource.
///
/// Immutable once built. `rating` and `topics` are optional signals: a
/// missing rating or an empty topic list simply contributes nothing to the
/// score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceMetadata {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    pub level: Level,
    pub language: Language,
    /// Rating from 1.0 to 5.0, when the source provided one
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub topics: Vec<String>,
}

/// A candidate resource: a link plus what we know about it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub url: String,
    pub metadata: ResourceMetadata,
}

impl Resource {
    pub fn new(url: impl Into<String>, metadata: ResourceMetadata) -> Self {
        Self {
            url: url.into(),
            metadata,
        }
    }
}

/// A resource with its computed score in [0, 1].
///
/// Created per ranking call; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredResource {
    pub url: String,
    pub metadata: ResourceMetadata,
    pub score: f64,
}

// =============================================================================
// AI Tools
// =============================================================================

/// Pricing tier. Declaration order is the preference order (free first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pricing {
    Free,
    Freemium,
    Paid,
}

/// An AI tool recommended for a user query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiTool {
    pub name: String,
    pub description: String,
    pub url: String,
    pub pricing: Pricing,
    pub arabic_support: bool,
    pub rating: Option<f64>,
    pub tags: Vec<String>,
    pub features: Vec<String>,
    /// Editorially recommended tools sort first
    pub recommended: bool,
    /// Relative popularity signal; 0 when unknown
    pub popularity: f64,
}

// =============================================================================
// Learning Plans
// =============================================================================

/// Whether a plan resource costs money.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    Free,
    Paid,
}

/// A resource entry inside a learning plan path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningResource {
    pub title: String,
    /// Course link, or channel link for YouTube entries
    pub url: String,
    pub description: String,
    pub language: Language,
    pub access: Access,
    pub platform: Option<String>,
    pub channel: Option<String>,
    pub year: Option<u16>,
    pub rating: Option<f64>,
    pub topics: Vec<String>,
    pub level: Option<Level>,
    /// Filled in by the ranker
    pub score: Option<f64>,
}

impl LearningResource {
    /// Build ranking metadata for this entry inside a path of `level`.
    pub fn to_metadata(&self, kind: ResourceKind, level: Level) -> ResourceMetadata {
        ResourceMetadata {
            title: self.title.clone(),
            description: self.description.clone(),
            kind,
            level: self.level.unwrap_or(level),
            language: self.language,
            rating: self.rating,
            topics: self.topics.clone(),
        }
    }
}

/// One level of a learning plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningPath {
    pub level: Level,
    pub description: String,
    pub steps: Vec<String>,
    pub youtube: Vec<LearningResource>,
    pub courses: Vec<LearningResource>,
}

/// The three paths of a plan, one per level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanPaths {
    pub beginner: LearningPath,
    pub intermediate: LearningPath,
    pub advanced: LearningPath,
}

impl PlanPaths {
    pub fn get(&self, level: Level) -> &LearningPath {
        match level {
            Level::Beginner => &self.beginner,
            Level::Intermediate => &self.intermediate,
            Level::Advanced => &self.advanced,
        }
    }

    pub fn get_mut(&mut self, level: Level) -> &mut LearningPath {
        match level {
            Level::Beginner => &mut self.beginner,
            Level::Intermediate => &mut self.intermediate,
            Level::Advanced => &mut self.advanced,
        }
    }

    /// Iterate paths in level order.
    pub fn iter(&self) -> impl Iterator<Item = &LearningPath> {
        Level::ALL.into_iter().map(move |level| self.get(level))
    }
}

/// A generated learning plan for a topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningPlan {
    pub id: String,
    pub topic: String,
    pub paths: PlanPaths,
    pub created_at: DateTime<Utc>,
}

impl LearningPlan {
    /// Total number of resources across all levels.
    pub fn resource_count(&self) -> usize {
        self.paths
            .iter()
            .map(|path| path.youtube.len() + path.courses.len())
            .sum()
    }
}
