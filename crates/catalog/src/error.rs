//! Error types for the catalog crate.
//!
//! Two families of errors live here:
//! - `ParseError` for model output that cannot be turned into a plan
//! - `ConfigError` for ranking configuration that is unreadable or out of range
//!
//! Neither is ever raised by scoring itself; a bad link or a missing
//! metadata field degrades to a zero score further down the pipeline.

use crate::types::Level;
use thiserror::Error;

/// Errors raised while parsing a model response.
///
/// The `#[derive(Error)]` macro from thiserror implements `Display` from the
/// `#[error(...)]` attributes, so each variant carries its own message.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The response text contained no `{ ... }` block at all
    #[error("no JSON object found in model response")]
    NoJsonObject,

    /// The extracted block was not valid JSON for the expected shape
    #[error("invalid JSON in model response: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The response envelope had no candidate text
    #[error("model response carried no candidate text")]
    EmptyResponse,

    /// A required top-level field was absent or empty
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// One of the three plan levels was absent
    #[error("plan is missing the {0} level")]
    MissingLevel(Level),

    /// A level had no `resources` block (or lacked youtube/courses)
    #[error("resources are missing for the {0} level")]
    MissingResources(Level),

    /// The API answered with an error envelope instead of content
    #[error("model API error: {0}")]
    Api(ApiErrorKind),
}

/// Classified API failure statuses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiErrorKind {
    PermissionDenied,
    InvalidArgument,
    ResourceExhausted,
    Other(String),
}

impl ApiErrorKind {
    /// Map the `error.status` string of an API error envelope.
    pub fn from_status(status: &str) -> Self {
        match status {
            "PERMISSION_DENIED" => ApiErrorKind::PermissionDenied,
            "INVALID_ARGUMENT" => ApiErrorKind::InvalidArgument,
            "RESOURCE_EXHAUSTED" => ApiErrorKind::ResourceExhausted,
            other => ApiErrorKind::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiErrorKind::PermissionDenied => write!(f, "permission denied for the model service"),
            ApiErrorKind::InvalidArgument => write!(f, "malformed request"),
            ApiErrorKind::ResourceExhausted => write!(f, "usage quota exhausted"),
            ApiErrorKind::Other(status) => write!(f, "unexpected status {status}"),
        }
    }
}

/// Errors raised while loading or validating ranking configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// I/O error while reading the config file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file was not valid TOML for `RankingConfig`
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    /// A weight or threshold fell outside its allowed range
    #[error("{field} must be within [{min}, {max}], got {value}")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A trusted platform entry had an empty domain suffix
    #[error("trusted platform {0:?} has an empty domain suffix")]
    EmptyDomain(String),
}

/// Convenience type alias for parse results in this crate
pub type Result<T> = std::result::Result<T, ParseError>;
