use crate::error::ConfigError;
use crate::platforms::{PlatformTable, TrustedPlatform, default_platforms};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Scoring weights and the quality floor (optional `[scoring]` section).
///
/// These are tuning values, not invariants; the defaults reproduce the
/// ranking the product shipped with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Bonus for Arabic-language content.
    pub language_bonus: f64,
    /// Maximum contribution of the rating.
    pub rating_weight: f64,
    /// Top of the rating scale (ratings are divided by this).
    pub rating_scale: f64,
    /// Bonus per covered topic.
    pub topic_step: f64,
    /// Cap on the total topic bonus.
    pub topic_cap: f64,
    /// Resources scoring at or below this are dropped.
    pub min_score: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            language_bonus: 0.10,
            rating_weight: 0.20,
            rating_scale: 5.0,
            topic_step: 0.05,
            topic_cap: 0.20,
            min_score: 0.5,
        }
    }
}

impl ScoringWeights {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("scoring.language_bonus", self.language_bonus, 0.0, 1.0)?;
        check_range("scoring.rating_weight", self.rating_weight, 0.0, 1.0)?;
        check_range("scoring.rating_scale", self.rating_scale, f64::MIN_POSITIVE, 100.0)?;
        check_range("scoring.topic_step", self.topic_step, 0.0, 1.0)?;
        check_range("scoring.topic_cap", self.topic_cap, 0.0, 1.0)?;
        check_range("scoring.min_score", self.min_score, 0.0, 1.0)?;
        Ok(())
    }
}

fn check_range(field: &str, value: f64, min: f64, max: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field: field.to_string(),
            value,
            min,
            max,
        })
    }
}

/// Ranking configuration, usually loaded from `learnpath.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingConfig {
    #[serde(default)]
    pub scoring: ScoringWeights,
    /// Trusted platforms in lookup order; the built-in list when omitted.
    #[serde(default = "default_platforms")]
    pub platforms: Vec<TrustedPlatform>,
    /// Lifetime of cached model responses, in seconds.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
}

fn default_cache_ttl_secs() -> u64 {
    300
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            scoring: ScoringWeights::default(),
            platforms: default_platforms(),
            cache_ttl_secs: default_cache_ttl_secs(),
        }
    }
}

impl RankingConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(data: &str) -> Result<Self, ConfigError> {
        let cfg: RankingConfig = toml::from_str(data)?;
        cfg.scoring.validate()?;
        // Builds the table only to surface bad platform entries early.
        PlatformTable::new(cfg.platforms.clone())?;
        Ok(cfg)
    }

    /// Build the immutable platform table described by this config.
    pub fn platform_table(&self) -> Result<PlatformTable, ConfigError> {
        PlatformTable::new(self.platforms.clone())
    }
}

/// Load configuration from `path`.
pub fn load(path: &Path) -> Result<RankingConfig, ConfigError> {
    let data = fs::read_to_string(path)?;
    let cfg = RankingConfig::from_toml_str(&data)?;
    tracing::debug!(
        "loaded ranking config from {} ({} platforms)",
        path.display(),
        cfg.platforms.len()
    );
    Ok(cfg)
}

/// Load configuration from `path` when given, otherwise use the defaults.
pub fn load_or_default(path: Option<&Path>) -> Result<RankingConfig, ConfigError> {
    match path {
        Some(path) => load(path),
        None => Ok(RankingConfig::default()),
    }
}
