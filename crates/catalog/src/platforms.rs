//! The trusted-platform table.
//!
//! A `PlatformTable` is built once (from defaults or from configuration),
//! validated, and then shared read-only behind an `Arc`. Nothing mutates it
//! at runtime.

use crate::error::ConfigError;
use crate::types::ResourceKind;
use serde::{Deserialize, Serialize};

/// An allow-listed learning platform and its prior credibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustedPlatform {
    /// Matched as a substring of the link's host (e.g. "coursera.org")
    pub domain_suffix: String,
    pub display_name: String,
    pub kind: ResourceKind,
    /// Starting score for any resource hosted here, in [0, 1]
    pub base_weight: f64,
}

impl TrustedPlatform {
    pub fn new(
        domain_suffix: impl Into<String>,
        display_name: impl Into<String>,
        kind: ResourceKind,
        base_weight: f64,
    ) -> Self {
        Self {
            domain_suffix: domain_suffix.into(),
            display_name: display_name.into(),
            kind,
            base_weight,
        }
    }

    /// True when this platform serves `host`.
    pub fn matches_host(&self, host: &str) -> bool {
        host.contains(self.domain_suffix.as_str())
    }
}

/// Ordered, immutable lookup table of trusted platforms.
///
/// Lookups scan in table order and return the first match, so more specific
/// suffixes should be listed before broader ones.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformTable {
    platforms: Vec<TrustedPlatform>,
}

impl PlatformTable {
    /// Build a table, rejecting empty suffixes and weights outside [0, 1].
    pub fn new(platforms: Vec<TrustedPlatform>) -> Result<Self, ConfigError> {
        for platform in &platforms {
            if platform.domain_suffix.trim().is_empty() {
                return Err(ConfigError::EmptyDomain(platform.display_name.clone()));
            }
            if !(0.0..=1.0).contains(&platform.base_weight) {
                return Err(ConfigError::OutOfRange {
                    field: format!("platforms.{}.base_weight", platform.domain_suffix),
                    value: platform.base_weight,
                    min: 0.0,
                    max: 1.0,
                });
            }
        }
        Ok(Self { platforms })
    }

    /// The built-in allow-list.
    pub fn builtin() -> Self {
        Self {
            platforms: default_platforms(),
        }
    }

    /// Find the platform serving `host`, if any.
    pub fn find_for_host(&self, host: &str) -> Option<&TrustedPlatform> {
        self.platforms.iter().find(|p| p.matches_host(host))
    }

    pub fn contains_host(&self, host: &str) -> bool {
        self.find_for_host(host).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrustedPlatform> {
        self.platforms.iter()
    }

    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }
}

impl Default for PlatformTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Built-in platforms and their weights.
pub fn default_platforms() -> Vec<TrustedPlatform> {
    vec![
        TrustedPlatform::new("youtube.com", "YouTube", ResourceKind::Video, 0.8),
        TrustedPlatform::new("udemy.com", "Udemy", ResourceKind::Course, 0.9),
        TrustedPlatform::new("coursera.org", "Coursera", ResourceKind::Course, 0.95),
        TrustedPlatform::new("edx.org", "edX", ResourceKind::Course, 0.9),
        TrustedPlatform::new("freecodecamp.org", "freeCodeCamp", ResourceKind::Course, 0.85),
        TrustedPlatform::new("khanacademy.org", "Khan Academy", ResourceKind::Course, 0.8),
        TrustedPlatform::new("w3schools.com", "W3Schools", ResourceKind::Documentation, 0.75),
        TrustedPlatform::new(
            "developer.mozilla.org",
            "MDN Web Docs",
            ResourceKind::Documentation,
            0.95,
        ),
        TrustedPlatform::new("github.com", "GitHub", ResourceKind::Documentation, 0.8),
    ]
}
