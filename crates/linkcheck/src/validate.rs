//! Validate-and-fix for batches of links returned by the model.

use crate::normalize::normalize;
use crate::trusted::is_trusted_platform_url;
use crate::youtube::{canonicalize_youtube, is_youtube_channel};
use catalog::PlatformTable;

/// Which acceptance rule applies to a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlKind {
    /// Must be a YouTube channel link
    Youtube,
    /// Must be hosted on a trusted learning platform
    LearningPlatform,
}

/// Outcome of validating one link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlCheck {
    pub is_valid: bool,
    /// The repaired link. Empty for rejected learning-platform links.
    pub fixed_url: String,
}

/// Validate `url` under `kind` and return its repaired form.
///
/// ## Algorithm
/// 1. Empty input is invalid with an empty fixed link
/// 2. Normalize (trim, add scheme)
/// 3. YouTube: valid channel links are canonicalized; invalid ones keep the
///    normalized form
/// 4. Learning platform: valid links keep the normalized form; invalid ones
///    are blanked
pub fn validate_and_fix(url: &str, kind: UrlKind, table: &PlatformTable) -> UrlCheck {
    let fixed = normalize(url);
    if fixed.is_empty() {
        return UrlCheck {
            is_valid: false,
            fixed_url: String::new(),
        };
    }

    match kind {
        UrlKind::Youtube => {
            let is_valid = is_youtube_channel(&fixed);
            UrlCheck {
                is_valid,
                fixed_url: if is_valid { canonicalize_youtube(&fixed) } else { fixed },
            }
        }
        UrlKind::LearningPlatform => {
            let is_valid = is_trusted_platform_url(&fixed, table);
            UrlCheck {
                is_valid,
                fixed_url: if is_valid { fixed } else { String::new() },
            }
        }
    }
}

/// Validate a batch of links, in input order.
pub fn validate_urls<S: AsRef<str>>(
    urls: &[S],
    kind: UrlKind,
    table: &PlatformTable,
) -> Vec<UrlCheck> {
    let results: Vec<UrlCheck> = urls
        .iter()
        .map(|url| validate_and_fix(url.as_ref(), kind, table))
        .collect();

    let invalid = results.iter().filter(|r| !r.is_valid).count();
    if invalid > 0 {
        tracing::warn!("found {} invalid links out of {} ({:?})", invalid, results.len(), kind);
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_youtube_validation() {
        let table = PlatformTable::builtin();

        let ok = validate_and_fix(" youtu.be/channel/XYZ?x=1 ", UrlKind::Youtube, &table);
        assert!(ok.is_valid);
        assert_eq!(ok.fixed_url, "https://www.youtube.com/channel/XYZ");

        let video = validate_and_fix("https://www.youtube.com/watch?v=1", UrlKind::Youtube, &table);
        assert!(!video.is_valid);
        assert_eq!(video.fixed_url, "https://www.youtube.com/watch?v=1");
    }

    #[test]
    fn test_learning_platform_validation() {
        let table = PlatformTable::builtin();

        let ok = validate_and_fix("edx.org/learn/python", UrlKind::LearningPlatform, &table);
        assert!(ok.is_valid);
        assert_eq!(ok.fixed_url, "https://edx.org/learn/python");

        let bad = validate_and_fix("https://example.com/course", UrlKind::LearningPlatform, &table);
        assert!(!bad.is_valid);
        assert!(bad.fixed_url.is_empty());
    }

    #[test]
    fn test_empty_link_is_invalid() {
        let table = PlatformTable::builtin();
        let check = validate_and_fix("", UrlKind::Youtube, &table);
        assert_eq!(
            check,
            UrlCheck {
                is_valid: false,
                fixed_url: String::new()
            }
        );
    }

    #[test]
    fn test_batch_preserves_order() {
        let table = PlatformTable::builtin();
        let urls = ["https://www.coursera.org/learn/ml", "https://example.com", "udemy.com/x"];
        let results = validate_urls(&urls, UrlKind::LearningPlatform, &table);

        let valid: Vec<bool> = results.iter().map(|r| r.is_valid).collect();
        assert_eq!(valid, vec![true, false, true]);
    }
}
