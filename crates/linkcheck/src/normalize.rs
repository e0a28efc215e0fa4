//! Link normalization and parsing.

use url::Url;

const HTTP_PREFIX: &str = "http://";
const HTTPS_PREFIX: &str = "https://";

/// Trims `raw` and prepends `https://` when it has no http(s) scheme.
///
/// Empty (or all-whitespace) input yields an empty string.
///
/// # Examples
///
/// - `normalize("  coursera.org/learn/rust ")` → `"https://coursera.org/learn/rust"`
/// - `normalize("http://example.com")` → `"http://example.com"`
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    if trimmed.starts_with(HTTP_PREFIX) || trimmed.starts_with(HTTPS_PREFIX) {
        trimmed.to_string()
    } else {
        format!("{HTTPS_PREFIX}{trimmed}")
    }
}

/// Parses `url` as an absolute URL; `None` when it is malformed.
pub fn parse(url: &str) -> Option<Url> {
    match Url::parse(url) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            tracing::debug!("rejecting malformed link {:?}: {}", url, err);
            None
        }
    }
}

pub fn is_well_formed(url: &str) -> bool {
    parse(url).is_some()
}

/// Normalizes then parses `raw`.
pub(crate) fn parse_normalized(raw: &str) -> Option<(String, Url)> {
    let fixed = normalize(raw);
    if fixed.is_empty() {
        return None;
    }
    let parsed = parse(&fixed)?;
    Some((fixed, parsed))
}
