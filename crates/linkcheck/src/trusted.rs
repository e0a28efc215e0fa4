//! Trusted-platform resolution.

use crate::normalize::{parse, parse_normalized};
use catalog::{PlatformTable, TrustedPlatform};
use thiserror::Error;

/// Why a link could not be attributed to a trusted platform.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinkError {
    #[error("empty link")]
    Empty,

    #[error("malformed link: {0}")]
    Malformed(String),

    #[error("host {0:?} is not a trusted platform")]
    UntrustedHost(String),
}

/// Resolve the platform hosting `url`, without normalizing it first.
///
/// This is the lookup scoring relies on: a malformed link or an unknown host
/// is an `Err`, never a panic.
pub fn resolve_platform<'a>(
    url: &str,
    table: &'a PlatformTable,
) -> Result<&'a TrustedPlatform, LinkError> {
    if url.trim().is_empty() {
        return Err(LinkError::Empty);
    }
    let parsed = parse(url).ok_or_else(|| LinkError::Malformed(url.to_string()))?;
    let host = parsed.host_str().unwrap_or_default();
    table
        .find_for_host(host)
        .ok_or_else(|| LinkError::UntrustedHost(host.to_string()))
}

/// True when `url` (after normalization) is hosted on a trusted platform.
pub fn is_trusted_platform_url(url: &str, table: &PlatformTable) -> bool {
    parse_normalized(url)
        .and_then(|(_, parsed)| parsed.host_str().map(|host| table.contains_host(host)))
        .unwrap_or(false)
}
