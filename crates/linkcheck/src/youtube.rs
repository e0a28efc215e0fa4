//! YouTube channel links.
//!
//! Only channel-level links are accepted (`/@handle` or `/channel/<id>`);
//! links to single videos are not.

use crate::normalize::parse_normalized;
use url::Url;

const YOUTUBE_HOSTS: [&str; 2] = ["youtube.com", "youtu.be"];
const CANONICAL_ORIGIN: &str = "https://www.youtube.com";

fn is_youtube_host(url: &Url) -> bool {
    url.host_str()
        .is_some_and(|host| YOUTUBE_HOSTS.iter().any(|yt| host.contains(yt)))
}

fn is_channel_path(path: &str) -> bool {
    path.starts_with("/@") || path.starts_with("/channel/")
}

/// True when `url` (after normalization) is a YouTube channel link.
pub fn is_youtube_channel(url: &str) -> bool {
    match parse_normalized(url) {
        Some((_, parsed)) => is_youtube_host(&parsed) && is_channel_path(parsed.path()),
        None => false,
    }
}

/// Rewrites channel links to `https://www.youtube.com<path>`.
///
/// Query and fragment are dropped so the result is a stable dedup key.
/// Other well-formed links come back normalized; unparseable input is
/// returned unchanged.
///
/// # Examples
///
/// - `canonicalize_youtube("https://youtu.be/channel/XYZ?x=1")`
///   → `"https://www.youtube.com/channel/XYZ"`
/// - `canonicalize_youtube("youtube.com/@elzero#about")` → `"https://www.youtube.com/@elzero"`
pub fn canonicalize_youtube(url: &str) -> String {
    match parse_normalized(url) {
        Some((_, parsed)) if is_youtube_host(&parsed) && is_channel_path(parsed.path()) => {
            format!("{CANONICAL_ORIGIN}{}", parsed.path())
        }
        Some((fixed, _)) => fixed,
        None => url.to_string(),
    }
}
