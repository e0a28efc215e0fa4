//! # Linkcheck Crate
//!
//! Validation and normalization of resource links returned by the model.
//!
//! ## Components
//!
//! ### Normalization
//! - `normalize`: trim and add a missing `https://` scheme
//! - `parse` / `is_well_formed`: URL parsing that reports failure as `None`
//!
//! ### YouTube
//! - `is_youtube_channel`: accepts `/@handle` and `/channel/<id>` links only
//! - `canonicalize_youtube`: rewrites channel links to a stable form
//!
//! ### Trusted platforms
//! - `resolve_platform`: link → `TrustedPlatform`, or a `LinkError` saying why not
//! - `is_trusted_platform_url`: boolean form, after normalization
//!
//! ### Batch validation
//! - `validate_and_fix` / `validate_urls`: accept-or-repair per `UrlKind`
//!
//! Nothing in this crate panics or performs network I/O.

mod normalize;
mod trusted;
mod validate;
mod youtube;

pub use normalize::{is_well_formed, normalize, parse};
pub use trusted::{LinkError, is_trusted_platform_url, resolve_platform};
pub use validate::{UrlCheck, UrlKind, validate_and_fix, validate_urls};
pub use youtube::{canonicalize_youtube, is_youtube_channel};
