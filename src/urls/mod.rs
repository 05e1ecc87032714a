// src/urls/mod.rs
// =============================================================================
// URL handling for the crawler.
//
// Submodules:
// - canonical: resolves raw links against their page and builds the
//   canonical form used as the de-duplication key
// - set: a de-duplicating, insertion-ordered collection of those URLs
// =============================================================================

mod canonical;
mod set;

pub use canonical::{remove_consecutive_slashes, Url, UrlInfo, DEFAULT_URL_PATTERN, DEFAULT_URL_REGEX};
pub use set::UrlSet;
