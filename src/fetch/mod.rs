// src/fetch/mod.rs
// =============================================================================
// Everything the crawler needs from the outside world for one page:
//
// - transport: fetching a page's text over HTTP
// - extract: pulling candidate links out of that text
//
// The crawler only talks to the `Transport` trait, so tests can serve a
// fixture site from memory instead of the network.
// =============================================================================

mod extract;
mod transport;

pub use extract::{extract_hrefs, find_url_matches};
pub use transport::{HttpTransport, Transport};

use thiserror::Error;

/// Why a page could not be fetched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Network or HTTP level failure: refused, timed out, DNS, non-2xx...
    #[error("transport error: {0}")]
    Transport(String),
    /// The body arrived but is not readable text
    #[error("decode error: {0}")]
    Decode(String),
}

impl FetchError {
    /// Only transport failures are worth another attempt; an undecodable
    /// body will not become decodable by asking again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, FetchError::Transport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable() {
        assert!(FetchError::Transport("HTTP 503".to_string()).is_retryable());
        assert!(!FetchError::Decode("invalid utf-8".to_string()).is_retryable());
    }
}
