// src/error.rs
// =============================================================================
// Errors raised while setting a crawl up.
//
// Once a crawl is running nothing is raised to the caller: failed pages are
// logged and recorded with no links. These errors only cover building the
// pieces (headers, HTTP client) before the first request goes out.
// =============================================================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid header name '{0}'")]
    InvalidHeaderName(String),
    #[error("Invalid value for header '{0}'")]
    InvalidHeaderValue(String),
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
