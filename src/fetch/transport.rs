// src/fetch/transport.rs
// =============================================================================
// This module fetches pages over HTTP.
//
// Key functionality:
// - One reqwest Client per crawl (connection pooling, shared headers)
// - GET the page, treat any non-2xx status as a failure
// - Decode the body as UTF-8 text, reporting undecodable bodies separately
//   so the crawler can skip them instead of retrying
//
// Rust concepts:
// - Traits: `Transport` is the seam between the crawler and the network
// - async-trait: lets a trait object expose an async method
// =============================================================================

use super::FetchError;
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use std::collections::BTreeMap;
use std::time::Duration;

/// Fetches the text of a page.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn fetch(&self, url: &str) -> std::result::Result<String, FetchError>;
}

/// The default transport, backed by reqwest.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    // Builds the client once; every request of the crawl carries `headers`
    //
    // Returns an error if a header name or value cannot go on the wire
    pub fn new(headers: &BTreeMap<String, String>) -> Result<Self> {
        let mut header_map = HeaderMap::new();
        for (name, value) in headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| Error::InvalidHeaderName(name.clone()))?;
            let header_value =
                HeaderValue::from_str(value).map_err(|_| Error::InvalidHeaderValue(name.clone()))?;
            header_map.insert(header_name, header_value);
        }

        let client = Client::builder()
            .default_headers(header_map)
            .timeout(Duration::from_secs(30))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, url: &str) -> std::result::Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(describe_error(&e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Transport(format!("HTTP {}", status.as_u16())));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Transport(describe_error(&e)))?;

        String::from_utf8(body.to_vec()).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

// Turns a reqwest error into a short, readable reason
fn describe_error(error: &reqwest::Error) -> String {
    let error_string = error.to_string();

    if error.is_timeout() {
        "Request timed out".to_string()
    } else if error.is_redirect() {
        "Too many redirects".to_string()
    } else if error.is_connect() {
        if error_string.contains("dns") {
            "Could not resolve hostname".to_string()
        } else {
            "Connection failed".to_string()
        }
    } else if error_string.contains("certificate") || error_string.contains("ssl") {
        "SSL certificate error".to_string()
    } else {
        error_string
    }
}
