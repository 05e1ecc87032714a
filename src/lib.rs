//! Crawl a website and map every page to the links it contains.
//!
//! Starting from a root URL, the crawler follows links on the same domain
//! (optionally up to a maximum depth) with a pool of concurrent workers and
//! returns, for every page it visited, the canonical URLs of the links on
//! that page.
//!
//! # Usage
//!
//! ```rust,ignore
//! use link_mapper::crawl::{CrawlConfig, CrawlOptions, Crawler};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = CrawlConfig::from(CrawlOptions {
//!         max_depth: Some(2),
//!         ..Default::default()
//!     });
//!     let crawler = Crawler::new("https://example.com", config)?;
//!     for (page, links) in crawler.crawl().await {
//!         println!("{page}: {} links", links.len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! - [`urls`]: canonical URLs and the de-duplicating [`urls::UrlSet`]
//! - [`crawl`]: configuration, frontier, visited map and the [`crawl::Crawler`]
//! - [`fetch`]: the HTTP transport and link extraction
//! - [`report`]: real-time reporting and result printing

pub mod crawl;
pub mod error;
pub mod fetch;
pub mod report;
pub mod urls;

pub use error::{Error, Result};
