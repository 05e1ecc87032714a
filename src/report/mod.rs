// src/report/mod.rs
// =============================================================================
// Presenting crawl results.
//
// - Reporter: receives each page as soon as it has been crawled
// - console: prints pages and whole crawl maps, as text or JSON
// =============================================================================

mod console;

pub use console::{format_single_element, print_crawl_map, print_json, ConsoleReporter};

/// Receives every crawled page and its links, as soon as the page is done.
///
/// Called from the worker that processed the page, so it should be quick.
pub trait Reporter: Send + Sync {
    fn report(&self, parent: &str, links: &[String]);
}
