// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Concurrent breadth-first crawling from a root URL with a worker pool
// - Same-domain restriction (other sites are never fetched)
// - Optional depth limit
// - Retries with a fixed delay, an optional global request cap and an
//   optional pause after every request
//
// Submodules:
// - config: user options and the clamped settings a crawl runs with
// - queue: the frontier of pages waiting to be fetched
// - visited: the page -> links map and the claim step
// - crawler: the orchestrator tying them together
// =============================================================================

mod config;
mod crawler;
mod queue;
mod visited;

pub use config::{
    clamp_after_request_sleep, clamp_depth, clamp_request_limit, clamp_retries, clamp_retry_sleep,
    clamp_runners, default_headers, CrawlConfig, CrawlOptions, DEFAULT_USER_AGENT,
};
pub use crawler::Crawler;
pub use queue::{CrawlItem, Frontier, TaskDone};
pub use visited::{CrawlMap, VisitedMap};
