// src/crawl/crawler.rs
// =============================================================================
// This module drives a crawl from a root URL.
//
// How it works:
// 1. The root goes into the frontier at depth 0
// 2. A fixed pool of workers pops items off the frontier
// 3. A worker claims the item's canonical URL in the visited map (if some
//    other worker already did, the item is dropped), fetches the page with
//    retries, and extracts its links
// 4. The links are recorded against the page; the unvisited, crawlable,
//    same-domain ones go back into the frontier one level deeper
// 5. Once every pushed item has been processed the workers are stopped and
//    the visited map is returned
//
// Politeness:
// - An optional global cap on in-flight requests (a semaphore)
// - An optional pause after every request
// - A fixed delay between retries of a failing page
//
// Nothing that happens to a single page stops the crawl: pages that cannot
// be fetched are logged and recorded with no links.
// =============================================================================

use super::config::CrawlConfig;
use super::queue::{CrawlItem, Frontier};
use super::visited::{CrawlMap, VisitedMap};
use crate::error::Result;
use crate::fetch::{extract_hrefs, find_url_matches, FetchError, HttpTransport, Transport};
use crate::report::{ConsoleReporter, Reporter};
use crate::urls::{Url, UrlSet};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

pub struct Crawler {
    root: Url,
    config: CrawlConfig,
    transport: Arc<dyn Transport>,
    reporter: Option<Arc<dyn Reporter>>,
}

impl Crawler {
    /// Builds a crawler that fetches over HTTP with the configured headers.
    pub fn new(root_url: &str, config: CrawlConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config.headers)?;
        Ok(Self::with_transport(root_url, config, Arc::new(transport)))
    }

    /// Builds a crawler on top of any transport.
    pub fn with_transport(root_url: &str, config: CrawlConfig, transport: Arc<dyn Transport>) -> Self {
        let reporter: Option<Arc<dyn Reporter>> = if config.print_in_real_time {
            Some(Arc::new(ConsoleReporter))
        } else {
            None
        };

        Self {
            root: Url::new(root_url),
            config,
            transport,
            reporter,
        }
    }

    /// Sends every finished page to `reporter` as soon as it is done.
    pub fn with_reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    pub fn root(&self) -> &Url {
        &self.root
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    // Runs the crawl to completion
    //
    // Returns: every visited page (canonical URL) mapped to the canonical
    // URLs of the links found on it, in page order, duplicates included
    pub async fn crawl(&self) -> CrawlMap {
        let run = Arc::new(CrawlRun {
            root: self.root.clone(),
            config: self.config.clone(),
            transport: Arc::clone(&self.transport),
            reporter: self.reporter.clone(),
            frontier: Frontier::new(),
            visited: VisitedMap::new(),
            limit: self.config.concurrent_requests_limit.map(Semaphore::new),
        });

        let started = Instant::now();
        info!(
            root = %self.root.basic_url(),
            workers = self.config.max_runners,
            max_depth = ?self.config.max_depth,
            "Start crawling"
        );

        run.frontier.push(self.root.clone(), 0);

        let mut workers = JoinSet::new();
        for _ in 0..self.config.max_runners {
            let run = Arc::clone(&run);
            workers.spawn(async move { run.process_queue().await });
        }

        run.frontier.join().await;
        // Idle workers are parked on the queue; nothing is left for them
        workers.abort_all();

        info!(
            pages = run.visited.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Crawl finished"
        );
        run.visited.snapshot()
    }
}

// State shared by the workers of one crawl
struct CrawlRun {
    root: Url,
    config: CrawlConfig,
    transport: Arc<dyn Transport>,
    reporter: Option<Arc<dyn Reporter>>,
    frontier: Frontier,
    visited: VisitedMap,
    limit: Option<Semaphore>,
}

impl CrawlRun {
    // Worker loop: runs until the task is aborted
    async fn process_queue(&self) {
        while let Some(CrawlItem { url, depth }) = self.frontier.pop().await {
            let _done = self.frontier.done_on_drop();
            self.process(&url, depth).await;
        }
    }

    async fn process(&self, url: &Url, depth: usize) {
        let key = url.basic_url();
        if !self.visited.claim(&key) {
            debug!(url = %key, "Already claimed, skipping");
            return;
        }
        debug!(url = %key, depth, "Crawling");

        let links: Vec<Url> = self
            .fetch_links(url)
            .await
            .into_iter()
            .filter(|link| link.basic_url() != key)
            .collect();
        let basic_links: Vec<String> = links.iter().map(Url::basic_url).collect();

        self.visited.record(&key, basic_links.clone());
        if let Some(reporter) = &self.reporter {
            reporter.report(&key, &basic_links);
        }

        if self.config.max_depth.map_or(true, |max_depth| depth < max_depth) {
            let unique: UrlSet = links.into_iter().collect();
            self.enqueue(&unique, depth);
        }
    }

    // Queues the links worth fetching: same domain as the root, not yet
    // visited, and crawlable
    fn enqueue(&self, links: &UrlSet, depth: usize) {
        for url in links.values() {
            let key = url.basic_url();
            if url.domain() == self.root.domain() && !self.visited.contains(&key) && url.is_crawlable() {
                self.frontier.push(url.clone(), depth + 1);
                debug!(url = %key, depth = depth + 1, pending = self.frontier.pending(), "Queued");
            }
        }
    }

    // Fetches a page (retrying transport failures) and returns its links
    //
    // A page that cannot be fetched yields no links
    async fn fetch_links(&self, url: &Url) -> Vec<Url> {
        let target = url.basic_url();
        let mut retries = 0;

        let text = loop {
            match self.fetch_text(&target).await {
                Ok(text) => break text,
                Err(err) if !err.is_retryable() => {
                    error!(url = %target, error = %err, "Cannot decode text from url");
                    return Vec::new();
                }
                Err(err) if retries < self.config.max_retries => {
                    warn!(url = %target, retry = retries, error = %err, "Request failed, will retry");
                    retries += 1;
                    if !self.config.sleep_between_retries.is_zero() {
                        tokio::time::sleep(self.config.sleep_between_retries).await;
                    }
                }
                Err(err) => {
                    error!(
                        url = %target,
                        error = %err,
                        "Maximum retries reached, the url will not be processed"
                    );
                    return Vec::new();
                }
            }
        };

        let links = self.extract_links(&text, url);

        // The permit is already released; only this worker waits
        if !self.config.sleep_after_request.is_zero() {
            tokio::time::sleep(self.config.sleep_after_request).await;
        }
        links
    }

    // One request, holding a global permit for its duration if a limit is set
    async fn fetch_text(&self, target: &str) -> std::result::Result<String, FetchError> {
        let _permit = match &self.limit {
            Some(limit) => Some(
                limit
                    .acquire()
                    .await
                    .map_err(|_| FetchError::Transport("request limiter closed".to_string()))?,
            ),
            None => None,
        };
        self.transport.fetch(target).await
    }

    // Turns a page's text into Urls resolved against the page
    fn extract_links(&self, text: &str, page: &Url) -> Vec<Url> {
        let use_parent_protocol = self.config.assume_parent_protocol;

        let mut links: Vec<Url> = extract_hrefs(text)
            .iter()
            .map(|href| Url::with_parent(href, page, use_parent_protocol))
            .collect();

        if self.config.regex_search {
            let mut seen: UrlSet = links.iter().cloned().collect();
            for found in find_url_matches(text) {
                let url = Url::with_parent(&found, page, use_parent_protocol);
                if !seen.contains_key(&url.basic_url()) {
                    seen.add(url.clone());
                    links.push(url);
                }
            }
        }

        if self.config.domain_filter {
            links.retain(|link| link.domain() == self.root.domain());
        }
        links
    }
}
