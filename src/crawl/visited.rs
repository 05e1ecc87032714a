// src/crawl/visited.rs
// =============================================================================
// The visited map: canonical page URL -> canonical URLs of its links.
//
// A page is "claimed" by inserting an empty entry for it the moment a worker
// picks it up, before it is fetched. The check and the insert happen as one
// step (dashmap's entry API holds the shard lock for both), so two workers
// holding copies of the same URL can never both fetch it. Nothing else is
// locked: fetching happens outside the map.
// =============================================================================

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::collections::BTreeMap;

/// The crawl result: every visited page and the links found on it.
pub type CrawlMap = BTreeMap<String, Vec<String>>;

#[derive(Debug, Default)]
pub struct VisitedMap {
    pages: DashMap<String, Vec<String>>,
}

impl VisitedMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `key` for the caller. Returns false if it was already claimed.
    pub fn claim(&self, key: &str) -> bool {
        match self.pages.entry(key.to_string()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(Vec::new());
                true
            }
        }
    }

    /// Stores the links found on a claimed page.
    pub fn record(&self, key: &str, links: Vec<String>) {
        self.pages.insert(key.to_string(), links);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.pages.contains_key(key)
    }

    /// Number of pages claimed so far.
    pub(crate) fn len(&self) -> usize {
        self.pages.len()
    }

    /// Copies the map out, sorted by page URL.
    pub fn snapshot(&self) -> CrawlMap {
        self.pages
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }
}
