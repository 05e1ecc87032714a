// src/urls/set.rs
// =============================================================================
// A set of Urls that treats two links as the same when their canonical
// (basic) form is the same. The first Url seen for a key is kept and the
// insertion order is preserved.
// =============================================================================

use super::Url;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct UrlSet {
    // Keys in first-seen order, and the first Url for each key
    order: Vec<String>,
    items: HashMap<String, Url>,
}

impl UrlSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `url` unless a Url with the same basic form is already present.
    pub fn add(&mut self, url: Url) {
        let key = url.basic_url();
        if !self.items.contains_key(&key) {
            self.order.push(key.clone());
            self.items.insert(key, url);
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.items.contains_key(key)
    }

    /// Distinct basic URLs, in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// First Url seen for each key, in insertion order
    pub fn values(&self) -> impl Iterator<Item = &Url> {
        self.order.iter().filter_map(|key| self.items.get(key))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl FromIterator<Url> for UrlSet {
    fn from_iter<I: IntoIterator<Item = Url>>(iter: I) -> Self {
        let mut set = UrlSet::new();
        for url in iter {
            set.add(url);
        }
        set
    }
}

impl Extend<Url> for UrlSet {
    fn extend<I: IntoIterator<Item = Url>>(&mut self, iter: I) {
        for url in iter {
            self.add(url);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deduplicates_by_basic_url() {
        let set: UrlSet = [
            "https://mysite.com",
            "http://www.mysite.com",
            "http://mysite.com",
            "https://www.mysite.com",
            "https://mysite.com/test",
            "http://www.mysite.com/test/test/test",
        ]
        .into_iter()
        .map(Url::new)
        .collect();

        assert_eq!(set.len(), 4);
        assert!(set.contains_key("http://mysite.com"));
    }

    #[test]
    fn test_first_seen_wins_and_order_is_kept() {
        let mut set = UrlSet::new();
        set.add(Url::new("https://mysite.com/b"));
        set.add(Url::new("https://www.mysite.com/a/"));
        set.add(Url::new("https://mysite.com/a"));
        set.add(Url::new("https://mysite.com/b#again"));

        let keys: Vec<_> = set.keys().collect();
        assert_eq!(keys, vec!["https://mysite.com/b", "https://mysite.com/a"]);

        let first_a = set.values().nth(1).unwrap();
        assert_eq!(first_a.raw(), "https://www.mysite.com/a/");
    }

    #[test]
    fn test_empty_set() {
        let set = UrlSet::new();
        assert!(set.is_empty());
        assert_eq!(set.values().count(), 0);
    }
}
