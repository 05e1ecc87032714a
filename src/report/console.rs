// src/report/console.rs
// =============================================================================
// Printing crawl results to the terminal.
//
// Each page is shown on one line with its distinct links and how many times
// each one appears on the page:
//
//   The urls present in https://mysite.com are: https://mysite.com/a (2), ...
//
// The whole map can also be printed as pretty JSON for scripts and CI.
// =============================================================================

use super::Reporter;
use crate::crawl::CrawlMap;
use std::collections::HashMap;

/// Prints each page to stdout as soon as it is crawled.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn report(&self, parent: &str, links: &[String]) {
        println!("{}", format_single_element(parent, links));
    }
}

// Formats one page line
//
// Distinct links appear once, in first-seen order, with their count
pub fn format_single_element(parent: &str, links: &[String]) -> String {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order = Vec::new();
    for link in links {
        let count = counts.entry(link.as_str()).or_insert(0);
        if *count == 0 {
            order.push(link.as_str());
        }
        *count += 1;
    }

    let listed: Vec<String> = order
        .iter()
        .map(|link| format!("{} ({})", link, counts[link]))
        .collect();

    format!("The urls present in {} are: {}", parent, listed.join(", "))
}

/// Prints every page of a finished crawl, one line per page.
pub fn print_crawl_map(pages: &CrawlMap) {
    for (parent, links) in pages {
        println!("{}", format_single_element(parent, links));
    }
}

/// Prints a finished crawl as pretty JSON.
pub fn print_json(pages: &CrawlMap) -> serde_json::Result<()> {
    println!("{}", serde_json::to_string_pretty(pages)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_counts_duplicates() {
        let links = vec![
            "https://mysite.com/a".to_string(),
            "https://mysite.com/b".to_string(),
            "https://mysite.com/a".to_string(),
        ];
        assert_eq!(
            format_single_element("https://mysite.com", &links),
            "The urls present in https://mysite.com are: https://mysite.com/a (2), https://mysite.com/b (1)"
        );
    }

    #[test]
    fn test_format_page_without_links() {
        assert_eq!(
            format_single_element("https://mysite.com", &[]),
            "The urls present in https://mysite.com are: "
        );
    }

    #[test]
    fn test_crawl_map_serializes_as_object() {
        let pages = CrawlMap::from([(
            "https://mysite.com".to_string(),
            vec!["https://mysite.com/a".to_string()],
        )]);
        let json: serde_json::Value = serde_json::to_value(&pages).unwrap();
        assert_eq!(json["https://mysite.com"][0], "https://mysite.com/a");
    }
}
