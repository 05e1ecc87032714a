// src/fetch/extract.rs
// =============================================================================
// This module pulls candidate links out of a fetched page.
//
// Two sources:
// - href attributes of <a> tags, found with the `scraper` crate
//   (html5ever underneath, so broken markup is handled like a browser would)
// - optionally, anything in the raw text that looks like a URL, found with
//   the default URL regex (catches links in scripts, data attributes, text)
//
// Both return raw strings. Resolving them against the page is the job of
// `urls::Url`, so nothing here knows about the page's own address.
// =============================================================================

use crate::urls::DEFAULT_URL_REGEX;
use scraper::{Html, Selector};
use std::sync::LazyLock;

static LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("'a[href]' is a valid selector"));

// Returns the href of every <a> tag, in document order
//
// Duplicates are kept: a page linking to "/about" three times yields
// three entries.
pub fn extract_hrefs(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    document
        .select(&LINK_SELECTOR)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect()
}

// Returns every substring of `text` matching the default URL pattern
pub fn find_url_matches(text: &str) -> Vec<String> {
    DEFAULT_URL_REGEX
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}
