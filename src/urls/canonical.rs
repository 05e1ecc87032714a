// src/urls/canonical.rs
// =============================================================================
// This module turns raw link strings into canonical, comparable URLs.
//
// A link found on a page can look like almost anything:
// - "https://www.example.com/about/"   (absolute)
// - "/about"                           (site-root relative)
// - "./team" or "team"                 (relative to the current page)
// - "#contact"                         (fragment on the current page)
// - "mailto:someone@example.com"       (not a web page at all)
//
// Every one of them is resolved against the page it was found on (the
// "parent") and reduced to a canonical "basic" form:
//
//     protocol://domain/path        (no www., no fragment, no trailing slash)
//
// Two links that point to the same page always produce the same basic form,
// which is what the crawler uses to avoid fetching a page twice.
//
// Rust concepts:
// - LazyLock: compile a regex once, the first time it is used
// - Manual PartialEq/Hash: equality by canonical form only
// =============================================================================

use regex::Regex;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::LazyLock;

/// The pattern used to recognise URLs, both for validity checks and for
/// scanning raw page text in regex mode.
pub const DEFAULT_URL_PATTERN: &str = r"((http|https)://)(www.)?[a-zA-Z0-9@:%._\+~#?&/=]{2,256}\.[a-z]{2,6}\b([-a-zA-Z0-9@:%._\+~#?&/=]*)";

/// Compiled [`DEFAULT_URL_PATTERN`], unanchored (finds URLs inside text).
pub static DEFAULT_URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DEFAULT_URL_PATTERN).expect("default URL pattern is valid"));

// Same pattern anchored at both ends: the whole string must be a URL
static DEFAULT_URL_REGEX_FULL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^(?:{})$", DEFAULT_URL_PATTERN)).expect("default URL pattern is valid")
});

// Generic URI splitter: scheme, authority, path, query, fragment.
// The scheme must start with a letter, otherwise the whole input is a path.
static URI_PARTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^(?:([A-Za-z][A-Za-z0-9+.\-]*):)?(?://([^/?#]*))?([^?#]*)(?:\?([^#]*))?(?:#(.*))?$")
        .expect("URI splitting pattern is valid")
});

// Links to these are recorded but never fetched
const CONTENT_EXTENSIONS: [&str; 5] = [".png", ".pdf", ".jpg", ".jpeg", ".txt"];

/// The pieces of a raw URL string, before any resolution against a parent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UrlInfo {
    /// Lowercased scheme, or empty
    pub protocol: String,
    /// Whether the host started with "www."
    pub www: bool,
    /// Lowercased host without the "www." label
    pub domain: String,
    /// Path, with "?query" appended when a query is present
    pub path: String,
    /// Text after '#'
    pub fragment: String,
}

impl UrlInfo {
    // Splits a raw string into its parts
    //
    // Example:
    //   "https://www.this.that.here/path/#fragment"
    //   -> protocol "https", www true, domain "this.that.here",
    //      path "/path/", fragment "fragment"
    pub fn parse(raw: &str) -> Self {
        let Some(caps) = URI_PARTS.captures(raw) else {
            // The splitter matches any input; keep the raw string as a path
            return UrlInfo {
                path: raw.to_string(),
                ..Default::default()
            };
        };
        let group = |i: usize| caps.get(i).map(|m| m.as_str()).unwrap_or("");

        let host = group(2).to_lowercase();
        let (www, domain) = match host.strip_prefix("www.") {
            Some(rest) => (true, rest.to_string()),
            None => (false, host),
        };

        let query = group(4);
        let path = if query.is_empty() {
            group(3).to_string()
        } else {
            format!("{}?{}", group(3), query)
        };

        UrlInfo {
            protocol: group(1).to_lowercase(),
            www,
            domain,
            path,
            fragment: group(5).to_string(),
        }
    }
}

/// Collapses every run of consecutive slashes into a single slash.
///
/// `"a//b///c"` becomes `"a/b/c"` and `"////"` becomes `"/"`.
pub fn remove_consecutive_slashes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_slash = false;
    for c in text.chars() {
        if c == '/' {
            if !previous_slash {
                out.push(c);
            }
            previous_slash = true;
        } else {
            out.push(c);
            previous_slash = false;
        }
    }
    out
}

// Normalises a path or fragment: no "//", no lone "/", no trailing "/"
fn tidy_slashes(text: &str) -> String {
    let mut tidy = if text.contains("//") {
        remove_consecutive_slashes(text)
    } else {
        text.to_string()
    };
    if tidy == "/" {
        tidy.clear();
    }
    if tidy.ends_with('/') {
        tidy.pop();
    }
    tidy
}

/// A link resolved against the page it was found on.
///
/// Immutable once built. Two `Url`s are equal (and hash the same) when
/// their [`basic_url`](Url::basic_url) is the same.
#[derive(Debug, Clone)]
pub struct Url {
    raw: String,
    protocol: String,
    www: bool,
    domain: String,
    path: String,
    fragment: String,
    parent_protocol: String,
    parent_www: bool,
    parent_domain: String,
    parent_path: String,
    use_parent_protocol: bool,
}

impl Url {
    /// Builds a root URL: no parent, parent protocol inheritance on.
    pub fn new(raw: &str) -> Self {
        Self::build(raw, None, true)
    }

    /// Builds a URL found on the page `parent`.
    ///
    /// When `use_parent_protocol` is true the flag is inherited from the
    /// parent, so a crawl started with inheritance keeps it all the way down.
    pub fn with_parent(raw: &str, parent: &Url, use_parent_protocol: bool) -> Self {
        Self::build(raw, Some(parent), use_parent_protocol)
    }

    fn build(raw: &str, parent: Option<&Url>, use_parent_protocol: bool) -> Self {
        // Snapshot of the parent, taken before anything is resolved
        let (parent_protocol, parent_www, parent_domain, parent_path) = match parent {
            Some(p) => (p.protocol.clone(), Some(p.www), p.domain.clone(), p.path.clone()),
            None => (String::new(), None, String::new(), String::new()),
        };

        let UrlInfo {
            mut protocol,
            mut www,
            mut domain,
            mut path,
            fragment,
        } = UrlInfo::parse(raw);

        // Same site as the parent (or no host at all): merge with the parent
        if domain.is_empty() || domain == parent_domain {
            if protocol.is_empty() {
                protocol = parent_protocol.clone();
            }
            if domain.is_empty() {
                domain = parent_domain.clone();
            }
            if !www {
                if let Some(parent_www) = parent_www {
                    www = parent_www;
                }
            }
            path = join_path(raw, &path, &parent_path);
        }

        let path = tidy_slashes(&path);
        let fragment = tidy_slashes(&fragment);

        // A root URL is its own parent for protocol decisions
        let parent_protocol = if parent_protocol.is_empty() {
            protocol.clone()
        } else {
            parent_protocol
        };
        let parent_domain = if parent_domain.is_empty() {
            domain.clone()
        } else {
            parent_domain
        };
        let parent_www = parent_www.unwrap_or(www);

        let use_parent_protocol = match parent {
            Some(p) if use_parent_protocol => p.use_parent_protocol,
            _ => use_parent_protocol,
        };

        Url {
            raw: raw.to_string(),
            protocol,
            www,
            domain,
            path,
            fragment,
            parent_protocol,
            parent_www,
            parent_domain,
            parent_path,
            use_parent_protocol,
        }
    }

    /// The canonical form, used as the de-duplication key.
    ///
    /// `protocol://domain/path` for http(s) URLs; the raw input string
    /// for anything else (mailto:, tel:, javascript:, ...).
    pub fn basic_url(&self) -> String {
        let protocol = self.surfaced_protocol();
        if protocol.starts_with("http") {
            format!("{}://{}{}", protocol, self.domain, self.path)
        } else {
            self.raw.clone()
        }
    }

    /// The human-facing form, keeping the `www.` label and the fragment.
    pub fn full_url(&self) -> String {
        let www = if self.www { "www." } else { "" };
        let fragment = if self.fragment.is_empty() {
            String::new()
        } else {
            format!("/#{}", self.fragment)
        };
        format!(
            "{}://{}{}{}{}",
            self.surfaced_protocol(),
            www,
            self.domain,
            self.path,
            fragment
        )
    }

    /// True if the basic form is an http(s) URL matching the default
    /// pattern and does not climb directories with `/../`.
    pub fn is_valid(&self) -> bool {
        self.check_valid(|basic| DEFAULT_URL_REGEX_FULL.is_match(basic))
    }

    /// Like [`is_valid`](Url::is_valid) with a caller-supplied pattern.
    ///
    /// The pattern is used as given: anchor it with `^...$` to require a
    /// match on the whole basic URL.
    pub fn is_valid_with(&self, pattern: &Regex) -> bool {
        self.check_valid(|basic| pattern.is_match(basic))
    }

    /// Valid and not a link to an image, PDF or text file.
    pub fn is_crawlable(&self) -> bool {
        self.is_valid() && !self.is_content_url()
    }

    /// Like [`is_crawlable`](Url::is_crawlable) with a caller-supplied pattern.
    pub fn is_crawlable_with(&self, pattern: &Regex) -> bool {
        self.is_valid_with(pattern) && !self.is_content_url()
    }

    pub fn is_xml(&self) -> bool {
        self.basic_url().ends_with(".xml")
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    pub fn www(&self) -> bool {
        self.www
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    pub fn parent_protocol(&self) -> &str {
        &self.parent_protocol
    }

    pub fn parent_www(&self) -> bool {
        self.parent_www
    }

    pub fn parent_domain(&self) -> &str {
        &self.parent_domain
    }

    pub fn parent_path(&self) -> &str {
        &self.parent_path
    }

    pub fn use_parent_protocol(&self) -> bool {
        self.use_parent_protocol
    }

    // The parent's protocol wins for same-site links, unless the link
    // carries an explicit non-http scheme
    fn surfaced_protocol(&self) -> &str {
        if self.use_parent_protocol
            && self.domain == self.parent_domain
            && (self.protocol.is_empty() || self.protocol.starts_with("http"))
        {
            &self.parent_protocol
        } else {
            &self.protocol
        }
    }

    fn check_valid(&self, matches: impl Fn(&str) -> bool) -> bool {
        let basic = self.basic_url();
        basic.starts_with("http") && !basic.contains("/../") && matches(&basic)
    }

    fn is_content_url(&self) -> bool {
        let basic = self.basic_url();
        CONTENT_EXTENSIONS.iter().any(|ext| basic.ends_with(ext))
    }
}

// Resolves a same-site path against the parent's path
//
// Examples (parent path "/test"):
//   "./test2"  -> "/test/test2"
//   "test2"    -> "/test/test2"
//   "/test2"   -> "/test2"
//   "#frag"    -> "/test"
fn join_path(raw: &str, path: &str, parent_path: &str) -> String {
    let mut joined = if path.starts_with("./") {
        format!("{}{}", parent_path, &path[1..])
    } else if !path.is_empty() && !path.starts_with('/') {
        format!("{}/{}", parent_path, path)
    } else {
        path.to_string()
    };
    if !parent_path.is_empty() && (raw.starts_with('#') || raw.starts_with("./#")) {
        joined = parent_path.to_string();
    }
    joined
}

impl PartialEq for Url {
    fn eq(&self, other: &Self) -> bool {
        self.basic_url() == other.basic_url()
    }
}

impl Eq for Url {}

impl Hash for Url {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.basic_url().hash(state);
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.basic_url())
    }
}
