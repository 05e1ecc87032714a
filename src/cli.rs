// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Every crawl setting can come from three places, later ones winning:
// 1. built-in defaults
// 2. a JSON file given with --config
// 3. flags on the command line
//
// Numeric flags are Options so we can tell "not given" apart from "given
// with the default value" when merging with a config file.
// =============================================================================

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use link_mapper::crawl::CrawlOptions;
use std::path::PathBuf;
use url::Url;

#[derive(Parser, Debug)]
#[command(
    name = "link-mapper",
    version,
    about = "Crawl a website and list the links found on every page",
    long_about = "link-mapper starts from a root URL, follows links on the same domain and prints, \
                  for every page it visited, the links that page contains."
)]
pub struct Cli {
    /// Root URL to start crawling from (e.g., https://example.com)
    pub url: Url,

    /// Extra request header as "Name: Value" (repeatable; replaces the default User-Agent)
    #[arg(long = "header", short = 'H', value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Also find URLs anywhere in the page text, not just in <a href>
    #[arg(long)]
    pub regex_search: bool,

    /// Keep links to other domains in the results (they are still never crawled)
    #[arg(long)]
    pub no_domain_filter: bool,

    /// Number of concurrent workers (default: 100; values below 1 become 1)
    #[arg(long, allow_negative_numbers = true)]
    pub max_runners: Option<i64>,

    /// Retries for a failing request (default: 5; negative values become 0)
    #[arg(long, allow_negative_numbers = true)]
    pub max_retries: Option<i64>,

    /// Seconds to wait between retries (default: 0.3)
    #[arg(long, allow_negative_numbers = true)]
    pub sleep_between_retries: Option<f64>,

    /// Maximum link depth from the root (default: unlimited; 0 = root only)
    #[arg(long, allow_negative_numbers = true)]
    pub max_depth: Option<i64>,

    /// Do not reuse the parent page's protocol for same-site links
    #[arg(long)]
    pub no_parent_protocol: bool,

    /// Seconds each worker pauses after a request (default: 0)
    #[arg(long, allow_negative_numbers = true)]
    pub sleep_after_request: Option<f64>,

    /// Maximum number of requests in flight at once (default: unlimited)
    #[arg(long, allow_negative_numbers = true)]
    pub concurrent_requests_limit: Option<i64>,

    /// Print every page as soon as it has been crawled
    #[arg(long)]
    pub real_time: bool,

    /// Output the final map as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// JSON file with crawl options (keys like "maxRunners", "maxDepth")
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Cli {
    // Builds the crawl options: defaults, then the config file, then flags
    pub fn crawl_options(&self) -> Result<CrawlOptions> {
        let mut options = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("Cannot read config file {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("Invalid config file {}", path.display()))?
            }
            None => CrawlOptions::default(),
        };

        if !self.headers.is_empty() {
            options.headers = self.headers.iter().cloned().collect();
        }
        if self.regex_search {
            options.regex_search = true;
        }
        if self.no_domain_filter {
            options.domain_filter = false;
        }
        if let Some(max_runners) = self.max_runners {
            options.max_runners = max_runners;
        }
        if let Some(max_retries) = self.max_retries {
            options.max_retries = max_retries;
        }
        if let Some(seconds) = self.sleep_between_retries {
            options.sleep_between_retries = seconds;
        }
        if self.max_depth.is_some() {
            options.max_depth = self.max_depth;
        }
        if self.no_parent_protocol {
            options.assume_parent_protocol = false;
        }
        if let Some(seconds) = self.sleep_after_request {
            options.sleep_after_request = seconds;
        }
        if self.concurrent_requests_limit.is_some() {
            options.concurrent_requests_limit = self.concurrent_requests_limit;
        }
        if self.real_time {
            options.print_in_real_time = true;
        }

        Ok(options)
    }
}

// Parses "Name: Value" into a header pair
fn parse_header(raw: &str) -> Result<(String, String)> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| anyhow!("expected \"Name: Value\", got \"{}\"", raw))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(anyhow!("header name is empty in \"{}\"", raw));
    }
    Ok((name.to_string(), value.trim().to_string()))
}
