// src/crawl/config.rs
// =============================================================================
// Crawl settings.
//
// Two types:
// - CrawlOptions: what the user asked for, possibly out of range
//   (negative worker counts, negative sleeps, ...). Loadable from JSON.
// - CrawlConfig: what the crawler actually runs with. Built once from
//   CrawlOptions; every out-of-range value is clamped, never rejected.
// =============================================================================

use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";
pub const DEFAULT_MAX_RUNNERS: usize = 100;
pub const DEFAULT_MAX_RETRIES: u32 = 5;
pub const DEFAULT_SLEEP_BETWEEN_RETRIES: f64 = 0.3;

/// Raw crawl settings, as given by a user or a JSON file.
///
/// Field names follow the JSON keys (`maxRunners`, `sleepBetweenRetries`, ...).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CrawlOptions {
    pub headers: BTreeMap<String, String>,
    pub regex_search: bool,
    pub domain_filter: bool,
    pub max_runners: i64,
    pub max_retries: i64,
    pub sleep_between_retries: f64,
    pub max_depth: Option<i64>,
    pub assume_parent_protocol: bool,
    pub sleep_after_request: f64,
    pub concurrent_requests_limit: Option<i64>,
    pub print_in_real_time: bool,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            headers: default_headers(),
            regex_search: false,
            domain_filter: true,
            max_runners: DEFAULT_MAX_RUNNERS as i64,
            max_retries: DEFAULT_MAX_RETRIES as i64,
            sleep_between_retries: DEFAULT_SLEEP_BETWEEN_RETRIES,
            max_depth: None,
            assume_parent_protocol: true,
            sleep_after_request: 0.0,
            concurrent_requests_limit: None,
            print_in_real_time: false,
        }
    }
}

/// Validated crawl settings, immutable for the length of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct CrawlConfig {
    pub headers: BTreeMap<String, String>,
    pub regex_search: bool,
    pub domain_filter: bool,
    pub max_runners: usize,
    pub max_retries: u32,
    pub sleep_between_retries: Duration,
    pub max_depth: Option<usize>,
    pub assume_parent_protocol: bool,
    pub sleep_after_request: Duration,
    pub concurrent_requests_limit: Option<usize>,
    pub print_in_real_time: bool,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        CrawlOptions::default().into()
    }
}

impl From<CrawlOptions> for CrawlConfig {
    fn from(options: CrawlOptions) -> Self {
        let headers = if options.headers.is_empty() {
            default_headers()
        } else {
            options.headers
        };

        Self {
            headers,
            regex_search: options.regex_search,
            domain_filter: options.domain_filter,
            max_runners: clamp_runners(options.max_runners),
            max_retries: clamp_retries(options.max_retries),
            sleep_between_retries: clamp_retry_sleep(options.sleep_between_retries),
            max_depth: clamp_depth(options.max_depth),
            assume_parent_protocol: options.assume_parent_protocol,
            sleep_after_request: clamp_after_request_sleep(options.sleep_after_request),
            concurrent_requests_limit: clamp_request_limit(options.concurrent_requests_limit),
            print_in_real_time: options.print_in_real_time,
        }
    }
}

pub fn default_headers() -> BTreeMap<String, String> {
    BTreeMap::from([("User-Agent".to_string(), DEFAULT_USER_AGENT.to_string())])
}

/// Non-positive worker counts become 1.
pub fn clamp_runners(max_runners: i64) -> usize {
    usize::try_from(max_runners).ok().filter(|n| *n > 0).unwrap_or(1)
}

/// Negative retry counts become 0.
pub fn clamp_retries(max_retries: i64) -> u32 {
    u32::try_from(max_retries.max(0)).unwrap_or(u32::MAX)
}

/// A negative, non-finite or unrepresentable delay falls back to the default 0.3s.
pub fn clamp_retry_sleep(seconds: f64) -> Duration {
    Duration::try_from_secs_f64(seconds)
        .unwrap_or_else(|_| Duration::from_secs_f64(DEFAULT_SLEEP_BETWEEN_RETRIES))
}

/// `None` stays unbounded; negative depths become 0.
pub fn clamp_depth(max_depth: Option<i64>) -> Option<usize> {
    max_depth.map(|depth| usize::try_from(depth.max(0)).unwrap_or(usize::MAX))
}

/// A negative, non-finite or unrepresentable delay becomes 0.
pub fn clamp_after_request_sleep(seconds: f64) -> Duration {
    Duration::try_from_secs_f64(seconds).unwrap_or(Duration::ZERO)
}

/// Non-positive limits mean "no limit".
pub fn clamp_request_limit(limit: Option<i64>) -> Option<usize> {
    limit.and_then(|n| usize::try_from(n).ok()).filter(|n| *n > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CrawlConfig::default();
        assert_eq!(config.headers.get("User-Agent").map(String::as_str), Some("Mozilla/5.0"));
        assert!(!config.regex_search);
        assert!(config.domain_filter);
        assert_eq!(config.max_runners, 100);
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.sleep_between_retries, Duration::from_secs_f64(DEFAULT_SLEEP_BETWEEN_RETRIES));
        assert_eq!(config.max_depth, None);
        assert!(config.assume_parent_protocol);
        assert_eq!(config.sleep_after_request, Duration::ZERO);
        assert_eq!(config.concurrent_requests_limit, None);
        assert!(!config.print_in_real_time);
    }

    #[test]
    fn test_values_in_range_are_kept() {
        let options = CrawlOptions {
            headers: BTreeMap::from([("User-Agent".to_string(), "test".to_string())]),
            regex_search: true,
            domain_filter: false,
            max_runners: 500,
            max_retries: 7,
            sleep_between_retries: 0.0,
            max_depth: Some(1),
            assume_parent_protocol: false,
            sleep_after_request: 3.3,
            concurrent_requests_limit: Some(5),
            print_in_real_time: true,
        };
        let config = CrawlConfig::from(options.clone());

        assert_eq!(config.headers, options.headers);
        assert!(config.regex_search);
        assert!(!config.domain_filter);
        assert_eq!(config.max_runners, 500);
        assert_eq!(config.max_retries, 7);
        assert_eq!(config.sleep_between_retries, Duration::ZERO);
        assert_eq!(config.max_depth, Some(1));
        assert!(!config.assume_parent_protocol);
        assert_eq!(config.sleep_after_request, Duration::from_secs_f64(3.3));
        assert_eq!(config.concurrent_requests_limit, Some(5));
        assert!(config.print_in_real_time);
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let config = CrawlConfig::from(CrawlOptions {
            max_runners: -3,
            max_retries: -3,
            sleep_between_retries: -3.0,
            max_depth: Some(-3),
            sleep_after_request: -3.0,
            concurrent_requests_limit: Some(-3),
            ..Default::default()
        });

        assert_eq!(config.max_runners, 1);
        assert_eq!(config.max_retries, 0);
        assert_eq!(config.sleep_between_retries, Duration::from_secs_f64(DEFAULT_SLEEP_BETWEEN_RETRIES));
        assert_eq!(config.max_depth, Some(0));
        assert_eq!(config.sleep_after_request, Duration::ZERO);
        assert_eq!(config.concurrent_requests_limit, None);
    }

    #[test]
    fn test_zero_edges() {
        assert_eq!(clamp_runners(0), 1);
        assert_eq!(clamp_request_limit(Some(0)), None);
        assert_eq!(clamp_depth(Some(0)), Some(0));
        assert_eq!(clamp_retries(0), 0);
    }

    #[test]
    fn test_huge_sleeps_are_clamped() {
        assert_eq!(clamp_retry_sleep(1e300), Duration::from_secs_f64(DEFAULT_SLEEP_BETWEEN_RETRIES));
        assert_eq!(clamp_after_request_sleep(1e300), Duration::ZERO);

        let options: CrawlOptions =
            serde_json::from_str(r#"{"sleepBetweenRetries": 1e20, "sleepAfterRequest": 1e300}"#).unwrap();
        let config = CrawlConfig::from(options);
        assert_eq!(config.sleep_between_retries, Duration::from_secs_f64(DEFAULT_SLEEP_BETWEEN_RETRIES));
        assert_eq!(config.sleep_after_request, Duration::ZERO);
    }

    #[test]
    fn test_empty_headers_fall_back_to_default() {
        let config = CrawlConfig::from(CrawlOptions {
            headers: BTreeMap::new(),
            ..Default::default()
        });
        assert_eq!(config.headers, default_headers());
    }

    #[test]
    fn test_options_from_json() {
        let options: CrawlOptions =
            serde_json::from_str(r#"{"maxRunners": 10, "maxDepth": 2, "domainFilter": false}"#).unwrap();
        assert_eq!(options.max_runners, 10);
        assert_eq!(options.max_depth, Some(2));
        assert!(!options.domain_filter);
        // Unspecified keys keep their defaults
        assert_eq!(options.max_retries, 5);
        assert_eq!(options.headers, default_headers());
    }
}
