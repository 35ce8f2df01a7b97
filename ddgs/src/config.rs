//! Configuration types for the search client.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use crate::errors::{Result, SearchError};

/// Configuration for the search client.
///
/// Fixed for the life of one client; search calls never mutate it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Per-attempt request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Headers replacing the default User-Agent/Referer set.
    #[serde(default)]
    pub headers: Option<HashMap<String, String>>,
    /// Log level for the default log sink. Negative is silent.
    #[serde(default = "default_log_level")]
    pub log_level: i32,
    /// Retry configuration.
    #[serde(default)]
    pub retry: RetryConfig,
    /// Delay between HTML result pages in milliseconds.
    #[serde(default = "default_html_page_delay_ms")]
    pub html_page_delay_ms: u64,
    /// Maximum number of HTML result pages per search.
    #[serde(default = "default_html_max_pages")]
    pub html_max_pages: usize,
    /// Result offsets requested from the API backend, in order.
    #[serde(default = "default_api_offsets")]
    pub api_offsets: Vec<u32>,
    /// Upstream endpoints.
    #[serde(default)]
    pub endpoints: Endpoints,
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_log_level() -> i32 {
    -1
}

fn default_html_page_delay_ms() -> u64 {
    750
}

fn default_html_max_pages() -> usize {
    10
}

fn default_api_offsets() -> Vec<u32> {
    vec![0, 20, 70, 120]
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            headers: None,
            log_level: default_log_level(),
            retry: RetryConfig::default(),
            html_page_delay_ms: default_html_page_delay_ms(),
            html_max_pages: default_html_max_pages(),
            api_offsets: default_api_offsets(),
            endpoints: Endpoints::default(),
        }
    }
}

impl ClientConfig {
    /// Creates a new client configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a configuration from a JSON file. Missing fields take defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            SearchError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json(&raw)
    }

    /// Parses a configuration from a JSON string.
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)
            .map_err(|e| SearchError::Config(format!("invalid config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks invariants the client relies on.
    pub fn validate(&self) -> Result<()> {
        if self.retry.max_attempts == 0 {
            return Err(SearchError::Config(
                "retry.max_attempts must be at least 1".to_string(),
            ));
        }
        if self.timeout_ms == 0 {
            return Err(SearchError::Config("timeout_ms must be positive".to_string()));
        }
        Ok(())
    }

    /// Sets the per-attempt timeout.
    #[must_use]
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Replaces the default header set with caller-supplied headers.
    #[must_use]
    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = Some(headers);
        self
    }

    /// Sets the log level of the default log sink.
    #[must_use]
    pub fn with_log_level(mut self, level: i32) -> Self {
        self.log_level = level;
        self
    }

    /// Sets the retry configuration.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Sets the delay between HTML pages.
    #[must_use]
    pub fn with_html_page_delay_ms(mut self, delay_ms: u64) -> Self {
        self.html_page_delay_ms = delay_ms;
        self
    }

    /// Points the client at different upstream endpoints.
    #[must_use]
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Gets the timeout as Duration.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Gets the HTML page delay as Duration.
    #[must_use]
    pub fn html_page_delay(&self) -> Duration {
        Duration::from_millis(self.html_page_delay_ms)
    }
}

/// Retry configuration for the resilient fetcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total number of attempts, including the first.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
    /// Fixed delay after a failed attempt in milliseconds.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

fn default_max_attempts() -> usize {
    3
}

fn default_retry_delay_ms() -> u64 {
    3000
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl RetryConfig {
    /// Gets the retry delay as Duration.
    #[must_use]
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

/// Upstream endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Endpoints {
    /// Root query endpoint, used to obtain the `vqd` token.
    #[serde(default = "default_root_endpoint")]
    pub root: String,
    /// Structured-feed endpoint of the API backend.
    #[serde(default = "default_api_endpoint")]
    pub api: String,
    /// Server-rendered endpoint of the HTML backend.
    #[serde(default = "default_html_endpoint")]
    pub html: String,
}

fn default_root_endpoint() -> String {
    "https://duckduckgo.com".to_string()
}

fn default_api_endpoint() -> String {
    "https://links.duckduckgo.com/d.js".to_string()
}

fn default_html_endpoint() -> String {
    "https://html.duckduckgo.com/html".to_string()
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            root: default_root_endpoint(),
            api: default_api_endpoint(),
            html: default_html_endpoint(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_client_config_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout_ms, 10_000);
        assert_eq!(config.log_level, -1);
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.retry.delay(), Duration::from_secs(3));
        assert_eq!(config.html_page_delay(), Duration::from_millis(750));
        assert_eq!(config.html_max_pages, 10);
        assert_eq!(config.api_offsets, vec![0, 20, 70, 120]);
        assert!(config.headers.is_none());
    }

    #[test]
    fn test_client_config_builder() {
        let mut headers = HashMap::new();
        headers.insert("User-Agent".to_string(), "custom-agent".to_string());

        let config = ClientConfig::new()
            .with_timeout_ms(2500)
            .with_headers(headers)
            .with_log_level(1);

        assert_eq!(config.timeout(), Duration::from_millis(2500));
        assert_eq!(config.log_level, 1);
        assert_eq!(
            config.headers.as_ref().and_then(|h| h.get("User-Agent")),
            Some(&"custom-agent".to_string())
        );
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let config = ClientConfig::from_json(r#"{"timeout_ms": 5000, "retry": {"max_attempts": 5}}"#)
            .unwrap();

        assert_eq!(config.timeout_ms, 5000);
        assert_eq!(config.retry.max_attempts, 5);
        assert_eq!(config.retry.retry_delay_ms, 3000);
        assert_eq!(config.endpoints, Endpoints::default());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let err = ClientConfig::from_json(r#"{"retry": {"max_attempts": 0}}"#).unwrap_err();
        assert!(matches!(err, SearchError::Config(_)));

        let err = ClientConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, SearchError::Config(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"endpoints": {{"html": "http://127.0.0.1:9000/html"}}, "html_max_pages": 2}}"#
        )
        .unwrap();

        let config = ClientConfig::from_file(file.path()).unwrap();
        assert_eq!(config.endpoints.html, "http://127.0.0.1:9000/html");
        assert_eq!(config.endpoints.root, "https://duckduckgo.com");
        assert_eq!(config.html_max_pages, 2);
    }

    #[test]
    fn test_missing_file() {
        let err = ClientConfig::from_file("/nonexistent/ddgs.json").unwrap_err();
        assert!(err.to_string().contains("cannot read"));
    }
}
