//! Search backends.
//!
//! Each backend drives one upstream surface across its pagination protocol:
//! - `api`: the structured `d.js` feed, paged by fixed offsets
//! - `html`: the server-rendered page, paged by hidden "next" form fields

pub mod api;
pub mod html;

pub use api::{api_payload, parse_feed_page, search_api, FeedRow};
pub use html::{html_payload, parse_html_page, search_html, HtmlEntry, HtmlPage};

use std::collections::HashSet;

/// The self-referential link the upstream emits when it has no real match.
#[must_use]
pub fn sentinel_url(keywords: &str) -> String {
    format!("http://www.google.com/search?q={keywords}")
}

/// Result URLs already seen during one search call.
#[derive(Debug, Clone)]
pub struct SeenUrls {
    sentinel: String,
    urls: HashSet<String>,
}

impl SeenUrls {
    /// Creates an empty set for a query.
    #[must_use]
    pub fn new(keywords: &str) -> Self {
        Self {
            sentinel: sentinel_url(keywords),
            urls: HashSet::new(),
        }
    }

    /// Marks a URL as seen, returning false if it must be skipped.
    ///
    /// Empty URLs, repeats and the sentinel link are rejected and never
    /// recorded.
    pub fn admit(&mut self, url: &str) -> bool {
        if url.is_empty() || url == self.sentinel {
            return false;
        }
        self.urls.insert(url.to_string())
    }

    /// Number of distinct URLs admitted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    /// Whether nothing has been admitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_url() {
        assert_eq!(sentinel_url("rust lang"), "http://www.google.com/search?q=rust lang");
    }

    #[test]
    fn test_seen_urls() {
        let mut seen = SeenUrls::new("cats");
        assert!(seen.is_empty());

        assert!(seen.admit("https://en.wikipedia.org/wiki/Cat"));
        assert!(!seen.admit("https://en.wikipedia.org/wiki/Cat"));
        assert!(!seen.admit(""));
        assert!(!seen.admit("http://www.google.com/search?q=cats"));
        assert!(seen.admit("http://www.google.com/search?q=dogs"));

        assert_eq!(seen.len(), 2);
    }
}
