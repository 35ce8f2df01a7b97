//! Structured-feed backend.
//!
//! Queries `links.duckduckgo.com/d.js` with a `vqd` token at the feed's
//! fixed offsets. The feed is JSON-shaped; rows carry the title in `t`, the
//! URL in `u` and the snippet markup in `a`.

use serde::Deserialize;
use tracing::debug;

use super::SeenUrls;
use crate::config::ClientConfig;
use crate::errors::{Result, SearchError};
use crate::fetch::ResilientFetcher;
use crate::models::{ResolvedOptions, SafeSearch, SearchResult};
use crate::text::{normalize_text, normalize_url};
use crate::token::acquire_vqd;
use crate::transport::{with_query, HttpRequest};

/// One row of a feed page.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct FeedRow {
    /// Title markup.
    #[serde(default, rename = "t")]
    pub title: Option<String>,
    /// Result URL.
    #[serde(default, rename = "u")]
    pub url: Option<String>,
    /// Snippet markup.
    #[serde(default, rename = "a")]
    pub snippet: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FeedPage {
    #[serde(default)]
    results: Option<Vec<FeedRow>>,
}

/// Parses a feed body into its rows.
///
/// Returns `None` when the body is not a results container or holds no
/// rows; either way pagination ends.
#[must_use]
pub fn parse_feed_page(body: &str) -> Option<Vec<FeedRow>> {
    serde_json::from_str::<FeedPage>(body)
        .ok()?
        .results
        .filter(|rows| !rows.is_empty())
}

/// Builds the query parameters for one feed page.
///
/// Safe search maps to an `ex`/`p`/`sp` triple; fields without a value for
/// the chosen level are omitted, as is `df` when there is no time limit.
#[must_use]
pub fn api_payload(
    keywords: &str,
    options: &ResolvedOptions,
    vqd: &str,
    offset: u32,
) -> Vec<(String, String)> {
    let (ex, p, sp) = match options.safesearch {
        SafeSearch::Off => (Some("-2"), None, None),
        SafeSearch::Moderate => (Some("-1"), Some(""), Some("0")),
        SafeSearch::On => (None, Some("1"), Some("0")),
    };

    let offset = offset.to_string();

    let fields = [
        ("q", Some(keywords)),
        ("kl", Some(options.region.as_str())),
        ("l", Some(options.region.as_str())),
        ("s", Some(offset.as_str())),
        ("df", options.timelimit.as_param()),
        ("vqd", Some(vqd)),
        ("o", Some("json")),
        ("ex", ex),
        ("p", p),
        ("sp", sp),
    ];

    fields
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key.to_string(), v.to_string())))
        .collect()
}

/// Runs a search against the structured feed.
pub async fn search_api(
    fetcher: &ResilientFetcher,
    config: &ClientConfig,
    keywords: &str,
    options: &ResolvedOptions,
) -> Result<Vec<SearchResult>> {
    if keywords.is_empty() {
        return Err(SearchError::MissingKeywords);
    }

    let vqd = acquire_vqd(fetcher, &config.endpoints.root, keywords)
        .await?
        .ok_or_else(|| SearchError::token_failed(keywords))?;

    let mut seen = SeenUrls::new(keywords);
    let mut results = Vec::new();

    for &offset in &config.api_offsets {
        let url = with_query(
            &config.endpoints.api,
            &api_payload(keywords, options, &vqd, offset),
        );
        let request = HttpRequest::get(url).with_timeout(config.timeout());

        let Some(response) = fetcher.fetch(request).await? else {
            debug!(offset, "Feed fetch exhausted, stopping");
            break;
        };
        let Some(rows) = parse_feed_page(&response.body) else {
            debug!(offset, "Feed page empty or unparseable, stopping");
            break;
        };

        let before = results.len();
        for row in rows {
            let href = row.url.unwrap_or_default();
            if !seen.admit(&href) {
                continue;
            }
            let body = normalize_text(row.snippet.as_deref().unwrap_or_default());
            if body.is_empty() {
                continue;
            }
            results.push(SearchResult {
                title: normalize_text(row.title.as_deref().unwrap_or_default()),
                url: normalize_url(&href),
                snippet: body,
            });
        }

        let added = results.len() - before;
        debug!(offset, added, total = results.len(), "Feed page processed");
        if added == 0 {
            break;
        }
    }

    Ok(results)
}
