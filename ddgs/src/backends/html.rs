//! Server-rendered HTML backend.
//!
//! Posts the query to `html.duckduckgo.com/html` and walks result pages by
//! resubmitting the hidden fields of the page's "next" form.

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use tracing::debug;

use super::SeenUrls;
use crate::config::ClientConfig;
use crate::errors::{Result, SearchError};
use crate::fetch::ResilientFetcher;
use crate::models::{ResolvedOptions, SafeSearch, SearchResult};
use crate::transport::HttpRequest;

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("selector is valid")
}

static NO_RESULTS: LazyLock<Selector> = LazyLock::new(|| selector("div.no-results"));
static RESULT_BLOCK: LazyLock<Selector> = LazyLock::new(|| selector("div.results_links"));
static RESULT_TITLE: LazyLock<Selector> = LazyLock::new(|| selector("a.result__a"));
static RESULT_SNIPPET: LazyLock<Selector> = LazyLock::new(|| selector("a.result__snippet"));
static NAV_LINK: LazyLock<Selector> = LazyLock::new(|| selector("div.nav-link"));
static HIDDEN_INPUT: LazyLock<Selector> = LazyLock::new(|| selector("input[type='hidden']"));

/// One result block as found on a page, before de-duplication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlEntry {
    /// Trimmed title link text.
    pub title: String,
    /// Raw title link href.
    pub href: String,
    /// Trimmed snippet text, empty when the block has none.
    pub snippet: String,
}

/// Everything the pipeline needs from one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlPage {
    /// The page carries the "no results" marker.
    pub no_results: bool,
    /// Result blocks with a title link, in document order.
    pub entries: Vec<HtmlEntry>,
    /// Hidden fields of the first "next" form, if any.
    pub next_page: Option<Vec<(String, String)>>,
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Extracts result blocks and the next-page form from a page body.
///
/// Blocks without a title link are skipped. Inside the next-page form a
/// repeated field name overwrites the earlier value in place.
#[must_use]
pub fn parse_html_page(body: &str) -> HtmlPage {
    let document = Html::parse_document(body);

    let no_results = document.select(&NO_RESULTS).next().is_some();

    let entries = document
        .select(&RESULT_BLOCK)
        .filter_map(|block| {
            let link = block.select(&RESULT_TITLE).next()?;
            let snippet = block
                .select(&RESULT_SNIPPET)
                .next()
                .map(element_text)
                .unwrap_or_default();
            Some(HtmlEntry {
                title: element_text(link),
                href: link.value().attr("href").unwrap_or_default().to_string(),
                snippet,
            })
        })
        .collect();

    let next_page = document.select(&NAV_LINK).next().map(|nav| {
        let mut fields: Vec<(String, String)> = Vec::new();
        for input in nav.select(&HIDDEN_INPUT) {
            let Some(name) = input.value().attr("name") else {
                continue;
            };
            let value = input.value().attr("value").unwrap_or_default().to_string();
            match fields.iter_mut().find(|(key, _)| key == name) {
                Some(field) => field.1 = value,
                None => fields.push((name.to_string(), value)),
            }
        }
        fields
    });

    HtmlPage {
        no_results,
        entries,
        next_page,
    }
}

/// Builds the form for the first page.
#[must_use]
pub fn html_payload(keywords: &str, options: &ResolvedOptions) -> Vec<(String, String)> {
    let safe = match options.safesearch {
        SafeSearch::On => "1",
        SafeSearch::Moderate => "-1",
        SafeSearch::Off => "-2",
    };

    let mut payload = vec![
        ("q".to_string(), keywords.to_string()),
        ("kl".to_string(), options.region.clone()),
        ("p".to_string(), safe.to_string()),
    ];
    if let Some(df) = options.timelimit.as_param() {
        payload.push(("df".to_string(), df.to_string()));
    }
    payload
}

/// Runs a search against the HTML frontend.
pub async fn search_html(
    fetcher: &ResilientFetcher,
    config: &ClientConfig,
    keywords: &str,
    options: &ResolvedOptions,
) -> Result<Vec<SearchResult>> {
    if keywords.is_empty() {
        return Err(SearchError::MissingKeywords);
    }

    let mut payload = html_payload(keywords, options);
    let mut seen = SeenUrls::new(keywords);
    let mut results = Vec::new();

    for page_number in 0..config.html_max_pages {
        let request = HttpRequest::post_form(&config.endpoints.html, &payload)
            .with_timeout(config.timeout());

        let Some(response) = fetcher.fetch(request).await? else {
            debug!(page = page_number, "HTML fetch exhausted, stopping");
            break;
        };
        if response.body.is_empty() {
            break;
        }

        let page = parse_html_page(&response.body);
        if page.no_results {
            fetcher.logger().warn("No results");
            return Ok(Vec::new());
        }

        let before = results.len();
        for entry in page.entries {
            if seen.admit(&entry.href) {
                results.push(SearchResult::new(entry.title, entry.href, entry.snippet));
            }
        }

        let added = results.len() - before;
        debug!(page = page_number, added, total = results.len(), "HTML page processed");

        match page.next_page {
            Some(fields) if added > 0 => payload = fields,
            _ => break,
        }

        if page_number + 1 < config.html_max_pages {
            tokio::time::sleep(config.html_page_delay()).await;
        }
    }

    Ok(results)
}
