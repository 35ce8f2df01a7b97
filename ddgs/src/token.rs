//! `vqd` session token acquisition.
//!
//! The structured feed refuses queries without a `vqd` token bound to the
//! exact keyword string. The token is embedded in the root search page in
//! one of a few quoting styles.

use tracing::debug;

use crate::errors::Result;
use crate::fetch::ResilientFetcher;
use crate::transport::HttpRequest;

/// Delimiter pairs tried in order when scanning for the token.
pub const TOKEN_PATTERNS: [(&str, &str); 3] = [("vqd=\"", "\""), ("vqd=", "&"), ("vqd='", "'")];

/// Extracts the token from a page body.
///
/// Returns the first non-empty substring found between a pattern's prefix
/// and the next occurrence of its suffix.
#[must_use]
pub fn extract_vqd(body: &str) -> Option<String> {
    TOKEN_PATTERNS.iter().find_map(|(prefix, suffix)| {
        let start = body.find(prefix)? + prefix.len();
        let len = body[start..].find(suffix)?;
        let token = &body[start..start + len];
        (!token.is_empty()).then(|| token.to_string())
    })
}

/// Fetches a fresh token for the keywords.
///
/// Returns `Ok(None)` when the page could not be fetched or carries no
/// token; callers cannot use the structured feed in that case.
pub async fn acquire_vqd(
    fetcher: &ResilientFetcher,
    root_url: &str,
    keywords: &str,
) -> Result<Option<String>> {
    let request = HttpRequest::post_form(root_url, &[("q".to_string(), keywords.to_string())]);

    let token = fetcher
        .fetch(request)
        .await?
        .and_then(|response| extract_vqd(&response.body));

    match &token {
        Some(vqd) => debug!(keywords = %keywords, vqd = %vqd, "Acquired vqd token"),
        None => fetcher
            .logger()
            .warn(&format!("acquire_vqd() keywords={keywords} vqd not found")),
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RetryConfig;
    use crate::logging::CollectingLogSink;
    use crate::testing::{token_page, Reply, ScriptedTransport};
    use crate::transport::Method;
    use std::sync::Arc;

    const ROOT: &str = "https://duckduckgo.com";

    #[test]
    fn test_extract_double_quoted() {
        assert_eq!(
            extract_vqd(r#"<script>var x = {vqd="4-1234567890", y: 1}</script>"#),
            Some("4-1234567890".to_string())
        );
    }

    #[test]
    fn test_extract_ampersand_terminated() {
        assert_eq!(
            extract_vqd("/d.js?q=cats&vqd=4-99887766&p=1"),
            Some("4-99887766".to_string())
        );
    }

    #[test]
    fn test_extract_single_quoted() {
        assert_eq!(extract_vqd("vqd='4-5551212'"), Some("4-5551212".to_string()));
    }

    #[test]
    fn test_falls_through_patterns_in_order() {
        // No quoted form present, the ampersand pattern wins.
        assert_eq!(extract_vqd("vqd=abc&rest"), Some("abc".to_string()));
        assert_eq!(extract_vqd("no token here"), None);
        assert_eq!(extract_vqd("vqd=\"\""), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_acquire_posts_keywords() {
        let transport = Arc::new(ScriptedTransport::new(vec![Reply::ok(ROOT, token_page("4-42"))]));
        let fetcher = ResilientFetcher::new(
            transport.clone(),
            RetryConfig::default(),
            Arc::new(CollectingLogSink::new()),
        );

        let vqd = acquire_vqd(&fetcher, ROOT, "rust async").await.unwrap();

        assert_eq!(vqd, Some("4-42".to_string()));
        let request = &transport.requests()[0];
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.url, ROOT);
        assert_eq!(request.body.as_deref(), Some("q=rust+async"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_token_logs_warning() {
        let transport = Arc::new(ScriptedTransport::new(vec![Reply::ok(ROOT, "<html></html>")]));
        let logger = Arc::new(CollectingLogSink::new());
        let fetcher = ResilientFetcher::new(transport, RetryConfig::default(), logger.clone());

        let vqd = acquire_vqd(&fetcher, ROOT, "cats").await.unwrap();

        assert_eq!(vqd, None);
        assert_eq!(logger.warnings(), vec!["acquire_vqd() keywords=cats vqd not found".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_fetch_yields_none() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            Reply::status(204, ROOT, ""),
            Reply::status(204, ROOT, ""),
            Reply::status(204, ROOT, ""),
        ]));
        let fetcher = ResilientFetcher::new(
            transport,
            RetryConfig::default(),
            Arc::new(CollectingLogSink::new()),
        );

        assert_eq!(acquire_vqd(&fetcher, ROOT, "cats").await.unwrap(), None);
    }
}
