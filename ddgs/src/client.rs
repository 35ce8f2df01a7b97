//! The search client.

use std::sync::Arc;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::backends::{search_api, search_html};
use crate::config::ClientConfig;
use crate::errors::{Result, SearchError};
use crate::fetch::ResilientFetcher;
use crate::logging::{LogSink, TracingLogSink};
use crate::models::{Backend, ResolvedOptions, SearchOptions, SearchResult};
use crate::transport::Transport;

/// DuckDuckGo text search client.
///
/// Configuration is fixed at construction. A client holds no per-search
/// state, so concurrent searches on one client are independent.
#[derive(Clone)]
pub struct DDGS {
    config: ClientConfig,
    fetcher: ResilientFetcher,
}

impl std::fmt::Debug for DDGS {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DDGS")
            .field("config", &self.config)
            .field("fetcher", &self.fetcher)
            .finish()
    }
}

impl DDGS {
    /// Creates a client with the default configuration.
    #[cfg(feature = "reqwest-transport")]
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Creates a client backed by `reqwest`.
    ///
    /// Configured headers replace the default User-Agent/Referer set.
    #[cfg(feature = "reqwest-transport")]
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        use crate::transport::{default_headers, ReqwestTransport};

        let headers = config.headers.clone().unwrap_or_else(default_headers);
        let transport = ReqwestTransport::with_headers(config.timeout(), headers)
            .map_err(|e| SearchError::Config(e.to_string()))?;
        Self::with_transport(Arc::new(transport), config)
    }

    /// Creates a client on top of an arbitrary transport.
    pub fn with_transport(transport: Arc<dyn Transport>, config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let logger: Arc<dyn LogSink> = Arc::new(TracingLogSink::new(config.log_level));
        let fetcher = ResilientFetcher::new(transport, config.retry.clone(), logger);
        Ok(Self { config, fetcher })
    }

    /// Replaces the log sink.
    #[must_use]
    pub fn with_logger(mut self, logger: Arc<dyn LogSink>) -> Self {
        self.fetcher = ResilientFetcher::new(
            self.fetcher.transport().clone(),
            self.config.retry.clone(),
            logger,
        );
        self
    }

    /// Gets the configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Runs a text search.
    ///
    /// Unset options default to region `wt-wt`, moderate safe search, no
    /// time limit and the `api` backend.
    pub async fn text(&self, keywords: &str, options: SearchOptions) -> Result<Vec<SearchResult>> {
        let options = options.resolve();
        let span = info_span!(
            "ddgs.search",
            search_id = %Uuid::new_v4(),
            keywords = %keywords,
            backend = %options.backend,
        );

        async move {
            let results = match options.backend {
                Backend::Api => self.run_api(keywords, &options).await,
                Backend::Html => self.run_html(keywords, &options).await,
                Backend::Lite => Err(SearchError::BackendNotImplemented(
                    Backend::Lite.to_string(),
                )),
            }?;
            info!(count = results.len(), "Search completed");
            Ok(results)
        }
        .instrument(span)
        .await
    }

    /// Runs a search against the structured feed only.
    pub async fn text_api(&self, keywords: &str, options: SearchOptions) -> Result<Vec<SearchResult>> {
        self.text(keywords, options.with_backend(Backend::Api)).await
    }

    /// Runs a search against the HTML frontend only.
    pub async fn text_html(&self, keywords: &str, options: SearchOptions) -> Result<Vec<SearchResult>> {
        self.text(keywords, options.with_backend(Backend::Html)).await
    }

    /// Runs a text search with the backend given by name.
    ///
    /// Fails with [`SearchError::UnknownBackend`] for names other than
    /// `api`, `html` and `lite`.
    pub async fn text_with_backend(
        &self,
        keywords: &str,
        backend: &str,
        options: SearchOptions,
    ) -> Result<Vec<SearchResult>> {
        let backend: Backend = backend.parse()?;
        self.text(keywords, options.with_backend(backend)).await
    }

    async fn run_api(&self, keywords: &str, options: &ResolvedOptions) -> Result<Vec<SearchResult>> {
        search_api(&self.fetcher, &self.config, keywords, options).await
    }

    async fn run_html(&self, keywords: &str, options: &ResolvedOptions) -> Result<Vec<SearchResult>> {
        search_html(&self.fetcher, &self.config, keywords, options).await
    }
}
