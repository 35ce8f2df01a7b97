//! Resilient fetcher: bounded retries with soft-block detection.
//!
//! The upstream signals rate limiting without error statuses: either a 202
//! or a redirect to a `NNN-NN.js` anomaly page. Both are treated as a failed
//! attempt. A 418 is a hard block and ends the loop immediately.

use regex::Regex;
use std::sync::{Arc, LazyLock};
use tracing::debug;

use crate::config::RetryConfig;
use crate::errors::{Result, SearchError, TransportError};
use crate::logging::LogSink;
use crate::transport::{HttpRequest, HttpResponse, Transport};

static ANOMALY_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{3}-[0-9]{2}\.js").expect("anomaly pattern is valid"));

/// Status the upstream uses for "processing, try later".
const SOFT_BLOCK_STATUS: u16 = 202;

/// Whether a final URL matches the anomaly redirect signature.
#[must_use]
pub fn is_anomaly_url(url: &str) -> bool {
    ANOMALY_URL.is_match(url)
}

/// Issues one logical request with bounded retries.
#[derive(Clone)]
pub struct ResilientFetcher {
    transport: Arc<dyn Transport>,
    retry: RetryConfig,
    logger: Arc<dyn LogSink>,
}

impl std::fmt::Debug for ResilientFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResilientFetcher")
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

impl ResilientFetcher {
    /// Creates a new fetcher.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, retry: RetryConfig, logger: Arc<dyn LogSink>) -> Self {
        Self {
            transport,
            retry,
            logger,
        }
    }

    /// Gets the retry configuration.
    #[must_use]
    pub fn retry(&self) -> &RetryConfig {
        &self.retry
    }

    /// Gets the underlying transport.
    #[must_use]
    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// Gets the log sink.
    #[must_use]
    pub fn logger(&self) -> &Arc<dyn LogSink> {
        &self.logger
    }

    /// Sends the request until a genuine 200 arrives.
    ///
    /// Returns `Ok(None)` when every attempt ends in a status the transport
    /// does not treat as an error (neither 200 nor a soft block). Fails when
    /// the final attempt errors or soft-blocks, or immediately on a 418.
    pub async fn fetch(&self, request: HttpRequest) -> Result<Option<HttpResponse>> {
        let attempts = self.retry.max_attempts;

        for attempt in 1..=attempts {
            debug!(
                method = %request.method,
                url = %request.url,
                attempt,
                max_attempts = attempts,
                "Fetching"
            );

            match self.attempt(request.clone()).await {
                Ok(response) if response.is_ok() => return Ok(Some(response)),
                Ok(response) => {
                    debug!(
                        url = %request.url,
                        status = response.status_code,
                        attempt,
                        "Unexpected status, retrying"
                    );
                }
                Err(err) => {
                    self.logger
                        .warn(&format!("fetch() {} {} {err}", request.method, request.url));
                    if attempt >= attempts || err.is_fatal() {
                        return Err(SearchError::transport(request.url, err));
                    }
                }
            }

            if attempt < attempts {
                tokio::time::sleep(self.retry.delay()).await;
            }
        }

        Ok(None)
    }

    async fn attempt(&self, request: HttpRequest) -> std::result::Result<HttpResponse, TransportError> {
        let response = self.transport.send(request).await?;
        if is_anomaly_url(&response.final_url) || response.status_code == SOFT_BLOCK_STATUS {
            return Err(TransportError::SoftBlock {
                status: response.status_code,
                url: response.final_url,
            });
        }
        Ok(response)
    }
}
