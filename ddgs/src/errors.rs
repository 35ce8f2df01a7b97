//! Error types for the ddgs client.
//!
//! Only conditions that end a whole search call are errors. Running out of
//! retries without a hard failure, or an unparseable page mid-pagination, is
//! reported as "no more results" instead.

use thiserror::Error;

/// The main error type for search operations.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The keyword string was empty.
    #[error("keywords are mandatory")]
    MissingKeywords,

    /// The `vqd` session token could not be extracted for the query.
    #[error("unable to acquire vqd token for keywords '{keywords}'")]
    TokenAcquisitionFailed {
        /// The query the token was requested for.
        keywords: String,
    },

    /// The backend name is not one the client knows about.
    #[error("unknown backend '{0}', expected one of: api, html, lite")]
    UnknownBackend(String),

    /// The backend is known but has no implementation.
    #[error("backend '{0}' is not implemented, use api or html")]
    BackendNotImplemented(String),

    /// A request failed in a way that must not be retried.
    #[error("request to {url} failed: {source}")]
    TransportFatal {
        /// The URL that was being requested.
        url: String,
        /// The underlying transport failure.
        #[source]
        source: TransportError,
    },

    /// The client configuration is invalid or could not be loaded.
    #[error("configuration error: {0}")]
    Config(String),
}

impl SearchError {
    /// Creates a token acquisition error for the given keywords.
    #[must_use]
    pub fn token_failed(keywords: impl Into<String>) -> Self {
        Self::TokenAcquisitionFailed {
            keywords: keywords.into(),
        }
    }

    /// Creates a fatal transport error.
    #[must_use]
    pub fn transport(url: impl Into<String>, source: TransportError) -> Self {
        Self::TransportFatal {
            url: url.into(),
            source,
        }
    }

    /// Whether the failure came from the network layer.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::TransportFatal { .. })
    }
}

/// Errors raised by a [`Transport`](crate::transport::Transport) or by the
/// fetcher's own response inspection.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The server answered with an error status (4xx/5xx).
    #[error("HTTP status {status} for {url}")]
    Status {
        /// Response status code.
        status: u16,
        /// Final URL of the response.
        url: String,
    },

    /// The request could not be completed (connect, timeout, body read).
    #[error("request error: {0}")]
    Request(String),

    /// The upstream answered but signalled rate limiting or bot suspicion.
    #[error("soft block from upstream (status {status}, url {url})")]
    SoftBlock {
        /// Response status code.
        status: u16,
        /// Final URL of the response.
        url: String,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Build(String),
}

impl TransportError {
    /// Whether this error is the upstream's hard block signal (418).
    ///
    /// A hard block aborts the retry loop regardless of remaining attempts.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::Status { status, .. } => *status == 418,
            Self::SoftBlock { .. } => false,
            Self::Request(message) | Self::Build(message) => message.contains("418"),
        }
    }
}

#[cfg(feature = "reqwest-transport")]
impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        match (err.status(), err.url()) {
            (Some(status), Some(url)) => Self::Status {
                status: status.as_u16(),
                url: url.to_string(),
            },
            _ => Self::Request(err.to_string()),
        }
    }
}

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_teapot_status_is_fatal() {
        let err = TransportError::Status {
            status: 418,
            url: "https://duckduckgo.com".to_string(),
        };
        assert!(err.is_fatal());
    }

    #[test]
    fn test_teapot_in_message_is_fatal() {
        let err = TransportError::Request("Response code 418 (I'm a Teapot)".to_string());
        assert!(err.is_fatal());
    }

    #[test]
    fn test_other_errors_are_retryable() {
        let status = TransportError::Status {
            status: 503,
            url: "https://duckduckgo.com".to_string(),
        };
        let timeout = TransportError::Request("operation timed out".to_string());
        let soft = TransportError::SoftBlock {
            status: 202,
            url: "https://duckduckgo.com".to_string(),
        };

        assert!(!status.is_fatal());
        assert!(!timeout.is_fatal());
        assert!(!soft.is_fatal());
    }

    #[test]
    fn test_url_digits_do_not_count_as_teapot() {
        let err = TransportError::SoftBlock {
            status: 200,
            url: "https://duckduckgo.com/418-12.js".to_string(),
        };
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_error_messages_carry_context() {
        let err = SearchError::token_failed("rust lang");
        assert_eq!(
            err.to_string(),
            "unable to acquire vqd token for keywords 'rust lang'"
        );

        let err = SearchError::transport(
            "https://html.duckduckgo.com/html",
            TransportError::Request("connection reset".to_string()),
        );
        assert!(err.is_transport());
        assert!(err.to_string().contains("html.duckduckgo.com"));
        assert!(err.to_string().contains("connection reset"));
    }

    #[test]
    fn test_backend_errors_are_distinct() {
        let unknown = SearchError::UnknownBackend("bogus".to_string());
        let missing = SearchError::BackendNotImplemented("lite".to_string());

        assert!(unknown.to_string().starts_with("unknown backend"));
        assert!(missing.to_string().contains("not implemented"));
    }
}
