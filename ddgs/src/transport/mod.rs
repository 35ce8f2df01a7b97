//! HTTP transport abstraction.
//!
//! The client never talks to the network directly. Every request goes
//! through a [`Transport`], which keeps connection handling, TLS and header
//! serialization out of the search logic and lets tests script responses.

#[cfg(feature = "reqwest-transport")]
mod http;

#[cfg(feature = "reqwest-transport")]
pub use http::{default_headers, ReqwestTransport, DEFAULT_REFERER, USER_AGENTS};

use async_trait::async_trait;
use std::fmt;
use std::time::Duration;

use crate::errors::TransportError;

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET.
    Get,
    /// POST.
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => f.write_str("GET"),
            Self::Post => f.write_str("POST"),
        }
    }
}

/// A single HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Request method.
    pub method: Method,
    /// Absolute URL, including any query string.
    pub url: String,
    /// Extra headers for this request only.
    pub headers: Vec<(String, String)>,
    /// Request body.
    pub body: Option<String>,
    /// Per-attempt timeout, overriding the transport default.
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    /// Creates a GET request.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            headers: Vec::new(),
            body: None,
            timeout: None,
        }
    }

    /// Creates a POST request with a form-encoded body.
    #[must_use]
    pub fn post_form(url: impl Into<String>, fields: &[(String, String)]) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            headers: vec![(
                "Content-Type".to_string(),
                "application/x-www-form-urlencoded".to_string(),
            )],
            body: Some(encode_form(fields)),
            timeout: None,
        }
    }

    /// Sets the per-attempt timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Response returned by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status_code: u16,
    /// Final URL after redirects.
    pub final_url: String,
    /// Response body as text.
    pub body: String,
}

impl HttpResponse {
    /// Creates a response.
    #[must_use]
    pub fn new(status_code: u16, final_url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            status_code,
            final_url: final_url.into(),
            body: body.into(),
        }
    }

    /// Whether the response is a plain 200.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status_code == 200
    }
}

/// Protocol for sending HTTP requests.
///
/// Redirects are always followed so the fetcher can inspect the final URL.
/// Implementations return `Err` for connection failures and for 4xx/5xx
/// statuses. Any other status, including 202, comes back as `Ok` and is
/// judged by the caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends a request and returns the response.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Form-encodes key/value pairs in the given order.
#[must_use]
pub fn encode_form(fields: &[(String, String)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(fields.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .finish()
}

/// Appends form-encoded pairs to a base URL as its query string.
#[must_use]
pub fn with_query(base: &str, fields: &[(String, String)]) -> String {
    if fields.is_empty() {
        return base.to_string();
    }
    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{base}{separator}{}", encode_form(fields))
}
