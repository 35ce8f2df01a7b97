//! reqwest-backed transport.

use async_trait::async_trait;
use rand::seq::SliceRandom;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::redirect::Policy;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

use super::{HttpRequest, HttpResponse, Method, Transport};
use crate::errors::TransportError;

/// Browser User-Agent strings, one of which is picked per client.
pub const USER_AGENTS: [&str; 4] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/114.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; WOW64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/114.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/114.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 13_4) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/114.0.0.0 Safari/537.36",
];

/// Referer sent with the default header set.
pub const DEFAULT_REFERER: &str = "https://duckduckgo.com/";

/// Builds the default header set with a randomly chosen User-Agent.
#[must_use]
pub fn default_headers() -> HashMap<String, String> {
    let user_agent = USER_AGENTS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(USER_AGENTS[0]);

    let mut headers = HashMap::new();
    headers.insert("User-Agent".to_string(), user_agent.to_string());
    headers.insert("Referer".to_string(), DEFAULT_REFERER.to_string());
    headers
}

/// Transport built on `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    headers: HashMap<String, String>,
}

impl ReqwestTransport {
    /// Creates a transport with the default header set.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        Self::with_headers(timeout, default_headers())
    }

    /// Creates a transport sending the given headers on every request.
    pub fn with_headers(
        timeout: Duration,
        headers: HashMap<String, String>,
    ) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .default_headers(to_header_map(&headers)?)
            .timeout(timeout)
            .redirect(Policy::limited(10))
            .build()
            .map_err(|e| TransportError::Build(e.to_string()))?;

        Ok(Self { client, headers })
    }

    /// Returns the headers sent on every request.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }
}

fn to_header_map(headers: &HashMap<String, String>) -> Result<HeaderMap, TransportError> {
    let mut map = HeaderMap::new();
    for (key, value) in headers {
        let name = HeaderName::from_bytes(key.as_bytes())
            .map_err(|e| TransportError::Build(format!("invalid header name '{key}': {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| TransportError::Build(format!("invalid value for header '{key}': {e}")))?;
        map.insert(name, value);
    }
    Ok(map)
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
        };
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await?.error_for_status()?;
        let status_code = response.status().as_u16();
        let final_url = response.url().to_string();
        let body = response.text().await?;

        debug!(
            method = %request.method,
            url = %request.url,
            status = status_code,
            final_url = %final_url,
            bytes = body.len(),
            "HTTP response received"
        );

        Ok(HttpResponse {
            status_code,
            final_url,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_headers() {
        let headers = default_headers();
        let user_agent = headers.get("User-Agent").unwrap();

        assert!(USER_AGENTS.contains(&user_agent.as_str()));
        assert_eq!(headers.get("Referer").map(String::as_str), Some(DEFAULT_REFERER));
    }

    #[test]
    fn test_transport_keeps_caller_headers() {
        let mut headers = HashMap::new();
        headers.insert("User-Agent".to_string(), "custom-agent".to_string());

        let transport = ReqwestTransport::with_headers(Duration::from_secs(1), headers).unwrap();
        assert_eq!(transport.headers().len(), 1);
        assert_eq!(transport.headers()["User-Agent"], "custom-agent");
    }

    #[test]
    fn test_invalid_header_is_rejected() {
        let mut headers = HashMap::new();
        headers.insert("Bad Header".to_string(), "x".to_string());

        let err = ReqwestTransport::with_headers(Duration::from_secs(1), headers).unwrap_err();
        assert!(matches!(err, TransportError::Build(_)));
    }
}
