//! Scripted transport for testing.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;

use crate::errors::TransportError;
use crate::transport::{HttpRequest, HttpResponse, Transport};

/// One scripted outcome.
#[derive(Debug, Clone)]
pub enum Reply {
    /// Return this response.
    Response(HttpResponse),
    /// Fail with this error.
    Error(TransportError),
}

impl Reply {
    /// A 200 response.
    #[must_use]
    pub fn ok(final_url: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Response(HttpResponse::new(200, final_url, body))
    }

    /// A response with an arbitrary status.
    #[must_use]
    pub fn status(status: u16, final_url: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Response(HttpResponse::new(status, final_url, body))
    }

    /// A transport failure.
    #[must_use]
    pub fn error(err: TransportError) -> Self {
        Self::Error(err)
    }
}

/// A transport that replays replies in order and records every request.
///
/// Once the script runs out, further requests fail with a request error.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    /// Creates a transport with the given script.
    #[must_use]
    pub fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Returns the number of requests received.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// Returns the recorded requests.
    #[must_use]
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }

    /// Returns the number of replies not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.replies.lock().len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = request.url.clone();
        self.requests.lock().push(request);
        match self.replies.lock().pop_front() {
            Some(Reply::Response(response)) => Ok(response),
            Some(Reply::Error(err)) => Err(err),
            None => Err(TransportError::Request(format!("no scripted reply for {url}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replays_in_order() {
        let transport = ScriptedTransport::new(vec![
            Reply::ok("http://a", "first"),
            Reply::error(TransportError::Request("boom".to_string())),
        ]);

        let first = transport.send(HttpRequest::get("http://a")).await.unwrap();
        assert_eq!(first.body, "first");

        let second = transport.send(HttpRequest::get("http://b")).await;
        assert!(second.is_err());

        let third = transport.send(HttpRequest::get("http://c")).await.unwrap_err();
        assert!(third.to_string().contains("http://c"));

        assert_eq!(transport.call_count(), 3);
        assert_eq!(transport.requests()[1].url, "http://b");
        assert_eq!(transport.remaining(), 0);
    }
}
