//! HTTP client abstraction.
//!
//! The delivery client only needs "POST these bytes, give me the status".
//! Implement [`HttpClient`] to plug in any HTTP stack; the crate ships a
//! reqwest implementation behind the `reqwest` feature and a scripted mock.

use crate::config::DeliveryConfig;
use crate::error::DeliveryResult;
use std::time::Duration;

/// Content type of every request body.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// A fully prepared POST request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Target URL.
    pub url: String,
    /// Request body.
    pub body: Vec<u8>,
    /// Value of the `Content-Type` header.
    pub content_type: &'static str,
    /// Bearer token for the `Authorization` header, if any.
    pub bearer_token: Option<String>,
    /// Connect deadline.
    pub connect_timeout: Duration,
    /// Read deadline.
    pub read_timeout: Duration,
}

impl HttpRequest {
    /// Builds a JSON POST to the configured endpoint.
    pub fn json(config: &DeliveryConfig, body: Vec<u8>) -> Self {
        Self {
            url: config.endpoint.clone(),
            body,
            content_type: JSON_CONTENT_TYPE,
            bearer_token: config.bearer_token.clone(),
            connect_timeout: config.connect_timeout,
            read_timeout: config.read_timeout,
        }
    }
}

/// The collector's reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status code.
    pub status: u16,
    /// Body, read to the end but not interpreted.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a response with an empty body.
    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: Vec::new(),
        }
    }
}

/// HTTP client abstraction.
///
/// Implementations perform exactly one exchange per call and must honour
/// the request's connect and read timeouts. Any failure before a status
/// line is received is returned as a [`crate::DeliveryError`].
pub trait HttpClient: Send + Sync {
    /// Sends a POST request and returns the reply.
    fn post(&self, request: &HttpRequest) -> DeliveryResult<HttpResponse>;
}

impl<C: HttpClient + ?Sized> HttpClient for std::sync::Arc<C> {
    fn post(&self, request: &HttpRequest) -> DeliveryResult<HttpResponse> {
        (**self).post(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_request_carries_config() {
        let config = DeliveryConfig::new("https://collector.example.com/views")
            .with_bearer_token("t0k3n")
            .with_read_timeout(Duration::from_secs(1));

        let request = HttpRequest::json(&config, b"{}".to_vec());

        assert_eq!(request.url, "https://collector.example.com/views");
        assert_eq!(request.content_type, "application/json; charset=UTF-8");
        assert_eq!(request.bearer_token.as_deref(), Some("t0k3n"));
        assert_eq!(request.read_timeout, Duration::from_secs(1));
        assert_eq!(request.body, b"{}");
    }
}
