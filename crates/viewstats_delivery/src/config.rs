//! Configuration for the delivery client.

use std::time::Duration;

/// Default time allowed to establish the connection.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_millis(15_000);

/// Default time allowed to read the reply.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(15_000);

/// Configuration for delivering batches to the collector.
#[derive(Debug, Clone)]
pub struct DeliveryConfig {
    /// Collector endpoint URL (e.g., "https://collector.example.com/views").
    pub endpoint: String,
    /// Connect timeout.
    pub connect_timeout: Duration,
    /// Read timeout.
    pub read_timeout: Duration,
    /// Optional bearer token sent in the `Authorization` header.
    pub bearer_token: Option<String>,
}

impl DeliveryConfig {
    /// Creates a configuration for `endpoint` with default timeouts.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            read_timeout: DEFAULT_READ_TIMEOUT,
            bearer_token: None,
        }
    }

    /// Sets the connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets the read timeout.
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Sets the bearer token.
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Upper bound on one exchange: connect plus read.
    pub fn total_timeout(&self) -> Duration {
        self.connect_timeout + self.read_timeout
    }
}
