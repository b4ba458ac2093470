//! reqwest-backed HTTP client.

use crate::config::DeliveryConfig;
use crate::error::{DeliveryError, DeliveryResult};
use crate::http::{HttpClient, HttpRequest, HttpResponse};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::sync::Arc;
use tokio::runtime::{Builder as TokioBuilder, Runtime};

/// HTTPS client built on reqwest.
///
/// Requests run to completion on a current-thread tokio runtime owned by
/// the client, so [`HttpClient::post`] blocks the calling thread. It must
/// not be called from inside another tokio runtime.
///
/// The connect and read timeouts are fixed when the client is built. The
/// read timeout applies to each read from the socket, so a collector that
/// goes silent mid-exchange fails with [`DeliveryError::Timeout`]. Each
/// request is additionally bounded by its connect plus read deadlines.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: Client,
    runtime: Arc<Runtime>,
}

impl ReqwestClient {
    /// Builds a client using the timeouts in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError::ClientSetup`] if the TLS backend or the
    /// runtime cannot be initialised.
    pub fn new(config: &DeliveryConfig) -> DeliveryResult<Self> {
        let runtime = TokioBuilder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| DeliveryError::ClientSetup(e.to_string()))?;
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .read_timeout(config.read_timeout)
            .timeout(config.total_timeout())
            .build()
            .map_err(|e| DeliveryError::ClientSetup(e.to_string()))?;
        Ok(Self {
            client,
            runtime: Arc::new(runtime),
        })
    }
}

fn classify(err: reqwest::Error) -> DeliveryError {
    if err.is_timeout() {
        DeliveryError::Timeout
    } else if err.is_connect() {
        DeliveryError::Connect(err.to_string())
    } else {
        DeliveryError::Io(err.to_string())
    }
}

impl HttpClient for ReqwestClient {
    fn post(&self, request: &HttpRequest) -> DeliveryResult<HttpResponse> {
        let mut builder = self
            .client
            .post(&request.url)
            .header(CONTENT_TYPE, request.content_type)
            .timeout(request.connect_timeout + request.read_timeout)
            .body(request.body.clone());

        if let Some(token) = &request.bearer_token {
            builder = builder.bearer_auth(token);
        }

        self.runtime.block_on(async move {
            let response = builder.send().await.map_err(classify)?;
            let status = response.status().as_u16();
            let body = response.bytes().await.map_err(classify)?.to_vec();
            Ok(HttpResponse { status, body })
        })
    }
}
