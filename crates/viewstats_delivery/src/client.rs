//! Batch delivery client.

use crate::config::DeliveryConfig;
use crate::http::{HttpClient, HttpRequest};
use crate::outcome::Outcome;
use tracing::{debug, error, info, warn};
use viewstats_event::{encode_batch, Batch};

/// Delivers batches to the collector.
///
/// Each [`DeliveryClient::send`] is one self-contained exchange: encode,
/// POST, classify. The client keeps no state between calls and never
/// mutates the batch it is given.
pub struct DeliveryClient<C: HttpClient> {
    config: DeliveryConfig,
    client: C,
}

impl<C: HttpClient> DeliveryClient<C> {
    /// Creates a delivery client.
    pub fn new(config: DeliveryConfig, client: C) -> Self {
        Self { config, client }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &DeliveryConfig {
        &self.config
    }

    /// Returns the underlying HTTP client.
    pub fn http_client(&self) -> &C {
        &self.client
    }

    /// Sends `batch` and classifies the result.
    ///
    /// Never fails: every error path maps onto an [`Outcome`].
    pub fn send(&self, batch: &Batch) -> Outcome {
        let body = match encode_batch(batch) {
            Ok(body) => body,
            Err(e) => {
                // Resending the same views would fail the same way.
                error!(error = %e, events = batch.len(), "failed to encode batch");
                return Outcome::Rejected;
            }
        };

        let request = HttpRequest::json(&self.config, body);
        let events = batch.len();

        match self.client.post(&request) {
            Ok(response) => {
                let outcome = Outcome::from_status(response.status);
                match outcome {
                    Outcome::Accepted => {
                        debug!(status = response.status, events, "batch accepted");
                    }
                    Outcome::PartiallyAccepted => {
                        info!(
                            status = response.status,
                            events, "batch partially accepted, unknown pages dropped by collector"
                        );
                    }
                    Outcome::Rejected => {
                        info!(status = response.status, events, "batch rejected as malformed");
                    }
                    Outcome::TransientFailure => {
                        warn!(status = response.status, events, "collector returned unexpected status");
                    }
                }
                outcome
            }
            Err(e) => {
                warn!(error = %e, timeout = e.is_timeout(), events, "delivery failed");
                Outcome::TransientFailure
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DeliveryError;
    use crate::mock::{MockHttpClient, MockReply};
    use uuid::Uuid;
    use viewstats_event::{decode_batch, PageView, SessionId, SubjectId};

    fn batch_of(n: u64) -> Batch {
        let session = SessionId::new();
        (0..n)
            .map(|at| PageView::new(SubjectId::from_uuid(Uuid::new_v4()), session, 1_000 + at))
            .collect()
    }

    fn client(mock: MockHttpClient) -> DeliveryClient<MockHttpClient> {
        DeliveryClient::new(
            DeliveryConfig::new("https://collector.example.com/views"),
            mock,
        )
    }

    #[test]
    fn classifies_each_status_family() {
        let cases = [
            (200, Outcome::Accepted),
            (206, Outcome::PartiallyAccepted),
            (400, Outcome::Rejected),
            (422, Outcome::Rejected),
            (500, Outcome::TransientFailure),
            (404, Outcome::TransientFailure),
        ];

        for (status, expected) in cases {
            let delivery = client(MockHttpClient::always(status));
            assert_eq!(delivery.send(&batch_of(2)), expected, "status {status}");
        }
    }

    #[test]
    fn transport_errors_are_transient() {
        let mock = MockHttpClient::new();
        mock.push_reply(MockReply::Fail(DeliveryError::Timeout));
        mock.push_reply(MockReply::Fail(DeliveryError::Connect("refused".into())));
        mock.push_reply(MockReply::Fail(DeliveryError::Io("reset".into())));
        let delivery = client(mock);

        for _ in 0..3 {
            assert_eq!(delivery.send(&batch_of(1)), Outcome::TransientFailure);
        }
    }

    #[test]
    fn request_body_is_payload_in_order() {
        let delivery = client(MockHttpClient::new());
        let batch = batch_of(5);

        delivery.send(&batch);

        let requests = delivery.http_client().requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, "https://collector.example.com/views");
        assert_eq!(decode_batch(&requests[0].body).unwrap(), batch);
    }

    #[test]
    fn bearer_token_is_forwarded() {
        let delivery = DeliveryClient::new(
            DeliveryConfig::new("https://collector.example.com/views").with_bearer_token("abc"),
            MockHttpClient::new(),
        );
        delivery.send(&batch_of(1));

        let requests = delivery.http_client().requests();
        assert_eq!(requests[0].bearer_token.as_deref(), Some("abc"));
    }

    #[test]
    fn send_does_not_consume_batch() {
        let delivery = client(MockHttpClient::always(503));
        let batch = batch_of(3);
        let before = batch.clone();

        assert_eq!(delivery.send(&batch), Outcome::TransientFailure);
        assert_eq!(batch, before);
    }
}
