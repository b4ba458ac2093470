//! Scripted HTTP client for testing.

use crate::error::{DeliveryError, DeliveryResult};
use crate::http::{HttpClient, HttpRequest, HttpResponse};
use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use viewstats_event::{decode_batch, Batch};

/// One scripted reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockReply {
    /// Reply with this status code.
    Status(u16),
    /// Fail with this error before any status is received.
    Fail(DeliveryError),
}

#[derive(Debug)]
struct MockState {
    replies: VecDeque<MockReply>,
    fallback: MockReply,
    requests: Vec<HttpRequest>,
    held: bool,
}

/// A mock HTTP client.
///
/// Replies are taken from a script in order; once the script is exhausted
/// the fallback reply (200 unless changed) is used. Every request is
/// captured. [`MockHttpClient::hold`] parks callers inside `post` until
/// [`MockHttpClient::release`], which keeps a delivery in flight for as long
/// as a test needs.
#[derive(Debug)]
pub struct MockHttpClient {
    state: Mutex<MockState>,
    changed: Condvar,
}

impl MockHttpClient {
    /// Creates a mock that answers 200 to everything.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MockState {
                replies: VecDeque::new(),
                fallback: MockReply::Status(200),
                requests: Vec::new(),
                held: false,
            }),
            changed: Condvar::new(),
        }
    }

    /// Creates a mock that answers `status` to everything.
    pub fn always(status: u16) -> Self {
        let mock = Self::new();
        mock.set_fallback(MockReply::Status(status));
        mock
    }

    /// Queues a reply for the next unanswered request.
    pub fn push_reply(&self, reply: MockReply) {
        self.state.lock().replies.push_back(reply);
    }

    /// Queues a status reply.
    pub fn push_status(&self, status: u16) {
        self.push_reply(MockReply::Status(status));
    }

    /// Sets the reply used once the script is exhausted.
    pub fn set_fallback(&self, reply: MockReply) {
        self.state.lock().fallback = reply;
    }

    /// Parks subsequent `post` calls until [`MockHttpClient::release`].
    pub fn hold(&self) {
        self.state.lock().held = true;
    }

    /// Lets parked and future `post` calls proceed.
    pub fn release(&self) {
        self.state.lock().held = false;
        self.changed.notify_all();
    }

    /// Blocks until at least `count` requests have arrived or `timeout`
    /// passes. Returns true if the count was reached.
    pub fn wait_for_requests(&self, count: usize, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut state = self.state.lock();
        while state.requests.len() < count {
            if self.changed.wait_until(&mut state, deadline).timed_out() {
                return state.requests.len() >= count;
            }
        }
        true
    }

    /// All captured requests, in arrival order.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.state.lock().requests.clone()
    }

    /// Number of captured requests.
    pub fn request_count(&self) -> usize {
        self.state.lock().requests.len()
    }

    /// Captured request bodies decoded back into batches.
    ///
    /// Bodies that do not decode are skipped.
    pub fn received_batches(&self) -> Vec<Batch> {
        self.state
            .lock()
            .requests
            .iter()
            .filter_map(|request| decode_batch(&request.body).ok())
            .collect()
    }
}

impl Default for MockHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for MockHttpClient {
    fn post(&self, request: &HttpRequest) -> DeliveryResult<HttpResponse> {
        let mut state = self.state.lock();
        state.requests.push(request.clone());
        self.changed.notify_all();

        while state.held {
            self.changed.wait(&mut state);
        }

        let reply = match state.replies.pop_front() {
            Some(reply) => reply,
            None => state.fallback.clone(),
        };

        match reply {
            MockReply::Status(status) => Ok(HttpResponse::status(status)),
            MockReply::Fail(err) => Err(err),
        }
    }
}
