//! # viewstats Delivery
//!
//! Sends batches to the collector and classifies what happened.
//!
//! This crate provides:
//! - [`HttpClient`] - the seam to the network (reqwest, a mock, anything)
//! - [`DeliveryClient`] - encodes a batch, posts it, classifies the reply
//! - [`Outcome`] - the classification that drives clear-or-persist
//! - [`MockHttpClient`] - a scripted client for tests
//!
//! ## Classification
//!
//! | reply | outcome |
//! |---|---|
//! | 2xx (except 206) | [`Outcome::Accepted`] |
//! | 206 Partial Content | [`Outcome::PartiallyAccepted`] |
//! | 400 / 422 | [`Outcome::Rejected`] |
//! | anything else, timeout, I/O failure | [`Outcome::TransientFailure`] |
//!
//! The delivery client is stateless: it never touches the live buffer or
//! the snapshot store. Acting on the outcome is the tracker's job.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod config;
mod error;
mod http;
mod mock;
mod outcome;
#[cfg(feature = "reqwest")]
mod reqwest_client;

pub use client::DeliveryClient;
pub use config::{DeliveryConfig, DEFAULT_CONNECT_TIMEOUT, DEFAULT_READ_TIMEOUT};
pub use error::{DeliveryError, DeliveryResult};
pub use http::{HttpClient, HttpRequest, HttpResponse, JSON_CONTENT_TYPE};
pub use mock::{MockHttpClient, MockReply};
pub use outcome::Outcome;
#[cfg(feature = "reqwest")]
pub use reqwest_client::ReqwestClient;
