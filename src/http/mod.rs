//! HTTP provider for beacon-node APIs.
//!
//! This module binds declared route models to an actual transport. It builds
//! each request (method, URL, headers, body), negotiates the wire format
//! between JSON and SSZ, and decodes the response into the endpoint's
//! declared result type.
//!
//! # Architecture
//!
//! - [`Eth2HttpClient`] - Scoped client owning the transport; hands out API root nodes
//! - [`Eth2HttpProvider`] - The [`Eth2Provider`](crate::core::Eth2Provider) implementation
//! - [`Eth2HttpOptions`] - Base URL, default content types, timeout and retries
//! - [`HttpError`] - Error types for transport operations
//!
//! # Features
//!
//! - **Content Negotiation**: `Accept` and `Content-Type` are chosen per endpoint
//! - **Optional Retries**: Exponential backoff for transient failures, off by default
//! - **Latency Tracking**: Built-in measurement of request round-trip times
//!
//! # Error Handling
//!
//! Transport failures surface as [`HttpError`], wrapped in
//! [`ApiError::Http`](crate::error::ApiError::Http):
//!
//! - Network failures (connection refused, timeouts)
//! - Server errors (4xx/5xx responses, with the response body)
//! - URL parsing errors

mod error;
mod eth2_http_client;
mod http_client;
mod provider;
mod types;

pub use error::HttpError;
pub use eth2_http_client::Eth2HttpClient;
pub use provider::Eth2HttpProvider;
pub use types::{DEFAULT_API_BASE_URL, DEFAULT_TIMEOUT, Eth2HttpOptions};
