//! Error types for HTTP transport operations.
//!
//! This module defines the [`HttpError`] enum which covers every failure of
//! the transport underneath the beacon-node provider. Protocol-level problems
//! (content types, decoding) are reported by [`ApiError`](crate::error::ApiError),
//! which wraps this type.

use thiserror::Error;

/// Errors that can occur while talking to a beacon node over HTTP.
///
/// # Error Categories
///
/// - **Network errors**: [`RequestFailed`](HttpError::RequestFailed),
///   [`MiddlewareError`](HttpError::MiddlewareError)
/// - **Server errors**: [`ServerError`](HttpError::ServerError)
/// - **Client errors**: [`UrlError`](HttpError::UrlError),
///   [`InvalidBaseUrl`](HttpError::InvalidBaseUrl)
///
/// # Example
///
/// ```rust,no_run
/// use eth2_api::http::HttpError;
///
/// fn handle_error(err: HttpError) {
///     match err {
///         HttpError::ServerError { status, body } => {
///             eprintln!("Beacon node returned {}: {}", status, body);
///         }
///         HttpError::RequestFailed(e) => {
///             eprintln!("Network error: {}", e);
///         }
///         _ => eprintln!("Other error: {}", err),
///     }
/// }
/// ```
#[derive(Debug, Error)]
pub enum HttpError {
    /// The HTTP request failed due to a network or connection error.
    ///
    /// This typically indicates connectivity issues such as:
    /// - Connection refused (beacon node not running)
    /// - Request timeout
    /// - DNS resolution failure
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// An error occurred in the HTTP middleware layer.
    ///
    /// Only raised when transport retries are enabled; it may indicate that
    /// all retry attempts have been exhausted.
    #[error("Middleware error: {0}")]
    MiddlewareError(#[from] reqwest_middleware::Error),

    /// The server returned a non-success HTTP status code.
    ///
    /// The response body is kept as diagnostic text, since beacon nodes
    /// explain rejected requests there (for example `"bad slot"`).
    #[error("Server error {status}: {body}")]
    ServerError {
        /// The HTTP status code returned by the server.
        status: reqwest::StatusCode,
        /// The response body, which may contain error details.
        body: String,
    },

    /// Failed to parse or construct a URL.
    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    /// The base URL cannot carry a path (for example `mailto:` or `data:` URLs).
    #[error("Base URL '{0}' cannot be used for API requests")]
    InvalidBaseUrl(String),
}
