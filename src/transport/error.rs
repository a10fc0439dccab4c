//! Error types for raw HTTP exchanges.

use thiserror::Error;

/// Error type for transport operations.
///
/// Describes what went wrong at the wire level without dictating recovery
/// strategy. The request engine converts every variant into a
/// [`crate::Error`] before it reaches the caller.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// TLS failures and errors while reading the response body.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The transport gave up waiting for the server.
    #[error("Request timed out")]
    Timeout,

    /// The request could not be built by the HTTP library.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}
