//! Error taxonomy shared by the request engine and the webhook verifier.
//!
//! Every failure that leaves this crate is an [`Error`]. The [`ErrorKind`]
//! discriminator replaces a class hierarchy: API kinds carry an HTTP status,
//! network kinds optionally carry the transport failure as their source, and
//! each kind's constructor enforces its fixed status and machine code.

use std::collections::BTreeMap;
use std::fmt;

use http::StatusCode;
use thiserror::Error;

/// Convenience alias for results produced by this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Field name → list of violation messages, as returned by validation failures.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Discriminator for [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Generic non-success API response.
    Api,
    /// HTTP 401.
    Authentication,
    /// HTTP 403.
    Authorization,
    /// HTTP 404.
    NotFound,
    /// HTTP 422, or 400 with field errors.
    Validation,
    /// HTTP 429.
    RateLimit,
    /// Transport-level failure (DNS, connection, TLS, ...).
    Network,
    /// The call exceeded its timeout. A specialization of [`ErrorKind::Network`].
    Timeout,
    /// Webhook authentication or decoding failure.
    WebhookSignature,
    /// The request could not be built (bad URL, header or body).
    InvalidRequest,
    /// A successful response body could not be decoded.
    Decode,
}

impl ErrorKind {
    /// Stable name of the kind, e.g. `"ValidationError"`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Api => "ApiError",
            Self::Authentication => "AuthenticationError",
            Self::Authorization => "AuthorizationError",
            Self::NotFound => "NotFoundError",
            Self::Validation => "ValidationError",
            Self::RateLimit => "RateLimitError",
            Self::Network => "NetworkError",
            Self::Timeout => "TimeoutError",
            Self::WebhookSignature => "WebhookSignatureError",
            Self::InvalidRequest => "InvalidRequestError",
            Self::Decode => "DecodeError",
        }
    }

    /// Returns true for kinds that originate from an HTTP error response.
    #[must_use]
    pub const fn is_api(self) -> bool {
        matches!(
            self,
            Self::Api
                | Self::Authentication
                | Self::Authorization
                | Self::NotFound
                | Self::Validation
                | Self::RateLimit
        )
    }

    /// Returns true for transport-level kinds (network and timeout).
    #[must_use]
    pub const fn is_network(self) -> bool {
        matches!(self, Self::Network | Self::Timeout)
    }

    const fn default_message(self) -> Option<&'static str> {
        match self {
            Self::Authentication => Some("Authentication failed"),
            Self::Authorization => Some("Access denied"),
            Self::NotFound => Some("Resource not found"),
            Self::RateLimit => Some("Rate limit exceeded"),
            Self::Timeout => Some("Request timeout"),
            Self::WebhookSignature => Some("Invalid webhook signature"),
            _ => None,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned by every fallible operation of this crate.
///
/// Construct through the kind-specific constructors; the fields are read
/// through accessors and never change after construction.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    status: Option<StatusCode>,
    code: Option<String>,
    details: Option<serde_json::Value>,
    field_errors: Option<FieldErrors>,
    retry_after: Option<u64>,
    #[source]
    source: Option<BoxError>,
}

impl Error {
    fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        let mut message = message.into();
        if message.is_empty() {
            if let Some(default) = kind.default_message() {
                message = default.to_string();
            }
        }

        Self {
            kind,
            message,
            status: None,
            code: None,
            details: None,
            field_errors: None,
            retry_after: None,
            source: None,
        }
    }

    fn with_status(mut self, status: StatusCode, code: Option<String>) -> Self {
        self.status = Some(status);
        self.code = code;
        self
    }

    fn with_source(mut self, source: Option<BoxError>) -> Self {
        self.source = source;
        self
    }

    /// Replaces the details payload.
    #[must_use]
    pub(crate) fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Generic API error for a non-success response.
    #[must_use]
    pub fn api(
        message: impl Into<String>,
        status: StatusCode,
        code: Option<String>,
        details: Option<serde_json::Value>,
    ) -> Self {
        let mut error = Self::new(ErrorKind::Api, message).with_status(status, code);
        error.details = details;
        error
    }

    /// Authentication failure (401, `AUTHENTICATION_ERROR`).
    #[must_use]
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authentication, message).with_status(
            StatusCode::UNAUTHORIZED,
            Some("AUTHENTICATION_ERROR".to_string()),
        )
    }

    /// Authorization failure (403, `AUTHORIZATION_ERROR`).
    #[must_use]
    pub fn authorization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authorization, message).with_status(
            StatusCode::FORBIDDEN,
            Some("AUTHORIZATION_ERROR".to_string()),
        )
    }

    /// Missing resource (404, `NOT_FOUND`).
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
            .with_status(StatusCode::NOT_FOUND, Some("NOT_FOUND".to_string()))
    }

    /// Validation failure (422, `VALIDATION_ERROR`) with per-field messages.
    ///
    /// The field errors are also exposed as the error's details payload.
    #[must_use]
    pub fn validation(message: impl Into<String>, field_errors: FieldErrors) -> Self {
        let mut error = Self::new(ErrorKind::Validation, message).with_status(
            StatusCode::UNPROCESSABLE_ENTITY,
            Some("VALIDATION_ERROR".to_string()),
        );
        error.details = serde_json::to_value(&field_errors).ok();
        error.field_errors = Some(field_errors);
        error
    }

    /// Rate limiting (429, `RATE_LIMIT_ERROR`) with optional retry-after seconds.
    #[must_use]
    pub fn rate_limit(message: impl Into<String>, retry_after: Option<u64>) -> Self {
        let mut error = Self::new(ErrorKind::RateLimit, message).with_status(
            StatusCode::TOO_MANY_REQUESTS,
            Some("RATE_LIMIT_ERROR".to_string()),
        );
        error.retry_after = retry_after;
        error
    }

    /// Transport failure, optionally wrapping the original error.
    #[must_use]
    pub fn network(message: impl Into<String>, source: Option<BoxError>) -> Self {
        Self::new(ErrorKind::Network, message).with_source(source)
    }

    /// The call was cancelled because it exceeded its timeout.
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Timeout, message)
    }

    /// Webhook signature, timestamp or payload failure.
    #[must_use]
    pub fn webhook_signature(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::WebhookSignature, message)
    }

    /// The request could not be built.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>, source: Option<BoxError>) -> Self {
        Self::new(ErrorKind::InvalidRequest, message).with_source(source)
    }

    /// A success response body did not match the requested type.
    #[must_use]
    pub fn decode(message: impl Into<String>, source: Option<BoxError>) -> Self {
        Self::new(ErrorKind::Decode, message).with_source(source)
    }

    /// The kind discriminator.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Stable name of the kind, e.g. `"NotFoundError"`.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status code, present for API kinds only.
    #[must_use]
    pub const fn status_code(&self) -> Option<StatusCode> {
        self.status
    }

    /// Machine-readable error code, if any.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// Structured details (the error body for generic API errors,
    /// the field errors for validation errors).
    #[must_use]
    pub const fn details(&self) -> Option<&serde_json::Value> {
        self.details.as_ref()
    }

    /// Per-field violation messages, present for validation errors only.
    #[must_use]
    pub const fn field_errors(&self) -> Option<&FieldErrors> {
        self.field_errors.as_ref()
    }

    /// Seconds to wait before retrying, present for rate-limit errors when the
    /// server sent a parseable `Retry-After` header.
    #[must_use]
    pub const fn retry_after(&self) -> Option<u64> {
        self.retry_after
    }

    /// Returns true if this error came from an HTTP error response.
    #[must_use]
    pub const fn is_api(&self) -> bool {
        self.kind.is_api()
    }

    /// Returns true for network failures, including timeouts.
    #[must_use]
    pub const fn is_network(&self) -> bool {
        self.kind.is_network()
    }

    /// Returns true if the request engine should retry after this error.
    ///
    /// Network failures, timeouts, rate limiting and 5xx responses are
    /// transient. Every other kind, including the remaining 4xx responses,
    /// fails immediately.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self.kind {
            ErrorKind::Network | ErrorKind::Timeout | ErrorKind::RateLimit => true,
            ErrorKind::Api => self.status.is_some_and(|s| s.is_server_error()),
            ErrorKind::Authentication
            | ErrorKind::Authorization
            | ErrorKind::NotFound
            | ErrorKind::Validation
            | ErrorKind::WebhookSignature
            | ErrorKind::InvalidRequest
            | ErrorKind::Decode => false,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
