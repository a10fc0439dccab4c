//! Client-wide and per-request options.

use std::fmt;
use std::time::Duration;

use http::{HeaderMap, HeaderName, HeaderValue};
use url::Url;

use super::{QueryValue, RetryPolicy};
use crate::error::{Error, Result};

/// Options shared by every call a [`HttpClient`](super::HttpClient) makes.
///
/// # Defaults
///
/// - `timeout`: 30 seconds
/// - `retries`: 3, backing off from 1 second up to 30 seconds
/// - no token, no custom headers
///
/// # Example
///
/// ```
/// use fam_sdk::client::ClientOptions;
/// use std::time::Duration;
///
/// let options = ClientOptions::new("https://api.example.com/")
///     .unwrap()
///     .with_token("secret")
///     .with_timeout(Duration::from_secs(10))
///     .with_retries(1);
///
/// assert_eq!(options.base_url().as_str(), "https://api.example.com/");
/// ```
#[derive(Clone)]
pub struct ClientOptions {
    pub(super) base_url: Url,
    pub(super) token: Option<String>,
    pub(super) timeout: Duration,
    pub(super) retry_policy: RetryPolicy,
    pub(super) headers: HeaderMap,
}

impl ClientOptions {
    /// Default request timeout (30 seconds).
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);

    /// Default number of retries.
    pub const DEFAULT_RETRIES: u32 = 3;

    /// Creates options for the given base URL.
    ///
    /// A single trailing slash is stripped before parsing.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidRequest`](crate::ErrorKind::InvalidRequest) error
    /// if the base URL does not parse.
    pub fn new(base_url: &str) -> Result<Self> {
        let trimmed = base_url.strip_suffix('/').unwrap_or(base_url);
        let base_url = Url::parse(trimmed).map_err(|e| {
            Error::invalid_request(format!("Invalid base URL '{base_url}'"), Some(Box::new(e)))
        })?;

        Ok(Self::from_url(base_url))
    }

    /// Creates options from an already parsed base URL.
    #[must_use]
    pub fn from_url(base_url: Url) -> Self {
        Self {
            base_url,
            token: None,
            timeout: Self::DEFAULT_TIMEOUT,
            retry_policy: RetryPolicy::new().with_max_retries(Self::DEFAULT_RETRIES),
            headers: HeaderMap::new(),
        }
    }

    /// Sets the initial bearer token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets the default timeout applied to each attempt.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the default number of retries (0 disables retrying).
    #[must_use]
    pub const fn with_retries(mut self, retries: u32) -> Self {
        self.retry_policy.max_retries = retries;
        self
    }

    /// Sets the backoff bounds used between retries.
    #[must_use]
    pub const fn with_retry_delays(mut self, base_delay: Duration, max_delay: Duration) -> Self {
        self.retry_policy.base_delay = base_delay;
        self.retry_policy.max_delay = max_delay;
        self
    }

    /// Sets the custom headers sent with every request, replacing any
    /// previously configured ones.
    #[must_use]
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Adds one custom header sent with every request.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// The base URL every request path is resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The initial bearer token, if any.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// The default timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The default number of retries.
    #[must_use]
    pub const fn retries(&self) -> u32 {
        self.retry_policy.max_retries
    }

    /// The retry policy built from the retry count and backoff bounds.
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    /// The custom default headers.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

impl fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientOptions")
            .field("base_url", &self.base_url.as_str())
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("retry_policy", &self.retry_policy)
            .field("headers", &self.headers)
            .finish()
    }
}

/// Per-call options.
///
/// # Example
///
/// ```
/// use fam_sdk::client::RequestOptions;
/// use std::time::Duration;
///
/// let options = RequestOptions::new()
///     .with_param("page", 2)
///     .with_param("sort", None::<&str>)
///     .with_timeout(Duration::from_secs(5))
///     .skip_retry();
///
/// assert_eq!(options.params().len(), 2);
/// assert!(options.is_retry_skipped());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    params: Vec<(String, QueryValue)>,
    headers: HeaderMap,
    timeout: Option<Duration>,
    skip_retry: bool,
}

impl RequestOptions {
    /// Creates empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a query parameter. `None` values are accepted and dropped
    /// when the URL is built.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Appends several query parameters, keeping their order.
    #[must_use]
    pub fn with_params<K, V>(mut self, params: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<QueryValue>,
    {
        self.params
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Sets a header for this call, overriding defaults and the bearer token.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Overrides the client timeout for this call.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Runs this call exactly once, bypassing the retry policy.
    #[must_use]
    pub const fn skip_retry(mut self) -> Self {
        self.skip_retry = true;
        self
    }

    /// The query parameters, in insertion order.
    #[must_use]
    pub fn params(&self) -> &[(String, QueryValue)] {
        &self.params
    }

    /// The per-call header overrides.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The per-call timeout override.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Whether retries are disabled for this call.
    #[must_use]
    pub const fn is_retry_skipped(&self) -> bool {
        self.skip_retry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_options_strip_trailing_slash() {
        let options = ClientOptions::new("https://api.example.com/v1/").unwrap();
        assert_eq!(options.base_url().as_str(), "https://api.example.com/v1");
    }

    #[test]
    fn client_options_defaults() {
        let options = ClientOptions::new("https://api.example.com").unwrap();

        assert_eq!(options.timeout(), Duration::from_millis(30_000));
        assert_eq!(options.retries(), 3);
        assert_eq!(options.retry_policy().base_delay, Duration::from_secs(1));
        assert!(options.token().is_none());
        assert!(options.headers().is_empty());
    }

    #[test]
    fn client_options_reject_invalid_base_url() {
        let err = ClientOptions::new("not a url").unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidRequest);
    }

    #[test]
    fn client_options_retry_settings_feed_the_policy() {
        let options = ClientOptions::new("https://api.example.com")
            .unwrap()
            .with_retries(0)
            .with_retry_delays(Duration::from_millis(10), Duration::from_millis(40));

        assert_eq!(
            options.retry_policy(),
            &RetryPolicy::new()
                .with_max_retries(0)
                .with_base_delay(Duration::from_millis(10))
                .with_max_delay(Duration::from_millis(40))
        );
    }

    #[test]
    fn client_options_debug_redacts_token() {
        let options = ClientOptions::new("https://api.example.com")
            .unwrap()
            .with_token("top-secret");
        let debug = format!("{options:?}");

        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("top-secret"));
    }

    #[test]
    fn request_options_keep_param_order_and_nulls() {
        let options = RequestOptions::new()
            .with_param("b", 1)
            .with_param("a", None::<bool>)
            .with_params([("c", "x"), ("d", "y")]);

        let keys: Vec<&str> = options.params().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["b", "a", "c", "d"]);
        assert!(options.params()[1].1.is_null());
    }

    #[test]
    fn request_options_default_to_retrying() {
        let options = RequestOptions::default();

        assert!(!options.is_retry_skipped());
        assert!(options.timeout().is_none());
    }
}
