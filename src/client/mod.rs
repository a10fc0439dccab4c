//! Request engine: one logical API call per verb invocation.
//!
//! This module provides:
//! - The JSON request engine ([`HttpClient`])
//! - Client-wide and per-call options ([`ClientOptions`], [`RequestOptions`])
//! - URL composition ([`build_url`], [`QueryValue`])
//! - Exponential backoff ([`retry`], [`RetryPolicy`])
//!
//! Every call builds its URL and header snapshot once, then runs attempts
//! (dispatch plus response mapping) under a per-attempt timeout, retrying
//! transient failures through the backoff policy.

mod options;
mod response;
mod retry;
mod url_builder;


use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, HeaderValue, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{Error, Result};
use crate::time::{Sleeper, TokioSleeper};
use crate::transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport, TransportError};

pub use options::{ClientOptions, RequestOptions};
pub use retry::{RetryPolicy, retry};
pub use url_builder::{QueryValue, build_url};

/// Placeholder for mutating calls sent without a body.
///
/// ```no_run
/// # async fn example(client: fam_sdk::client::HttpClient) -> fam_sdk::Result<()> {
/// use fam_sdk::client::{NO_BODY, RequestOptions};
///
/// let _: serde_json::Value = client.post("/api/v1/portal/logout", NO_BODY, RequestOptions::new()).await?;
/// # Ok(())
/// # }
/// ```
pub const NO_BODY: Option<&()> = None;

const JSON: &str = "application/json";

/// JSON HTTP client with bearer authentication, timeouts and retries.
///
/// Cloning is cheap: clones share the transport, the configuration and the
/// bearer token, so a token set through one clone is seen by all of them.
///
/// # Type Parameters
///
/// - `T`: The transport performing the raw exchange (defaults to [`ReqwestTransport`])
/// - `S`: The sleeper used between retries (defaults to [`TokioSleeper`])
///
/// # Example
///
/// ```no_run
/// use fam_sdk::client::{ClientOptions, HttpClient, RequestOptions};
///
/// # async fn example() -> fam_sdk::Result<()> {
/// let client = HttpClient::new(ClientOptions::new("https://api.example.com")?.with_token("secret"));
///
/// let user: serde_json::Value = client
///     .get("/api/v1/mangopay/users/42", RequestOptions::new())
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct HttpClient<T = ReqwestTransport, S = TokioSleeper> {
    inner: Arc<Inner<T, S>>,
}

struct Inner<T, S> {
    transport: T,
    sleeper: S,
    base_url: Url,
    default_headers: HeaderMap,
    token: RwLock<Option<String>>,
    timeout: Duration,
    retry_policy: RetryPolicy,
}

impl HttpClient {
    /// Creates a client backed by a default [`ReqwestTransport`].
    #[must_use]
    pub fn new(options: ClientOptions) -> Self {
        Self::with_transport(options, ReqwestTransport::new())
    }
}

impl<T> HttpClient<T, TokioSleeper> {
    /// Creates a client with a custom transport.
    #[must_use]
    pub fn with_transport(options: ClientOptions, transport: T) -> Self {
        Self::from_parts(options, transport, TokioSleeper)
    }
}

impl<T, S> HttpClient<T, S> {
    /// Creates a client from a transport and a sleeper.
    ///
    /// A custom sleeper is primarily useful for testing to avoid actual
    /// backoff delays.
    #[must_use]
    pub fn from_parts(options: ClientOptions, transport: T, sleeper: S) -> Self {
        let ClientOptions {
            base_url,
            token,
            timeout,
            retry_policy,
            headers,
        } = options;

        Self {
            inner: Arc::new(Inner {
                transport,
                sleeper,
                base_url,
                default_headers: headers,
                token: RwLock::new(token),
                timeout,
                retry_policy,
            }),
        }
    }

    /// Sets the bearer token used by calls started from now on.
    pub fn set_token(&self, token: impl Into<String>) {
        *self
            .inner
            .token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(token.into());
    }

    /// Removes the bearer token.
    pub fn clear_token(&self) {
        *self
            .inner
            .token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Returns true if a bearer token is set.
    #[must_use]
    pub fn has_token(&self) -> bool {
        self.token().is_some()
    }

    /// The base URL request paths are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// The default per-attempt timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.inner.timeout
    }

    /// The retry policy applied to calls that do not skip retries.
    #[must_use]
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.inner.retry_policy
    }

    /// The underlying transport.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.inner.transport
    }

    fn token(&self) -> Option<String> {
        self.inner
            .token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Builds the header snapshot for one call. Later layers win:
    /// JSON defaults, custom headers, bearer token, per-call overrides.
    fn build_headers(&self, overrides: &HeaderMap) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON));
        headers.insert(ACCEPT, HeaderValue::from_static(JSON));
        headers.extend(self.inner.default_headers.clone());

        if let Some(token) = self.token() {
            let mut value = HeaderValue::try_from(format!("Bearer {token}")).map_err(|e| {
                Error::invalid_request("Bearer token is not a valid header value", Some(Box::new(e)))
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        headers.extend(overrides.clone());
        Ok(headers)
    }
}

impl<T, S> Clone for HttpClient<T, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, S> fmt::Debug for HttpClient<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("timeout", &self.inner.timeout)
            .field("retry_policy", &self.inner.retry_policy)
            .field("has_token", &self.has_token())
            .finish_non_exhaustive()
    }
}

impl<T: Transport, S: Sleeper> HttpClient<T, S> {
    /// Issues a GET request and decodes the JSON response.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] of the kind matching the failure once retries, if
    /// any, are exhausted.
    pub async fn get<R: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> Result<R> {
        self.request(Method::GET, path, NO_BODY, options).await
    }

    /// Issues a POST request with an optional JSON body.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::get`].
    pub async fn post<R, B>(&self, path: &str, body: Option<&B>, options: RequestOptions) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, path, body, options).await
    }

    /// Issues a PUT request with an optional JSON body.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::get`].
    pub async fn put<R, B>(&self, path: &str, body: Option<&B>, options: RequestOptions) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PUT, path, body, options).await
    }

    /// Issues a PATCH request with an optional JSON body.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::get`].
    pub async fn patch<R, B>(&self, path: &str, body: Option<&B>, options: RequestOptions) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PATCH, path, body, options).await
    }

    /// Issues a DELETE request and decodes the JSON response.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::get`].
    pub async fn delete<R: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> Result<R> {
        self.request(Method::DELETE, path, NO_BODY, options).await
    }

    async fn request<R, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        options: RequestOptions,
    ) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.prepare(method, path, body, &options)?;
        let timeout = options.timeout().unwrap_or(self.inner.timeout);
        let attempt = move || self.send_once(request.clone(), timeout);

        let response = if options.is_retry_skipped() {
            attempt().await?
        } else {
            retry(
                &self.inner.retry_policy,
                &self.inner.sleeper,
                Error::is_retryable,
                attempt,
            )
            .await?
        };

        decode_body(&response)
    }

    fn prepare<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        options: &RequestOptions,
    ) -> Result<HttpRequest> {
        let url = build_url(&self.inner.base_url, path, options.params()).map_err(|e| {
            Error::invalid_request(format!("Cannot resolve request path '{path}'"), Some(Box::new(e)))
        })?;
        let headers = self.build_headers(options.headers())?;

        let mut request = HttpRequest::new(method, url).with_headers(headers);
        if let Some(body) = body {
            let bytes = serde_json::to_vec(body).map_err(|e| {
                Error::invalid_request("Cannot serialize request body", Some(Box::new(e)))
            })?;
            request = request.with_body(bytes);
        }

        Ok(request)
    }

    /// One attempt: dispatch under the timeout, then map non-2xx statuses.
    async fn send_once(&self, request: HttpRequest, timeout: Duration) -> Result<HttpResponse> {
        tracing::debug!(method = %request.method, url = %request.url, "Sending request");

        let response = tokio::time::timeout(timeout, self.inner.transport.send(request))
            .await
            .map_err(|_| timeout_error(timeout))?
            .map_err(|e| map_transport_error(e, timeout))?;

        if response.is_success() {
            return Ok(response);
        }

        let error = response::error_from_response(&response);
        tracing::debug!(status = %response.status, error = %error, "Request failed");
        Err(error)
    }
}

fn timeout_error(timeout: Duration) -> Error {
    Error::timeout(format!("Request timeout after {}ms", timeout.as_millis()))
}

fn map_transport_error(error: TransportError, timeout: Duration) -> Error {
    match error {
        TransportError::Timeout => timeout_error(timeout),
        TransportError::Connection(source) => Error::network(source.to_string(), Some(source)),
        invalid @ TransportError::InvalidUrl(_) => {
            Error::network(invalid.to_string(), Some(Box::new(invalid)))
        }
    }
}

/// Decodes a success body. An empty body decodes as JSON `null`.
fn decode_body<R: DeserializeOwned>(response: &HttpResponse) -> Result<R> {
    let body: &[u8] = if response.body.iter().all(u8::is_ascii_whitespace) {
        b"null"
    } else {
        &response.body
    };

    serde_json::from_slice(body).map_err(|e| {
        Error::decode(
            format!("Cannot decode {} response body", response.status),
            Some(Box::new(e)),
        )
    })
}
