//! Customer self-service portal sessions.
//!
//! Session-scoped calls authenticate with the `X-Portal-Session` header
//! instead of the bearer token.

use http::{HeaderName, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::client::{NO_BODY, RequestOptions};
use crate::error::{Error, Result};
use crate::time::Sleeper;
use crate::transport::Transport;

/// Header carrying a portal session token.
pub const PORTAL_SESSION_HEADER: &str = "x-portal-session";

facade! {
    /// Portal endpoints under `/api/v1/portal`.
    Portal => "/api/v1/portal"
}

impl<T: Transport, S: Sleeper> Portal<T, S> {
    /// Opens a portal session for a customer.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn create_session<R, B>(&self, session: &B) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.resource
            .post(&["sessions"], Some(session), RequestOptions::new())
            .await
    }

    /// Checks a portal access token and returns the session it opens.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn validate_session<R, B>(&self, request: &B) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.resource
            .post(&["session", "validate"], Some(request), RequestOptions::new())
            .await
    }

    /// The customer behind a session.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidRequest`](crate::ErrorKind::InvalidRequest) error
    /// if the token cannot be sent as a header, otherwise the request
    /// engine's error on failure.
    pub async fn get_user<R: DeserializeOwned>(&self, session_token: &str) -> Result<R> {
        self.resource
            .get(&["user"], session_options(session_token)?)
            .await
    }

    /// Extends a session.
    ///
    /// # Errors
    ///
    /// See [`Portal::get_user`].
    pub async fn refresh_session<R: DeserializeOwned>(&self, session_token: &str) -> Result<R> {
        self.resource
            .post(&["session", "refresh"], NO_BODY, session_options(session_token)?)
            .await
    }

    /// Ends a session.
    ///
    /// # Errors
    ///
    /// See [`Portal::get_user`].
    pub async fn logout<R: DeserializeOwned>(&self, session_token: &str) -> Result<R> {
        self.resource
            .post(&["logout"], NO_BODY, session_options(session_token)?)
            .await
    }
}

fn session_options(session_token: &str) -> Result<RequestOptions> {
    let mut value = HeaderValue::from_str(session_token).map_err(|e| {
        Error::invalid_request("Portal session token is not a valid header value", Some(Box::new(e)))
    })?;
    value.set_sensitive(true);

    Ok(RequestOptions::new().with_header(HeaderName::from_static(PORTAL_SESSION_HEADER), value))
}
