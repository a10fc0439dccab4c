//! Signature verification and payload decoding.

use std::fmt;

use hmac::{Hmac, Mac};
use serde_json::Value;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::{EventType, WebhookEvent};
use crate::error::{Error, Result};
use crate::time::{Clock, SystemClock};

type HmacSha256 = Hmac<Sha256>;

/// Settings of a [`Webhooks`] handler.
///
/// Without a signing secret, verification is disabled and every signature
/// is accepted.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct WebhookConfig {
    signing_secret: Option<String>,
    timestamp_tolerance: Option<u64>,
}

impl WebhookConfig {
    /// Default replay window (5 minutes).
    pub const DEFAULT_TIMESTAMP_TOLERANCE: u64 = 300;

    /// Creates a configuration with verification disabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables signature verification with the given secret.
    #[must_use]
    pub fn with_signing_secret(mut self, secret: impl Into<String>) -> Self {
        self.signing_secret = Some(secret.into());
        self
    }

    /// Sets the replay window, in seconds.
    #[must_use]
    pub const fn with_timestamp_tolerance(mut self, seconds: u64) -> Self {
        self.timestamp_tolerance = Some(seconds);
        self
    }

    /// The signing secret, if verification is enabled.
    #[must_use]
    pub fn signing_secret(&self) -> Option<&str> {
        self.signing_secret.as_deref()
    }

    /// The replay window in seconds.
    #[must_use]
    pub fn timestamp_tolerance(&self) -> u64 {
        self.timestamp_tolerance
            .unwrap_or(Self::DEFAULT_TIMESTAMP_TOLERANCE)
    }
}

impl fmt::Debug for WebhookConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookConfig")
            .field("signing_secret", &self.signing_secret.as_ref().map(|_| "<redacted>"))
            .field("timestamp_tolerance", &self.timestamp_tolerance())
            .finish()
    }
}

/// Verifies and decodes inbound webhook notifications.
///
/// Signatures are the lowercase hex encoding of HMAC-SHA256 over the raw
/// payload bytes, keyed with the signing secret.
///
/// # Type Parameters
///
/// - `C`: The clock used for replay-window checks (defaults to [`SystemClock`])
///
/// # Example
///
/// ```
/// use fam_sdk::webhooks::{EventType, WebhookConfig, Webhooks};
///
/// let webhooks = Webhooks::new(WebhookConfig::new().with_signing_secret("whsec"));
/// let payload = r#"{"EventType":"PAYIN_NORMAL_SUCCEEDED","RessourceId":"pi_1","Date":1700000000}"#;
/// let signature = webhooks.sign(payload).unwrap();
///
/// let event = webhooks.construct_event(payload, Some(&signature)).unwrap();
/// assert!(webhooks.is_event_type(&event, &EventType::PayinNormalSucceeded));
/// ```
#[derive(Debug, Clone)]
pub struct Webhooks<C = SystemClock> {
    config: WebhookConfig,
    clock: C,
}

impl Webhooks<SystemClock> {
    /// Creates a handler using the system clock.
    #[must_use]
    pub const fn new(config: WebhookConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C> Webhooks<C> {
    /// Creates a handler with a custom clock.
    #[must_use]
    pub const fn with_clock(config: WebhookConfig, clock: C) -> Self {
        Self { config, clock }
    }

    /// The handler's configuration.
    #[must_use]
    pub const fn config(&self) -> &WebhookConfig {
        &self.config
    }

    /// Verifies `signature` against the raw `payload`.
    ///
    /// Returns `Ok(true)` without looking at the signature when no signing
    /// secret is configured. A well-formed but wrong signature yields
    /// `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Returns a [`WebhookSignature`](crate::ErrorKind::WebhookSignature)
    /// error if a secret is configured and the signature is missing or empty.
    pub fn verify(&self, payload: impl AsRef<[u8]>, signature: Option<&str>) -> Result<bool> {
        let Some(secret) = self.config.signing_secret() else {
            return Ok(true);
        };

        let signature = signature
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::webhook_signature("Missing webhook signature"))?;

        let expected = compute_signature(secret, payload.as_ref())?;
        let valid = secure_compare(signature.as_bytes(), expected.as_bytes());
        tracing::debug!(valid, "Webhook signature checked");

        Ok(valid)
    }

    /// Parses a JSON text payload into an event.
    ///
    /// # Errors
    ///
    /// Returns a [`WebhookSignature`](crate::ErrorKind::WebhookSignature)
    /// error on malformed JSON or when the event fields are missing.
    #[allow(clippy::unused_self)] // kept on the handler next to verify
    pub fn parse(&self, payload: &str) -> Result<WebhookEvent> {
        let value: Value = serde_json::from_str(payload)
            .map_err(|_| Error::webhook_signature("Invalid webhook payload: not valid JSON"))?;
        self.parse_value(value)
    }

    /// Accepts an already decoded payload as an event.
    ///
    /// # Errors
    ///
    /// Returns a [`WebhookSignature`](crate::ErrorKind::WebhookSignature)
    /// error for `null` and other non-object values, or when the event fields
    /// are missing.
    #[allow(clippy::unused_self)] // kept on the handler next to verify
    pub fn parse_value(&self, payload: Value) -> Result<WebhookEvent> {
        if !payload.is_object() {
            return Err(Error::webhook_signature(
                "Invalid webhook payload: expected object or JSON string",
            ));
        }

        serde_json::from_value(payload)
            .map_err(|e| Error::webhook_signature(format!("Invalid webhook payload: {e}")))
    }

    /// Verifies the signature, then parses the payload.
    ///
    /// # Errors
    ///
    /// Returns a [`WebhookSignature`](crate::ErrorKind::WebhookSignature)
    /// error if the signature is missing or does not match, or if the payload
    /// does not decode.
    pub fn construct_event(&self, payload: &str, signature: Option<&str>) -> Result<WebhookEvent> {
        if !self.verify(payload, signature)? {
            return Err(Error::webhook_signature("Invalid webhook signature"));
        }
        self.parse(payload)
    }

    /// Returns true if `event` has the given type.
    #[allow(clippy::unused_self)] // kept on the handler next to verify
    #[must_use]
    pub fn is_event_type(&self, event: &WebhookEvent, event_type: &EventType) -> bool {
        event.event_type == *event_type
    }

    /// Computes the signature a sender would attach to `payload`.
    ///
    /// Returns `None` when no signing secret is configured.
    #[must_use]
    pub fn sign(&self, payload: impl AsRef<[u8]>) -> Option<String> {
        let secret = self.config.signing_secret()?;
        compute_signature(secret, payload.as_ref()).ok()
    }
}

impl<C: Clock> Webhooks<C> {
    /// Checks the replay window, then verifies the signature.
    ///
    /// The window is symmetric and inclusive: a timestamp exactly
    /// `timestamp_tolerance` seconds away from now is accepted.
    ///
    /// # Errors
    ///
    /// Returns a [`WebhookSignature`](crate::ErrorKind::WebhookSignature)
    /// error if the timestamp is outside the window, plus every error of
    /// [`Webhooks::verify`].
    pub fn verify_with_timestamp(
        &self,
        payload: impl AsRef<[u8]>,
        signature: Option<&str>,
        timestamp: i64,
    ) -> Result<bool> {
        self.check_timestamp(timestamp)?;
        self.verify(payload, signature)
    }

    /// [`Webhooks::construct_event`] with a replay-window check.
    ///
    /// # Errors
    ///
    /// See [`Webhooks::verify_with_timestamp`] and [`Webhooks::construct_event`].
    pub fn construct_event_with_timestamp(
        &self,
        payload: &str,
        signature: Option<&str>,
        timestamp: i64,
    ) -> Result<WebhookEvent> {
        self.check_timestamp(timestamp)?;
        self.construct_event(payload, signature)
    }

    fn check_timestamp(&self, timestamp: i64) -> Result<()> {
        let now = self.clock.unix_seconds();
        let age = now.abs_diff(timestamp);

        if age <= self.config.timestamp_tolerance() {
            return Ok(());
        }

        tracing::warn!(age, timestamp, "Rejected webhook outside replay window");
        let message = if timestamp > now {
            format!("Webhook timestamp too far in the future ({age} seconds)")
        } else {
            format!("Webhook timestamp too old ({age} seconds)")
        };
        Err(Error::webhook_signature(message))
    }
}

fn compute_signature(secret: &str, payload: &[u8]) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| Error::webhook_signature("Invalid webhook signature"))?;
    mac.update(payload);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Length mismatch short-circuits; equal lengths compare in constant time.
fn secure_compare(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && bool::from(a.ct_eq(b))
}

#[cfg(test)]
#[path = "verifier_tests.rs"]
mod tests;
