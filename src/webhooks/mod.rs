//! Inbound webhook handling.
//!
//! This module provides:
//! - HMAC-SHA256 signature verification with a replay window ([`Webhooks`])
//! - Event decoding ([`WebhookEvent`], [`EventType`])
//! - Family classification by the `FAM_` prefix ([`is_mangopay_event`], [`is_fam_event`])
//!
//! Every failure surfaces as a
//! [`WebhookSignature`](crate::ErrorKind::WebhookSignature) error.

mod event;
mod verifier;

#[cfg(test)]
mod event_tests;

pub use event::{
    EventFamily, EventType, FAM_EVENT_PREFIX, WebhookEvent, is_fam_event, is_mangopay_event,
};
pub use verifier::{WebhookConfig, Webhooks};
