//! Inbound webhook event types.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Prefix shared by every custom FAM event type.
pub const FAM_EVENT_PREFIX: &str = "FAM_";

/// Returns true if `event_type` is an upstream MangoPay event.
///
/// Exactly one of [`is_mangopay_event`] and [`is_fam_event`] holds for any
/// string.
#[must_use]
pub fn is_mangopay_event(event_type: &str) -> bool {
    !is_fam_event(event_type)
}

/// Returns true if `event_type` is a custom FAM event.
#[must_use]
pub fn is_fam_event(event_type: &str) -> bool {
    event_type.starts_with(FAM_EVENT_PREFIX)
}

/// The two event families, told apart by the `FAM_` prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventFamily {
    /// Pass-through upstream event.
    Mangopay,
    /// Custom event emitted by the FAM backend.
    Fam,
}

impl EventFamily {
    /// Classifies a raw event type string.
    #[must_use]
    pub fn of(event_type: &str) -> Self {
        if is_fam_event(event_type) {
            Self::Fam
        } else {
            Self::Mangopay
        }
    }
}

impl fmt::Display for EventFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mangopay => f.write_str("mangopay"),
            Self::Fam => f.write_str("fam"),
        }
    }
}

macro_rules! event_types {
    ($($(#[$meta:meta])* $variant:ident => $name:literal,)+) => {
        /// Webhook event type.
        ///
        /// Every documented name has its own variant. Names this crate does
        /// not know yet are kept verbatim in [`EventType::Other`], so parsing
        /// never fails on the event type alone.
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum EventType {
            $($(#[$meta])* $variant,)+
            /// Any event type without a dedicated variant.
            Other(String),
        }

        impl EventType {
            /// Every known event type, in declaration order.
            pub const KNOWN: &'static [Self] = &[$(Self::$variant,)+];

            /// The wire name, e.g. `"PAYIN_NORMAL_SUCCEEDED"`.
            #[must_use]
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $name,)+
                    Self::Other(name) => name,
                }
            }
        }

        impl From<&str> for EventType {
            fn from(name: &str) -> Self {
                match name {
                    $($name => Self::$variant,)+
                    other => Self::Other(other.to_string()),
                }
            }
        }
    };
}

event_types! {
    PayinNormalCreated => "PAYIN_NORMAL_CREATED",
    PayinNormalSucceeded => "PAYIN_NORMAL_SUCCEEDED",
    PayinNormalFailed => "PAYIN_NORMAL_FAILED",
    PayinRefundCreated => "PAYIN_REFUND_CREATED",
    PayinRefundSucceeded => "PAYIN_REFUND_SUCCEEDED",
    PayinRefundFailed => "PAYIN_REFUND_FAILED",
    PayoutNormalCreated => "PAYOUT_NORMAL_CREATED",
    PayoutNormalSucceeded => "PAYOUT_NORMAL_SUCCEEDED",
    PayoutNormalFailed => "PAYOUT_NORMAL_FAILED",
    PayoutRefundCreated => "PAYOUT_REFUND_CREATED",
    PayoutRefundSucceeded => "PAYOUT_REFUND_SUCCEEDED",
    PayoutRefundFailed => "PAYOUT_REFUND_FAILED",
    TransferNormalCreated => "TRANSFER_NORMAL_CREATED",
    TransferNormalSucceeded => "TRANSFER_NORMAL_SUCCEEDED",
    TransferNormalFailed => "TRANSFER_NORMAL_FAILED",
    TransferRefundCreated => "TRANSFER_REFUND_CREATED",
    TransferRefundSucceeded => "TRANSFER_REFUND_SUCCEEDED",
    TransferRefundFailed => "TRANSFER_REFUND_FAILED",
    KycCreated => "KYC_CREATED",
    KycValidationAsked => "KYC_VALIDATION_ASKED",
    KycSucceeded => "KYC_SUCCEEDED",
    KycFailed => "KYC_FAILED",
    KycOutdated => "KYC_OUTDATED",
    UboDeclarationCreated => "UBO_DECLARATION_CREATED",
    UboDeclarationValidationAsked => "UBO_DECLARATION_VALIDATION_ASKED",
    UboDeclarationValidated => "UBO_DECLARATION_VALIDATED",
    UboDeclarationRefused => "UBO_DECLARATION_REFUSED",
    UboDeclarationIncomplete => "UBO_DECLARATION_INCOMPLETE",
    PreauthorizationCreated => "PREAUTHORIZATION_CREATED",
    PreauthorizationSucceeded => "PREAUTHORIZATION_SUCCEEDED",
    PreauthorizationFailed => "PREAUTHORIZATION_FAILED",
    CardValidationCreated => "CARD_VALIDATION_CREATED",
    CardValidationSucceeded => "CARD_VALIDATION_SUCCEEDED",
    CardValidationFailed => "CARD_VALIDATION_FAILED",
    UserKycRegular => "USER_KYC_REGULAR",
    UserKycLight => "USER_KYC_LIGHT",
    UserInflowsBlocked => "USER_INFLOWS_BLOCKED",
    UserInflowsUnblocked => "USER_INFLOWS_UNBLOCKED",
    UserOutflowsBlocked => "USER_OUTFLOWS_BLOCKED",
    UserOutflowsUnblocked => "USER_OUTFLOWS_UNBLOCKED",
    RecurringRegistrationCreated => "RECURRING_REGISTRATION_CREATED",
    RecurringRegistrationAuthNeeded => "RECURRING_REGISTRATION_AUTH_NEEDED",
    RecurringRegistrationInProgress => "RECURRING_REGISTRATION_IN_PROGRESS",
    RecurringRegistrationEnded => "RECURRING_REGISTRATION_ENDED",
    FamSubscriptionCreated => "FAM_SUBSCRIPTION_CREATED",
    FamSubscriptionUpdated => "FAM_SUBSCRIPTION_UPDATED",
    FamSubscriptionCancelled => "FAM_SUBSCRIPTION_CANCELLED",
    FamSubscriptionPaymentScheduled => "FAM_SUBSCRIPTION_PAYMENT_SCHEDULED",
    FamSubscriptionPaymentSucceeded => "FAM_SUBSCRIPTION_PAYMENT_SUCCEEDED",
    FamSubscriptionPaymentFailed => "FAM_SUBSCRIPTION_PAYMENT_FAILED",
}

impl EventType {
    /// The family this event type belongs to.
    #[must_use]
    pub fn family(&self) -> EventFamily {
        EventFamily::of(self.as_str())
    }

    /// Returns true for types without a dedicated variant.
    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        matches!(self, Self::Other(_))
    }
}

impl From<String> for EventType {
    fn from(name: String) -> Self {
        match Self::from(name.as_str()) {
            Self::Other(_) => Self::Other(name),
            known => known,
        }
    }
}

impl From<EventType> for String {
    fn from(event_type: EventType) -> Self {
        match event_type {
            EventType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for EventType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for EventType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EventType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from)
    }
}

/// A decoded webhook notification.
///
/// The wire field names are kept as sent, including the upstream
/// `RessourceId` spelling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WebhookEvent {
    /// Event discriminator.
    pub event_type: EventType,
    /// Identifier of the resource the event is about.
    #[serde(rename = "RessourceId")]
    pub resource_id: String,
    /// Unix timestamp (seconds) of the event, as sent.
    pub date: Number,
    /// Extra payload carried by custom events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Map<String, Value>>,
    /// Any other top-level fields, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WebhookEvent {
    /// The event date as whole unix seconds.
    ///
    /// Integral floats such as `1700000000.0` are accepted; fractional or
    /// out-of-range dates yield `None`.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::float_cmp
    )] // guarded by the range and fract checks
    pub fn timestamp(&self) -> Option<i64> {
        if let Some(seconds) = self.date.as_i64() {
            return Some(seconds);
        }
        self.date
            .as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
            .map(|f| f as i64)
    }

    /// The family of this event's type.
    #[must_use]
    pub fn family(&self) -> EventFamily {
        self.event_type.family()
    }

    /// Returns true if this is an upstream MangoPay event.
    #[must_use]
    pub fn is_mangopay(&self) -> bool {
        self.family() == EventFamily::Mangopay
    }

    /// Returns true if this is a custom FAM event.
    #[must_use]
    pub fn is_fam(&self) -> bool {
        self.family() == EventFamily::Fam
    }
}
