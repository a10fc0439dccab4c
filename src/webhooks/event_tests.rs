//! Tests for event types and family classification.

use super::{EventFamily, EventType, WebhookEvent, is_fam_event, is_mangopay_event};
use serde_json::{Value, json};

mod classification {
    use super::*;

    #[test]
    fn fam_prefix_decides_family() {
        assert!(is_fam_event("FAM_SUBSCRIPTION_CREATED"));
        assert!(!is_mangopay_event("FAM_SUBSCRIPTION_CREATED"));

        assert!(is_mangopay_event("PAYIN_NORMAL_SUCCEEDED"));
        assert!(!is_fam_event("PAYIN_NORMAL_SUCCEEDED"));
    }

    #[test]
    fn predicates_are_exclusive_and_exhaustive() {
        let samples = [
            "",
            "FAM_",
            "FAM",
            "fam_subscription_created",
            "XFAM_",
            "FAM_ANYTHING",
            "KYC_SUCCEEDED",
            "UNKNOWN_EVENT",
            " FAM_LEADING_SPACE",
        ];

        for sample in samples {
            assert_ne!(
                is_fam_event(sample),
                is_mangopay_event(sample),
                "exactly one family must match {sample:?}"
            );
        }
    }

    #[test]
    fn every_known_type_has_one_family_matching_its_prefix() {
        for event_type in EventType::KNOWN {
            let expected = if event_type.as_str().starts_with("FAM_") {
                EventFamily::Fam
            } else {
                EventFamily::Mangopay
            };
            assert_eq!(event_type.family(), expected, "{event_type}");
        }
    }

    #[test]
    fn known_types_split_into_both_families() {
        let fam = EventType::KNOWN
            .iter()
            .filter(|t| t.family() == EventFamily::Fam)
            .count();

        assert_eq!(fam, 6);
        assert_eq!(EventType::KNOWN.len() - fam, 44);
    }
}

mod event_type {
    use super::*;

    #[test]
    fn known_names_map_to_variants() {
        assert_eq!(
            EventType::from("PAYIN_NORMAL_SUCCEEDED"),
            EventType::PayinNormalSucceeded
        );
        assert_eq!(
            EventType::from("FAM_SUBSCRIPTION_PAYMENT_FAILED"),
            EventType::FamSubscriptionPaymentFailed
        );
    }

    #[test]
    fn every_known_name_round_trips_through_its_string() {
        for event_type in EventType::KNOWN {
            assert_eq!(&EventType::from(event_type.as_str()), event_type);
            assert!(!event_type.is_unknown());
        }
    }

    #[test]
    fn unknown_names_are_preserved() {
        let event_type: EventType = "DISPUTE_CREATED".parse().unwrap();

        assert_eq!(event_type, EventType::Other("DISPUTE_CREATED".to_string()));
        assert!(event_type.is_unknown());
        assert_eq!(event_type.to_string(), "DISPUTE_CREATED");
        assert_eq!(String::from(event_type), "DISPUTE_CREATED");
    }

    #[test]
    fn unknown_fam_names_still_classify_as_fam() {
        assert_eq!(
            EventType::from("FAM_BUNDLE_DISSOLVED").family(),
            EventFamily::Fam
        );
    }
}

mod webhook_event {
    use super::*;

    #[test]
    fn deserializes_wire_field_names() {
        let event: WebhookEvent = serde_json::from_value(json!({
            "EventType": "FAM_SUBSCRIPTION_CREATED",
            "RessourceId": "sub_1",
            "Date": 1_700_000_000,
            "Data": {"plan": "pro"}
        }))
        .unwrap();

        assert_eq!(event.event_type, EventType::FamSubscriptionCreated);
        assert_eq!(event.resource_id, "sub_1");
        assert_eq!(event.timestamp(), Some(1_700_000_000));
        assert_eq!(event.data.unwrap()["plan"], "pro");
    }

    #[test]
    fn data_is_optional() {
        let event: WebhookEvent = serde_json::from_value(json!({
            "EventType": "KYC_SUCCEEDED",
            "RessourceId": "kyc_1",
            "Date": 1
        }))
        .unwrap();

        assert!(event.data.is_none());
        assert!(event.is_mangopay());
        assert!(!event.is_fam());
    }

    #[test]
    fn serializes_back_to_wire_shape() {
        let event = WebhookEvent {
            event_type: EventType::TransferNormalFailed,
            resource_id: "tr_9".to_string(),
            date: 42.into(),
            data: None,
            extra: serde_json::Map::new(),
        };

        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({"EventType": "TRANSFER_NORMAL_FAILED", "RessourceId": "tr_9", "Date": 42})
        );
    }

    #[test]
    fn unknown_fields_are_kept() {
        let event: WebhookEvent = serde_json::from_value(json!({
            "EventType": "PAYOUT_NORMAL_SUCCEEDED",
            "RessourceId": "po_1",
            "Date": 5,
            "Tag": "batch-7"
        }))
        .unwrap();

        assert_eq!(event.extra["Tag"], "batch-7");
        assert!(event.data.is_none());
    }

    #[test]
    fn timestamp_accepts_integral_floats_only() {
        let at = |date: Value| {
            serde_json::from_value::<WebhookEvent>(json!({
                "EventType": "KYC_SUCCEEDED",
                "RessourceId": "kyc_1",
                "Date": date
            }))
            .unwrap()
            .timestamp()
        };

        assert_eq!(at(json!(1_700_000_000)), Some(1_700_000_000));
        assert_eq!(at(json!(1_700_000_000.0)), Some(1_700_000_000));
        assert_eq!(at(json!(-3)), Some(-3));
        assert_eq!(at(json!(1.5)), None);
        assert_eq!(at(json!(1e300)), None);
    }

    #[test]
    fn family_display_is_lowercase() {
        assert_eq!(EventFamily::Mangopay.to_string(), "mangopay");
        assert_eq!(EventFamily::Fam.to_string(), "fam");
    }
}
