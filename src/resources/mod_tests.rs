//! Tests for the resource facades: every call lands on the right endpoint.

use super::*;
use crate::ErrorKind;
use crate::client::{ClientOptions, HttpClient, RequestOptions};
use crate::time::InstantSleeper;
use crate::transport::{HttpRequest, HttpResponse, Transport, TransportError};
use http::{HeaderMap, Method, StatusCode};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

/// Records every request and answers with a fixed status and body.
#[derive(Debug)]
struct RecordingTransport {
    status: u16,
    body: &'static str,
    requests: Mutex<Vec<HttpRequest>>,
}

impl RecordingTransport {
    fn answering(status: u16, body: &'static str) -> Arc<Self> {
        Arc::new(Self {
            status,
            body,
            requests: Mutex::new(Vec::new()),
        })
    }

    fn last(&self) -> HttpRequest {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }

    fn last_route(&self) -> (Method, String) {
        let request = self.last();
        (request.method, request.url.path().to_string())
    }

    fn last_query(&self) -> Option<String> {
        self.last().url.query().map(str::to_string)
    }

    fn last_body(&self) -> Value {
        serde_json::from_slice(self.last().body.as_deref().unwrap()).unwrap()
    }
}

impl Transport for RecordingTransport {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(req);
        Ok(HttpResponse::new(
            StatusCode::from_u16(self.status).unwrap(),
            HeaderMap::new(),
            self.body.as_bytes().to_vec(),
        ))
    }
}

type Client = HttpClient<Arc<RecordingTransport>, InstantSleeper>;

fn client_with(transport: &Arc<RecordingTransport>) -> Client {
    let options = ClientOptions::new("https://api.test").unwrap().with_retries(0);
    HttpClient::from_parts(options, Arc::clone(transport), InstantSleeper)
}

fn ok() -> (Arc<RecordingTransport>, Client) {
    let transport = RecordingTransport::answering(200, r#"{"success":true}"#);
    let client = client_with(&transport);
    (transport, client)
}

mod resource_paths {
    use super::*;

    #[test]
    fn empty_endpoint_is_the_base_path() {
        let (_, client) = ok();
        let resource = Resource::new(client, "/api/v1/things");

        assert_eq!(resource.path(""), "/api/v1/things");
        assert_eq!(resource.path("a/b"), "/api/v1/things/a/b");
        assert_eq!(resource.path_segments(&[]), "/api/v1/things");
    }

    #[test]
    fn segments_are_joined_and_encoded() {
        let (_, client) = ok();
        let resource = Resource::new(client, "/api/v1/things");

        assert_eq!(resource.path_segments(&["a", "b"]), "/api/v1/things/a/b");
        assert_eq!(
            resource.path_segments(&["x/../y", "name with space"]),
            "/api/v1/things/x%2F..%2Fy/name%20with%20space"
        );
        assert_eq!(resource.path_segments(&["a-b.c_d~e"]), "/api/v1/things/a-b.c_d~e");
    }

    #[tokio::test]
    async fn encoded_segment_cannot_escape_its_position() {
        let (transport, client) = ok();
        let products = Products::new(client);

        let _: Value = products.get_by_name("../../admin").await.unwrap();

        let (_, path) = transport.last_route();
        assert!(path.starts_with("/api/v1/mangopay/products/name/"));
        assert!(!path.contains("/admin"));
    }

    #[test]
    fn facades_expose_their_base_path() {
        let (_, client) = ok();
        let users = Users::new(client);

        assert_eq!(Users::<Arc<RecordingTransport>, InstantSleeper>::BASE_PATH, "/api/v1/mangopay/users");
        assert_eq!(users.resource().base_path(), "/api/v1/mangopay/users");
        assert!(format!("{users:?}").contains("/api/v1/mangopay/users"));
    }
}

mod pagination {
    use super::*;

    #[tokio::test]
    async fn set_fields_become_query_params() {
        let (transport, client) = ok();
        let users = Users::new(client);
        let pagination = Pagination::new()
            .with_page(2)
            .with_per_page(50)
            .with_sort("CreationDate")
            .with_order(SortOrder::Desc);

        let _: Value = users.wallets("u_1", &pagination).await.unwrap();

        assert_eq!(
            transport.last_route(),
            (Method::GET, "/api/v1/mangopay/users/u_1/wallets".to_string())
        );
        assert_eq!(
            transport.last_query().as_deref(),
            Some("page=2&per_page=50&sort=CreationDate&order=desc")
        );
    }

    #[tokio::test]
    async fn empty_pagination_adds_no_query() {
        let (transport, client) = ok();
        let users = Users::new(client);

        let _: Value = users.bank_accounts("u_1", &Pagination::new()).await.unwrap();

        assert_eq!(transport.last().url.path(), "/api/v1/mangopay/users/u_1/bankaccounts");
        assert_eq!(transport.last_query(), None);
    }
}

mod mangopay_facades {
    use super::*;

    #[tokio::test]
    async fn users_routes() {
        let (transport, client) = ok();
        let users = Users::new(client);
        let body = json!({"FirstName": "Ada"});

        let _: Value = users.create_natural(&body).await.unwrap();
        assert_eq!(
            transport.last_route(),
            (Method::POST, "/api/v1/mangopay/users/natural".to_string())
        );
        assert_eq!(transport.last_body(), body);

        let _: Value = users.update_legal("u_2", &body).await.unwrap();
        assert_eq!(
            transport.last_route(),
            (Method::PUT, "/api/v1/mangopay/users/legal/u_2".to_string())
        );

        let _: Value = users.get("u_3").await.unwrap();
        assert_eq!(
            transport.last_route(),
            (Method::GET, "/api/v1/mangopay/users/u_3".to_string())
        );
    }

    #[tokio::test]
    async fn wallets_routes() {
        let (transport, client) = ok();
        let wallets = Wallets::new(client);

        let _: Value = wallets.create(&json!({"Currency": "EUR"})).await.unwrap();
        assert_eq!(
            transport.last_route(),
            (Method::POST, "/api/v1/mangopay/wallets".to_string())
        );

        let _: Value = wallets
            .transactions("w_1", &Pagination::new().with_page(1))
            .await
            .unwrap();
        assert_eq!(transport.last().url.path(), "/api/v1/mangopay/wallets/w_1/transactions");
        assert_eq!(transport.last_query().as_deref(), Some("page=1"));
    }

    #[tokio::test]
    async fn payins_recurring_routes() {
        let (transport, client) = ok();
        let payins = Payins::new(client);

        let _: Value = payins.refund("pi_1", &json!({})).await.unwrap();
        assert_eq!(
            transport.last_route(),
            (Method::POST, "/api/v1/mangopay/payins/pi_1/refund".to_string())
        );

        let _: Value = payins.view_recurring_payment("reg_1").await.unwrap();
        assert_eq!(
            transport.last_route(),
            (
                Method::GET,
                "/api/v1/mangopay/payins/viewRecurringPayment/reg_1".to_string()
            )
        );

        let _: Value = payins.create_recurring_mit(&json!({})).await.unwrap();
        assert_eq!(
            transport.last().url.path(),
            "/api/v1/mangopay/payins/createRecurringPayInRegistrationMIT"
        );
    }

    #[tokio::test]
    async fn ending_a_recurring_payment_sends_ended_status() {
        let (transport, client) = ok();
        let payins = Payins::new(client);

        let _: Value = payins.end_recurring_payment("reg_9").await.unwrap();

        assert_eq!(
            transport.last_route(),
            (
                Method::PUT,
                "/api/v1/mangopay/payins/updateRecurringPayin/reg_9".to_string()
            )
        );
        assert_eq!(transport.last_body(), json!({"Status": "ENDED"}));
    }

    #[tokio::test]
    async fn payouts_and_transfers_routes() {
        let (transport, client) = ok();
        let payouts = Payouts::new(client.clone());
        let transfers = Transfers::new(client);

        let _: Value = payouts.get("po_1").await.unwrap();
        assert_eq!(transport.last().url.path(), "/api/v1/mangopay/payouts/po_1");

        let _: Value = transfers.create_sca(&json!({})).await.unwrap();
        assert_eq!(
            transport.last_route(),
            (Method::POST, "/api/v1/mangopay/transfers/sca".to_string())
        );

        let _: Value = transfers.get_sca("tr_1").await.unwrap();
        assert_eq!(
            transport.last_route(),
            (Method::GET, "/api/v1/mangopay/transfers/sca/tr_1".to_string())
        );
    }
}

mod card_facades {
    use super::*;

    #[tokio::test]
    async fn registrations_routes() {
        let (transport, client) = ok();
        let registrations = CardRegistrations::new(client);

        let _: Value = registrations
            .create(&json!({"Currency": "EUR"}))
            .await
            .unwrap();
        assert_eq!(
            transport.last_route(),
            (Method::POST, "/api/v1/mangopay/cardRegistrations".to_string())
        );

        let _: Value = registrations
            .update("cr_1", &json!({"RegistrationData": "data=abc"}))
            .await
            .unwrap();
        assert_eq!(
            transport.last_route(),
            (Method::PUT, "/api/v1/mangopay/cardRegistrations/cr_1".to_string())
        );
    }

    #[tokio::test]
    async fn deactivating_a_card_posts_inactive_flag() {
        let (transport, client) = ok();
        let cards = Cards::new(client);

        let _: Value = cards.deactivate("card_1").await.unwrap();

        assert_eq!(
            transport.last_route(),
            (
                Method::POST,
                "/api/v1/mangopay/cards/card_1/desactivate".to_string()
            )
        );
        assert_eq!(transport.last_body(), json!({"Active": false}));
    }

    #[tokio::test]
    async fn card_preauthorizations_are_paginated() {
        let (transport, client) = ok();
        let cards = Cards::new(client);

        let _: Value = cards
            .preauthorizations("card_1", &Pagination::new().with_per_page(5))
            .await
            .unwrap();

        assert_eq!(
            transport.last().url.path(),
            "/api/v1/mangopay/cards/card_1/preauthorizations"
        );
        assert_eq!(transport.last_query().as_deref(), Some("per_page=5"));
    }

    #[tokio::test]
    async fn cancelling_a_preauthorization_updates_its_status() {
        let (transport, client) = ok();
        let preauthorizations = Preauthorizations::new(client);

        let _: Value = preauthorizations.cancel("pa_1").await.unwrap();

        assert_eq!(
            transport.last_route(),
            (Method::PUT, "/api/v1/mangopay/preauthorizations/pa_1".to_string())
        );
        assert_eq!(transport.last_body(), json!({"PaymentStatus": "CANCELED"}));
    }
}

mod user_scoped {
    use super::*;

    #[tokio::test]
    async fn bank_account_routes() {
        let (transport, client) = ok();
        let accounts = BankAccounts::new(client, "u_1");

        let _: Value = accounts.create_iban(&json!({"IBAN": "FR76"})).await.unwrap();
        assert_eq!(
            transport.last_route(),
            (
                Method::POST,
                "/api/v1/mangopay/users/u_1/bankaccounts/iban".to_string()
            )
        );

        let _: Value = accounts.create_other(&json!({})).await.unwrap();
        assert_eq!(
            transport.last().url.path(),
            "/api/v1/mangopay/users/u_1/bankaccounts/other"
        );

        let _: Value = accounts.list(&Pagination::new()).await.unwrap();
        assert_eq!(
            transport.last_route(),
            (Method::GET, "/api/v1/mangopay/users/u_1/bankaccounts".to_string())
        );

        let _: Value = accounts.deactivate("ba_1").await.unwrap();
        assert_eq!(
            transport.last_route(),
            (
                Method::PUT,
                "/api/v1/mangopay/users/u_1/bankaccounts/ba_1".to_string()
            )
        );
        assert_eq!(transport.last_body(), json!({"Active": false}));
    }

    #[tokio::test]
    async fn kyc_document_routes() {
        let (transport, client) = ok();
        let kyc = Kyc::new(client, "u_1");

        kyc.create_page("doc_1", "aGVsbG8=").await.unwrap();
        assert_eq!(
            transport.last_route(),
            (
                Method::POST,
                "/api/v1/mangopay/users/u_1/kyc/documents/doc_1/pages".to_string()
            )
        );
        assert_eq!(transport.last_body(), json!({"File": "aGVsbG8="}));

        let _: Value = kyc.submit("doc_1").await.unwrap();
        assert_eq!(
            transport.last_route(),
            (
                Method::PUT,
                "/api/v1/mangopay/users/u_1/kyc/documents/doc_1".to_string()
            )
        );
        assert_eq!(transport.last_body(), json!({"Status": "VALIDATION_ASKED"}));
    }

    #[tokio::test]
    async fn ubo_declaration_routes() {
        let (transport, client) = ok();
        let ubo = Ubo::new(client, "legal_1");

        let _: Value = ubo.create_declaration().await.unwrap();
        assert_eq!(
            transport.last_route(),
            (
                Method::POST,
                "/api/v1/mangopay/users/legal_1/kyc/ubodeclarations".to_string()
            )
        );
        assert!(transport.last().body.is_none());

        let _: Value = ubo
            .update_ubo("decl_1", "ubo_1", &json!({"FirstName": "Ada"}))
            .await
            .unwrap();
        assert_eq!(
            transport.last_route(),
            (
                Method::PUT,
                "/api/v1/mangopay/users/legal_1/kyc/ubodeclarations/decl_1/ubos/ubo_1"
                    .to_string()
            )
        );
    }

    #[tokio::test]
    async fn recipient_schema_forwards_query() {
        let (transport, client) = ok();
        let recipients = ScaRecipients::new(client, "u_1");

        let _: Value = recipients
            .schema(
                RequestOptions::new()
                    .with_param("PayoutMethodType", "LocalBankTransfer")
                    .with_param("Currency", "GBP"),
            )
            .await
            .unwrap();

        assert_eq!(
            transport.last_route(),
            (
                Method::GET,
                "/api/v1/mangopay/users/u_1/recipients/schema".to_string()
            )
        );
        assert_eq!(
            transport.last_query().as_deref(),
            Some("PayoutMethodType=LocalBankTransfer&Currency=GBP")
        );
    }

    #[tokio::test]
    async fn user_id_is_encoded_as_one_segment() {
        let (transport, client) = ok();
        let accounts = BankAccounts::new(client, "../admin");

        let _: Value = accounts.get("ba_1").await.unwrap();

        assert_eq!(
            transport.last().url.path(),
            "/api/v1/mangopay/users/..%2Fadmin/bankaccounts/ba_1"
        );
    }
}

mod subscriptions {
    use super::*;

    #[tokio::test]
    async fn lifecycle_actions_post_without_body() {
        let (transport, client) = ok();
        let subscriptions = Subscriptions::new(client);

        let _: Value = subscriptions.sync("sub_1").await.unwrap();
        let _: Value = subscriptions.cancel("sub_1").await.unwrap();
        let _: Value = subscriptions.end("sub_1").await.unwrap();

        let requests = transport.requests.lock().unwrap();
        let paths: Vec<&str> = requests.iter().map(|r| r.url.path()).collect();
        assert_eq!(
            paths,
            [
                "/api/v1/mangopay/recurring-subscriptions/sub_1/sync",
                "/api/v1/mangopay/recurring-subscriptions/sub_1/cancel",
                "/api/v1/mangopay/recurring-subscriptions/sub_1/end",
            ]
        );
        for request in requests.iter() {
            assert_eq!(request.method, Method::POST);
            assert!(request.body.is_none());
        }
    }

    #[tokio::test]
    async fn toggles_update_the_matching_flag() {
        let (transport, client) = ok();
        let subscriptions = Subscriptions::new(client);

        let _: Value = subscriptions.disable("sub_1").await.unwrap();
        assert_eq!(transport.last().method, Method::PUT);
        assert_eq!(transport.last_body(), json!({"processingEnabled": false}));

        let _: Value = subscriptions.enable_webhooks("sub_1").await.unwrap();
        assert_eq!(transport.last_body(), json!({"webhookNotificationEnabled": true}));
    }

    #[tokio::test]
    async fn list_by_user_skips_empty_filters() {
        let (transport, client) = ok();
        let subscriptions = Subscriptions::new(client);

        let _: Value = subscriptions
            .list_by_mangopay_user("mp_1", Some(""), None)
            .await
            .unwrap();
        assert_eq!(
            transport.last().url.path(),
            "/api/v1/mangopay/recurring-subscriptions/user/mp_1"
        );
        assert_eq!(transport.last_query(), None);

        let _: Value = subscriptions
            .list_by_mangopay_user("mp_1", Some("MONTHLY"), Some(true))
            .await
            .unwrap();
        assert_eq!(
            transport.last_query().as_deref(),
            Some("subscriptionType=MONTHLY&activeOnly=true")
        );
    }

    #[tokio::test]
    async fn registration_and_product_routes() {
        let (transport, client) = ok();
        let subscriptions = Subscriptions::new(client);

        let _: Value = subscriptions
            .update_by_registration_id("reg_1", &json!({"amount": 990}))
            .await
            .unwrap();
        assert_eq!(
            transport.last_route(),
            (
                Method::PUT,
                "/api/v1/mangopay/recurring-subscriptions/by-registration/reg_1".to_string()
            )
        );

        let _: Value = subscriptions
            .link_products("sub_1", &json!({"productIds": ["p_1"]}))
            .await
            .unwrap();
        assert_eq!(
            transport.last().url.path(),
            "/api/v1/mangopay/recurring-subscriptions/sub_1/link-products"
        );
    }
}

mod bundles {
    use super::*;

    #[tokio::test]
    async fn price_leaves_out_absent_fields() {
        let (transport, client) = ok();
        let bundles = Bundles::new(client);

        let _: Value = bundles.price(&["s1", "s2"], None, None).await.unwrap();
        assert_eq!(transport.last().url.path(), "/api/v1/mangopay/bundles/price");
        assert_eq!(transport.last_body(), json!({"subscriptionIds": ["s1", "s2"]}));

        let _: Value = bundles
            .price(&["s1"], Some("mp_1"), Some(BillingPeriod::Yearly))
            .await
            .unwrap();
        assert_eq!(
            transport.last_body(),
            json!({"subscriptionIds": ["s1"], "mangopayUserId": "mp_1", "billingPeriod": "yearly"})
        );
    }

    #[tokio::test]
    async fn validate_names_the_user() {
        let (transport, client) = ok();
        let bundles = Bundles::new(client);

        let _: Value = bundles.validate(&["s1"], "mp_1").await.unwrap();

        assert_eq!(
            transport.last_body(),
            json!({"subscriptionIds": ["s1"], "mangopayUserId": "mp_1"})
        );
    }

    #[tokio::test]
    async fn membership_changes_update_the_bundle() {
        let (transport, client) = ok();
        let bundles = Bundles::new(client);

        let _: Value = bundles.add_subscriptions("b_1", &["s3"], Some(1990)).await.unwrap();
        assert_eq!(
            transport.last_route(),
            (Method::PUT, "/api/v1/mangopay/bundles/b_1".to_string())
        );
        assert_eq!(
            transport.last_body(),
            json!({"addSubscriptionIds": ["s3"], "amount": 1990})
        );

        let _: Value = bundles.remove_subscriptions("b_1", &["s1"], None).await.unwrap();
        assert_eq!(transport.last_body(), json!({"removeSubscriptionIds": ["s1"]}));
    }

    #[tokio::test]
    async fn dissolve_and_list_by_user() {
        let (transport, client) = ok();
        let bundles = Bundles::new(client);

        let _: Value = bundles.dissolve("b_1").await.unwrap();
        assert_eq!(
            transport.last_route(),
            (Method::DELETE, "/api/v1/mangopay/bundles/b_1".to_string())
        );

        let _: Value = bundles.list_by_mangopay_user("mp 1").await.unwrap();
        assert_eq!(transport.last().url.path(), "/api/v1/mangopay/bundles");
        assert_eq!(transport.last_query().as_deref(), Some("mangopayUserId=mp+1"));

        let _: Value = bundles.deactivate("b_1").await.unwrap();
        assert_eq!(transport.last_body(), json!({"isActive": false}));
    }
}

mod products {
    use super::*;

    #[tokio::test]
    async fn upserts_target_lookup_paths() {
        let (transport, client) = ok();
        let products = Products::new(client);

        let _: Value = products
            .upsert_by_external_id("ext-1", &json!({"name": "Pro"}))
            .await
            .unwrap();
        assert_eq!(
            transport.last_route(),
            (Method::PUT, "/api/v1/mangopay/products/external/ext-1".to_string())
        );

        let _: Value = products.remove("p_1").await.unwrap();
        assert_eq!(
            transport.last_route(),
            (Method::DELETE, "/api/v1/mangopay/products/p_1".to_string())
        );
    }

    #[tokio::test]
    async fn find_returns_some_on_success() {
        let (_, client) = ok();
        let products = Products::new(client);

        let found: Option<Value> = products.find_by_external_id("ext-1").await.unwrap();

        assert_eq!(found, Some(json!({"success": true})));
    }

    #[tokio::test]
    async fn find_returns_none_on_not_found() {
        let transport = RecordingTransport::answering(404, r#"{"message":"No product"}"#);
        let products = Products::new(client_with(&transport));

        let found: Option<Value> = products.find_by_name("missing").await.unwrap();

        assert!(found.is_none());
    }

    #[tokio::test]
    async fn find_propagates_other_errors() {
        let transport = RecordingTransport::answering(500, r#"{"message":"boom"}"#);
        let products = Products::new(client_with(&transport));

        let err = products.find_by_name::<Value>("any").await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Api);
        assert_eq!(err.status_code(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    }
}

mod promotions {
    use super::*;

    #[tokio::test]
    async fn coupon_and_code_routes() {
        let (transport, client) = ok();
        let promotions = Promotions::new(client);

        let _: Value = promotions.coupon_stats().await.unwrap();
        assert_eq!(
            transport.last_route(),
            (Method::GET, "/api/v1/promotions/coupons/stats".to_string())
        );

        let _: Value = promotions.delete_coupon("c_1").await.unwrap();
        assert_eq!(
            transport.last_route(),
            (Method::DELETE, "/api/v1/promotions/coupons/c_1".to_string())
        );

        let _: Value = promotions.validate_code(&json!({"code": "WELCOME"})).await.unwrap();
        assert_eq!(
            transport.last_route(),
            (Method::POST, "/api/v1/promotions/codes/validate".to_string())
        );

        let _: Value = promotions.find_by_code("WELCOME10").await.unwrap();
        assert_eq!(
            transport.last().url.path(),
            "/api/v1/promotions/codes/by-code/WELCOME10"
        );
    }

    #[tokio::test]
    async fn listing_forwards_options() {
        let (transport, client) = ok();
        let promotions = Promotions::new(client);

        let options = Pagination::new().with_page(3).apply(RequestOptions::new().with_param("active", true));
        let _: Value = promotions.list_codes(options).await.unwrap();

        assert_eq!(transport.last().url.path(), "/api/v1/promotions/codes");
        assert_eq!(transport.last_query().as_deref(), Some("active=true&page=3"));
    }
}

mod portal {
    use super::*;

    #[tokio::test]
    async fn session_calls_send_the_session_header() {
        let (transport, client) = ok();
        let portal = Portal::new(client);

        let _: Value = portal.get_user("sess_1").await.unwrap();
        let request = transport.last();
        assert_eq!(request.url.path(), "/api/v1/portal/user");
        assert_eq!(request.headers.get(PORTAL_SESSION_HEADER).unwrap(), "sess_1");
        assert!(request.headers.get(PORTAL_SESSION_HEADER).unwrap().is_sensitive());

        let _: Value = portal.refresh_session("sess_1").await.unwrap();
        let request = transport.last();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.url.path(), "/api/v1/portal/session/refresh");
        assert!(request.body.is_none());

        let _: Value = portal.logout("sess_1").await.unwrap();
        assert_eq!(transport.last().url.path(), "/api/v1/portal/logout");
    }

    #[tokio::test]
    async fn session_creation_does_not_send_the_header() {
        let (transport, client) = ok();
        let portal = Portal::new(client);

        let _: Value = portal.create_session(&json!({"mangopayUserId": "mp_1"})).await.unwrap();

        let request = transport.last();
        assert_eq!(request.url.path(), "/api/v1/portal/sessions");
        assert!(request.headers.get(PORTAL_SESSION_HEADER).is_none());
    }

    #[tokio::test]
    async fn invalid_session_token_is_rejected_before_sending() {
        let (transport, client) = ok();
        let portal = Portal::new(client);

        let err = portal.get_user::<Value>("bad\ntoken").await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidRequest);
        assert!(transport.requests.lock().unwrap().is_empty());
    }
}
