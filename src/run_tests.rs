//! Tests for the run module.

use super::*;
use fam_sdk::client::ClientOptions;
use fam_sdk::config::Cli;
use fam_sdk::time::InstantSleeper;
use fam_sdk::transport::{HttpRequest, HttpResponse, TransportError};
use fam_sdk::webhooks::WebhookConfig;
use fam_sdk::ErrorKind;
use http::{HeaderMap, StatusCode};
use serde_json::json;
use std::io::Write;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::SystemTime;
use tempfile::NamedTempFile;

const PAYLOAD: &str = r#"{"EventType":"FAM_SUBSCRIPTION_CREATED","RessourceId":"sub_1","Date":1700000000}"#;

/// Mock transport answering every call with the same response.
#[derive(Debug)]
struct MockTransport {
    status: StatusCode,
    body: &'static str,
    requests: Mutex<Vec<HttpRequest>>,
    call_count: AtomicUsize,
}

impl MockTransport {
    fn new(status: StatusCode, body: &'static str) -> Self {
        Self {
            status,
            body,
            requests: Mutex::new(Vec::new()),
            call_count: AtomicUsize::new(0),
        }
    }

    fn last_request(&self) -> HttpRequest {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }
}

impl Transport for MockTransport {
    async fn send(&self, req: HttpRequest) -> std::result::Result<HttpResponse, TransportError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(req);
        Ok(HttpResponse::new(
            self.status,
            HeaderMap::new(),
            self.body.as_bytes().to_vec(),
        ))
    }
}

fn client(transport: MockTransport) -> HttpClient<MockTransport, InstantSleeper> {
    let options = ClientOptions::new("https://api.test").unwrap().with_retries(2);
    HttpClient::from_parts(options, transport, InstantSleeper)
}

fn request_args(args: &[&str]) -> RequestArgs {
    let mut full_args = vec!["fam", "request"];
    full_args.extend(args);
    match Cli::parse_from_iter(full_args).command {
        Command::Request(args) => args,
        other => panic!("expected request command, got {other:?}"),
    }
}

fn webhook_args(args: &[&str]) -> VerifyWebhookArgs {
    let mut full_args = vec!["fam", "verify-webhook"];
    full_args.extend(args);
    match Cli::parse_from_iter(full_args).command {
        Command::VerifyWebhook(args) => args,
        other => panic!("expected verify-webhook command, got {other:?}"),
    }
}

/// Clock frozen at a fixed unix time.
#[derive(Debug, Clone, Copy)]
struct FixedClock(u64);

impl Clock for FixedClock {
    fn now(&self) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(self.0)
    }
}

fn signed_webhooks() -> Webhooks<FixedClock> {
    Webhooks::with_clock(
        WebhookConfig::new().with_signing_secret("whsec"),
        FixedClock(1_700_000_000),
    )
}

mod run_error {
    use super::*;

    #[test]
    fn config_errors_are_flagged_for_exit_code() {
        let error = RunError::from(ConfigError::InvalidMethod("TRACE".to_string()));

        assert!(error.is_config());
        assert_eq!(error.to_string(), "Invalid HTTP method 'TRACE'");
    }

    #[test]
    fn request_errors_display_the_sdk_message() {
        let error = RunError::Request(fam_sdk::Error::not_found("No such wallet"));

        assert!(!error.is_config());
        assert!(error.to_string().starts_with("Request failed:"));
        assert!(error.to_string().contains("No such wallet"));
    }
}

mod send_request {
    use super::*;

    #[tokio::test]
    async fn get_with_params_returns_decoded_body() {
        let client = client(MockTransport::new(StatusCode::OK, r#"{"Id":"w_1"}"#));
        let args = request_args(&["get", "/api/v1/mangopay/wallets/w_1", "--param", "a=1"]);

        let response = send_request(&client, &args).await.unwrap();

        assert_eq!(response, json!({"Id": "w_1"}));
        let request = client.transport().last_request();
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.url.as_str(), "https://api.test/api/v1/mangopay/wallets/w_1?a=1");
        assert!(request.body.is_none());
    }

    #[tokio::test]
    async fn post_sends_json_body() {
        let client = client(MockTransport::new(StatusCode::OK, "{}"));
        let args = request_args(&["POST", "/api/v1/promotions/codes", "--data", r#"{"code":"X"}"#]);

        send_request(&client, &args).await.unwrap();

        let request = client.transport().last_request();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.body_text(), Some(r#"{"code":"X"}"#));
    }

    #[tokio::test]
    async fn delete_ignores_body() {
        let client = client(MockTransport::new(StatusCode::OK, ""));
        let args = request_args(&["DELETE", "/api/v1/mangopay/products/p_1", "--data", "{}"]);

        let response = send_request(&client, &args).await.unwrap();

        assert_eq!(response, Value::Null);
        assert!(client.transport().last_request().body.is_none());
    }

    #[tokio::test]
    async fn skip_retry_sends_one_attempt() {
        let client = client(MockTransport::new(StatusCode::SERVICE_UNAVAILABLE, "{}"));
        let args = request_args(&["GET", "/x", "--skip-retry"]);

        let err = send_request(&client, &args).await.unwrap_err();

        assert!(matches!(err, RunError::Request(ref e) if e.kind() == ErrorKind::Api));
        assert_eq!(client.transport().call_count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retryable_failure_uses_client_retries() {
        let client = client(MockTransport::new(StatusCode::SERVICE_UNAVAILABLE, "{}"));
        let args = request_args(&["GET", "/x"]);

        send_request(&client, &args).await.unwrap_err();

        assert_eq!(client.transport().call_count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn bad_arguments_fail_before_sending() {
        let client = client(MockTransport::new(StatusCode::OK, "{}"));

        for args in [
            request_args(&["TRACE", "/x"]),
            request_args(&["GET", "/x", "--param", "novalue"]),
            request_args(&["POST", "/x", "--data", "{"]),
            request_args(&["GET", "/x", "--request-timeout", "0"]),
        ] {
            let err = send_request(&client, &args).await.unwrap_err();
            assert!(err.is_config(), "{args:?}");
        }
        assert_eq!(client.transport().call_count.load(Ordering::SeqCst), 0);
    }
}

mod verify_webhook {
    use super::*;

    #[test]
    fn valid_signature_yields_event() {
        let webhooks = signed_webhooks();
        let signature = webhooks.sign(PAYLOAD).unwrap();
        let args = webhook_args(&["--signature", &signature]);

        let event = verify_webhook(&webhooks, PAYLOAD, &args).unwrap();

        assert_eq!(describe_event(&event), "FAM_SUBSCRIPTION_CREATED (fam) resource=sub_1");
    }

    #[test]
    fn wrong_signature_is_rejected() {
        let args = webhook_args(&["--signature", "deadbeef"]);

        let err = verify_webhook(&signed_webhooks(), PAYLOAD, &args).unwrap_err();

        assert!(matches!(err, RunError::Webhook(ref e) if e.kind() == ErrorKind::WebhookSignature));
        assert!(!err.is_config());
    }

    #[test]
    fn timestamp_enables_replay_check() {
        let webhooks = signed_webhooks();
        let signature = webhooks.sign(PAYLOAD).unwrap();

        let fresh = webhook_args(&["--signature", &signature, "--timestamp", "1700000000"]);
        assert!(verify_webhook(&webhooks, PAYLOAD, &fresh).is_ok());

        let stale = webhook_args(&["--signature", &signature, "--timestamp", "1600000000"]);
        let err = verify_webhook(&webhooks, PAYLOAD, &stale).unwrap_err();
        assert!(err.to_string().contains("too old"));
    }

    #[test]
    fn without_secret_only_parses() {
        let webhooks = Webhooks::with_clock(WebhookConfig::new(), FixedClock(0));

        let event = verify_webhook(&webhooks, PAYLOAD, &webhook_args(&[])).unwrap();

        assert_eq!(event.resource_id, "sub_1");
    }
}

mod read_payload {
    use super::*;

    #[tokio::test]
    async fn file_content_is_read_verbatim() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{PAYLOAD}").unwrap();

        let payload = read_payload(file.path().to_str().unwrap()).await.unwrap();

        assert_eq!(payload, format!("{PAYLOAD}\n"));
    }

    #[tokio::test]
    async fn missing_file_is_a_config_error() {
        let err = read_payload("/nonexistent/payload.json").await.unwrap_err();

        assert!(matches!(err, ConfigError::PayloadRead { .. }));
        assert!(err.to_string().contains("/nonexistent/payload.json"));
    }
}
