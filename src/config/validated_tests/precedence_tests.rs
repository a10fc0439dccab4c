//! Tests for CLI vs TOML precedence rules.

use std::time::Duration;

use super::*;

const TOML_CLIENT: &str = r#"
    [client]
    base_url = "https://toml.fam.example"
    token = "toml-token"
    timeout_ms = 9000
    retries = 7

    [client.headers]
    X-Tenant = "toml"
    X-Only-Toml = "kept"

    [webhook]
    signing_secret = "toml-secret"
    timestamp_tolerance = 600
"#;

mod cli_precedence {
    use super::*;

    #[test]
    fn cli_base_url_overrides_toml() {
        let cli = cli(&["--base-url", "https://cli.fam.example"]);
        let config = ValidatedConfig::from_raw(&cli, Some(&toml(TOML_CLIENT))).unwrap();

        assert_eq!(
            config.require_client().unwrap().base_url().as_str(),
            "https://cli.fam.example/"
        );
    }

    #[test]
    fn cli_client_settings_override_toml() {
        let cli = cli(&["--token", "cli-token", "--timeout", "100", "--retries", "0"]);
        let config = ValidatedConfig::from_raw(&cli, Some(&toml(TOML_CLIENT))).unwrap();
        let client = config.require_client().unwrap();

        assert_eq!(client.token(), Some("cli-token"));
        assert_eq!(client.timeout(), Duration::from_millis(100));
        assert_eq!(client.retries(), 0);
    }

    #[test]
    fn cli_headers_replace_same_named_toml_headers_only() {
        let cli = cli(&["--header", "X-Tenant: cli"]);
        let config = ValidatedConfig::from_raw(&cli, Some(&toml(TOML_CLIENT))).unwrap();
        let headers = config.require_client().unwrap().headers();

        assert_eq!(headers.get("x-tenant").unwrap(), "cli");
        assert_eq!(headers.get("x-only-toml").unwrap(), "kept");
    }

    #[test]
    fn cli_webhook_settings_override_toml() {
        let cli = cli(&["--signing-secret", "cli-secret", "--tolerance", "30"]);
        let config = ValidatedConfig::from_raw(&cli, Some(&toml(TOML_CLIENT))).unwrap();

        assert_eq!(config.webhook.signing_secret(), Some("cli-secret"));
        assert_eq!(config.webhook.timestamp_tolerance(), 30);
    }
}

mod toml_fallback {
    use super::*;

    #[test]
    fn toml_values_apply_without_cli() {
        let config = ValidatedConfig::from_raw(&cli(&[]), Some(&toml(TOML_CLIENT))).unwrap();
        let client = config.require_client().unwrap();

        assert_eq!(client.token(), Some("toml-token"));
        assert_eq!(client.timeout(), Duration::from_millis(9000));
        assert_eq!(client.retries(), 7);
        assert_eq!(config.webhook.signing_secret(), Some("toml-secret"));
        assert_eq!(config.webhook.timestamp_tolerance(), 600);
    }
}

mod defaults {
    use super::*;
    use crate::config::defaults;

    #[test]
    fn defaults_apply_when_unset() {
        let cli = cli(&["--base-url", "https://api.fam.example"]);
        let config = ValidatedConfig::from_raw(&cli, None).unwrap();
        let client = config.require_client().unwrap();

        assert_eq!(client.timeout(), defaults::timeout());
        assert_eq!(client.retries(), defaults::RETRIES);
        assert_eq!(client.retry_policy().base_delay, defaults::retry_base_delay());
        assert_eq!(client.retry_policy().max_delay, defaults::retry_max_delay());
        assert!(client.token().is_none());
        assert!(client.headers().is_empty());
        assert_eq!(
            config.webhook.timestamp_tolerance(),
            defaults::WEBHOOK_TOLERANCE_SECS
        );
    }
}
