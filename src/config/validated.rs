//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use http::HeaderMap;
use http::header::{HeaderName, HeaderValue};
use url::Url;

use crate::client::ClientOptions;
use crate::webhooks::WebhookConfig;

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// API client options; `None` when no base URL was given
    pub client: Option<ClientOptions>,

    /// Webhook verification settings
    pub webhook: WebhookConfig,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let set = |present: bool| if present { "set" } else { "none" };

        match &self.client {
            Some(client) => write!(
                f,
                "Config {{ base_url: {}, token: {}, timeout: {}ms, retries: {}, headers: {}, ",
                client.base_url(),
                set(client.token().is_some()),
                client.timeout().as_millis(),
                client.retries(),
                client.headers().len(),
            )?,
            None => f.write_str("Config { base_url: none, ")?,
        }

        write!(
            f,
            "signing_secret: {}, tolerance: {}s }}",
            set(self.webhook.signing_secret().is_some()),
            self.webhook.timestamp_tolerance(),
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The base URL is invalid or not http(s)
    /// - The timeout or a retry delay is zero
    /// - The retry cap is below the base delay
    /// - Header format is invalid
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let client = match Self::resolve_base_url(cli, toml)? {
            Some(base_url) => Some(Self::build_client_options(base_url, cli, toml)?),
            None => None,
        };

        let webhook = Self::build_webhook_config(cli, toml)?;

        Ok(Self {
            client,
            webhook,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    /// The client options, for commands that talk to the API.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequired`] if no base URL was configured.
    pub fn require_client(&self) -> Result<&ClientOptions, ConfigError> {
        self.client.as_ref().ok_or_else(|| {
            ConfigError::missing(
                field::BASE_URL,
                "Use --base-url or set client.base_url in config file",
            )
        })
    }

    fn resolve_base_url(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Option<Url>, ConfigError> {
        // CLI takes precedence
        let Some(raw) = cli
            .base_url
            .as_deref()
            .or_else(|| toml.and_then(|t| t.client.base_url.as_deref()))
        else {
            return Ok(None);
        };

        let trimmed = raw.strip_suffix('/').unwrap_or(raw);
        let url = Url::parse(trimmed).map_err(|e| ConfigError::InvalidUrl {
            url: raw.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl {
                url: raw.to_string(),
                reason: "scheme must be http or https".to_string(),
            });
        }

        Ok(Some(url))
    }

    fn build_client_options(
        base_url: Url,
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<ClientOptions, ConfigError> {
        let client = toml.map(|t| &t.client);

        // Priority: CLI explicit > TOML > default
        let timeout_ms = cli
            .timeout
            .or_else(|| client.and_then(|c| c.timeout_ms))
            .unwrap_or(defaults::TIMEOUT_MS);

        if timeout_ms == 0 {
            return Err(ConfigError::InvalidDuration {
                field: "timeout",
                reason: "must be greater than 0".to_string(),
            });
        }

        let retries = cli
            .retries
            .or_else(|| client.and_then(|c| c.retries))
            .unwrap_or(defaults::RETRIES);

        let (base_delay, max_delay) = Self::resolve_retry_delays(toml)?;

        let mut options = ClientOptions::from_url(base_url)
            .with_timeout(Duration::from_millis(timeout_ms))
            .with_retries(retries)
            .with_retry_delays(base_delay, max_delay)
            .with_headers(Self::resolve_headers(cli, toml)?);

        let token = cli
            .token
            .as_deref()
            .or_else(|| client.and_then(|c| c.token.as_deref()));

        if let Some(token) = token {
            options = options.with_token(token);
        }

        Ok(options)
    }

    fn resolve_retry_delays(toml: Option<&TomlConfig>) -> Result<(Duration, Duration), ConfigError> {
        let client = toml.map(|t| &t.client);

        // TOML-only settings
        let base_ms = client
            .and_then(|c| c.retry_base_delay_ms)
            .unwrap_or(defaults::RETRY_BASE_DELAY_MS);

        let max_ms = client
            .and_then(|c| c.retry_max_delay_ms)
            .unwrap_or(defaults::RETRY_MAX_DELAY_MS);

        if base_ms == 0 {
            return Err(ConfigError::InvalidRetry(
                "retry_base_delay_ms must be greater than 0".to_string(),
            ));
        }

        if max_ms < base_ms {
            return Err(ConfigError::InvalidRetry(format!(
                "retry_max_delay_ms ({max_ms}) must be >= retry_base_delay_ms ({base_ms})"
            )));
        }

        Ok((Duration::from_millis(base_ms), Duration::from_millis(max_ms)))
    }

    fn resolve_headers(cli: &Cli, toml: Option<&TomlConfig>) -> Result<HeaderMap, ConfigError> {
        let mut headers = HeaderMap::new();

        // Add TOML headers first (CLI can override)
        if let Some(toml) = toml {
            for (name, value) in &toml.client.headers {
                let header_name = parse_header_name(name)?;
                let header_value = parse_header_value(name, value)?;
                headers.insert(header_name, header_value);
            }
        }

        // Add CLI headers (override TOML)
        for header_str in &cli.headers {
            let (name, value) = parse_header_string(header_str)?;
            let header_name = parse_header_name(&name)?;
            let header_value = parse_header_value(&name, &value)?;
            headers.insert(header_name, header_value);
        }

        Ok(headers)
    }

    fn build_webhook_config(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<WebhookConfig, ConfigError> {
        let webhook = toml.map(|t| &t.webhook);

        let tolerance = cli
            .tolerance
            .or_else(|| webhook.and_then(|w| w.timestamp_tolerance))
            .unwrap_or(defaults::WEBHOOK_TOLERANCE_SECS);

        if tolerance == 0 {
            return Err(ConfigError::InvalidDuration {
                field: "tolerance",
                reason: "must be greater than 0".to_string(),
            });
        }

        let mut config = WebhookConfig::new().with_timestamp_tolerance(tolerance);

        let secret = cli
            .signing_secret
            .as_deref()
            .or_else(|| webhook.and_then(|w| w.signing_secret.as_deref()))
            .filter(|secret| !secret.is_empty());

        if let Some(secret) = secret {
            config = config.with_signing_secret(secret);
        }

        Ok(config)
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

fn parse_header_string(s: &str) -> Result<(String, String), ConfigError> {
    // Try "Key=Value" format first
    if let Some((name, value)) = s.split_once('=') {
        return Ok((name.trim().to_string(), value.trim().to_string()));
    }

    // Try "Key: Value" format
    if let Some((name, value)) = s.split_once(':') {
        return Ok((name.trim().to_string(), value.trim().to_string()));
    }

    Err(ConfigError::InvalidHeader {
        value: s.to_string(),
    })
}

fn parse_header_name(name: &str) -> Result<HeaderName, ConfigError> {
    name.parse::<HeaderName>()
        .map_err(|e| ConfigError::InvalidHeaderName {
            name: name.to_string(),
            reason: e.to_string(),
        })
}

fn parse_header_value(name: &str, value: &str) -> Result<HeaderValue, ConfigError> {
    HeaderValue::from_str(value).map_err(|e| ConfigError::InvalidHeaderValue {
        name: name.to_string(),
        reason: e.to_string(),
    })
}
