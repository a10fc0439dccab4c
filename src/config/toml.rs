//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// API client section
    #[serde(default)]
    pub client: ClientSection,

    /// Webhook verification section
    #[serde(default)]
    pub webhook: WebhookSection,
}

/// API client configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientSection {
    /// API base URL
    pub base_url: Option<String>,

    /// Bearer token
    pub token: Option<String>,

    /// Per-attempt timeout in milliseconds
    pub timeout_ms: Option<u64>,

    /// Number of retries after the first attempt
    pub retries: Option<u32>,

    /// Delay before the first retry in milliseconds
    pub retry_base_delay_ms: Option<u64>,

    /// Cap on the retry delay in milliseconds
    pub retry_max_delay_ms: Option<u64>,

    /// Extra HTTP headers as key-value pairs
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

/// Webhook verification section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WebhookSection {
    /// HMAC signing secret; verification is disabled without it
    pub signing_secret: Option<String>,

    /// Replay window in seconds
    pub timestamp_tolerance: Option<u64>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# fam configuration file

[client]
# API base URL (required for `fam request`)
# base_url = "https://api.fam.example"

# Bearer token (can be overridden by --token)
# token = "your-token-here"

# Per-attempt timeout in milliseconds (default: 30000)
# timeout_ms = 30000

# Retries after the first attempt (default: 3)
# retries = 3

# Backoff between retries, doubling from the base delay up to the cap
# retry_base_delay_ms = 1000
# retry_max_delay_ms = 30000

# Extra HTTP headers
# [client.headers]
# X-Custom-Header = "value"

[webhook]
# HMAC-SHA256 signing secret (verification is disabled without it)
# signing_secret = "whsec_..."

# Replay window in seconds (default: 300)
# timestamp_tolerance = 300
"#
    .to_string()
}
