//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use http::Method;
use serde_json::Value;

use super::ConfigError;

/// fam: command-line companion of the FAM SDK
///
/// Issues authenticated API calls and checks webhook signatures with the
/// same settings an application would use.
#[derive(Debug, Parser)]
#[command(name = "fam")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// API base URL, e.g. `https://api.fam.example`
    #[arg(long = "base-url", global = true)]
    pub base_url: Option<String>,

    /// Bearer token sent with every request
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Per-attempt request timeout in milliseconds
    #[arg(long, value_name = "MS", global = true)]
    pub timeout: Option<u64>,

    /// Number of retries after the first attempt
    #[arg(long, global = true)]
    pub retries: Option<u32>,

    /// Extra HTTP headers in 'Key=Value' or 'Key: Value' format (can be specified multiple times)
    #[arg(long = "header", value_name = "K=V", global = true)]
    pub headers: Vec<String>,

    /// Webhook signing secret
    #[arg(long = "signing-secret", global = true)]
    pub signing_secret: Option<String>,

    /// Webhook replay window in seconds
    #[arg(long, value_name = "SECS", global = true)]
    pub tolerance: Option<u64>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for fam
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "fam.toml")]
        output: PathBuf,
    },

    /// Send one API request and print the JSON response
    Request(RequestArgs),

    /// Verify and decode a webhook notification
    VerifyWebhook(VerifyWebhookArgs),
}

/// Arguments of `fam request`.
#[derive(Debug, Args)]
pub struct RequestArgs {
    /// HTTP method: GET, POST, PUT, PATCH or DELETE
    pub method: String,

    /// Path below the base URL, e.g. `/api/v1/mangopay/users/42`
    pub path: String,

    /// Query parameter in 'key=value' format (can be specified multiple times)
    #[arg(long = "param", value_name = "K=V")]
    pub params: Vec<String>,

    /// JSON request body
    #[arg(long, value_name = "JSON")]
    pub data: Option<String>,

    /// Send a single attempt, without retries
    #[arg(long = "skip-retry")]
    pub skip_retry: bool,

    /// Timeout of this request in milliseconds, overriding the client timeout
    #[arg(long = "request-timeout", value_name = "MS")]
    pub request_timeout: Option<u64>,
}

/// Arguments of `fam verify-webhook`.
#[derive(Debug, Args)]
pub struct VerifyWebhookArgs {
    /// File holding the raw payload, or `-` for stdin
    #[arg(long, default_value = "-")]
    pub payload: String,

    /// Signature received with the payload
    #[arg(long)]
    pub signature: Option<String>,

    /// Timestamp received with the payload (unix seconds); enables the replay check
    #[arg(long, value_name = "SECS", allow_negative_numbers = true)]
    pub timestamp: Option<i64>,
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Command::Init { .. })
    }
}

impl RequestArgs {
    /// The HTTP method, restricted to the verbs the client issues.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidMethod`] for any other method.
    pub fn method(&self) -> Result<Method, ConfigError> {
        let method = self
            .method
            .to_uppercase()
            .parse::<Method>()
            .map_err(|_| ConfigError::InvalidMethod(self.method.clone()))?;

        let supported = [
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ];
        if supported.contains(&method) {
            Ok(method)
        } else {
            Err(ConfigError::InvalidMethod(self.method.clone()))
        }
    }

    /// Query parameters split into key and value, in command-line order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidParam`] if a parameter has no `=` or an
    /// empty key.
    pub fn params(&self) -> Result<Vec<(String, String)>, ConfigError> {
        self.params
            .iter()
            .map(|param| match param.split_once('=') {
                Some((key, value)) if !key.trim().is_empty() => {
                    Ok((key.trim().to_string(), value.to_string()))
                }
                _ => Err(ConfigError::InvalidParam {
                    value: param.clone(),
                }),
            })
            .collect()
    }

    /// The decoded JSON body, if one was given.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBody`] if `--data` is not valid JSON.
    pub fn body(&self) -> Result<Option<Value>, ConfigError> {
        self.data
            .as_deref()
            .map(serde_json::from_str)
            .transpose()
            .map_err(|source| ConfigError::InvalidBody { source })
    }
}
