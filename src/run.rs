//! Subcommand execution.
//!
//! `request` sends one call through the SDK's [`HttpClient`];
//! `verify-webhook` runs a payload through [`Webhooks`].

use std::time::Duration;

use http::Method;
use serde_json::Value;
use thiserror::Error;
use tokio::io::AsyncReadExt;

use fam_sdk::client::{HttpClient, RequestOptions};
use fam_sdk::config::{Command, ConfigError, RequestArgs, ValidatedConfig, VerifyWebhookArgs};
use fam_sdk::time::{Clock, Sleeper};
use fam_sdk::transport::Transport;
use fam_sdk::webhooks::{WebhookEvent, Webhooks};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// The command line or config did not allow the command to run.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The API call failed.
    #[error("Request failed: {0}")]
    Request(#[source] fam_sdk::Error),

    /// The webhook payload was rejected.
    #[error("Webhook rejected: {0}")]
    Webhook(#[source] fam_sdk::Error),
}

impl RunError {
    /// Returns true if the failure stems from configuration, not from the
    /// call itself.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

/// Executes the selected subcommand, printing its result to stdout.
///
/// # Errors
///
/// Returns [`RunError::Config`] if required settings are missing or
/// arguments are malformed, otherwise the SDK error of the failed call.
#[cfg(not(tarpaulin_include))]
pub async fn execute(command: &Command, config: &ValidatedConfig) -> Result<(), RunError> {
    match command {
        // Handled before configuration is loaded
        Command::Init { .. } => Ok(()),
        Command::Request(args) => {
            let client = HttpClient::new(config.require_client()?.clone());
            let response = send_request(&client, args).await?;
            println!("{response:#}");
            Ok(())
        }
        Command::VerifyWebhook(args) => {
            let payload = read_payload(&args.payload).await?;
            let webhooks = Webhooks::new(config.webhook.clone());
            let event = verify_webhook(&webhooks, &payload, args)?;
            println!("{}", describe_event(&event));
            Ok(())
        }
    }
}

/// Sends the request described by `args` and returns the decoded response.
async fn send_request<T, S>(client: &HttpClient<T, S>, args: &RequestArgs) -> Result<Value, RunError>
where
    T: Transport,
    S: Sleeper,
{
    let method = args.method()?;
    let body = args.body()?;
    let options = request_options(args)?;

    tracing::debug!(%method, path = %args.path, "Sending request");

    let result = if method == Method::GET || method == Method::DELETE {
        if body.is_some() {
            tracing::warn!("Ignoring --data for {method} request");
        }
        if method == Method::GET {
            client.get(&args.path, options).await
        } else {
            client.delete(&args.path, options).await
        }
    } else if method == Method::POST {
        client.post(&args.path, body.as_ref(), options).await
    } else if method == Method::PUT {
        client.put(&args.path, body.as_ref(), options).await
    } else {
        client.patch(&args.path, body.as_ref(), options).await
    };

    result.map_err(RunError::Request)
}

fn request_options(args: &RequestArgs) -> Result<RequestOptions, ConfigError> {
    let mut options = RequestOptions::new().with_params(args.params()?);

    if let Some(ms) = args.request_timeout {
        if ms == 0 {
            return Err(ConfigError::InvalidDuration {
                field: "request_timeout",
                reason: "must be greater than 0".to_string(),
            });
        }
        options = options.with_timeout(Duration::from_millis(ms));
    }

    if args.skip_retry {
        options = options.skip_retry();
    }

    Ok(options)
}

/// Verifies and decodes `payload`, checking the replay window when a
/// timestamp was given.
fn verify_webhook<C: Clock>(
    webhooks: &Webhooks<C>,
    payload: &str,
    args: &VerifyWebhookArgs,
) -> Result<WebhookEvent, RunError> {
    if webhooks.config().signing_secret().is_none() {
        tracing::warn!("No signing secret configured, signature not checked");
    }

    let signature = args.signature.as_deref();
    let event = match args.timestamp {
        Some(timestamp) => webhooks.construct_event_with_timestamp(payload, signature, timestamp),
        None => webhooks.construct_event(payload, signature),
    };

    event.map_err(RunError::Webhook)
}

/// One-line summary of a verified event.
fn describe_event(event: &WebhookEvent) -> String {
    format!(
        "{} ({}) resource={}",
        event.event_type,
        event.family(),
        event.resource_id
    )
}

async fn read_payload(source: &str) -> Result<String, ConfigError> {
    let read_error = |e: std::io::Error| ConfigError::PayloadRead {
        source_name: source.to_string(),
        source: e,
    };

    if source == "-" {
        let mut payload = String::new();
        tokio::io::stdin()
            .read_to_string(&mut payload)
            .await
            .map_err(read_error)?;
        Ok(payload)
    } else {
        tokio::fs::read_to_string(source).await.map_err(read_error)
    }
}
