//! Configuration layer of the `fam` binary.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **TOML config file** - Values from the configuration file
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! The base URL has no default. Without one, only `init` and
//! `verify-webhook` can run.
//!
//! Headers are merged: TOML headers first, CLI headers replacing any with
//! the same name.
//!
//! # TOML-Only Options
//!
//! The retry backoff bounds are TOML-only (not available via CLI):
//! - `client.retry_base_delay_ms` (default: 1000)
//! - `client.retry_max_delay_ms` (default: 30000)

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod validated_tests;

pub use cli::{Cli, Command, RequestArgs, VerifyWebhookArgs};
pub use error::{ConfigError, field};
pub use toml::{ClientSection, TomlConfig, WebhookSection, default_config_template};
pub use validated::{ValidatedConfig, write_default_config};
