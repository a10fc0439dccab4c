//! Tests for validated configuration.

use super::ConfigError;
use super::cli::Cli;
use super::toml::TomlConfig;
use super::validated::ValidatedConfig;

/// Helper to create CLI args from a slice; the subcommand is irrelevant here
fn cli(args: &[&str]) -> Cli {
    let mut full_args = vec!["fam"];
    full_args.extend(args);
    full_args.push("verify-webhook");
    Cli::parse_from_iter(full_args)
}

/// Helper to parse TOML config
fn toml(content: &str) -> TomlConfig {
    TomlConfig::parse(content).unwrap()
}

mod precedence_tests;
