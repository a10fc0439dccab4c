//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

/// Default per-attempt request timeout in milliseconds.
pub const TIMEOUT_MS: u64 = 30_000;

/// Default number of retries after the first attempt.
pub const RETRIES: u32 = 3;

/// Default delay before the first retry in milliseconds.
pub const RETRY_BASE_DELAY_MS: u64 = 1_000;

/// Default cap on the retry delay in milliseconds.
pub const RETRY_MAX_DELAY_MS: u64 = 30_000;

/// Default webhook replay window in seconds.
pub const WEBHOOK_TOLERANCE_SECS: u64 = 300;

/// Default request timeout as Duration.
#[must_use]
pub const fn timeout() -> Duration {
    Duration::from_millis(TIMEOUT_MS)
}

/// Default initial retry delay as Duration.
#[must_use]
pub const fn retry_base_delay() -> Duration {
    Duration::from_millis(RETRY_BASE_DELAY_MS)
}

/// Default maximum retry delay as Duration.
#[must_use]
pub const fn retry_max_delay() -> Duration {
    Duration::from_millis(RETRY_MAX_DELAY_MS)
}
