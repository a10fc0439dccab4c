//! Retry with exponential backoff.

use std::future::Future;
use std::time::Duration;

use crate::time::Sleeper;

/// Configuration for exponential backoff retry behavior.
///
/// Controls how many times to retry a failed operation and how long
/// to wait between attempts. The delay before retry *i* (0-indexed) is
/// `min(base_delay * 2^i, max_delay)`, with no jitter.
///
/// # Defaults
///
/// - `max_retries`: 3 (so at most 4 attempts)
/// - `base_delay`: 1 second
/// - `max_delay`: 30 seconds
///
/// # Example
///
/// ```
/// use fam_sdk::client::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::new()
///     .with_max_retries(5)
///     .with_base_delay(Duration::from_millis(200))
///     .with_max_delay(Duration::from_secs(5));
///
/// assert_eq!(policy.delay_for_retry(0), Duration::from_millis(200));
/// assert_eq!(policy.delay_for_retry(10), Duration::from_secs(5));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Number of retries after the initial attempt.
    ///
    /// A value of 0 disables retrying.
    pub max_retries: u32,

    /// Delay before the first retry; doubled for each subsequent one.
    pub base_delay: Duration,

    /// Upper bound for any single delay.
    pub max_delay: Duration,
}

impl RetryPolicy {
    /// Default number of retries.
    pub const DEFAULT_MAX_RETRIES: u32 = 3;

    /// Default base delay (1 second).
    pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(1_000);

    /// Default maximum delay (30 seconds).
    pub const DEFAULT_MAX_DELAY: Duration = Duration::from_millis(30_000);

    /// Creates a new retry policy with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_retries: Self::DEFAULT_MAX_RETRIES,
            base_delay: Self::DEFAULT_BASE_DELAY,
            max_delay: Self::DEFAULT_MAX_DELAY,
        }
    }

    /// Sets the number of retries after the initial attempt.
    #[must_use]
    pub const fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the delay before the first retry.
    ///
    /// Zero delay is supported (useful for testing) but creates a tight
    /// retry loop in production.
    #[must_use]
    pub const fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    /// Sets the maximum delay between retries.
    #[must_use]
    pub const fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Computes the delay before a given retry (0 = before the first retry).
    ///
    /// Saturates instead of overflowing for large retry numbers.
    #[must_use]
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        let factor = 2_u32.checked_pow(retry).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }

    /// Total number of attempts this policy allows.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs `operation` until it succeeds, the predicate rejects an error, or
/// the policy's retries are exhausted.
///
/// Attempts are strictly sequential: the next attempt starts only after the
/// previous failure was observed and its backoff delay fully elapsed.
/// The error returned is always the last one observed.
///
/// # Errors
///
/// Returns the error of the final attempt when retries are exhausted, or the
/// first error for which `should_retry` returns false.
///
/// # Example
///
/// ```
/// use fam_sdk::client::{retry, RetryPolicy};
/// use fam_sdk::time::InstantSleeper;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let mut calls = 0;
/// let result: Result<u32, &str> = retry(&RetryPolicy::new(), &InstantSleeper, |_| true, || {
///     calls += 1;
///     let attempt = calls;
///     async move { if attempt < 3 { Err("transient") } else { Ok(attempt) } }
/// })
/// .await;
///
/// assert_eq!(result, Ok(3));
/// # }
/// ```
pub async fn retry<T, E, F, Fut, P, S>(
    policy: &RetryPolicy,
    sleeper: &S,
    should_retry: P,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: Fn(&E) -> bool,
    S: Sleeper,
{
    let mut attempt = 0;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(error) => {
                if attempt >= policy.max_retries || !should_retry(&error) {
                    return Err(error);
                }

                let delay = policy.delay_for_retry(attempt);
                attempt += 1;
                tracing::warn!(
                    "Attempt {}/{} failed, retrying in {:?}",
                    attempt,
                    policy.max_attempts(),
                    delay
                );
                sleeper.sleep(delay).await;
            }
        }
    }
}

#[cfg(test)]
#[path = "retry_tests.rs"]
mod tests;
