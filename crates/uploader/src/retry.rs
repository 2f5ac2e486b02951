//! Tiered retry driver for transport calls.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use crate::transport::TransportError;

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Attempt budget and backoff shape for one retry tier.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts in this tier, the first one included.
    pub max_attempts: u32,
    /// Base delay, multiplied by the attempt number within the tier.
    pub backoff_base: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        // Initial attempt plus three retries.
        Self {
            max_attempts: 4,
            backoff_base: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    /// Second-tier budget used once the default tier is exhausted.
    pub fn escalation() -> Self {
        Self {
            max_attempts: 5,
            backoff_base: Duration::from_millis(1000),
        }
    }

    /// Delay to sleep after a failed attempt. Grows linearly with the
    /// attempt number, so attempt 1 waits one base, attempt 2 two.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        self.backoff_base * attempt
    }
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Run `operation` under the given retry tiers.
///
/// Tiers are consumed in order; every attempt of a tier must fail with a
/// retryable error before the next tier starts. A non-retryable error
/// aborts immediately. An empty tier list degrades to a single attempt.
pub async fn run_with_retry<F, Fut, T>(
    tiers: &[RetryPolicy],
    label: &str,
    mut operation: F,
) -> Result<T, TransportError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, TransportError>>,
{
    if tiers.is_empty() {
        return operation().await;
    }

    let mut last_err = None;
    for (tier, policy) in tiers.iter().enumerate() {
        for attempt in 1..=policy.max_attempts {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(err) if !err.is_retryable() => {
                    warn!(op = label, error = %err, "request rejected, not retrying");
                    return Err(err);
                }
                Err(err) => {
                    debug!(op = label, tier, attempt, error = %err, "attempt failed");
                    if attempt < policy.max_attempts {
                        tokio::time::sleep(policy.delay_for_attempt(attempt)).await;
                    }
                    last_err = Some(err);
                }
            }
        }
        warn!(op = label, tier, attempts = policy.max_attempts, "retry tier exhausted");
    }

    Err(last_err.unwrap_or_else(|| TransportError::Network("retry budget exhausted".into())))
}
