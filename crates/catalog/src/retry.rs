//! Bounded-retry execution for remote fetches.
//!
//! Only transient connectivity failures are retried; a missing table, a
//! not-found lookup, or a policy rejection fails fast because a retry
//! cannot change the outcome. Backoff is linear (`base_delay * attempt`),
//! capped at `max_delay`. The policy holds no state between runs - there
//! is no shared circuit breaker.

use std::time::Duration;

use tracing::warn;

use crate::error::StoreError;

/// Retry policy for one class of remote operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempt budget, including the first try.
    pub max_attempts: u32,
    /// Base delay; attempt `n` waits `base_delay * n` before retrying.
    pub base_delay: Duration,
    /// Upper bound on any single wait.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    /// Three attempts with a one-second base delay, matching the read
    /// path's budget. The 10s cap is a hardening addition.
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    /// A policy that never waits, for tests and interactive tooling.
    #[must_use]
    pub const fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }

    /// Run `op` until it succeeds, fails permanently, or exhausts the
    /// attempt budget. The last error is returned with its classification
    /// intact so callers can render a class-specific message.
    ///
    /// # Errors
    ///
    /// Returns the final [`StoreError`] - permanent errors after one
    /// attempt, transient errors after `max_attempts`.
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<T, StoreError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, StoreError>>,
    {
        let attempts = self.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_transient() && attempt < attempts => {
                    let delay = self
                        .base_delay
                        .saturating_mul(attempt)
                        .min(self.max_delay);
                    warn!(
                        attempt,
                        max_attempts = attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "transient store error, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    async fn failing_then_ok(
        calls: &AtomicU32,
        failures: u32,
        make_err: impl Fn() -> StoreError,
    ) -> Result<&'static str, StoreError> {
        let call = calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call <= failures {
            Err(make_err())
        } else {
            Ok("fetched")
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_errors_retry_until_success() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::default();

        let result = policy
            .run(|| failing_then_ok(&calls, 2, || StoreError::Transient("unreachable".into())))
            .await;

        assert_eq!(result.expect("should succeed on third attempt"), "fetched");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_permanent_error_fails_on_first_attempt() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::default();

        let result = policy
            .run(|| failing_then_ok(&calls, 5, || StoreError::NotFound("fabric".into())))
            .await;

        assert!(matches!(result, Err(StoreError::NotFound(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_budget_exhaustion_keeps_classification() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::default();

        let result = policy
            .run(|| failing_then_ok(&calls, 10, || StoreError::Transient("timeout".into())))
            .await;

        let err = result.expect_err("budget should be exhausted");
        assert!(err.is_transient());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_linear_backoff_is_capped() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy {
            max_attempts: 4,
            base_delay: Duration::from_secs(6),
            max_delay: Duration::from_secs(10),
        };

        let start = tokio::time::Instant::now();
        let _ = policy
            .run(|| failing_then_ok(&calls, 10, || StoreError::Transient("down".into())))
            .await;

        // Waits: 6s, then min(12, 10) = 10s, then min(18, 10) = 10s.
        assert_eq!(start.elapsed(), Duration::from_secs(26));
    }
}
