//! Retry with exponential back-off and jitter for store writes.
//!
//! [`retry_transient`] wraps a fallible async store call and retries only
//! when the failure is one a second attempt can plausibly fix. Constraint
//! violations and decode errors are returned immediately.

use std::future::Future;
use std::time::Duration;

use seedcat_core::AppConfig;

use crate::DbError;

const MAX_DELAY_MS: u64 = 10_000;
const SERIALIZATION_FAILURE: &str = "40001";
const DEADLOCK_DETECTED: &str = "40P01";

/// How many extra attempts a store write gets, and the base back-off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff_base_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            backoff_base_ms: 250,
        }
    }
}

impl RetryPolicy {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            max_retries: config.upsert_max_retries,
            backoff_base_ms: config.upsert_retry_backoff_ms,
        }
    }

    /// A policy that never retries.
    #[must_use]
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            backoff_base_ms: 0,
        }
    }

    /// Back-off before retry number `attempt` (1-based), before jitter.
    fn base_delay_ms(self, attempt: u32) -> u64 {
        self.backoff_base_ms
            .saturating_mul(1u64 << attempt.saturating_sub(1).min(10))
            .min(MAX_DELAY_MS)
    }
}

/// Returns `true` for errors that are worth retrying after a back-off delay.
///
/// **Retriable:** connection I/O failures, pool acquire timeouts, and
/// Postgres serialization failures or deadlocks.
///
/// **Not retriable:** everything else, notably constraint violations, row
/// decode errors, and [`DbError::InvalidStoredValue`].
#[must_use]
pub fn is_transient(err: &DbError) -> bool {
    match err {
        DbError::Sqlx(sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut) => true,
        DbError::Sqlx(sqlx::Error::Database(db)) => db
            .code()
            .is_some_and(|code| code == SERIALIZATION_FAILURE || code == DEADLOCK_DETECTED),
        _ => false,
    }
}

/// Runs `operation` with up to `policy.max_retries` additional attempts on
/// transient errors.
///
/// Each delay is `backoff_base_ms × 2^(attempt-1)` capped at 10 s, then
/// scaled by a ±25 % jitter.
///
/// # Errors
///
/// Returns the last error once retries are exhausted, or the first
/// non-transient error.
pub async fn retry_transient<T, F, Fut>(policy: RetryPolicy, mut operation: F) -> Result<T, DbError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DbError>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_transient(&err) || attempt >= policy.max_retries {
                    return Err(err);
                }
                attempt += 1;
                let capped = policy.base_delay_ms(attempt);
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let delay_ms = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
                tracing::warn!(
                    attempt,
                    max_retries = policy.max_retries,
                    delay_ms,
                    error = %err,
                    "transient store error, retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}
