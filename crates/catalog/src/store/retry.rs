//! Bounded retry around backing-store calls.
//!
//! Only transient errors are retried, with exponential backoff between
//! attempts. When the last attempt fails its error is returned unchanged.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use super::{KeyValueStore, StoreError};

/// How many times to attempt a store call and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts per call, at least 1.
    pub attempts: u32,
    /// Wait before the second attempt; doubled for each later one.
    pub initial_backoff: Duration,
}

impl RetryPolicy {
    /// A single attempt, no retry.
    pub const NONE: Self = Self {
        attempts: 1,
        initial_backoff: Duration::ZERO,
    };

    /// Create a policy. `attempts` below 1 is raised to 1.
    #[must_use]
    pub fn new(attempts: u32, initial_backoff: Duration) -> Self {
        Self {
            attempts: attempts.max(1),
            initial_backoff,
        }
    }

    /// Backoff to wait after failed attempt number `attempt` (1-based).
    #[must_use]
    pub fn backoff_after(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.initial_backoff.saturating_mul(factor)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::NONE
    }
}

/// Run `op` until it succeeds, fails permanently, or attempts run out.
async fn with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    operation: &'static str,
    key: &str,
    mut op: F,
) -> Result<T, StoreError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, StoreError>>,
{
    let mut attempt = 1;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_transient() && attempt < policy.attempts => {
                let backoff = policy.backoff_after(attempt);
                warn!(
                    operation,
                    key,
                    attempt,
                    backoff_ms = u64::try_from(backoff.as_millis()).unwrap_or(u64::MAX),
                    error = %err,
                    "Backing store call failed, retrying"
                );
                tokio::time::sleep(backoff).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

/// Store decorator that retries transient failures of the inner store.
#[derive(Debug)]
pub struct RetryingStore<S> {
    inner: S,
    policy: RetryPolicy,
}

impl<S: KeyValueStore> RetryingStore<S> {
    /// Wrap `inner` with `policy`.
    #[must_use]
    pub const fn new(inner: S, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    /// The retry policy in effect.
    #[must_use]
    pub const fn policy(&self) -> RetryPolicy {
        self.policy
    }
}

#[async_trait]
impl<S: KeyValueStore> KeyValueStore for RetryingStore<S> {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        with_retry(&self.policy, "get", key, move || self.inner.get(key)).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        with_retry(&self.policy, "set", key, move || self.inner.set(key, value)).await
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        with_retry(&self.policy, "remove", key, move || self.inner.remove(key)).await
    }
}
