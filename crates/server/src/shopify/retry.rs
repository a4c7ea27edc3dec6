//! Fixed-delay retry for Shopify calls.
//!
//! Every failure is retried the same way: there is no distinction between
//! transient and permanent errors, no backoff growth and no jitter.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use crate::config::ShopifyConfig;

/// Default total attempts per call.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default pause between attempts.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(800);

/// How many times to try a call and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Values below 1 behave as 1.
    pub max_attempts: u32,
    /// Pause between consecutive attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: DEFAULT_DELAY,
        }
    }
}

impl From<&ShopifyConfig> for RetryPolicy {
    fn from(config: &ShopifyConfig) -> Self {
        Self {
            max_attempts: config.retry_attempts,
            delay: config.retry_delay,
        }
    }
}

impl RetryPolicy {
    /// Run `attempt` until it succeeds or the attempts are used up.
    ///
    /// `attempt` receives the 1-based attempt number. The error of the last
    /// attempt is returned; no delay follows the final attempt.
    ///
    /// # Errors
    ///
    /// Returns the last attempt's error when every attempt fails.
    pub async fn run<T, E, F, Fut>(&self, operation: &str, mut attempt: F) -> Result<T, E>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut current = 1;

        loop {
            match attempt(current).await {
                Ok(value) => return Ok(value),
                Err(err) if current >= max_attempts => {
                    tracing::warn!(
                        operation,
                        attempts = current,
                        error = %err,
                        "Shopify call failed, giving up"
                    );
                    return Err(err);
                }
                Err(err) => {
                    tracing::warn!(
                        operation,
                        attempt = current,
                        max_attempts,
                        error = %err,
                        "Shopify call failed, retrying"
                    );
                    tokio::time::sleep(self.delay).await;
                    current += 1;
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    fn fast_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            delay: Duration::from_millis(1),
        }
    }

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.delay, Duration::from_millis(800));
    }

    #[tokio::test]
    async fn test_first_attempt_success_runs_once() {
        let calls = AtomicU32::new(0);

        let result: Result<&str, String> = fast_policy(3)
            .run("test", |_| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Ok("done") }
            })
            .await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_two_failures_then_success() {
        let calls = AtomicU32::new(0);

        let result: Result<u32, String> = fast_policy(3)
            .run("test", |attempt| {
                calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if attempt < 3 {
                        Err(format!("transient failure {attempt}"))
                    } else {
                        Ok(attempt)
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts_with_last_error() {
        let calls = AtomicU32::new(0);

        let result: Result<(), String> = fast_policy(3)
            .run("test", |attempt| {
                calls.fetch_add(1, Ordering::SeqCst);
                async move { Err(format!("failure {attempt}")) }
            })
            .await;

        assert_eq!(result.unwrap_err(), "failure 3");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_zero_attempts_still_tries_once() {
        let calls = AtomicU32::new(0);

        let result: Result<(), String> = fast_policy(0)
            .run("test", |_| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err("nope".to_string()) }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_waits_between_attempts() {
        let policy = RetryPolicy {
            max_attempts: 3,
            delay: Duration::from_millis(20),
        };
        let started = tokio::time::Instant::now();

        let _: Result<(), String> = policy
            .run("test", |_| async { Err("down".to_string()) })
            .await;

        // Two pauses between three attempts, none after the last one.
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(40));
        assert!(elapsed < Duration::from_millis(1000));
    }
}
