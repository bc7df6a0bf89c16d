//! Retry logic with exponential backoff
//!
//! This module provides the retry loop used by the HTTP session. It implements
//! exponential backoff with optional jitter, and lets each call site pick a
//! [`RetryPolicy`] matching how safe it is to repeat the operation.
//!
//! # Example
//!
//! ```no_run
//! use dify_export::retry::{IsRetryable, RetryPolicy, with_retry};
//! use dify_export::config::RetryConfig;
//!
//! #[derive(Debug)]
//! enum MyError {
//!     Transient,
//!     Permanent,
//! }
//!
//! impl std::fmt::Display for MyError {
//!     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
//!         write!(f, "{:?}", self)
//!     }
//! }
//!
//! impl IsRetryable for MyError {
//!     fn is_retryable(&self) -> bool {
//!         matches!(self, MyError::Transient)
//!     }
//! }
//!
//! # async fn example() -> Result<(), MyError> {
//! let config = RetryConfig::default();
//! let result = with_retry(&config, RetryPolicy::Idempotent, || async {
//!     // Your operation here
//!     Ok::<_, MyError>(())
//! }).await?;
//! # Ok(())
//! # }
//! ```

use crate::config::RetryConfig;
use crate::error::Error;
use rand::Rng;
use std::future::Future;
use std::time::Duration;

/// Trait for errors that can be classified as retryable or not
///
/// Transient failures (connection refused, timeouts, 5xx, 429) should return `true`.
/// Permanent failures (bad credentials, malformed JSON, disk full) should return `false`.
pub trait IsRetryable {
    /// Returns true if the error is transient and an idempotent operation may be retried
    fn is_retryable(&self) -> bool;

    /// Returns true if the failed request provably never reached the server
    ///
    /// Only these failures are retried for non-idempotent operations.
    fn is_unsent(&self) -> bool {
        false
    }
}

/// Implementation of IsRetryable for our Error type
impl IsRetryable for Error {
    fn is_retryable(&self) -> bool {
        match self {
            Error::Network(e) => {
                e.is_timeout()
                    || e.is_connect()
                    || e.status()
                        .is_some_and(|s| s.is_server_error() || s.as_u16() == 429)
            }
            // Server busy or rate limited
            Error::Api { status, .. } => *status >= 500 || *status == 429,
            Error::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::TimedOut
                    | std::io::ErrorKind::ConnectionRefused
                    | std::io::ErrorKind::ConnectionReset
                    | std::io::ErrorKind::ConnectionAborted
                    | std::io::ErrorKind::NotConnected
                    | std::io::ErrorKind::BrokenPipe
                    | std::io::ErrorKind::Interrupted
            ),
            Error::Config { .. }
            | Error::Authentication(_)
            | Error::Serialization(_)
            | Error::InvalidUrl(_)
            | Error::Archive(_)
            | Error::DuplicateEntry(_)
            | Error::Other(_) => false,
        }
    }

    fn is_unsent(&self) -> bool {
        match self {
            Error::Network(e) => e.is_connect(),
            Error::Io(e) => e.kind() == std::io::ErrorKind::ConnectionRefused,
            _ => false,
        }
    }
}

/// Which failures an operation may be retried on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RetryPolicy {
    /// Safe to repeat: retry every transient failure (GET requests)
    Idempotent,
    /// Not safe to repeat: retry only when the request never left the client (login POST)
    UnsentOnly,
}

impl RetryPolicy {
    fn allows<E: IsRetryable>(self, error: &E) -> bool {
        match self {
            RetryPolicy::Idempotent => error.is_retryable(),
            RetryPolicy::UnsentOnly => error.is_unsent(),
        }
    }
}

/// Execute an async operation with exponential backoff retry logic
///
/// # Arguments
///
/// * `config` - Retry configuration (max additional attempts, delays, backoff multiplier, jitter)
/// * `policy` - Which failures are eligible for another attempt
/// * `operation` - Async closure that returns Result<T, E> where E implements IsRetryable
///
/// # Returns
///
/// Returns the successful result or the last error after all retry attempts are exhausted.
pub async fn with_retry<F, Fut, T, E>(
    config: &RetryConfig,
    policy: RetryPolicy,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: IsRetryable + std::fmt::Display,
{
    let mut attempt = 0;
    let mut delay = config.initial_delay;

    loop {
        match operation().await {
            Ok(result) => {
                if attempt > 0 {
                    tracing::info!(attempts = attempt + 1, "Request succeeded after retry");
                }
                return Ok(result);
            }
            Err(e) if policy.allows(&e) && attempt < config.max_attempts => {
                attempt += 1;

                tracing::warn!(
                    error = %e,
                    attempt = attempt,
                    max_attempts = config.max_attempts,
                    delay_ms = delay.as_millis(),
                    "Request failed, retrying"
                );

                let jittered_delay = if config.jitter {
                    add_jitter(delay)
                } else {
                    delay
                };

                tokio::time::sleep(jittered_delay).await;

                let next_delay =
                    Duration::from_secs_f64(delay.as_secs_f64() * config.backoff_multiplier);
                delay = next_delay.min(config.max_delay);
            }
            Err(e) => {
                if policy.allows(&e) {
                    tracing::debug!(
                        error = %e,
                        attempts = attempt + 1,
                        "Giving up after all retry attempts"
                    );
                }
                return Err(e);
            }
        }
    }
}

/// Add random jitter to a delay
///
/// The result is uniformly distributed between `delay` and `2 * delay`.
fn add_jitter(delay: Duration) -> Duration {
    let mut rng = rand::thread_rng();
    let jitter_factor: f64 = rng.gen_range(0.0..=1.0);
    let jittered_secs = delay.as_secs_f64() * (1.0 + jitter_factor);
    Duration::from_secs_f64(jittered_secs)
}
