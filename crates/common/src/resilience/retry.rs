//! Fixed-delay retry helper
//!
//! Wraps an async operation and re-invokes it on failure, up to a bound, with
//! a [`RetryPolicy`] deciding which failures qualify. For a failure that
//! always qualifies, the operation runs exactly
//! `min(failures + 1, max_retries + 1)` times. A failure the policy rejects
//! ends the loop after that single invocation.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Upper bound accepted for the delay between attempts
pub const MAX_RETRY_DELAY: Duration = Duration::from_secs(60);

/// Terminal failure of a retried operation
///
/// Both variants carry the last error the operation produced so callers can
/// propagate it unchanged via [`RetryError::into_source`].
#[derive(Debug, Error)]
pub enum RetryError<E> {
    /// All retry attempts have been exhausted
    #[error("All retry attempts exhausted after {attempts} tries: {source}")]
    Exhausted { attempts: u32, source: E },

    /// The operation failed with an error the policy does not retry
    #[error("Operation failed with non-retryable error: {source}")]
    NonRetryable { source: E },
}

impl<E> RetryError<E> {
    /// Unwrap the last error produced by the operation
    pub fn into_source(self) -> E {
        match self {
            Self::Exhausted { source, .. } | Self::NonRetryable { source } => source,
        }
    }

    /// Borrow the last error produced by the operation
    pub fn source_ref(&self) -> &E {
        match self {
            Self::Exhausted { source, .. } | Self::NonRetryable { source } => source,
        }
    }

    /// `true` when the loop stopped because the bound was reached
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted { .. })
    }
}

/// Result type for retry operations
pub type RetryResult<T, E> = Result<T, RetryError<E>>;

/// Rejected retry configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid retry configuration: {message}")]
pub struct InvalidRetryConfig {
    pub message: String,
}

/// Outcome of a retry execution including result and summary statistics.
#[derive(Debug)]
pub struct RetryOutcome<T, E> {
    pub result: RetryResult<T, E>,
    /// Number of times the operation was invoked
    pub attempts: u32,
    /// Sum of all delays slept between attempts
    pub total_delay: Duration,
}

impl<T, E> RetryOutcome<T, E> {
    /// Consume the outcome and return only the result.
    pub fn into_result(self) -> RetryResult<T, E> {
        self.result
    }
}

/// Trait for determining whether an error should be retried
pub trait RetryPolicy<E> {
    /// `attempt` is the 0-based index of the invocation that failed
    fn should_retry(&self, error: &E, attempt: u32) -> RetryDecision;
}

/// Decision for whether to retry an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Retry after the configured delay
    Retry,
    /// Don't retry the operation
    Stop,
}

/// Hook invoked when a retry is scheduled or the loop gives up
///
/// Only called when [`RetryConfig::notify`] is set. The UI layer implements
/// this to surface "retrying…" banners or a final alert.
pub trait RetryNotifier: Send + Sync {
    /// Attempt number `attempt` (1-based) failed; retrying after `delay`
    fn on_retry(&self, attempt: u32, error: &dyn fmt::Display, delay: Duration);

    /// The loop stopped after `attempts` invocations with `error`
    fn on_give_up(&self, attempts: u32, error: &dyn fmt::Display);
}

/// Default notifier: a `debug` trace of each notification
///
/// The executor already logs every retry and give-up at `warn`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl RetryNotifier for LogNotifier {
    fn on_retry(&self, attempt: u32, _error: &dyn fmt::Display, delay: Duration) {
        debug!(attempt, delay_ms = delay.as_millis() as u64, "Retry notification");
    }

    fn on_give_up(&self, attempts: u32, _error: &dyn fmt::Display) {
        debug!(attempts, "Give-up notification");
    }
}

/// Configuration for retry behavior
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Retries after the first attempt (`0` = single attempt)
    pub max_retries: u32,
    /// Constant delay between attempts
    pub delay: Duration,
    /// Whether the [`RetryNotifier`] is invoked
    pub notify: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self { max_retries: 3, delay: Duration::from_millis(1000), notify: false }
    }
}

impl RetryConfig {
    /// Create a configuration builder
    pub fn builder() -> RetryConfigBuilder {
        RetryConfigBuilder::new()
    }

    /// Configuration that never retries
    pub fn no_retry() -> Self {
        Self { max_retries: 0, delay: Duration::ZERO, notify: false }
    }

    /// Total invocations allowed (`max_retries + 1`)
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), InvalidRetryConfig> {
        if self.delay > MAX_RETRY_DELAY {
            return Err(InvalidRetryConfig {
                message: format!(
                    "delay {:?} exceeds the maximum of {:?}",
                    self.delay, MAX_RETRY_DELAY
                ),
            });
        }
        Ok(())
    }
}

/// Builder for RetryConfig with fluent API
#[derive(Debug, Default)]
pub struct RetryConfigBuilder {
    config: RetryConfig,
}

impl RetryConfigBuilder {
    pub fn new() -> Self {
        Self { config: RetryConfig::default() }
    }

    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.config.delay = delay;
        self
    }

    pub fn notify(mut self, notify: bool) -> Self {
        self.config.notify = notify;
        self
    }

    pub fn build(self) -> Result<RetryConfig, InvalidRetryConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// The retry executor
pub struct RetryExecutor<P> {
    config: RetryConfig,
    policy: P,
    notifier: Arc<dyn RetryNotifier>,
}

impl<P: fmt::Debug> fmt::Debug for RetryExecutor<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryExecutor")
            .field("config", &self.config)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl<P> RetryExecutor<P> {
    /// Create a new retry executor with the given configuration and policy
    pub fn new(config: RetryConfig, policy: P) -> Self {
        Self { config, policy, notifier: Arc::new(LogNotifier) }
    }

    /// Replace the notifier used when `config.notify` is set
    pub fn with_notifier(mut self, notifier: Arc<dyn RetryNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// The active configuration
    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    /// Execute an operation with retry logic
    #[instrument(skip(self, operation), fields(max_retries = self.config.max_retries))]
    pub async fn execute<F, Fut, T, E>(&self, operation: F) -> RetryResult<T, E>
    where
        P: RetryPolicy<E>,
        E: fmt::Display,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.execute_with_outcome(operation).await.into_result()
    }

    /// Execute an operation with retry logic and return outcome statistics.
    pub async fn execute_with_outcome<F, Fut, T, E>(&self, mut operation: F) -> RetryOutcome<T, E>
    where
        P: RetryPolicy<E>,
        E: fmt::Display,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let max_attempts = self.config.max_attempts();
        let mut failures: u32 = 0;
        let mut total_delay = Duration::ZERO;

        loop {
            let attempt = failures + 1;
            debug!(attempt, max_attempts, "Executing operation");

            let error = match operation().await {
                Ok(value) => {
                    if failures > 0 {
                        debug!(retries = failures, "Operation succeeded after retries");
                    }
                    return RetryOutcome { result: Ok(value), attempts: attempt, total_delay };
                }
                Err(error) => error,
            };
            failures = attempt;

            if self.policy.should_retry(&error, failures - 1) == RetryDecision::Stop {
                debug!(attempt, error = %error, "Retry policy rejected error");
                self.give_up(failures, &error);
                return RetryOutcome {
                    result: Err(RetryError::NonRetryable { source: error }),
                    attempts: failures,
                    total_delay,
                };
            }

            if failures >= max_attempts {
                warn!(attempts = failures, error = %error, "All retry attempts exhausted");
                self.give_up(failures, &error);
                return RetryOutcome {
                    result: Err(RetryError::Exhausted { attempts: failures, source: error }),
                    attempts: failures,
                    total_delay,
                };
            }

            let delay = self.config.delay;
            warn!(
                attempt,
                delay_ms = delay.as_millis() as u64,
                error = %error,
                "Operation failed, retrying"
            );
            if self.config.notify {
                self.notifier.on_retry(attempt, &error, delay);
            }
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            total_delay += delay;
        }
    }

    fn give_up<E: fmt::Display>(&self, attempts: u32, error: &E) {
        if self.config.notify {
            self.notifier.on_give_up(attempts, error);
        }
    }
}

/// Convenience function to create a retry executor and execute an operation
pub async fn retry_with_policy<F, Fut, T, E, P>(
    config: RetryConfig,
    policy: P,
    operation: F,
) -> RetryResult<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: RetryPolicy<E>,
    E: fmt::Display,
{
    RetryExecutor::new(config, policy).execute(operation).await
}

/// Pre-defined retry policies for common scenarios
pub mod policies {
    use super::{RetryDecision, RetryPolicy};
    use crate::error::ErrorClassification;

    /// Always retry policy - retries on any error
    #[derive(Debug, Clone, Copy)]
    pub struct AlwaysRetry;

    impl<E> RetryPolicy<E> for AlwaysRetry {
        fn should_retry(&self, _error: &E, _attempt: u32) -> RetryDecision {
            RetryDecision::Retry
        }
    }

    /// Never retry policy - never retries
    #[derive(Debug, Clone, Copy)]
    pub struct NeverRetry;

    impl<E> RetryPolicy<E> for NeverRetry {
        fn should_retry(&self, _error: &E, _attempt: u32) -> RetryDecision {
            RetryDecision::Stop
        }
    }

    /// Retries whatever [`ErrorClassification::is_retryable`] accepts
    #[derive(Debug, Clone, Copy, Default)]
    pub struct RetryClassified;

    impl<E: ErrorClassification> RetryPolicy<E> for RetryClassified {
        fn should_retry(&self, error: &E, _attempt: u32) -> RetryDecision {
            if error.is_retryable() {
                RetryDecision::Retry
            } else {
                RetryDecision::Stop
            }
        }
    }

    /// Predicate-based retry policy
    #[derive(Debug, Clone)]
    pub struct PredicateRetry<F> {
        predicate: F,
    }

    impl<F> PredicateRetry<F> {
        pub fn new(predicate: F) -> Self {
            Self { predicate }
        }
    }

    impl<F, E> RetryPolicy<E> for PredicateRetry<F>
    where
        F: Fn(&E, u32) -> bool,
    {
        fn should_retry(&self, error: &E, attempt: u32) -> RetryDecision {
            if (self.predicate)(error, attempt) {
                RetryDecision::Retry
            } else {
                RetryDecision::Stop
            }
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for the retry executor and its policies

    use std::sync::atomic::{AtomicU32, Ordering};

    use super::policies::*;
    use super::*;
    use crate::error::ApiError;

    fn fast_config(max_retries: u32) -> RetryConfig {
        RetryConfig::builder()
            .max_retries(max_retries)
            .delay(Duration::from_millis(1))
            .build()
            .expect("valid config")
    }

    #[derive(Default)]
    struct CountingNotifier {
        retries: AtomicU32,
        give_ups: AtomicU32,
    }

    impl RetryNotifier for CountingNotifier {
        fn on_retry(&self, _attempt: u32, _error: &dyn fmt::Display, _delay: Duration) {
            self.retries.fetch_add(1, Ordering::SeqCst);
        }

        fn on_give_up(&self, _attempts: u32, _error: &dyn fmt::Display) {
            self.give_ups.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_retry_config_default() {
        let config = RetryConfig::default();

        assert_eq!(config.max_retries, 3);
        assert_eq!(config.delay, Duration::from_millis(1000));
        assert!(!config.notify);
        assert_eq!(config.max_attempts(), 4);
    }

    #[test]
    fn test_retry_config_builder() {
        let config = RetryConfig::builder()
            .max_retries(5)
            .delay(Duration::from_millis(200))
            .notify(true)
            .build()
            .expect("Builder should create valid config");

        assert_eq!(config.max_retries, 5);
        assert_eq!(config.delay, Duration::from_millis(200));
        assert!(config.notify);
    }

    #[test]
    fn test_retry_config_rejects_excessive_delay() {
        let result = RetryConfig::builder().delay(Duration::from_secs(61)).build();
        assert!(result.is_err());
        assert!(result.unwrap_err().message.contains("exceeds"));
    }

    #[test]
    fn test_no_retry_config() {
        let config = RetryConfig::no_retry();
        assert_eq!(config.max_attempts(), 1);
        assert!(config.validate().is_ok());
    }

    #[tokio::test]
    async fn test_succeeds_after_temporary_failures() {
        let executor = RetryExecutor::new(fast_config(3), AlwaysRetry);
        let counter = AtomicU32::new(0);

        let outcome = executor
            .execute_with_outcome(|| {
                let count = counter.fetch_add(1, Ordering::SeqCst);
                async move {
                    if count < 2 {
                        Err("temporary failure")
                    } else {
                        Ok(42)
                    }
                }
            })
            .await;

        assert_eq!(outcome.attempts, 3);
        assert_eq!(outcome.total_delay, Duration::from_millis(2));
        assert_eq!(outcome.into_result().expect("eventually succeeds"), 42);
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_exhausts_after_max_retries_plus_one() {
        let executor = RetryExecutor::new(fast_config(3), AlwaysRetry);
        let counter = AtomicU32::new(0);

        let result = executor
            .execute(|| {
                counter.fetch_add(1, Ordering::SeqCst);
                async { Err::<(), _>("persistent failure") }
            })
            .await;

        match result {
            Err(RetryError::Exhausted { attempts, source }) => {
                assert_eq!(attempts, 4);
                assert_eq!(source, "persistent failure");
            }
            other => panic!("Expected Exhausted, got {other:?}"),
        }
        assert_eq!(counter.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_attempts_follow_min_formula() {
        for max_retries in 0..4u32 {
            for failures in 0..6u32 {
                let executor = RetryExecutor::new(fast_config(max_retries), AlwaysRetry);
                let counter = AtomicU32::new(0);

                let _ = executor
                    .execute(|| {
                        let count = counter.fetch_add(1, Ordering::SeqCst);
                        async move {
                            if count < failures {
                                Err("network down")
                            } else {
                                Ok(())
                            }
                        }
                    })
                    .await;

                assert_eq!(
                    counter.load(Ordering::SeqCst),
                    (failures + 1).min(max_retries + 1),
                    "max_retries={max_retries} failures={failures}"
                );
            }
        }
    }

    #[tokio::test]
    async fn test_never_retry_runs_once() {
        let executor = RetryExecutor::new(fast_config(5), NeverRetry);
        let counter = AtomicU32::new(0);

        let result = executor
            .execute(|| {
                counter.fetch_add(1, Ordering::SeqCst);
                async { Err::<(), _>("error".to_string()) }
            })
            .await;

        assert!(matches!(result, Err(RetryError::NonRetryable { .. })));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_predicate_can_stop_early() {
        let policy = PredicateRetry::new(|error: &String, attempt| {
            error.contains("retryable") && attempt < 2
        });
        let executor = RetryExecutor::new(fast_config(5), policy);
        let counter = AtomicU32::new(0);

        let result = executor
            .execute(|| {
                counter.fetch_add(1, Ordering::SeqCst);
                async { Err::<(), _>("retryable error".to_string()) }
            })
            .await;

        assert!(matches!(result, Err(RetryError::NonRetryable { .. })));
        // Invocations 0, 1 retry; invocation 2 is rejected
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_classified_policy_skips_client_errors() {
        let executor = RetryExecutor::new(fast_config(3), RetryClassified);
        let counter = AtomicU32::new(0);

        let result = executor
            .execute(|| {
                counter.fetch_add(1, Ordering::SeqCst);
                async { Err::<(), _>(ApiError::http(404, "missing")) }
            })
            .await;

        let err = result.unwrap_err();
        assert!(!err.is_exhausted());
        assert_eq!(err.into_source().status, 404);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_classified_policy_retries_network_errors() {
        let executor = RetryExecutor::new(fast_config(2), RetryClassified);
        let counter = AtomicU32::new(0);

        let result = executor
            .execute(|| {
                counter.fetch_add(1, Ordering::SeqCst);
                async { Err::<(), _>(ApiError::network("connection refused")) }
            })
            .await;

        assert!(result.unwrap_err().is_exhausted());
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_notifier_called_only_when_enabled() {
        let notifier = Arc::new(CountingNotifier::default());
        let executor = RetryExecutor::new(fast_config(2), AlwaysRetry)
            .with_notifier(notifier.clone() as Arc<dyn RetryNotifier>);

        let _ = executor.execute(|| async { Err::<(), _>("down") }).await;

        assert_eq!(notifier.retries.load(Ordering::SeqCst), 0);
        assert_eq!(notifier.give_ups.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_notifier_counts_retries_and_give_up() {
        let notifier = Arc::new(CountingNotifier::default());
        let config = RetryConfig { notify: true, ..fast_config(2) };
        let executor = RetryExecutor::new(config, AlwaysRetry)
            .with_notifier(notifier.clone() as Arc<dyn RetryNotifier>);

        let _ = executor.execute(|| async { Err::<(), _>("down") }).await;

        assert_eq!(notifier.retries.load(Ordering::SeqCst), 2);
        assert_eq!(notifier.give_ups.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_retry_with_policy_convenience_function() {
        let counter = AtomicU32::new(0);

        let result = retry_with_policy(fast_config(2), AlwaysRetry, || {
            let count = counter.fetch_add(1, Ordering::SeqCst);
            async move {
                if count == 0 {
                    Err("first attempt fails".to_string())
                } else {
                    Ok("success")
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), "success");
    }

    #[test]
    fn test_policy_decisions() {
        let error = "error".to_string();
        assert_eq!(AlwaysRetry.should_retry(&error, 100), RetryDecision::Retry);
        assert_eq!(NeverRetry.should_retry(&error, 0), RetryDecision::Stop);

        let policy = PredicateRetry::new(|error: &String, _attempt| error.contains("retry"));
        assert_eq!(policy.should_retry(&"retryable".to_string(), 0), RetryDecision::Retry);
        assert_eq!(policy.should_retry(&"fatal".to_string(), 0), RetryDecision::Stop);
    }

    #[test]
    fn test_retry_error_display() {
        let err = RetryError::Exhausted { attempts: 5, source: "boom".to_string() };
        assert!(err.to_string().contains("5 tries"));
        assert!(err.to_string().contains("boom"));

        let err = RetryError::NonRetryable { source: "fatal".to_string() };
        assert!(err.to_string().contains("non-retryable"));
        assert_eq!(err.source_ref(), "fatal");
    }
}
