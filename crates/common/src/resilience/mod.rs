//! Resilience patterns for backend access
//!
//! Currently a single pattern: a **fixed-count, fixed-delay retry** with a
//! pluggable policy deciding which failures qualify. The delay between
//! attempts is constant. Callers abandon a retry loop by dropping the future.
//!
//! ```rust,ignore
//! use greenloop_common::resilience::{policies::RetryClassified, RetryConfig, RetryExecutor};
//!
//! let executor = RetryExecutor::new(RetryConfig::default(), RetryClassified);
//! let listing = executor.execute(|| api.get_listing("42")).await.map_err(|e| e.into_source())?;
//! ```

pub mod retry;

pub use retry::{
    policies, retry_with_policy, InvalidRetryConfig, LogNotifier, RetryConfig, RetryConfigBuilder,
    RetryDecision, RetryError, RetryExecutor, RetryNotifier, RetryOutcome, RetryPolicy,
    RetryResult,
};
