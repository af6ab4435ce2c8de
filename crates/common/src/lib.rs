//! Modular common utilities shared across Greenloop crates.
//!
//! # Feature Tiers
//!
//! Enable cargo features to opt into the tiers you need:
//! - `foundation`: the normalized API error and error classification
//! - `runtime`: async infrastructure (fixed-delay retry helper)
//! - `observability`: tracing for the runtime tier (pulled in by `runtime`)

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

// Foundation tier
// -----------------------------------------------------------------
#[cfg(feature = "foundation")]
pub mod error;

// Runtime tier
// --------------------------------------------------------------------
#[cfg(feature = "runtime")]
pub mod resilience;

// Re-export commonly used types and traits for convenience
// ------------------------
#[cfg(feature = "foundation")]
pub use error::{ApiError, ApiResult, ErrorClassification, ErrorCode, ErrorSeverity, FieldErrors};
#[cfg(feature = "runtime")]
pub use resilience::{
    retry_with_policy, LogNotifier, RetryConfig, RetryConfigBuilder, RetryDecision, RetryError,
    RetryExecutor, RetryNotifier, RetryOutcome, RetryPolicy, RetryResult,
};
