//! Normalized error type shared by every backend-access function
//!
//! Whatever goes wrong between the caller and the marketplace API (a dropped
//! connection, a non-2xx status, an envelope with `success: false`, a
//! missing auth token, a local validation failure) ends up as one
//! [`ApiError`] value:
//!
//! | Field | Meaning |
//! |-------|---------|
//! | `message` | Human-readable text, server-provided when available |
//! | `code` | Machine code ([`ErrorCode`]) used for branching |
//! | `status` | HTTP status, or `0` when no response was received |
//! | `field_errors` | Optional per-field validation messages |
//!
//! # ErrorClassification
//!
//! [`ErrorClassification`] is the standard interface the retry helper and
//! the logging layer use to reason about errors:
//!
//! - **`is_retryable()`**: transient failures (network, timeout, 5xx, 429)
//! - **`severity()`**: how loudly the failure should be reported
//! - **`is_critical()`**: whether the failure indicates a broken setup
//!
//! # Examples
//!
//! ```rust,ignore
//! use greenloop_common::error::{ApiError, ErrorClassification};
//!
//! let err = ApiError::http(503, "Service unavailable");
//! assert!(err.is_retryable());
//!
//! let err = ApiError::http(404, "Listing not found");
//! assert!(err.is_not_found());
//! assert!(!err.is_retryable());
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Per-field validation messages, keyed by field name.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Standard result type for backend-access operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Machine-readable classification of an [`ApiError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    /// Connection refused, DNS failure, reset, ... (no response received)
    #[serde(rename = "NETWORK_ERROR")]
    Network,
    /// The request did not complete within the configured timeout
    #[serde(rename = "TIMEOUT")]
    Timeout,
    /// The server answered with a non-success status or envelope
    #[serde(rename = "HTTP_ERROR")]
    Http,
    /// Field-level validation failed (client or server side)
    #[serde(rename = "VALIDATION_ERROR")]
    Validation,
    /// An authenticated call was attempted without a usable token
    #[serde(rename = "AUTH_REQUIRED")]
    AuthRequired,
    /// The response body did not match the expected envelope
    #[serde(rename = "INVALID_RESPONSE")]
    InvalidResponse,
    /// Client misconfiguration (bad base URL, unreadable token file, ...)
    #[serde(rename = "CONFIG_ERROR")]
    Config,
    /// Anything that fits no other bucket
    #[serde(rename = "UNKNOWN_ERROR")]
    Unknown,
}

impl ErrorCode {
    /// Stable string form, identical to the serialized representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Network => "NETWORK_ERROR",
            Self::Timeout => "TIMEOUT",
            Self::Http => "HTTP_ERROR",
            Self::Validation => "VALIDATION_ERROR",
            Self::AuthRequired => "AUTH_REQUIRED",
            Self::InvalidResponse => "INVALID_RESPONSE",
            Self::Config => "CONFIG_ERROR",
            Self::Unknown => "UNKNOWN_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The normalized error value produced at the API boundary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("[{code}] {message}")]
pub struct ApiError {
    /// Human-readable message
    pub message: String,
    /// Machine code
    pub code: ErrorCode,
    /// HTTP status (`0` when no response was received)
    pub status: u16,
    /// Optional per-field validation messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<FieldErrors>,
}

impl ApiError {
    /// Create an error from its parts
    pub fn new<S: Into<String>>(code: ErrorCode, status: u16, message: S) -> Self {
        Self { message: message.into(), code, status, field_errors: None }
    }

    /// Transport failure before any response was received
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::new(ErrorCode::Network, 0, message)
    }

    /// Request exceeded its deadline
    pub fn timeout(after: Duration) -> Self {
        Self::new(ErrorCode::Timeout, 0, format!("Request timed out after {after:?}"))
    }

    /// Non-success HTTP status or non-success envelope
    pub fn http<S: Into<String>>(status: u16, message: S) -> Self {
        Self::new(ErrorCode::Http, status, message)
    }

    /// Field-level validation failure (reported as 422)
    pub fn validation<S: Into<String>>(message: S, fields: FieldErrors) -> Self {
        Self::new(ErrorCode::Validation, 422, message).with_field_errors(fields)
    }

    /// An authenticated call has no token to send
    pub fn auth_required<S: Into<String>>(message: S) -> Self {
        Self::new(ErrorCode::AuthRequired, 401, message)
    }

    /// Response body could not be interpreted
    pub fn invalid_response<S: Into<String>>(message: S) -> Self {
        Self::new(ErrorCode::InvalidResponse, 0, message)
    }

    /// Client misconfiguration
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::new(ErrorCode::Config, 0, message)
    }

    /// Catch-all
    pub fn unknown<S: Into<String>>(message: S) -> Self {
        Self::new(ErrorCode::Unknown, 0, message)
    }

    /// Attach field errors; an empty map is dropped
    pub fn with_field_errors(mut self, fields: FieldErrors) -> Self {
        self.field_errors = if fields.is_empty() { None } else { Some(fields) };
        self
    }

    /// Override the status (e.g. a malformed body on a 200 response)
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Replace the message, keeping code, status and field errors
    pub fn with_message<S: Into<String>>(mut self, message: S) -> Self {
        self.message = message.into();
        self
    }

    /// `true` for 404 responses
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    /// `true` for 403 responses
    pub fn is_forbidden(&self) -> bool {
        self.status == 403
    }

    /// `true` when the user must sign in (missing token or 401)
    pub fn is_unauthorized(&self) -> bool {
        self.code == ErrorCode::AuthRequired || self.status == 401
    }

    /// `true` when no response was received at all
    pub fn is_network(&self) -> bool {
        matches!(self.code, ErrorCode::Network | ErrorCode::Timeout)
    }

    /// First `(field, message)` pair in field-name order
    pub fn first_field_error(&self) -> Option<(&str, &str)> {
        self.field_errors.as_ref().and_then(|fields| {
            fields.iter().find_map(|(field, messages)| {
                messages.first().map(|message| (field.as_str(), message.as_str()))
            })
        })
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::invalid_response(format!("Failed to parse response: {err}"))
    }
}

/// Standard interface for classifying errors
pub trait ErrorClassification {
    /// Check if this error is retryable
    ///
    /// Retryable errors are transient issues that may succeed if attempted
    /// again, such as network failures, timeouts, 5xx and 429 responses.
    fn is_retryable(&self) -> bool;

    /// Get the error severity level
    fn severity(&self) -> ErrorSeverity;

    /// Check if this is a critical error requiring immediate attention
    fn is_critical(&self) -> bool;
}

impl ErrorClassification for ApiError {
    fn is_retryable(&self) -> bool {
        match self.code {
            ErrorCode::Network | ErrorCode::Timeout => true,
            ErrorCode::Http => self.status >= 500 || self.status == 429,
            _ => false,
        }
    }

    fn severity(&self) -> ErrorSeverity {
        match self.code {
            ErrorCode::Network | ErrorCode::Timeout | ErrorCode::AuthRequired => {
                ErrorSeverity::Warning
            }
            ErrorCode::Validation => ErrorSeverity::Info,
            ErrorCode::Http if self.status == 404 => ErrorSeverity::Info,
            ErrorCode::Http if self.status < 500 => ErrorSeverity::Warning,
            ErrorCode::Http | ErrorCode::InvalidResponse | ErrorCode::Unknown => {
                ErrorSeverity::Error
            }
            ErrorCode::Config => ErrorSeverity::Critical,
        }
    }

    fn is_critical(&self) -> bool {
        self.code == ErrorCode::Config
    }
}

/// Error severity levels for monitoring and alerting
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Informational, typically for debugging
    Info,
    /// Warning, should be monitored but not critical
    Warning,
    /// Error, requires attention and action
    Error,
    /// Critical, immediate action required
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}
