//! Response normalization
//!
//! Turns raw HTTP outcomes into `ApiError`s and unwraps the
//! `{success, message, data, errors}` envelope.

use greenloop_common::{ApiError, ApiResult, ErrorCode};
use greenloop_domain::constants::MAX_ERROR_BODY_CHARS;
use greenloop_domain::ApiEnvelope;
use serde::de::DeserializeOwned;

/// Normalize a non-2xx response
///
/// The message is the envelope's message, else the raw body (truncated),
/// else `"Request failed with status {status}"`. 401 maps to
/// `AuthRequired`; field errors map to `Validation`.
pub fn from_status(status: u16, body: &str) -> ApiError {
    let envelope = serde_json::from_str::<ApiEnvelope<serde_json::Value>>(body).ok();

    let message = envelope
        .as_ref()
        .and_then(ApiEnvelope::message)
        .map(str::to_string)
        .or_else(|| raw_body_message(body))
        .unwrap_or_else(|| format!("Request failed with status {status}"));

    let fields = envelope.as_ref().and_then(ApiEnvelope::field_errors).cloned();

    if status == 401 {
        return ApiError::new(ErrorCode::AuthRequired, status, message);
    }
    match fields {
        Some(fields) => ApiError::new(ErrorCode::Validation, status, message).with_field_errors(fields),
        None => ApiError::http(status, message),
    }
}

/// Parse a 2xx body as an envelope and check its `success` flag
///
/// # Errors
/// `InvalidResponse` when the body is not an envelope; `Http` carrying
/// `status` when `success` is false, with the server message or
/// `default_message`.
pub fn parse_envelope<T: DeserializeOwned>(
    status: u16,
    body: &str,
    default_message: &str,
) -> ApiResult<ApiEnvelope<T>> {
    let envelope: ApiEnvelope<T> = serde_json::from_str(body)
        .map_err(|err| ApiError::from(err).with_status(status))?;

    if !envelope.success {
        let message = envelope.message().unwrap_or(default_message).to_string();
        let mut error = ApiError::http(status, message);
        if let Some(fields) = envelope.field_errors() {
            error = error.with_field_errors(fields.clone());
        }
        return Err(error);
    }

    Ok(envelope)
}

/// `data` of a successful envelope
///
/// # Errors
/// `InvalidResponse` when `data` is missing.
pub fn require_data<T>(envelope: ApiEnvelope<T>, status: u16) -> ApiResult<T> {
    envelope
        .data
        .ok_or_else(|| ApiError::invalid_response("Response did not include data").with_status(status))
}

fn raw_body_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    Some(body.chars().take(MAX_ERROR_BODY_CHARS).collect())
}
