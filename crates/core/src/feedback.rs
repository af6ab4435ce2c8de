//! User-facing text for normalized errors
//!
//! Screens show `describe(&err, ...)` instead of the raw message so a 404 on
//! a listing and a 404 on a seller read naturally.

use greenloop_common::{ApiError, ErrorCode};

/// What the failed call was about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subject<'a> {
    /// Capitalized noun for not-found messages, e.g. "Listing"
    pub resource: &'a str,
    /// Verb phrase for permission messages, e.g. "edit this listing"
    pub action: &'a str,
}

impl<'a> Subject<'a> {
    pub const fn new(resource: &'a str, action: &'a str) -> Self {
        Self { resource, action }
    }
}

pub const SIGN_IN_MESSAGE: &str = "Please sign in to continue.";
pub const OFFLINE_MESSAGE: &str = "Unable to reach the server. Check your connection and try again.";

pub fn not_found_message(resource: &str) -> String {
    format!("{resource} not found. It may have been removed.")
}

pub fn forbidden_message(action: &str) -> String {
    format!("You don't have permission to {action}.")
}

/// Short message for an error, branching on status and code
pub fn describe(err: &ApiError, subject: Subject<'_>) -> String {
    if err.is_not_found() {
        return not_found_message(subject.resource);
    }
    if err.is_forbidden() {
        return forbidden_message(subject.action);
    }
    if err.is_unauthorized() {
        return SIGN_IN_MESSAGE.to_string();
    }
    match err.code {
        ErrorCode::Network | ErrorCode::Timeout => OFFLINE_MESSAGE.to_string(),
        ErrorCode::Validation => err
            .first_field_error()
            .map_or_else(|| err.message.clone(), |(_, message)| message.to_string()),
        _ => err.message.clone(),
    }
}

/// Rewrite the message of a 404/403 for the given subject, keeping the rest
pub fn contextualize(err: ApiError, subject: Subject<'_>) -> ApiError {
    if err.is_not_found() || err.is_forbidden() {
        let message = describe(&err, subject);
        err.with_message(message)
    } else {
        err
    }
}
