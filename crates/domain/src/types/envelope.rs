//! The `{success, message, data, errors}` wrapper every backend response uses

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::utils::serde::field_errors;

/// Response envelope
///
/// `errors` maps field names to messages. The backend sends either a single
/// string or a list per field; both are accepted. Any other `errors` shape is
/// dropped rather than failing the whole envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default, deserialize_with = "field_errors", skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}

impl<T> ApiEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self { success: true, message: None, data: Some(data), errors: None }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self { success: false, message: Some(message.into()), data: None, errors: None }
    }

    /// Server message, ignoring blank strings
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().map(str::trim).filter(|m| !m.is_empty())
    }

    /// Field errors, ignoring an empty map
    pub fn field_errors(&self) -> Option<&BTreeMap<String, Vec<String>>> {
        self.errors.as_ref().filter(|errors| !errors.is_empty())
    }
}

/// Envelope for endpoints whose `data` is irrelevant (deletes, read receipts)
pub type Ack = ApiEnvelope<serde_json::Value>;
