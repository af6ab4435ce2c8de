//! Lenient deserializers for server records
//!
//! The marketplace backend is not strict about scalar types: ids arrive as
//! numbers or strings, list columns arrive as arrays or comma-joined text.
//! These helpers normalize such fields while deserializing.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Text(String),
    Signed(i64),
    Unsigned(u64),
}

impl StringOrNumber {
    fn into_string(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Signed(n) => n.to_string(),
            Self::Unsigned(n) => n.to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringList {
    Many(Vec<String>),
    Joined(String),
}

/// Accept an identifier that may be a JSON string or integer.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    StringOrNumber::deserialize(deserializer).map(StringOrNumber::into_string)
}

/// Optional variant of [`string_or_number`]; use with `#[serde(default)]`.
pub fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<StringOrNumber>::deserialize(deserializer)?.map(StringOrNumber::into_string))
}

/// Accept a list given as an array, a comma-separated string, or `null`.
///
/// Entries are trimmed and empty entries dropped. Use with
/// `#[serde(default)]` so an absent field yields an empty list.
pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<StringList>::deserialize(deserializer)?;
    let items: Vec<String> = match raw {
        None => Vec::new(),
        Some(StringList::Many(items)) => items,
        Some(StringList::Joined(text)) => text.split(',').map(str::to_string).collect(),
    };

    Ok(items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect())
}

/// Accept per-field errors as `{field: message | [messages]}`.
///
/// Any other shape (`[]`, a bare string, `null`) yields `None` instead of
/// failing the surrounding record. Non-string messages inside a field's list
/// are skipped. Use with `#[serde(default)]`.
pub fn field_errors<'de, D>(deserializer: D) -> Result<Option<BTreeMap<String, Vec<String>>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Object(entries) = Value::deserialize(deserializer)? else {
        return Ok(None);
    };

    let errors: BTreeMap<String, Vec<String>> = entries
        .into_iter()
        .filter_map(|(field, value)| {
            let messages: Vec<String> = match value {
                Value::String(message) => vec![message],
                Value::Array(items) => items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::String(message) => Some(message),
                        _ => None,
                    })
                    .collect(),
                _ => Vec::new(),
            };
            (!messages.is_empty()).then_some((field, messages))
        })
        .collect();

    Ok(Some(errors))
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(deserialize_with = "string_or_number")]
        id: String,
        #[serde(default, deserialize_with = "opt_string_or_number")]
        owner: Option<String>,
        #[serde(default, deserialize_with = "string_list")]
        tags: Vec<String>,
    }

    #[test]
    fn test_numeric_and_text_ids() {
        let probe: Probe = serde_json::from_str(r#"{"id": 42, "owner": "u-1"}"#).unwrap();
        assert_eq!(probe.id, "42");
        assert_eq!(probe.owner.as_deref(), Some("u-1"));

        let probe: Probe = serde_json::from_str(r#"{"id": "abc", "owner": 7}"#).unwrap();
        assert_eq!(probe.id, "abc");
        assert_eq!(probe.owner.as_deref(), Some("7"));
    }

    #[derive(Deserialize)]
    struct Errors {
        #[serde(default, deserialize_with = "field_errors")]
        errors: Option<BTreeMap<String, Vec<String>>>,
    }

    #[test]
    fn test_field_errors_tolerate_unexpected_shapes() {
        let parsed: Errors =
            serde_json::from_str(r#"{"errors": {"title": "Required", "price": ["Too low", 3]}}"#).unwrap();
        let errors = parsed.errors.unwrap();
        assert_eq!(errors["title"], vec!["Required"]);
        assert_eq!(errors["price"], vec!["Too low"]);

        for raw in [r#"{"errors": []}"#, r#"{"errors": ["Bad id"]}"#, r#"{"errors": "oops"}"#, r#"{"errors": null}"#, "{}"] {
            let parsed: Errors = serde_json::from_str(raw).unwrap();
            assert!(parsed.errors.is_none(), "{raw}");
        }
    }

    #[test]
    fn test_list_forms() {
        let probe: Probe = serde_json::from_str(r#"{"id": 1, "tags": ["a", " b ", ""]}"#).unwrap();
        assert_eq!(probe.tags, vec!["a", "b"]);

        let probe: Probe = serde_json::from_str(r#"{"id": 1, "tags": "recycled, local,,"}"#).unwrap();
        assert_eq!(probe.tags, vec!["recycled", "local"]);

        let probe: Probe = serde_json::from_str(r#"{"id": 1, "tags": null}"#).unwrap();
        assert!(probe.tags.is_empty());

        let probe: Probe = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        assert!(probe.tags.is_empty());
        assert!(probe.owner.is_none());
    }
}
