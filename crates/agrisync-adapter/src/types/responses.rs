/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust response structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Collection endpoints answer either with a bare array or with a paginated
/// envelope carrying `results`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Paginated {
        results: Vec<T>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        count: Option<u64>,
    },
    Bare(Vec<T>),
}

impl<T> ListResponse<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            ListResponse::Paginated { results, .. } => results,
            ListResponse::Bare(items) => items,
        }
    }
}

/// Key under which list-shaped or non-field validation messages are filed.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// Parsed error payload: an optional `detail` plus per-field message lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiErrorBody {
    pub detail: Option<String>,
    pub fields: BTreeMap<String, Vec<String>>,
}

impl ApiErrorBody {
    pub fn from_slice(bytes: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(bytes) {
            Ok(value) => Self::from_value(&value),
            Err(_) => Self::default(),
        }
    }

    pub fn from_value(value: &Value) -> Self {
        let mut body = Self::default();
        match value {
            Value::Object(map) => {
                for (key, entry) in map {
                    if key == "detail" {
                        if let Value::String(detail) = entry {
                            body.detail = Some(detail.clone());
                        }
                        continue;
                    }
                    let messages = messages_of(entry);
                    if !messages.is_empty() {
                        body.fields.insert(key.clone(), messages);
                    }
                }
            }
            Value::Array(_) => {
                let messages = messages_of(value);
                if !messages.is_empty() {
                    body.fields.insert(NON_FIELD_ERRORS.to_string(), messages);
                }
            }
            Value::String(message) => body.detail = Some(message.clone()),
            _ => {}
        }
        body
    }

    pub fn is_empty(&self) -> bool {
        self.detail.is_none() && self.fields.is_empty()
    }

    pub fn has_field_errors(&self) -> bool {
        !self.fields.is_empty()
    }

    /// One-line summary for logs and error displays.
    pub fn summary(&self) -> String {
        if let Some(detail) = &self.detail {
            return detail.clone();
        }
        match self.fields.iter().next() {
            Some((field, messages)) => format!("{field}: {}", messages.join(" ")),
            None => "no error details".to_string(),
        }
    }
}

fn messages_of(value: &Value) -> Vec<String> {
    match value {
        Value::String(message) => vec![message.clone()],
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(message) => message.clone(),
                other => other.to_string(),
            })
            .collect(),
        _ => Vec::new(),
    }
}
