/*
[INPUT]:  Error sources (HTTP, API, serialization, configuration)
[OUTPUT]: Structured error types with backend error payloads attached
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use std::collections::BTreeMap;

use reqwest::StatusCode;
use thiserror::Error;

use crate::types::ApiErrorBody;

/// Main error type for the AgriSync adapter
#[derive(Error, Debug)]
pub enum AgrisyncError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response
    #[error("API error (status {status}): {}", body.summary())]
    Api { status: u16, body: ApiErrorBody },

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Invalid response from server
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AgrisyncError {
    /// Create an API error from status code and a raw response body
    pub fn api_error(status: StatusCode, body: &[u8]) -> Self {
        AgrisyncError::Api {
            status: status.as_u16(),
            body: ApiErrorBody::from_slice(body),
        }
    }

    /// HTTP status of an API error
    pub fn status(&self) -> Option<u16> {
        match self {
            AgrisyncError::Api { status, .. } => Some(*status),
            AgrisyncError::Http(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }

    /// Backend `detail` message, if the error carried one
    pub fn detail(&self) -> Option<&str> {
        match self {
            AgrisyncError::Api { body, .. } => body.detail.as_deref(),
            _ => None,
        }
    }

    /// Per-field validation messages, if the error carried any
    pub fn field_errors(&self) -> Option<&BTreeMap<String, Vec<String>>> {
        match self {
            AgrisyncError::Api { body, .. } if body.has_field_errors() => Some(&body.fields),
            _ => None,
        }
    }

    /// Check if error indicates authentication or permission failure
    pub fn is_auth_error(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }
}

/// Result type alias for AgriSync operations
pub type Result<T> = std::result::Result<T, AgrisyncError>;
