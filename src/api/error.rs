//! Failures of a single API call.
//!
//! Any non-2xx response becomes [`ApiError::Status`] carrying the status and
//! the decoded body; everything else describes why no usable response came
//! back. Nothing here decides what the user sees.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Maximum number of characters kept from a non-JSON error body.
const MAX_ERROR_CHARS: usize = 200;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed ({})", .0.status)]
    Status(NormalizedError),
    #[error("unable to reach the server: {0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
    #[error("failed to decode response: {0}")]
    Decode(String),
    #[error("failed to build request: {0}")]
    Request(String),
}

impl ApiError {
    /// HTTP status of a normalized failure, `None` for transport-level faults.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.normalized().map(|err| err.status)
    }

    #[must_use]
    pub fn normalized(&self) -> Option<&NormalizedError> {
        match self {
            Self::Status(err) => Some(err),
            _ => None,
        }
    }

    pub(crate) fn from_reqwest(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_builder() {
            Self::Request(err.to_string())
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Uniform `{status, body}` view of a non-2xx response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedError {
    pub status: u16,
    pub body: Value,
}

impl NormalizedError {
    /// Build from a raw response body. JSON bodies are kept as-is; anything else
    /// is trimmed, truncated and stored as a string.
    #[must_use]
    pub fn from_body(status: u16, raw: &[u8]) -> Self {
        let body = match serde_json::from_slice::<Value>(raw) {
            Ok(value) => value,
            Err(_) => {
                let text = String::from_utf8_lossy(raw);
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    Value::Null
                } else {
                    Value::String(trimmed.chars().take(MAX_ERROR_CHARS).collect())
                }
            }
        };
        Self { status, body }
    }

    /// Server message code, e.g. `user.conflict.email_already_registered`.
    #[must_use]
    pub fn message_code(&self) -> Option<&str> {
        self.body
            .get("message")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|code| !code.is_empty())
    }

    /// Per-field issues of a `422` body, in server order.
    ///
    /// Returns `None` when the body does not carry the validation shape.
    #[must_use]
    pub fn validation_issues(&self) -> Option<Vec<ValidationIssue>> {
        let detail = self.body.get("detail")?;
        serde_json::from_value(detail.clone()).ok()
    }

    #[must_use]
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }
}

/// One offending field of a validation-error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    #[serde(rename = "loc")]
    pub location: Vec<LocationPart>,
    #[serde(rename = "msg")]
    pub message: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl ValidationIssue {
    /// Name of the offending field: the last textual location part.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        self.location.iter().rev().find_map(|part| match part {
            LocationPart::Key(key) => Some(key.as_str()),
            LocationPart::Index(_) => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocationPart {
    Key(String),
    Index(u64),
}
