//! Error taxonomy for marketplace API calls.
//!
//! Every fault is converted into one of these kinds before it reaches UI
//! state: local validation, transport failure, server-side rejection, or an
//! authentication failure that invalidates the session.

use std::collections::BTreeMap;
use std::fmt;

use petmatch_engine::EngineError;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Local validation failure; never sent to the server.
    #[error("validation failed: {0}")]
    Validation(#[from] EngineError),

    /// The call produced no usable response (connect, timeout, bad body).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// 401 — credentials missing, expired, or rejected. The session has
    /// already been cleared when this is returned.
    #[error("authentication required: {0}")]
    Auth(String),

    /// The server rejected a write (double-booking and friends).
    #[error("{0}")]
    Conflict(ServerRejection),

    /// Any other non-2xx response.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
}

/// Convenience alias used throughout petmatch-client.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Parsed body of a 4xx rejection.
///
/// The API reports either `{"detail": "..."}`, `{"error": "..."}`, or a
/// per-field map with an optional `non_field_errors` list. Messages are
/// surfaced verbatim where present; anything unparseable falls back to a
/// generic message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerRejection {
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub non_field_errors: Vec<String>,
    #[serde(flatten)]
    pub field_errors: BTreeMap<String, Vec<String>>,
}

impl ServerRejection {
    /// Parse a rejection body, falling back to an empty rejection (generic
    /// message) when the body is not the expected JSON shape.
    pub fn from_body(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    /// Messages for a single field, if the server scoped any to it.
    pub fn field(&self, name: &str) -> Option<&[String]> {
        self.field_errors.get(name).map(Vec::as_slice)
    }
}

impl fmt::Display for ServerRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(detail) = &self.detail {
            return write!(f, "{detail}");
        }
        if let Some(error) = &self.error {
            return write!(f, "{error}");
        }
        if !self.non_field_errors.is_empty() {
            return write!(f, "{}", self.non_field_errors.join("; "));
        }
        if !self.field_errors.is_empty() {
            let parts: Vec<String> = self
                .field_errors
                .iter()
                .map(|(field, messages)| format!("{field}: {}", messages.join(", ")))
                .collect();
            return write!(f, "{}", parts.join("; "));
        }
        write!(f, "the server rejected the request")
    }
}
