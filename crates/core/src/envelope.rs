//! The uniform response wrapper.
//!
//! Every response body is an [`Envelope`]: either `{ data, message? }` on
//! success or the flat error shape `{ error, code, details?, path? }`. The
//! enum makes "both data and error" unrepresentable.

use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Envelope<T: Serialize> {
    Data {
        data: T,
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    Error(ErrorBody),
}

impl<T: Serialize> Envelope<T> {
    pub fn data(data: T, message: impl Into<String>) -> Self {
        Envelope::Data {
            data,
            message: Some(message.into()),
        }
    }
}

impl Envelope<Value> {
    pub fn error(body: ErrorBody) -> Self {
        Envelope::Error(body)
    }
}

/// Body of every failed response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorBody {
    /// Localized human-readable message.
    pub error: String,
    /// Stable machine-readable code (`NOT_FOUND`, `VALIDATION_ERROR`, ...).
    pub code: &'static str,
    /// Field errors for validation failures, raw error text for internal ones.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    /// Requested path, set by the unmatched-route fallback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>, code: &'static str) -> Self {
        Self {
            error: error.into(),
            code,
            details: None,
            path: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}
