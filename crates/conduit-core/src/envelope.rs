//! The upstream response envelope and the uniform error body.
//!
//! Upstream APIs wrap payloads as `{status, message, data}`. The proxy hands
//! the UI only `data`, and reports every failure as `{statusCode, statusMessage}`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::enums::EnvelopeStatus;

/// `{status, message, data}` as sent by the HR and investigation backends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Envelope<T> {
    pub status: EnvelopeStatus,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    #[must_use]
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: EnvelopeStatus::Success,
            message: message.into(),
            data: Some(data),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: EnvelopeStatus::Error,
            message: message.into(),
            data: None,
        }
    }
}

/// Strip the envelope from an upstream response body.
///
/// An object with a non-null `data` key yields that value. Anything else
/// (no `data`, `data: null`, arrays, scalars) is returned unchanged.
#[must_use]
pub fn unwrap_envelope(body: Value) -> Value {
    match body {
        Value::Object(mut map) => match map.remove("data") {
            Some(data) if !data.is_null() => data,
            Some(data) => {
                map.insert("data".to_string(), data);
                Value::Object(map)
            }
            None => Value::Object(map),
        },
        other => other,
    }
}

/// The only error shape the UI ever receives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub status_code: u16,
    pub status_message: String,
}

impl ErrorBody {
    #[must_use]
    pub fn new(status_code: u16, status_message: impl Into<String>) -> Self {
        Self {
            status_code,
            status_message: status_message.into(),
        }
    }
}
