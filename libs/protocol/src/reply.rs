use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ProtocolError, Result};

/// A decoded reply record.
///
/// Any well-formed JSON object is a valid reply; the runtime's envelope
/// fields (`ok`, `data`, `error`, `request_id`) are exposed through typed
/// accessors but never required at this layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    fields: Map<String, Value>,
}

impl Reply {
    /// Decode one frame of reply text.
    ///
    /// The frame must be a JSON object; a bare scalar or array cannot
    /// represent a reply record.
    pub fn parse(raw: &str) -> Result<Self> {
        match serde_json::from_str(raw)? {
            Value::Object(fields) => Ok(Self { fields }),
            _ => Err(ProtocolError::NotAnObject),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }

    /// The reply's correlation identifier, if the runtime echoed one.
    pub fn request_id(&self) -> Option<&str> {
        self.fields.get("request_id").and_then(Value::as_str)
    }

    /// The envelope's `ok` flag. `None` when absent or not a boolean.
    pub fn ok_flag(&self) -> Option<bool> {
        self.fields.get("ok").and_then(Value::as_bool)
    }

    /// The envelope's `data` field, verbatim.
    pub fn data(&self) -> Option<&Value> {
        self.fields.get("data")
    }

    /// The envelope's `error` field, with the runtime's fallback values for
    /// anything missing.
    pub fn error(&self) -> Option<ReplyError> {
        let err = self.fields.get("error")?;
        Some(ReplyError {
            code: field_or(err, "code", "ERROR"),
            message: field_or(err, "message", "Unknown error"),
            hint: field(err, "hint"),
            details: field(err, "details"),
        })
    }
}

fn field(err: &Value, key: &str) -> Option<String> {
    err.get(key).and_then(Value::as_str).map(str::to_string)
}

fn field_or(err: &Value, key: &str, fallback: &str) -> String {
    field(err, key).unwrap_or_else(|| fallback.to_string())
}

/// Error payload of a reply envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ReplyError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            hint: None,
            details: None,
        }
    }

    /// The runtime reported a failure without an `error` record.
    pub fn unknown() -> Self {
        Self::new("ERROR", "Unknown error")
    }

    /// The reply was an object but not a recognizable envelope.
    pub fn bad_response() -> Self {
        Self::new("BAD_RESPONSE", "Runtime returned an invalid response")
    }
}

impl fmt::Display for ReplyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}
