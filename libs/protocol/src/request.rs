use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::{ProtocolError, Result};

/// A single outgoing command record.
///
/// Serializes to one flat JSON object: the reserved `request_id` and `cmd`
/// fields first, then every payload field at the top level. Payload fields
/// are written after the reserved ones, so a payload key that collides with
/// a reserved key overrides it.
#[derive(Debug, Clone)]
pub struct Request {
    request_id: String,
    cmd: String,
    payload: Map<String, Value>,
}

impl Request {
    /// Create a request for `cmd` with a freshly generated identifier.
    pub fn new(cmd: impl Into<String>) -> Result<Self> {
        let cmd = cmd.into();
        if cmd.is_empty() {
            return Err(ProtocolError::EmptyCommand);
        }
        Ok(Self {
            request_id: Uuid::new_v4().to_string(),
            cmd,
            payload: Map::new(),
        })
    }

    /// Replace the payload with `payload`.
    pub fn payload(mut self, payload: Map<String, Value>) -> Self {
        self.payload = payload;
        self
    }

    /// Add a single payload field.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.payload.insert(key.into(), value.into());
        self
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn cmd(&self) -> &str {
        &self.cmd
    }

    /// Flatten into the wire record.
    pub fn to_value(&self) -> Value {
        let mut record = Map::new();
        record.insert(
            "request_id".to_string(),
            Value::String(self.request_id.clone()),
        );
        record.insert("cmd".to_string(), Value::String(self.cmd.clone()));
        for (key, value) in &self.payload {
            record.insert(key.clone(), value.clone());
        }
        Value::Object(record)
    }

    /// Encode as one compact, newline-terminated JSON line.
    pub fn to_line(&self) -> String {
        let mut line = self.to_value().to_string();
        line.push('\n');
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_carries_id_cmd_and_payload() {
        let request = Request::new("ping").unwrap().field("x", 1);
        let record = request.to_value();

        let id = record["request_id"].as_str().unwrap();
        assert!(!id.is_empty());
        assert_eq!(record["cmd"], "ping");
        assert_eq!(record["x"], 1);
    }

    #[test]
    fn ids_are_unique_across_requests() {
        let a = Request::new("ping").unwrap();
        let b = Request::new("ping").unwrap();
        assert_ne!(a.request_id(), b.request_id());
    }

    #[test]
    fn empty_command_is_rejected() {
        assert!(matches!(
            Request::new(""),
            Err(ProtocolError::EmptyCommand)
        ));
    }

    #[test]
    fn colliding_payload_key_overrides_reserved_field() {
        let request = Request::new("ping").unwrap().field("cmd", "shadowed");
        let record = request.to_value();
        assert_eq!(record["cmd"], "shadowed");
    }

    #[test]
    fn caller_payload_is_not_mutated() {
        let mut payload = Map::new();
        payload.insert("x".to_string(), Value::from(1));
        let snapshot = payload.clone();

        let _ = Request::new("ping").unwrap().payload(payload.clone());
        assert_eq!(payload, snapshot);
    }

    #[test]
    fn line_is_newline_terminated_compact_json() {
        let line = Request::new("ping").unwrap().to_line();
        assert!(line.ends_with('\n'));
        assert_eq!(line.matches('\n').count(), 1);
        assert!(!line.contains("  "));
    }
}
