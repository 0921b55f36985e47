//! Inbound payload envelope
//!
//! The host posts `{ type, data, metadata? }`. The envelope keeps the raw
//! value and exposes typed accessors over it.

use super::error::{kind_name, PayloadError, PayloadResult};
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Envelope `type` tag
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PayloadType {
    /// A run output
    Output,
    /// A dataset reference (gold) output
    Reference,
    /// Any other tag; empty when missing
    Other(String),
}

impl PayloadType {
    /// Wire name of the tag
    pub fn as_str(&self) -> &str {
        match self {
            PayloadType::Output => "output",
            PayloadType::Reference => "reference",
            PayloadType::Other(tag) => tag.as_str(),
        }
    }
}

impl From<&str> for PayloadType {
    fn from(tag: &str) -> Self {
        match tag {
            "output" => PayloadType::Output,
            "reference" => PayloadType::Reference,
            other => PayloadType::Other(other.to_string()),
        }
    }
}

impl fmt::Display for PayloadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One message delivered by the host
#[derive(Debug, Clone, PartialEq)]
pub struct Payload {
    payload_type: PayloadType,
    value: Value,
}

impl Payload {
    /// Wrap a JSON object as a payload
    pub fn from_value(value: Value) -> PayloadResult<Self> {
        if !value.is_object() {
            return Err(PayloadError::NotAnObject {
                found: kind_name(&value),
            });
        }

        let payload_type = value
            .get("type")
            .and_then(Value::as_str)
            .map(PayloadType::from)
            .unwrap_or(PayloadType::Other(String::new()));

        Ok(Self {
            payload_type,
            value,
        })
    }

    /// Parse a payload from raw JSON text
    pub fn parse(text: &str) -> PayloadResult<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Envelope type tag
    pub fn payload_type(&self) -> &PayloadType {
        &self.payload_type
    }

    /// Whether this is a reference (gold) output
    pub fn is_reference(&self) -> bool {
        self.payload_type == PayloadType::Reference
    }

    /// The `data` section
    pub fn data(&self) -> Option<&Value> {
        self.value.get("data")
    }

    /// The `data.messages` array, if present
    pub fn messages(&self) -> Option<&Value> {
        self.data().and_then(|d| d.get("messages"))
    }

    /// The `metadata.inputs` section, if present
    pub fn inputs(&self) -> Option<&Value> {
        self.value.get("metadata").and_then(|m| m.get("inputs"))
    }

    /// The raw envelope
    pub fn as_value(&self) -> &Value {
        &self.value
    }

    /// Consume the payload and return the raw envelope
    pub fn into_value(self) -> Value {
        self.value
    }
}

impl Serialize for Payload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}

/// Parse a payload from raw JSON text
pub fn parse_payload(text: &str) -> PayloadResult<Payload> {
    Payload::parse(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_type_parsing() {
        let payload = Payload::from_value(json!({"type": "reference", "data": {}})).unwrap();
        assert!(payload.is_reference());
        assert_eq!(payload.payload_type().to_string(), "reference");

        let untyped = Payload::from_value(json!({"data": {}})).unwrap();
        assert_eq!(untyped.payload_type(), &PayloadType::Other(String::new()));
    }

    #[test]
    fn test_accessors() {
        let payload = Payload::from_value(json!({
            "type": "output",
            "data": {"messages": [{"type": "human", "content": "hi"}]},
            "metadata": {"inputs": {"question": "q"}}
        }))
        .unwrap();

        assert!(payload.messages().unwrap().is_array());
        assert_eq!(payload.inputs().unwrap()["question"], "q");
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            parse_payload("{not json"),
            Err(PayloadError::InvalidJson { line: 1, .. })
        ));
        assert!(matches!(
            parse_payload("[1, 2]"),
            Err(PayloadError::NotAnObject { found: "array" })
        ));
    }
}
