//! Core protocol types for conversation payloads
//!
//! Messages arrive as schema-less JSON owned by the host application. The
//! types here are lenient:
//! - Construction from a `serde_json::Value` never fails
//! - Unknown keys are preserved so re-serialization is lossless
//! - Content stays a raw JSON value until it is extracted for display

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// Role of a message, taken from its `type` field
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MessageRole {
    /// User input message
    Human,
    /// Model response
    Ai,
    /// Any other tag (system, tool, missing or non-string)
    Other(String),
}

impl MessageRole {
    /// Wire name of the role
    pub fn as_str(&self) -> &str {
        match self {
            MessageRole::Human => "human",
            MessageRole::Ai => "ai",
            MessageRole::Other(tag) => tag.as_str(),
        }
    }

    /// Read the role from a message-like value
    pub fn of(value: &Value) -> Self {
        match value.get("type").and_then(Value::as_str) {
            Some(tag) => Self::from(tag),
            None => MessageRole::Other(String::new()),
        }
    }
}

impl From<&str> for MessageRole {
    fn from(tag: &str) -> Self {
        match tag {
            "human" => MessageRole::Human,
            "ai" => MessageRole::Ai,
            other => MessageRole::Other(other.to_string()),
        }
    }
}

impl Serialize for MessageRole {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A message in the conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct Message {
    /// Role of the message sender
    #[serde(rename = "type")]
    pub role: MessageRole,

    /// Raw content: string, content blocks or object
    pub content: Value,

    /// Model information (model name, provider, stop reason)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_metadata: Option<Value>,

    /// Token usage in whichever shape the host sent it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_metadata: Option<Value>,

    /// Tool calls made by an AI message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Value>,

    /// Keys the normalizer does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Message {
    /// Create a human message with text content
    pub fn human(content: impl Into<String>) -> Self {
        Self::with_role(MessageRole::Human, Value::String(content.into()))
    }

    /// Create an AI message with text content
    pub fn ai(content: impl Into<String>) -> Self {
        Self::with_role(MessageRole::Ai, Value::String(content.into()))
    }

    /// Create a message with an arbitrary role and raw content
    pub fn with_role(role: MessageRole, content: Value) -> Self {
        Self {
            role,
            content,
            response_metadata: None,
            usage_metadata: None,
            tool_calls: None,
            extra: Map::new(),
        }
    }

    /// Build a message from any JSON value.
    ///
    /// Objects are split into the known fields plus `extra`. Any other value
    /// becomes the content of a message with an empty role tag.
    pub fn from_value(value: &Value) -> Self {
        Self::from(value.clone())
    }

    /// Whether this message carries the `human` tag
    pub fn is_human(&self) -> bool {
        self.role == MessageRole::Human
    }

    /// Whether this message carries the `ai` tag
    pub fn is_ai(&self) -> bool {
        self.role == MessageRole::Ai
    }
}

impl From<Value> for Message {
    fn from(value: Value) -> Self {
        let mut map = match value {
            Value::Object(map) => map,
            other => return Self::with_role(MessageRole::Other(String::new()), other),
        };

        let role = match map.remove("type") {
            Some(Value::String(tag)) => MessageRole::from(tag.as_str()),
            _ => MessageRole::Other(String::new()),
        };

        Self {
            role,
            content: map.remove("content").unwrap_or(Value::Null),
            response_metadata: map.remove("response_metadata"),
            usage_metadata: map.remove("usage_metadata"),
            tool_calls: map.remove("tool_calls"),
            extra: map,
        }
    }
}

/// One human/AI exchange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Turn {
    /// The human message opening the turn, if any
    pub human: Option<Message>,

    /// The AI reply closing the turn, if any
    pub ai: Option<Message>,

    /// 1-based sequence number assigned when the turn was opened
    pub turn_number: usize,
}

impl Turn {
    /// Open a turn with a human message and no reply yet
    pub fn open(human: Message, turn_number: usize) -> Self {
        Self {
            human: Some(human),
            ai: None,
            turn_number,
        }
    }

    /// Both sides of the exchange are present
    pub fn is_complete(&self) -> bool {
        self.human.is_some() && self.ai.is_some()
    }
}

/// Canonical token usage summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageSummary {
    /// Tokens in the prompt
    pub input: u64,

    /// Tokens in the completion
    pub output: u64,

    /// Total tokens as reported (not recomputed)
    pub total: u64,

    /// Prompt tokens served from cache
    pub cache_read: u64,

    /// Prompt tokens written to cache
    pub cache_creation: u64,
}

impl UsageSummary {
    /// Any tokens were read from the prompt cache
    pub fn has_cache_activity(&self) -> bool {
        self.cache_read > 0
    }
}
