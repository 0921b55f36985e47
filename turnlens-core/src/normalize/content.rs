//! Display text extraction for message content
//!
//! Content shows up as a plain string, an array of content blocks or a bare
//! object. Human and AI messages share one extraction path.

use super::value::{coerce_to_text, is_truthy, to_json_text, truthy_field};
use crate::protocol::Message;
use serde_json::Value;

/// Separator placed between content blocks
pub const BLOCK_SEPARATOR: &str = "\n";

/// Extract displayable text from a raw content value.
///
/// Never fails: unrecognized shapes fall back to their JSON serialization.
pub fn extract_content(content: &Value) -> String {
    match content {
        Value::String(text) => text.clone(),
        Value::Array(blocks) => blocks
            .iter()
            .map(block_text)
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(BLOCK_SEPARATOR),
        Value::Object(_) => match truthy_field(content, "text") {
            Some(text) => coerce_to_text(text),
            None => to_json_text(content),
        },
        _ => String::new(),
    }
}

/// Text of a single content block.
///
/// A `{"type": "text", "text": ...}` block is covered by the `text` lookup,
/// so the discriminator is never consulted.
fn block_text(block: &Value) -> String {
    match block {
        Value::String(text) => text.clone(),
        Value::Object(_) => match truthy_field(block, "text") {
            Some(text) => coerce_to_text(text),
            None => to_json_text(block),
        },
        other => to_json_text(other),
    }
}

/// Extract text from a message-like JSON value.
///
/// A missing message, or one whose content is absent or falsy, yields `""`.
pub fn extract_message_value(message: Option<&Value>) -> String {
    match message.and_then(|m| m.get("content")) {
        Some(content) if is_truthy(content) => extract_content(content),
        _ => String::new(),
    }
}

/// Extract text from a parsed message
pub fn extract_message_content(message: Option<&Message>) -> String {
    match message {
        Some(msg) if is_truthy(&msg.content) => extract_content(&msg.content),
        _ => String::new(),
    }
}

/// Text of an AI message
pub fn extract_ai_content(message: Option<&Message>) -> String {
    extract_message_content(message)
}

/// Text of a human message
pub fn extract_human_content(message: Option<&Message>) -> String {
    extract_message_content(message)
}
