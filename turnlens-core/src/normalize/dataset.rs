//! Dataset-format adapter
//!
//! Dataset payloads carry one output value in `data` and the example inputs
//! under `metadata.inputs`. They are folded into at most one turn so they
//! render through the same path as message arrays.

use super::content::extract_message_value;
use super::value::{first_truthy, string_or_json, to_json_text, truthy_field};
use crate::protocol::{Message, MessageRole, Turn};
use serde_json::{json, Value};

/// Input keys holding the question text, in priority order
const QUESTION_KEYS: &[&str] = &["input_question", "question"];

/// Resolve the output message of a dataset payload.
///
/// `data.output` wins; a reference payload's `data.output_answer` is turned
/// into a synthetic AI message.
pub fn resolve_output(data: &Value) -> Option<Message> {
    if let Some(output) = truthy_field(data, "output") {
        return Some(output_message(output));
    }

    truthy_field(data, "output_answer").map(|answer| {
        let mut message = Message::with_role(MessageRole::Ai, answer.clone());
        message.response_metadata = Some(json!({}));
        message.usage_metadata = Some(Value::Null);
        message
    })
}

/// Wrap an output value so the turn always holds a message.
///
/// Objects are read as messages as-is; bare strings and other scalars become
/// the content of an AI message.
fn output_message(output: &Value) -> Message {
    match output {
        Value::Object(_) => Message::from_value(output),
        other => Message::with_role(MessageRole::Ai, other.clone()),
    }
}

/// Resolve the human-side text from `metadata.inputs`.
///
/// Absent inputs, or an empty inputs object, resolve to `""`.
pub fn resolve_input_text(inputs: &Value) -> String {
    if !has_inputs(inputs) {
        return String::new();
    }

    if let Some(question) = first_truthy(inputs, QUESTION_KEYS) {
        return string_or_json(question);
    }

    if let Some(input) = truthy_field(inputs, "input") {
        return string_or_json(input);
    }

    match inputs.get("messages") {
        Some(Value::Array(messages)) => extract_message_value(messages.first()),
        _ => to_json_text(inputs),
    }
}

fn has_inputs(inputs: &Value) -> bool {
    match inputs {
        Value::Null => false,
        Value::Object(map) => !map.is_empty(),
        _ => true,
    }
}

/// Fold a dataset payload into zero or one turns
pub fn adapt_dataset(payload: &Value) -> Vec<Turn> {
    let Some(data) = truthy_field(payload, "data") else {
        return Vec::new();
    };
    let Some(output) = resolve_output(data) else {
        return Vec::new();
    };

    let input_text = payload
        .get("metadata")
        .and_then(|m| truthy_field(m, "inputs"))
        .map(resolve_input_text)
        .unwrap_or_default();

    let human = if input_text.is_empty() {
        None
    } else {
        Some(Message::human(input_text))
    };

    vec![Turn {
        human,
        ai: Some(output),
        turn_number: 1,
    }]
}
