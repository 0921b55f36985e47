//! Shape classification and routing
//!
//! A payload is either a message array (`data.messages`) or a dataset pair
//! (`data.output` / `data.output_answer` plus `metadata.inputs`). The router
//! picks the matching normalizer.

use crate::normalize::value::truthy_field;
use crate::normalize::{adapt_dataset, assemble_turns};
use crate::protocol::Turn;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, trace};

/// Detected payload shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadShape {
    /// `data.output` is present
    Dataset,
    /// Only a reference answer in `data.output_answer`
    DatasetReference,
    /// `data.messages` is present
    Messages,
    /// None of the above
    Unrecognized,
}

/// Classify a payload by shape.
///
/// A present `data.output` takes precedence over `data.messages`.
pub fn classify(payload: &Value) -> PayloadShape {
    let Some(data) = payload.get("data") else {
        return PayloadShape::Unrecognized;
    };

    if truthy_field(data, "output").is_some() {
        PayloadShape::Dataset
    } else if truthy_field(data, "messages").is_some() {
        PayloadShape::Messages
    } else if truthy_field(data, "output_answer").is_some() {
        PayloadShape::DatasetReference
    } else {
        PayloadShape::Unrecognized
    }
}

/// Route a payload to the normalizer for its shape
pub fn route(payload: &Value) -> Vec<Turn> {
    let shape = classify(payload);

    let turns = match shape {
        PayloadShape::Dataset | PayloadShape::DatasetReference => adapt_dataset(payload),
        PayloadShape::Messages => payload
            .get("data")
            .and_then(|d| d.get("messages"))
            .map(assemble_turns)
            .unwrap_or_default(),
        PayloadShape::Unrecognized => {
            trace!("Payload has no recognizable conversation data");
            Vec::new()
        }
    };

    debug!(shape = ?shape, turns = turns.len(), "Routed payload");
    turns
}
