//! A normalized conversation ready for display

use super::turn_view::TurnView;
use crate::config::DisplayConfig;
use crate::payload::{route, Payload, PayloadType};
use crate::protocol::Turn;
use serde::Serialize;

/// Turns produced from one payload, plus the envelope type they came from
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Conversation {
    #[serde(skip)]
    payload_type: Option<PayloadType>,
    turns: Vec<Turn>,
    #[serde(skip)]
    display: DisplayConfig,
}

impl Conversation {
    /// A conversation with no turns and no source payload
    pub fn empty() -> Self {
        Self::default()
    }

    /// Route a payload and keep its turns
    pub fn from_payload(payload: &Payload) -> Self {
        Self::with_turns(payload, route(payload.as_value()))
    }

    /// Pair already-assembled turns with the payload they came from
    pub fn with_turns(payload: &Payload, turns: Vec<Turn>) -> Self {
        Self {
            payload_type: Some(payload.payload_type().clone()),
            turns,
            display: DisplayConfig::default(),
        }
    }

    /// Format views with these display settings
    pub fn with_display(mut self, display: DisplayConfig) -> Self {
        self.display = display;
        self
    }

    /// The assembled turns
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Envelope type of the source payload
    pub fn payload_type(&self) -> Option<&PayloadType> {
        self.payload_type.as_ref()
    }

    /// The source payload was a reference output
    pub fn is_reference(&self) -> bool {
        self.payload_type == Some(PayloadType::Reference)
    }

    /// Render models, built lazily one turn at a time
    pub fn views(&self) -> impl Iterator<Item = TurnView> + '_ {
        self.turns
            .iter()
            .map(|turn| TurnView::with_display(turn, &self.display))
    }
}
