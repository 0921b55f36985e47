//! Per-endpoint payload inbox
//!
//! Each host view receives payloads over time and displays the latest one it
//! accepts. Rejected deliveries are still counted.

use super::envelope::{Payload, PayloadType};
use crate::config::{DisplayConfig, EndpointConfig, TurnlensConfig};
use crate::medical::MedicalRecord;
use crate::normalize::assemble_turns;
use crate::normalize::value::is_truthy;
use crate::view::Conversation;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use tracing::{debug, warn};
use uuid::Uuid;

/// Host view a payload is delivered to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointKind {
    AnnotationQueue,
    Dataset,
    Medical,
}

impl EndpointKind {
    /// Config key for this endpoint
    pub fn as_str(&self) -> &'static str {
        match self {
            EndpointKind::AnnotationQueue => "annotation_queue",
            EndpointKind::Dataset => "dataset",
            EndpointKind::Medical => "medical",
        }
    }

    /// Built-in acceptance rule
    pub fn default_config(&self) -> EndpointConfig {
        match self {
            EndpointKind::AnnotationQueue => EndpointConfig::annotation_queue(),
            EndpointKind::Dataset | EndpointKind::Medical => EndpointConfig::dataset(),
        }
    }

    fn config_from<'a>(&self, config: &'a TurnlensConfig) -> &'a EndpointConfig {
        match self {
            EndpointKind::AnnotationQueue => &config.endpoints.annotation_queue,
            EndpointKind::Dataset => &config.endpoints.dataset,
            EndpointKind::Medical => &config.endpoints.medical,
        }
    }
}

impl fmt::Display for EndpointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one delivery
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    pub id: Uuid,
    pub accepted: bool,
    /// `None` when the delivery was not an envelope object
    #[serde(serialize_with = "serialize_type")]
    pub payload_type: Option<PayloadType>,
}

fn serialize_type<S: serde::Serializer>(
    payload_type: &Option<PayloadType>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match payload_type {
        Some(t) => serializer.serialize_some(t.as_str()),
        None => serializer.serialize_none(),
    }
}

/// Latest accepted payload for one endpoint
#[derive(Debug, Clone)]
pub struct PayloadInbox {
    kind: EndpointKind,
    rules: EndpointConfig,
    display: DisplayConfig,
    received: usize,
    latest: Option<Payload>,
}

impl PayloadInbox {
    /// Create an inbox with the endpoint's built-in rules
    pub fn new(kind: EndpointKind) -> Self {
        Self::with_config(kind, &kind.default_config())
    }

    /// Create an inbox with explicit rules
    pub fn with_config(kind: EndpointKind, rules: &EndpointConfig) -> Self {
        Self {
            kind,
            rules: rules.clone(),
            display: DisplayConfig::default(),
            received: 0,
            latest: None,
        }
    }

    /// Create an inbox using the endpoint's section and the display
    /// settings of a loaded config
    pub fn from_config(kind: EndpointKind, config: &TurnlensConfig) -> Self {
        Self {
            display: config.display.clone(),
            ..Self::with_config(kind, kind.config_from(config))
        }
    }

    /// Record a delivery, keeping it as the latest payload if accepted
    pub fn receive(&mut self, value: Value) -> Delivery {
        self.received += 1;
        let id = Uuid::new_v4();

        let payload = match Payload::from_value(value) {
            Ok(payload) => payload,
            Err(err) => {
                warn!(endpoint = %self.kind, %id, error = %err, "Rejected payload");
                return Delivery {
                    id,
                    accepted: false,
                    payload_type: None,
                };
            }
        };

        let payload_type = payload.payload_type().clone();
        let accepted = self.accepts(&payload);
        debug!(
            endpoint = %self.kind,
            %id,
            payload_type = %payload_type,
            accepted,
            received = self.received,
            "Received payload"
        );

        if accepted {
            self.latest = Some(payload);
        }

        Delivery {
            id,
            accepted,
            payload_type: Some(payload_type),
        }
    }

    /// Whether a payload passes this endpoint's rules
    pub fn accepts(&self, payload: &Payload) -> bool {
        if !self.rules.accepts_type(payload.payload_type().as_str()) {
            return false;
        }
        !self.rules.require_messages || payload.messages().is_some_and(is_truthy)
    }

    pub fn kind(&self) -> EndpointKind {
        self.kind
    }

    /// Deliveries seen so far, accepted or not
    pub fn received_count(&self) -> usize {
        self.received
    }

    pub fn latest(&self) -> Option<&Payload> {
        self.latest.as_ref()
    }

    pub fn display(&self) -> &DisplayConfig {
        &self.display
    }

    /// Turns of the latest accepted payload.
    ///
    /// The annotation queue always reads `data.messages`; the dataset view
    /// routes by shape. The medical view has no conversation.
    pub fn conversation(&self) -> Conversation {
        let Some(payload) = &self.latest else {
            return Conversation::empty().with_display(self.display.clone());
        };

        let conversation = match self.kind {
            EndpointKind::AnnotationQueue => {
                let turns = payload.messages().map(assemble_turns).unwrap_or_default();
                Conversation::with_turns(payload, turns)
            }
            EndpointKind::Dataset => Conversation::from_payload(payload),
            EndpointKind::Medical => Conversation::with_turns(payload, Vec::new()),
        };
        conversation.with_display(self.display.clone())
    }

    /// Medical record of the latest accepted payload
    pub fn medical_record(&self) -> Option<MedicalRecord> {
        self.latest
            .as_ref()
            .and_then(|payload| MedicalRecord::from_payload(payload.as_value()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn conversation_payload() -> Value {
        json!({
            "type": "output",
            "data": {"messages": [
                {"type": "human", "content": "hi"},
                {"type": "ai", "content": "hello"}
            ]}
        })
    }

    #[test]
    fn test_annotation_queue_requires_messages() {
        let mut inbox = PayloadInbox::new(EndpointKind::AnnotationQueue);

        let rejected = inbox.receive(json!({"type": "output", "data": {"output": "x"}}));
        assert!(!rejected.accepted);
        assert!(inbox.latest().is_none());

        let accepted = inbox.receive(conversation_payload());
        assert!(accepted.accepted);
        assert_ne!(accepted.id, rejected.id);
        assert_eq!(inbox.received_count(), 2);
        assert_eq!(inbox.conversation().len(), 1);
    }

    #[test]
    fn test_rejected_delivery_keeps_latest() {
        let mut inbox = PayloadInbox::new(EndpointKind::Dataset);
        inbox.receive(json!({"type": "reference", "data": {"output_answer": "gold"}}));
        let delivery = inbox.receive(json!({"type": "progress", "data": {}}));

        assert!(!delivery.accepted);
        assert_eq!(
            delivery.payload_type,
            Some(PayloadType::Other("progress".to_string()))
        );
        assert_eq!(inbox.received_count(), 2);

        let conversation = inbox.conversation();
        assert!(conversation.is_reference());
        assert_eq!(conversation.len(), 1);
    }

    #[test]
    fn test_non_object_is_counted() {
        let mut inbox = PayloadInbox::new(EndpointKind::Medical);
        let delivery = inbox.receive(json!("not an envelope"));

        assert!(!delivery.accepted);
        assert_eq!(delivery.payload_type, None);
        assert_eq!(inbox.received_count(), 1);
        assert!(inbox.conversation().is_empty());
        assert!(inbox.medical_record().is_none());
    }

    #[test]
    fn test_custom_rules() {
        let mut config = TurnlensConfig::default();
        config.endpoints.dataset.accept_types = vec!["reference".to_string()];

        let mut inbox = PayloadInbox::from_config(EndpointKind::Dataset, &config);
        assert!(!inbox.receive(json!({"type": "output", "data": {}})).accepted);
        assert!(inbox.receive(json!({"type": "reference", "data": {}})).accepted);
    }

    #[test]
    fn test_config_separator_reaches_views() {
        let mut config = TurnlensConfig::default();
        config.display.thousands_separator = " ".to_string();

        let mut inbox = PayloadInbox::from_config(EndpointKind::AnnotationQueue, &config);
        assert_eq!(inbox.display().thousands_separator, " ");

        inbox.receive(json!({
            "type": "output",
            "data": {"messages": [
                {"type": "human", "content": "hi"},
                {
                    "type": "ai",
                    "content": "hello",
                    "usage_metadata": {"input_tokens": 1500, "output_tokens": 20, "total_tokens": 1520}
                }
            ]}
        }));

        let view = inbox.conversation().views().next().unwrap();
        assert_eq!(view.token_line.as_deref(), Some("1 500 in / 20 out (1 520 total)"));
    }

    #[test]
    fn test_medical_record() {
        let mut inbox = PayloadInbox::new(EndpointKind::Medical);
        inbox.receive(json!({
            "type": "output",
            "data": {"medical_record": {"diagnosis": ["Migraine"]}}
        }));

        let record = inbox.medical_record().unwrap();
        assert_eq!(record.diagnosis[0].description, "Migraine");
        assert!(inbox.conversation().is_empty());
    }

    #[test]
    fn test_delivery_serialization() {
        let mut inbox = PayloadInbox::new(EndpointKind::Dataset);
        let delivery = inbox.receive(json!({"type": "output", "data": {}}));
        let value = serde_json::to_value(&delivery).unwrap();

        assert_eq!(value["accepted"], true);
        assert_eq!(value["payloadType"], "output");
        assert_eq!(value["id"], delivery.id.to_string());
    }
}
