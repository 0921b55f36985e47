//! Integration tests for payload routing, inboxes and medical records

use serde_json::json;
use turnlens_core::medical::{MedicalRecord, Notes};
use turnlens_core::payload::{
    classify, parse_payload, route, EndpointKind, PayloadError, PayloadInbox, PayloadShape,
    PayloadType,
};
use turnlens_core::view::Conversation;
use turnlens_core::{extract_ai_content, extract_human_content};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn test_parse_payload_errors() {
    match parse_payload("{\"type\": ") {
        Err(PayloadError::InvalidJson { line, .. }) => assert_eq!(line, 1),
        other => panic!("Expected invalid JSON error, got: {:?}", other),
    }

    match parse_payload("[1, 2]") {
        Err(PayloadError::NotAnObject { found }) => assert_eq!(found, "array"),
        other => panic!("Expected not-an-object error, got: {:?}", other),
    }
}

#[test]
fn test_output_wins_over_messages() {
    let payload = json!({
        "type": "output",
        "data": {
            "output": {"type": "ai", "content": "dataset answer"},
            "messages": [
                {"type": "human", "content": "q1"},
                {"type": "ai", "content": "a1"},
                {"type": "human", "content": "q2"},
                {"type": "ai", "content": "a2"}
            ]
        }
    });

    assert_eq!(classify(&payload), PayloadShape::Dataset);
    let turns = route(&payload);
    assert_eq!(turns.len(), 1);
    assert_eq!(extract_ai_content(turns[0].ai.as_ref()), "dataset answer");
}

#[test]
fn test_conversation_views() {
    init_tracing();

    let payload = parse_payload(
        &json!({
            "type": "output",
            "data": {"messages": [
                {"type": "human", "content": "How many tokens?"},
                {
                    "type": "ai",
                    "content": [{"type": "text", "text": "Plenty."}],
                    "response_metadata": {"model_name": "gpt-4o", "stop_reason": "stop"},
                    "usage_metadata": {
                        "input_tokens": 2048,
                        "output_tokens": 12,
                        "total_tokens": 2060,
                        "input_token_details": {"cache_read": 2000}
                    }
                },
                {"type": "human", "content": "Thanks"}
            ]}
        })
        .to_string(),
    )
    .unwrap();

    let conversation = Conversation::from_payload(&payload);
    assert_eq!(conversation.payload_type(), Some(&PayloadType::Output));
    assert!(!conversation.is_reference());

    let views: Vec<_> = conversation.views().collect();
    assert_eq!(views.len(), 2);
    assert_eq!(views[0].ai_text.as_deref(), Some("Plenty."));
    assert_eq!(views[0].model.label().as_deref(), Some("gpt-4o"));
    assert_eq!(
        views[0].token_line.as_deref(),
        Some("2,048 in / 12 out (2,060 total) • Cache: 2000 read, 0 created")
    );
    assert_eq!(views[1].human_text, "Thanks");
    assert_eq!(views[1].ai_text, None);
}

#[test]
fn test_reference_payload_through_dataset_inbox() {
    init_tracing();

    let mut inbox = PayloadInbox::new(EndpointKind::Dataset);
    let delivery = inbox.receive(json!({
        "type": "reference",
        "data": {"output_answer": "Paris"},
        "metadata": {"inputs": {"input_question": "Capital of France?"}}
    }));
    assert!(delivery.accepted);

    let conversation = inbox.conversation();
    assert!(conversation.is_reference());
    let turn = &conversation.turns()[0];
    assert_eq!(extract_human_content(turn.human.as_ref()), "Capital of France?");
    assert_eq!(extract_ai_content(turn.ai.as_ref()), "Paris");
}

#[test]
fn test_inbox_counts_every_delivery() {
    let mut inbox = PayloadInbox::new(EndpointKind::AnnotationQueue);
    inbox.receive(json!({"type": "reference", "data": {"messages": []}}));
    inbox.receive(json!(null));
    inbox.receive(json!({"type": "output", "data": {}}));

    assert_eq!(inbox.received_count(), 3);
    assert!(inbox.latest().is_none());
    assert!(inbox.conversation().is_empty());
}

#[test]
fn test_annotation_queue_ignores_output_field() {
    let mut inbox = PayloadInbox::new(EndpointKind::AnnotationQueue);
    inbox.receive(json!({
        "type": "output",
        "data": {
            "output": "dataset-shaped",
            "messages": [
                {"type": "human", "content": "q"},
                {"type": "ai", "content": "a"}
            ]
        }
    }));

    let conversation = inbox.conversation();
    assert_eq!(conversation.len(), 1);
    assert_eq!(
        extract_human_content(conversation.turns()[0].human.as_ref()),
        "q"
    );
}

#[test]
fn test_medical_record_from_nested_output() {
    init_tracing();

    let record = MedicalRecord::from_payload(&json!({
        "type": "output",
        "data": {"output": {"medical_record": {
            "patient": {"name": "A. Patient", "sex": "F"},
            "vital_signs": {"heart_rate": 72},
            "diagnosis": {"code": "J45", "name": "Asthma"},
            "medications": ["Albuterol"],
            "clinical_notes": {"follow_up": "2 weeks"},
            "timestamp": 1714608000
        }}}
    }))
    .unwrap();

    assert_eq!(record.date, "1714608000");
    assert_eq!(record.patient.len(), 2);
    assert_eq!(record.vital_signs[0].label, "Heart Rate");
    assert_eq!(record.vital_signs[0].value, "72");
    assert_eq!(record.diagnosis.len(), 1);
    assert_eq!(record.diagnosis[0].description, "Asthma");
    assert_eq!(record.medications[0].name, "Albuterol");
    assert!(matches!(record.notes, Some(Notes::Structured(_))));
}

#[test]
fn test_medical_record_prefers_direct_location() {
    let record = MedicalRecord::from_payload(&json!({
        "data": {
            "medical_record": {"notes": "direct"},
            "output": {"notes": "from output"}
        }
    }))
    .unwrap();

    assert_eq!(record.notes, Some(Notes::Text("direct".to_string())));
}

#[test]
fn test_medical_record_non_object_json_is_notes() {
    let record = MedicalRecord::from_payload(&json!({
        "data": {"output": "[1, 2, 3]"}
    }))
    .unwrap();

    assert_eq!(record.notes, Some(Notes::Text("[1, 2, 3]".to_string())));
    assert!(!record.is_empty());
}
