//! Node.js bindings for Turnlens
//!
//! This crate exposes the Turnlens core normalizers to Node.js using NAPI-RS.
//! Arguments and results cross the boundary as JSON strings.

use napi::bindgen_prelude::*;
use napi_derive::napi;
use serde::Serialize;
use serde_json::Value;
use turnlens_core::config::{load_from_path, DisplayConfig};
use turnlens_core::payload::{EndpointKind, PayloadInbox};
use turnlens_core::view::{format_token_line, Conversation, TurnView};
use turnlens_core::{MedicalRecord, Message, Payload};

/// Structured error types for better error reporting
#[derive(Debug)]
enum BindingError {
    InvalidJson(String),
    InvalidArgument(String),
    ConfigurationError(String),
    SerializationError(String),
}

impl From<BindingError> for napi::Error {
    fn from(err: BindingError) -> napi::Error {
        match err {
            BindingError::InvalidJson(msg) => {
                napi::Error::new(napi::Status::InvalidArg, format!("Invalid JSON: {}", msg))
            }
            BindingError::InvalidArgument(msg) => {
                napi::Error::new(napi::Status::InvalidArg, format!("Invalid argument: {}", msg))
            }
            BindingError::ConfigurationError(msg) => napi::Error::new(
                napi::Status::InvalidArg,
                format!("Configuration error: {}", msg),
            ),
            BindingError::SerializationError(msg) => napi::Error::new(
                napi::Status::GenericFailure,
                format!("Serialization error: {}", msg),
            ),
        }
    }
}

fn parse_json(text: &str) -> std::result::Result<Value, BindingError> {
    serde_json::from_str(text).map_err(|e| BindingError::InvalidJson(e.to_string()))
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value)
        .map_err(|e| BindingError::SerializationError(e.to_string()).into())
}

/// `null` stands for an absent message
fn parse_message(message_json: &str) -> std::result::Result<Option<Message>, BindingError> {
    Ok(match parse_json(message_json)? {
        Value::Null => None,
        value => Some(Message::from_value(&value)),
    })
}

fn parse_endpoint(name: &str) -> std::result::Result<EndpointKind, BindingError> {
    match name {
        "annotation_queue" | "annotationQueue" => Ok(EndpointKind::AnnotationQueue),
        "dataset" => Ok(EndpointKind::Dataset),
        "medical" => Ok(EndpointKind::Medical),
        other => Err(BindingError::InvalidArgument(format!(
            "Unknown endpoint: {}",
            other
        ))),
    }
}

/// Assemble a message array into turns
#[napi(js_name = "parseConversation")]
pub fn parse_conversation(messages_json: String) -> Result<String> {
    let messages = parse_json(&messages_json)?;
    to_json(&turnlens_core::assemble_turns(&messages))
}

/// Adapt a dataset payload into its single turn
#[napi(js_name = "parseDatasetFormat")]
pub fn parse_dataset_format(payload_json: String) -> Result<String> {
    let payload = parse_json(&payload_json)?;
    to_json(&turnlens_core::adapt_dataset(&payload))
}

/// Display text of an AI message
#[napi(js_name = "extractAiContent")]
pub fn extract_ai_content(message_json: String) -> Result<String> {
    let message = parse_message(&message_json)?;
    Ok(turnlens_core::extract_ai_content(message.as_ref()))
}

/// Display text of a human message
#[napi(js_name = "extractHumanContent")]
pub fn extract_human_content(message_json: String) -> Result<String> {
    let message = parse_message(&message_json)?;
    Ok(turnlens_core::extract_human_content(message.as_ref()))
}

/// Normalized usage summary as JSON, or `null` when usage is absent
#[napi(js_name = "formatTokenUsage")]
pub fn format_token_usage(usage_json: String) -> Result<Option<String>> {
    let usage = parse_json(&usage_json)?;
    turnlens_core::normalize_usage(Some(&usage))
        .map(|summary| to_json(&summary))
        .transpose()
}

/// One-line token summary such as `1,200 in / 80 out (1,280 total)`
#[napi(js_name = "formatTokenLine")]
pub fn format_token_line_text(
    usage_json: String,
    separator: Option<String>,
) -> Result<Option<String>> {
    let usage = parse_json(&usage_json)?;
    let separator = separator.unwrap_or_else(|| DisplayConfig::default().thousands_separator);

    Ok(turnlens_core::normalize_usage(Some(&usage))
        .map(|summary| format_token_line(&summary, &separator)))
}

/// Route a payload envelope to the matching normalizer
#[napi(js_name = "routePayload")]
pub fn route_payload(payload_json: String) -> Result<String> {
    let payload = parse_json(&payload_json)?;
    to_json(&turnlens_core::route(&payload))
}

/// Render models for every turn of a payload
#[napi(js_name = "turnViews")]
pub fn turn_views(payload_json: String) -> Result<String> {
    let payload = Payload::parse(&payload_json)
        .map_err(|e| BindingError::InvalidJson(e.to_string()))?;
    let views: Vec<TurnView> = Conversation::from_payload(&payload).views().collect();
    to_json(&views)
}

/// Normalized medical record, or `null` when the payload carries none
#[napi(js_name = "medicalRecord")]
pub fn medical_record(payload_json: String) -> Result<Option<String>> {
    let payload = parse_json(&payload_json)?;
    MedicalRecord::from_payload(&payload)
        .map(|record| to_json(&record))
        .transpose()
}

/// Latest accepted payload for one host view
#[napi]
#[derive(Debug)]
pub struct Inbox {
    inner: PayloadInbox,
}

#[napi]
impl Inbox {
    #[napi(constructor)]
    pub fn new(endpoint: String) -> Result<Self> {
        Ok(Self {
            inner: PayloadInbox::new(parse_endpoint(&endpoint)?),
        })
    }

    /// Inbox whose rules and display settings come from a YAML or JSON config file
    #[napi(factory, js_name = "fromConfig")]
    pub fn from_config(endpoint: String, config_path: String) -> Result<Self> {
        let kind = parse_endpoint(&endpoint)?;
        let config = load_from_path(&config_path)
            .map_err(|e| BindingError::ConfigurationError(e.to_string()))?;

        Ok(Self {
            inner: PayloadInbox::from_config(kind, &config),
        })
    }

    /// Deliver a payload; returns the delivery outcome as JSON
    #[napi]
    pub fn receive(&mut self, payload_json: String) -> Result<String> {
        let value = parse_json(&payload_json)?;
        to_json(&self.inner.receive(value))
    }

    /// Deliveries seen so far, accepted or not
    #[napi(js_name = "receivedCount")]
    pub fn received_count(&self) -> u32 {
        u32::try_from(self.inner.received_count()).unwrap_or(u32::MAX)
    }

    /// Turns of the latest accepted payload as JSON
    #[napi]
    pub fn conversation(&self) -> Result<String> {
        to_json(&self.inner.conversation())
    }

    /// Whether the latest accepted payload is a reference output
    #[napi(js_name = "isReference")]
    pub fn is_reference(&self) -> bool {
        self.inner.latest().is_some_and(Payload::is_reference)
    }
}

/// Returns the version of the Turnlens library.
#[napi]
pub fn version() -> Result<String> {
    Ok(turnlens_core::version().to_string())
}
