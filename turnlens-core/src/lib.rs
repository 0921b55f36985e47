//! Turnlens Core Library
//!
//! Normalizes heterogeneous chat-trace payloads (message arrays, dataset
//! input/output pairs, medical records) into numbered conversation turns
//! with display-ready text and token usage.

pub mod config;
pub mod medical;
pub mod normalize;
pub mod payload;
pub mod protocol;
pub mod view;

pub use medical::MedicalRecord;
pub use normalize::{
    adapt_dataset, assemble_turns, extract_ai_content, extract_content, extract_human_content,
    extract_message_content, normalize_usage,
};
pub use payload::{classify, parse_payload, route, Payload, PayloadError, PayloadInbox};
pub use protocol::{Message, MessageRole, Turn, UsageSummary};
pub use view::{Conversation, TurnView};

/// Returns the version of the Turnlens Core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
