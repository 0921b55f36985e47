//! Protocol module for conversation payload structures
//!
//! This module defines the canonical data model the normalizer produces:
//! - Messages as delivered by the host, with lenient construction
//! - Turns pairing a human message with its AI reply
//! - Token usage summaries

pub mod types;

pub use types::{Message, MessageRole, Turn, UsageSummary};
