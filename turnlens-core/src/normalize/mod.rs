//! Payload normalization
//!
//! Pure functions turning schema-less conversation JSON into [`Turn`]s and
//! display text. Nothing in this module fails or mutates its input: shapes
//! it does not recognize degrade to serialization or defaults.
//!
//! [`Turn`]: crate::protocol::Turn

pub mod assembler;
pub mod content;
pub mod dataset;
pub mod usage;
pub mod value;

pub use assembler::{assemble_messages, assemble_turns, TurnAssembler};
pub use content::{
    extract_ai_content, extract_content, extract_human_content, extract_message_content,
    extract_message_value,
};
pub use dataset::{adapt_dataset, resolve_input_text, resolve_output};
pub use usage::normalize_usage;
