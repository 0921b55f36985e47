//! Render models for normalized turns
//!
//! Views are computed per turn on demand; nothing here is cached.

pub mod conversation;
pub mod format;
pub mod turn_view;

pub use conversation::Conversation;
pub use format::{format_token_line, group_thousands, humanize_key};
pub use turn_view::{ModelInfo, TurnView};
