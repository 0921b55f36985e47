//! Per-turn render model

use super::format::format_token_line;
use crate::config::DisplayConfig;
use crate::normalize::{extract_human_content, extract_ai_content, normalize_usage};
use crate::protocol::{Message, Turn, UsageSummary};
use serde::Serialize;
use serde_json::Value;

/// Model details read from an AI message's `response_metadata`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    pub model_name: Option<String>,
    pub model_provider: Option<String>,
    pub stop_reason: Option<String>,
}

impl ModelInfo {
    /// Read model details; non-string fields are ignored
    pub fn from_message(message: Option<&Message>) -> Self {
        let metadata = message.and_then(|m| m.response_metadata.as_ref());
        let field = |key: &str| -> Option<String> {
            metadata
                .and_then(|m| m.get(key))
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        Self {
            model_name: field("model_name"),
            model_provider: field("model_provider"),
            stop_reason: field("stop_reason"),
        }
    }

    /// `name (provider)`, or just the name; `None` without a model name
    pub fn label(&self) -> Option<String> {
        let name = self.model_name.as_ref()?;
        Some(match &self.model_provider {
            Some(provider) => format!("{} ({})", name, provider),
            None => name.clone(),
        })
    }
}

/// Everything a renderer needs to draw one turn
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnView {
    pub turn_number: usize,
    pub human_text: String,
    /// `None` when the turn has no AI reply
    pub ai_text: Option<String>,
    pub model: ModelInfo,
    pub usage: Option<UsageSummary>,
    /// `usage` formatted with the configured digit separator
    pub token_line: Option<String>,
    pub tool_call_count: usize,
}

impl TurnView {
    /// Build the view for one turn with default display settings
    pub fn from_turn(turn: &Turn) -> Self {
        Self::with_display(turn, &DisplayConfig::default())
    }

    /// Build the view for one turn
    pub fn with_display(turn: &Turn, display: &DisplayConfig) -> Self {
        let ai = turn.ai.as_ref();
        let usage = ai.and_then(|msg| normalize_usage(msg.usage_metadata.as_ref()));
        let token_line = usage
            .as_ref()
            .map(|usage| format_token_line(usage, &display.thousands_separator));

        Self {
            turn_number: turn.turn_number,
            human_text: extract_human_content(turn.human.as_ref()),
            ai_text: ai.map(|msg| extract_ai_content(Some(msg))),
            model: ModelInfo::from_message(ai),
            usage,
            token_line,
            tool_call_count: ai
                .and_then(|msg| msg.tool_calls.as_ref())
                .and_then(Value::as_array)
                .map_or(0, Vec::len),
        }
    }

    /// Usage or a stop reason is available for the metadata footer
    pub fn has_metadata(&self) -> bool {
        self.usage.is_some() || self.model.stop_reason.is_some()
    }
}

impl From<&Turn> for TurnView {
    fn from(turn: &Turn) -> Self {
        Self::from_turn(turn)
    }
}
