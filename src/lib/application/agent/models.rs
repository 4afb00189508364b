use crate::config::AppConfig;
use crate::types::{ToolCall, ToolResult};

/// Per-session knobs for the turn controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnSettings {
    pub provider: String,
    pub model: String,
    pub max_tokens: u32,
    pub lowercase_response: bool,
    pub refresh_tools_each_turn: bool,
}

impl TurnSettings {
    pub fn new(provider: impl Into<String>, model: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            provider: provider.into(),
            model: model.into(),
            max_tokens,
            lowercase_response: false,
            refresh_tools_each_turn: false,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            provider: config.default_provider.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            lowercase_response: config.lowercase_response,
            refresh_tools_each_turn: config.refresh_tools_each_turn,
        }
    }
}

/// Which phase produced the final answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    /// No tool calls; the first completion is the answer.
    Propose,
    /// Tools ran and a second completion produced the answer.
    Resolve,
}

#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub answer: String,
    pub phase: TurnPhase,
    pub tool_calls: Vec<ToolCall>,
    pub tool_results: Vec<ToolResult>,
}

impl TurnOutcome {
    pub(super) fn direct(answer: String) -> Self {
        Self {
            answer,
            phase: TurnPhase::Propose,
            tool_calls: Vec::new(),
            tool_results: Vec::new(),
        }
    }
}
