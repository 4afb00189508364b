use crate::application::tooling::ToolInvokeError;
use crate::model::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error(transparent)]
    Extract(#[from] ExtractError),
    #[error(transparent)]
    Tool(#[from] ToolError),
    #[error("failed to read the tool catalogue: {0}")]
    Catalog(#[source] ToolInvokeError),
}

impl AgentError {
    pub fn user_message(&self) -> String {
        match self {
            AgentError::Model(err) => err.user_message(),
            AgentError::Extract(err) => err.user_message(),
            AgentError::Tool(err) => err.user_message(),
            AgentError::Catalog(source) => {
                format!("Could not read the tool list from the server: {source}")
            }
        }
    }
}

/// A fenced tool-call block that could not be turned into a [`ToolCall`](crate::types::ToolCall).
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("tool call block #{index} is not a valid tool call: {source}")]
    InvalidPayload {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

impl ExtractError {
    pub fn user_message(&self) -> String {
        match self {
            ExtractError::InvalidPayload { index, source } => format!(
                "The model proposed a tool call (block #{index}) that could not be read: {source}"
            ),
        }
    }
}

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("failed to execute tool '{tool}': {source}")]
    Invocation {
        tool: String,
        #[source]
        source: ToolInvokeError,
    },
    #[error("tool '{tool}' returned no text content")]
    MissingText { tool: String },
}

impl ToolError {
    pub fn user_message(&self) -> String {
        match self {
            ToolError::Invocation { tool, source } => {
                format!("Tool \"{tool}\" failed: {source}")
            }
            ToolError::MissingText { tool } => {
                format!("Tool \"{tool}\" answered without any text.")
            }
        }
    }
}
