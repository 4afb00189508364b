use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};

use super::error::ToolInvokeError;
use crate::types::ToolDescriptor;

/// Result of a `tools/call` request.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallToolResult {
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub is_error: bool,
}

/// One item of a tool result. Only text blocks carry `text`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub text: Option<String>,
}

impl CallToolResult {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock {
                kind: "text".to_string(),
                text: Some(text.into()),
            }],
            is_error: false,
        }
    }

    /// Text of the first content item, if that item has any.
    pub fn first_text(&self) -> Option<&str> {
        self.content.first().and_then(|block| block.text.as_deref())
    }
}

/// A live connection to a tool-hosting server.
#[async_trait]
pub trait ToolSession: Send + Sync {
    async fn list_tools(&self) -> Result<Vec<ToolDescriptor>, ToolInvokeError>;

    async fn call_tool(
        &self,
        name: &str,
        arguments: Map<String, Value>,
    ) -> Result<CallToolResult, ToolInvokeError>;

    /// Returns `true` once after the server announced a catalogue change.
    fn take_catalog_changed(&self) -> bool {
        false
    }
}
