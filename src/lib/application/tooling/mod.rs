//! Tool session plumbing: the [`ToolSession`] seam and its MCP stdio implementation.

mod error;
mod interface;
mod process;

pub use error::ToolInvokeError;
pub use interface::{CallToolResult, ContentBlock, ToolSession};
pub use process::McpProcess;
