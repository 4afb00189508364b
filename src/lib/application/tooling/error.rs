use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolInvokeError {
    #[error("failed to spawn MCP server '{server}': {source}")]
    Spawn {
        server: String,
        #[source]
        source: std::io::Error,
    },
    #[error("MCP server '{server}' transport error: {message}")]
    Transport { server: String, message: String },
    #[error("MCP server '{server}' returned invalid JSON: {source}")]
    InvalidJson {
        server: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("MCP server '{server}' returned JSON-RPC error {code}: {message}")]
    Rpc {
        server: String,
        code: i64,
        message: String,
    },
    #[error("MCP server '{server}' reported a failure from tool '{tool}': {message}")]
    ToolFailed {
        server: String,
        tool: String,
        message: String,
    },
    #[error("MCP server '{server}' did not answer '{method}' within {secs}s")]
    Timeout {
        server: String,
        method: String,
        secs: u64,
    },
    #[error("MCP server '{server}' terminated unexpectedly")]
    Terminated { server: String },
    #[error("MCP server '{server}' request cancelled")]
    Cancelled { server: String },
}
