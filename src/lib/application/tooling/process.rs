use super::error::ToolInvokeError;
use super::interface::{CallToolResult, ToolSession};
use crate::config::ServerConfig;
use crate::constants::MCP_PROTOCOL_VERSION;
use crate::types::ToolDescriptor;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use std::collections::HashMap;
use std::process::Stdio;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::sync::{Mutex as AsyncMutex, oneshot};
use tracing::{debug, info, warn};

type Responder = oneshot::Sender<Result<Value, ToolInvokeError>>;

/// MCP server child process spoken to over newline-delimited JSON-RPC on stdio.
#[derive(Clone)]
pub struct McpProcess {
    inner: Arc<McpProcessInner>,
}

struct McpProcessInner {
    server: ServerConfig,
    state: AsyncMutex<Option<RunningState>>,
    writer: AsyncMutex<Option<BufWriter<ChildStdin>>>,
    pending: AsyncMutex<HashMap<String, Responder>>,
    id_counter: AtomicU64,
    instructions: AsyncMutex<Option<String>>,
    catalog_changed: AtomicBool,
}

struct RunningState {
    child: Child,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListToolsPage {
    #[serde(default)]
    tools: Vec<ToolDescriptor>,
    #[serde(default)]
    next_cursor: Option<String>,
}

impl McpProcess {
    pub fn new(server: ServerConfig) -> Self {
        Self {
            inner: Arc::new(McpProcessInner {
                server,
                state: AsyncMutex::new(None),
                writer: AsyncMutex::new(None),
                pending: AsyncMutex::new(HashMap::new()),
                id_counter: AtomicU64::new(1),
                instructions: AsyncMutex::new(None),
                catalog_changed: AtomicBool::new(false),
            }),
        }
    }

    /// Spawns the server and completes the MCP handshake.
    pub async fn connect(server: ServerConfig) -> Result<Self, ToolInvokeError> {
        let process = Self::new(server);
        process.ensure_running().await?;
        info!(server = process.name(), "Connected to MCP server");
        Ok(process)
    }

    pub fn name(&self) -> &str {
        &self.inner.server.name
    }

    pub async fn ensure_running(&self) -> Result<(), ToolInvokeError> {
        self.inner.ensure_running().await
    }

    /// Instructions the server returned from `initialize`, if any.
    pub async fn instructions(&self) -> Option<String> {
        self.inner.instructions.lock().await.clone()
    }

    /// Stops the child process and fails any request still in flight.
    pub async fn shutdown(&self) {
        debug!(server = self.name(), "Shutting down MCP server");
        self.inner.reset().await;
    }
}

#[async_trait]
impl ToolSession for McpProcess {
    async fn list_tools(&self) -> Result<Vec<ToolDescriptor>, ToolInvokeError> {
        self.ensure_running().await?;
        self.inner.list_tools().await
    }

    async fn call_tool(
        &self,
        name: &str,
        arguments: Map<String, Value>,
    ) -> Result<CallToolResult, ToolInvokeError> {
        self.ensure_running().await?;
        self.inner.call_tool(name, arguments).await
    }

    fn take_catalog_changed(&self) -> bool {
        self.inner.catalog_changed.swap(false, Ordering::SeqCst)
    }
}

impl McpProcessInner {
    async fn ensure_running(self: &Arc<Self>) -> Result<(), ToolInvokeError> {
        {
            let state = self.state.lock().await;
            if state.is_some() {
                return Ok(());
            }
        }

        let mut command = Command::new(&self.server.command);
        command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);
        if let Some(dir) = &self.server.workdir {
            command.current_dir(dir);
        }
        if !self.server.args.is_empty() {
            command.args(&self.server.args);
        }
        for (key, value) in &self.server.env {
            command.env(key, value);
        }

        debug!(
            server = %self.server.name,
            command = %self.server.command.display(),
            "Spawning MCP server"
        );
        let mut child = command.spawn().map_err(|source| ToolInvokeError::Spawn {
            server: self.server.name.clone(),
            source,
        })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| self.transport_error("failed to capture server stdin"))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| self.transport_error("failed to capture server stdout"))?;

        {
            let mut writer = self.writer.lock().await;
            *writer = Some(BufWriter::new(stdin));
        }

        {
            let mut state = self.state.lock().await;
            *state = Some(RunningState { child });
        }

        let reader_self = Arc::clone(self);
        tokio::spawn(async move {
            reader_self.reader_loop(stdout).await;
        });

        match self.initialize_sequence().await {
            Ok(()) => Ok(()),
            Err(err) => {
                self.reset().await;
                Err(err)
            }
        }
    }

    async fn initialize_sequence(&self) -> Result<(), ToolInvokeError> {
        let params = json!({
            "protocolVersion": MCP_PROTOCOL_VERSION,
            "clientInfo": {
                "name": env!("CARGO_PKG_NAME"),
                "version": env!("CARGO_PKG_VERSION"),
            },
            "capabilities": {}
        });
        let init_result = self.send_request("initialize", params).await?;
        if let Some(text) = init_result.get("instructions").and_then(Value::as_str) {
            let mut instructions = self.instructions.lock().await;
            *instructions = Some(text.to_string());
        }
        self.send_notification("notifications/initialized", json!({}))
            .await
    }

    async fn list_tools(&self) -> Result<Vec<ToolDescriptor>, ToolInvokeError> {
        let mut tools = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let params = match &cursor {
                Some(cursor) => json!({ "cursor": cursor }),
                None => json!({}),
            };
            let result = self.send_request("tools/list", params).await?;
            let page: ListToolsPage =
                serde_json::from_value(result).map_err(|source| ToolInvokeError::InvalidJson {
                    server: self.server.name.clone(),
                    source,
                })?;
            tools.extend(page.tools);

            match page.next_cursor {
                Some(next) if !next.is_empty() && cursor.as_deref() != Some(next.as_str()) => {
                    cursor = Some(next);
                }
                _ => break,
            }
        }

        debug!(server = %self.server.name, count = tools.len(), "Listed tools");
        Ok(tools)
    }

    async fn call_tool(
        &self,
        tool: &str,
        arguments: Map<String, Value>,
    ) -> Result<CallToolResult, ToolInvokeError> {
        let params = json!({
            "name": tool,
            "arguments": Value::Object(arguments),
        });
        let response = self.send_request("tools/call", params).await?;
        let result: CallToolResult =
            serde_json::from_value(response).map_err(|source| ToolInvokeError::InvalidJson {
                server: self.server.name.clone(),
                source,
            })?;

        if result.is_error {
            let message = result
                .first_text()
                .unwrap_or("tool reported an error without details")
                .trim()
                .to_string();
            return Err(ToolInvokeError::ToolFailed {
                server: self.server.name.clone(),
                tool: tool.to_string(),
                message,
            });
        }
        Ok(result)
    }

    async fn reader_loop(self: Arc<Self>, stdout: ChildStdout) {
        let mut lines = BufReader::new(stdout).lines();
        while let Ok(item) = lines.next_line().await {
            let Some(raw) = item else {
                break;
            };
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                continue;
            }
            if trimmed.starts_with('\u{1b}') {
                debug!(
                    server = %self.server.name,
                    line = trimmed,
                    "skipping non-JSON ANSI log line from MCP server"
                );
                continue;
            }
            match serde_json::from_str::<Value>(trimmed) {
                Ok(value) => {
                    if let Err(err) = self.process_inbound_message(value).await {
                        warn!(
                            server = %self.server.name,
                            %err,
                            "failed to process message from MCP server"
                        );
                    }
                }
                Err(source) => {
                    warn!(
                        server = %self.server.name,
                        line = trimmed,
                        %source,
                        "received invalid JSON from MCP server"
                    );
                }
            }
        }

        debug!(server = %self.server.name, "MCP server closed its stdout");
        self.reset().await;
    }

    async fn process_inbound_message(&self, value: Value) -> Result<(), ToolInvokeError> {
        match (value.get("id").cloned(), value.get("method").is_some()) {
            (Some(id), true) => self.handle_server_request(id, &value).await,
            (Some(id), false) => {
                self.handle_response(&id, value).await;
                Ok(())
            }
            (None, true) => {
                self.handle_notification(&value);
                Ok(())
            }
            (None, false) => Ok(()),
        }
    }

    async fn handle_response(&self, id: &Value, value: Value) {
        let Some(key) = response_key(id) else {
            return;
        };

        let responder = {
            let mut pending = self.pending.lock().await;
            pending.remove(&key)
        };

        let Some(sender) = responder else {
            debug!(
                server = %self.server.name,
                response_id = key,
                "received response for unknown request"
            );
            return;
        };

        let outcome = match value.get("error") {
            Some(error) => {
                let rpc_error = match error.as_object() {
                    Some(err) => ToolInvokeError::Rpc {
                        server: self.server.name.clone(),
                        code: err.get("code").and_then(Value::as_i64).unwrap_or(-32000),
                        message: err
                            .get("message")
                            .and_then(Value::as_str)
                            .unwrap_or("unknown error")
                            .to_string(),
                    },
                    None => self.transport_error("missing error payload in response"),
                };
                Err(rpc_error)
            }
            None => Ok(value),
        };
        let _ = sender.send(outcome);
    }

    async fn handle_server_request(&self, id: Value, value: &Value) -> Result<(), ToolInvokeError> {
        let method = value
            .get("method")
            .and_then(Value::as_str)
            .unwrap_or_default();
        if method == "ping" {
            return self.send_response(id, json!({})).await;
        }

        warn!(
            server = %self.server.name,
            method,
            "server sent unsupported request"
        );
        let error = json!({
            "code": -32601,
            "message": format!("client does not implement method '{method}'"),
        });
        self.send_error(id, error).await
    }

    fn handle_notification(&self, value: &Value) {
        let Some(method) = value.get("method").and_then(Value::as_str) else {
            return;
        };
        debug!(
            server = %self.server.name,
            method,
            "received notification from server"
        );
        if method == "notifications/tools/list_changed" {
            self.catalog_changed.store(true, Ordering::SeqCst);
        }
    }

    async fn send_request(&self, method: &str, params: Value) -> Result<Value, ToolInvokeError> {
        let id = self.next_id();
        let (tx, rx) = oneshot::channel();
        {
            let mut pending = self.pending.lock().await;
            pending.insert(id.clone(), tx);
        }

        let payload = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params
        });
        if let Err(err) = self.write_message(&payload).await {
            self.pending.lock().await.remove(&id);
            return Err(err);
        }

        let outcome = match self.server.request_timeout_secs {
            Some(secs) => match tokio::time::timeout(Duration::from_secs(secs), rx).await {
                Ok(outcome) => outcome,
                Err(_) => {
                    self.pending.lock().await.remove(&id);
                    warn!(server = %self.server.name, method, secs, "MCP request timed out");
                    return Err(ToolInvokeError::Timeout {
                        server: self.server.name.clone(),
                        method: method.to_string(),
                        secs,
                    });
                }
            },
            None => rx.await,
        };

        match outcome {
            Ok(Ok(value)) => Ok(value.get("result").cloned().unwrap_or(Value::Null)),
            Ok(Err(err)) => Err(err),
            Err(_) => Err(ToolInvokeError::Cancelled {
                server: self.server.name.clone(),
            }),
        }
    }

    async fn send_notification(&self, method: &str, params: Value) -> Result<(), ToolInvokeError> {
        let payload = json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params
        });
        self.write_message(&payload).await
    }

    async fn send_response(&self, id: Value, result: Value) -> Result<(), ToolInvokeError> {
        let payload = json!({
            "jsonrpc": "2.0",
            "id": id,
            "result": result
        });
        self.write_message(&payload).await
    }

    async fn send_error(&self, id: Value, error: Value) -> Result<(), ToolInvokeError> {
        let payload = json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": error
        });
        self.write_message(&payload).await
    }

    async fn write_message(&self, message: &Value) -> Result<(), ToolInvokeError> {
        let mut encoded =
            serde_json::to_vec(message).map_err(|source| ToolInvokeError::InvalidJson {
                server: self.server.name.clone(),
                source,
            })?;
        encoded.push(b'\n');

        let mut writer = self.writer.lock().await;
        let stream = writer
            .as_mut()
            .ok_or_else(|| self.transport_error("writer not initialised"))?;
        stream
            .write_all(&encoded)
            .await
            .map_err(|source| self.transport_error(source.to_string()))?;
        stream
            .flush()
            .await
            .map_err(|source| self.transport_error(source.to_string()))
    }

    async fn reset(&self) {
        {
            let mut writer = self.writer.lock().await;
            *writer = None;
        }

        let mut state = self.state.lock().await;
        if let Some(mut running) = state.take() {
            if let Err(err) = running.child.kill().await {
                debug!(
                    server = %self.server.name,
                    %err,
                    "failed to kill MCP server process (may have already exited)"
                );
            }
        }
        drop(state);

        self.fail_all_pending().await;
        self.instructions.lock().await.take();
    }

    async fn fail_all_pending(&self) {
        let mut pending = self.pending.lock().await;
        for (_, sender) in pending.drain() {
            let _ = sender.send(Err(ToolInvokeError::Terminated {
                server: self.server.name.clone(),
            }));
        }
    }

    fn next_id(&self) -> String {
        let id = self.id_counter.fetch_add(1, Ordering::SeqCst);
        format!("req-{id}")
    }

    fn transport_error(&self, message: impl Into<String>) -> ToolInvokeError {
        ToolInvokeError::Transport {
            server: self.server.name.clone(),
            message: message.into(),
        }
    }
}

fn response_key(id: &Value) -> Option<String> {
    match id {
        Value::String(value) => Some(value.clone()),
        Value::Number(num) => Some(num.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn response_keys_accept_strings_and_numbers() {
        assert_eq!(response_key(&json!("req-7")).as_deref(), Some("req-7"));
        assert_eq!(response_key(&json!(7)).as_deref(), Some("7"));
        assert_eq!(response_key(&Value::Null), None);
    }

    #[test]
    fn list_page_reads_cursor_and_tools() {
        let page: ListToolsPage = serde_json::from_value(json!({
            "tools": [{"name": "add", "description": "Add", "inputSchema": {"type": "object"}}],
            "nextCursor": "page-2"
        }))
        .expect("page parses");

        assert_eq!(page.tools.len(), 1);
        assert_eq!(page.next_cursor.as_deref(), Some("page-2"));
    }

    #[tokio::test]
    async fn spawning_a_missing_binary_fails() {
        let config = ServerConfig {
            name: "ghost".into(),
            command: PathBuf::from("/definitely/not/a/real/mcp-server"),
            args: Vec::new(),
            env: HashMap::new(),
            workdir: None,
            request_timeout_secs: Some(1),
        };

        let err = McpProcess::connect(config)
            .await
            .err()
            .expect("spawn must fail");
        assert!(matches!(err, ToolInvokeError::Spawn { .. }));
    }
}
