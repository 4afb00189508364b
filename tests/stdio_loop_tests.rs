// Chat loop tests - run_loop over in-memory input and output

use async_trait::async_trait;
use mcp_prompt_client::agent::{PromptBuilder, TurnController, TurnSettings};
use mcp_prompt_client::model::{ModelError, ModelProvider, ModelRequest, ModelResponse};
use mcp_prompt_client::stdio::run_loop;
use mcp_prompt_client::tooling::{CallToolResult, ToolInvokeError, ToolSession};
use mcp_prompt_client::types::ToolDescriptor;
use serde_json::{Map, Value, json};
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::io::BufReader;
use tokio::sync::Mutex;

struct ScriptedProvider {
    replies: Mutex<VecDeque<String>>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedProvider {
    fn new(replies: &[&str], calls: Arc<AtomicUsize>) -> Self {
        Self {
            replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
            calls,
        }
    }
}

#[async_trait]
impl ModelProvider for ScriptedProvider {
    async fn chat(&self, _request: ModelRequest) -> Result<ModelResponse, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.replies
            .lock()
            .await
            .pop_front()
            .map(ModelResponse::new)
            .ok_or_else(|| ModelError::invalid_response("scripted", "no reply left"))
    }
}

struct EchoSession;

#[async_trait]
impl ToolSession for EchoSession {
    async fn list_tools(&self) -> Result<Vec<ToolDescriptor>, ToolInvokeError> {
        Ok(vec![ToolDescriptor::new(
            "echo",
            "Echo the text argument",
            json!({"type": "object", "properties": {"text": {"type": "string"}}}),
        )])
    }

    async fn call_tool(
        &self,
        name: &str,
        arguments: Map<String, Value>,
    ) -> Result<CallToolResult, ToolInvokeError> {
        match arguments.get("text").and_then(Value::as_str) {
            Some(text) if name == "echo" => Ok(CallToolResult::text(text)),
            _ => Err(ToolInvokeError::Rpc {
                server: "echo".into(),
                code: -32602,
                message: format!("Unknown tool: {name}"),
            }),
        }
    }
}

async fn run_session(input: &str, replies: &[&str]) -> (String, usize) {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut controller = TurnController::connect(
        ScriptedProvider::new(replies, calls.clone()),
        Arc::new(EchoSession),
        PromptBuilder::default(),
        TurnSettings::new("scripted", "test-model", 128),
    )
    .await
    .expect("controller connects");

    let mut output = Vec::new();
    run_loop(&mut controller, BufReader::new(input.as_bytes()), &mut output)
        .await
        .expect("loop finishes");
    (String::from_utf8(output).expect("utf-8 output"), calls.load(Ordering::SeqCst))
}

#[tokio::test]
async fn banner_lists_tools_and_quit_stops_loop() {
    let (output, calls) = run_session("QUIT\nhello\n", &["never used"]).await;

    assert!(output.contains("echo"));
    assert!(output.contains("Model: test-model (scripted)"));
    assert!(output.contains("Query: "));
    assert_eq!(calls, 0);
}

#[tokio::test]
async fn blank_lines_are_skipped_and_answers_printed() {
    let (output, calls) = run_session("\n   \nhello\nquit\n", &["Hi there"]).await;

    assert!(output.contains("Hi there"));
    assert_eq!(calls, 1);
}

#[tokio::test]
async fn failed_turn_is_reported_and_loop_continues() {
    let bad_call = "```json\n{\"tool_name\": \"shout\", \"tool_args\": {}}\n```";
    let (output, calls) =
        run_session("shout\nhello\nquit\n", &[bad_call, "still here"]).await;

    assert!(output.contains("Error: "));
    assert!(output.contains("shout"));
    assert!(output.contains("still here"));
    assert_eq!(calls, 2);
}

#[tokio::test]
async fn tool_turn_prints_second_completion() {
    let proposal = "```json\n{\"tool_name\": \"echo\", \"tool_args\": {\"text\": \"pong\"}}\n```";
    let (output, calls) =
        run_session("ping\n", &[proposal, "The server said pong"]).await;

    assert!(output.contains("The server said pong"));
    assert!(!output.contains("tool_args"));
    assert_eq!(calls, 2);
}
