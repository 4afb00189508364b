//! Calculator MCP server over stdio.
//!
//! Exposes `add`, `multiply` and `compare`. Used as a local tool server and by
//! the integration tests.

use mcp_prompt_client::constants::MCP_PROTOCOL_VERSION;
use serde_json::{Map, Value, json};
use std::error::Error;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, warn};
use tracing_subscriber::{EnvFilter, fmt};

const SERVER_NAME: &str = "Demo";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let mut lines = BufReader::new(io::stdin()).lines();
    let mut stdout = io::stdout();

    while let Some(line) = lines.next_line().await? {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let reply = match serde_json::from_str::<Value>(trimmed) {
            Ok(message) => handle_message(&message),
            Err(err) => {
                warn!(%err, "Discarding unparseable line");
                Some(error_reply(Value::Null, -32700, "Parse error"))
            }
        };
        if let Some(reply) = reply {
            let mut encoded = serde_json::to_vec(&reply)?;
            encoded.push(b'\n');
            stdout.write_all(&encoded).await?;
            stdout.flush().await?;
        }
    }

    Ok(())
}

/// Returns the reply for a request, or `None` for notifications.
fn handle_message(message: &Value) -> Option<Value> {
    let method = message.get("method").and_then(Value::as_str);
    let Some(id) = message.get("id").cloned() else {
        debug!(method, "Notification received");
        return None;
    };
    let Some(method) = method else {
        // A response to something we never sent.
        return None;
    };
    let params = message.get("params").cloned().unwrap_or(Value::Null);

    debug!(method, "Request received");
    let reply = match method {
        "initialize" => ok_reply(
            id,
            json!({
                "protocolVersion": MCP_PROTOCOL_VERSION,
                "capabilities": {"tools": {"listChanged": false}},
                "serverInfo": {"name": SERVER_NAME, "version": env!("CARGO_PKG_VERSION")}
            }),
        ),
        "ping" => ok_reply(id, json!({})),
        "tools/list" => ok_reply(id, json!({ "tools": catalog() })),
        "tools/call" => call_tool(id, &params),
        other => error_reply(id, -32601, &format!("Method not found: {other}")),
    };
    Some(reply)
}

fn catalog() -> Value {
    let integers = json!({
        "type": "object",
        "properties": {
            "a": {"title": "A", "type": "integer"},
            "b": {"title": "B", "type": "integer"}
        },
        "required": ["a", "b"]
    });
    let numbers = json!({
        "type": "object",
        "properties": {
            "a": {"title": "A", "type": "number"},
            "b": {"title": "B", "type": "number"}
        },
        "required": ["a", "b"]
    });
    json!([
        {"name": "add", "description": "Add two numbers", "inputSchema": integers},
        {"name": "multiply", "description": "Multiply two numbers", "inputSchema": integers},
        {"name": "compare", "description": "Compare two numbers", "inputSchema": numbers}
    ])
}

fn call_tool(id: Value, params: &Value) -> Value {
    let name = params.get("name").and_then(Value::as_str).unwrap_or_default();
    let empty = Map::new();
    let args = params
        .get("arguments")
        .and_then(Value::as_object)
        .unwrap_or(&empty);

    let outcome = match name {
        "add" => integer_pair(args).and_then(|(a, b)| {
            a.checked_add(b)
                .map(|sum| sum.to_string())
                .ok_or_else(|| "integer overflow".to_string())
        }),
        "multiply" => integer_pair(args).and_then(|(a, b)| {
            a.checked_mul(b)
                .map(|product| product.to_string())
                .ok_or_else(|| "integer overflow".to_string())
        }),
        "compare" => number_pair(args).map(|(a, b)| compare(a, b).to_string()),
        other => return error_reply(id, -32602, &format!("Unknown tool: {other}")),
    };

    match outcome {
        Ok(text) => ok_reply(id, tool_content(text, false)),
        Err(message) => {
            warn!(tool = name, %message, "Tool call rejected");
            ok_reply(id, tool_content(format!("Error executing tool {name}: {message}"), true))
        }
    }
}

fn compare(a: f64, b: f64) -> &'static str {
    if a == b {
        "equal"
    } else if a > b {
        "greater"
    } else {
        "less"
    }
}

fn integer_pair(args: &Map<String, Value>) -> Result<(i64, i64), String> {
    let read = |key: &str| {
        args.get(key)
            .and_then(Value::as_i64)
            .ok_or_else(|| format!("argument '{key}' must be an integer"))
    };
    Ok((read("a")?, read("b")?))
}

fn number_pair(args: &Map<String, Value>) -> Result<(f64, f64), String> {
    let read = |key: &str| {
        args.get(key)
            .and_then(Value::as_f64)
            .ok_or_else(|| format!("argument '{key}' must be a number"))
    };
    Ok((read("a")?, read("b")?))
}

fn tool_content(text: String, is_error: bool) -> Value {
    json!({
        "content": [{"type": "text", "text": text}],
        "isError": is_error
    })
}

fn ok_reply(id: Value, result: Value) -> Value {
    json!({"jsonrpc": "2.0", "id": id, "result": result})
}

fn error_reply(id: Value, code: i64, message: &str) -> Value {
    json!({"jsonrpc": "2.0", "id": id, "error": {"code": code, "message": message}})
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(name: &str, arguments: Value) -> Value {
        let request = json!({
            "jsonrpc": "2.0",
            "id": 3,
            "method": "tools/call",
            "params": {"name": name, "arguments": arguments}
        });
        handle_message(&request).expect("requests get replies")
    }

    fn text_of(name: &str, arguments: Value) -> Value {
        call(name, arguments)["result"]["content"][0]["text"].clone()
    }

    #[test]
    fn adds_and_multiplies_integers() {
        assert_eq!(text_of("add", json!({"a": 2, "b": 2})), "4");
        assert_eq!(text_of("multiply", json!({"a": 3, "b": 5})), "15");
    }

    #[test]
    fn compares_floats() {
        assert_eq!(text_of("compare", json!({"a": 1.5, "b": 1.5})), "equal");
        assert_eq!(text_of("compare", json!({"a": 2, "b": 1.5})), "greater");
        assert_eq!(text_of("compare", json!({"a": -1, "b": 0})), "less");
    }

    #[test]
    fn bad_arguments_are_flagged_as_tool_errors() {
        let reply = call("add", json!({"a": "two", "b": 2}));
        assert_eq!(reply["result"]["isError"], true);
    }

    #[test]
    fn unknown_tool_is_an_rpc_error() {
        let reply = call("divide", json!({"a": 4, "b": 2}));
        assert_eq!(reply["error"]["code"], -32602);
    }

    #[test]
    fn notifications_get_no_reply() {
        let notice = json!({"jsonrpc": "2.0", "method": "notifications/initialized"});
        assert!(handle_message(&notice).is_none());
    }

    #[test]
    fn unknown_methods_are_rejected() {
        let request = json!({"jsonrpc": "2.0", "id": 1, "method": "resources/list"});
        let reply = handle_message(&request).expect("reply");
        assert_eq!(reply["error"]["code"], -32601);
    }
}
