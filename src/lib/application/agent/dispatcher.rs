use super::errors::ToolError;
use crate::application::tooling::ToolSession;
use crate::types::{ToolCall, ToolResult};
use tracing::{debug, info, warn};

/// Runs `calls` one at a time, in order, and collects the first text item of
/// each result. The first failure aborts the batch and drops earlier results.
pub async fn dispatch_tool_calls(
    session: &dyn ToolSession,
    calls: &[ToolCall],
) -> Result<Vec<ToolResult>, ToolError> {
    let mut results = Vec::with_capacity(calls.len());

    for call in calls {
        debug!(tool = %call.tool_name, args = call.tool_args.len(), "Dispatching tool call");
        let outcome = session
            .call_tool(&call.tool_name, call.tool_args.clone())
            .await
            .map_err(|source| {
                warn!(tool = %call.tool_name, %source, "Tool call failed");
                ToolError::Invocation {
                    tool: call.tool_name.clone(),
                    source,
                }
            })?;

        let text = outcome
            .first_text()
            .ok_or_else(|| ToolError::MissingText {
                tool: call.tool_name.clone(),
            })?
            .to_string();
        info!(tool = %call.tool_name, "Tool executed");

        results.push(ToolResult {
            tool_name: call.tool_name.clone(),
            text,
        });
    }

    Ok(results)
}
