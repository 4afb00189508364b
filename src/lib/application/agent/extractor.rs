//! Pulls tool calls out of free-form model output.
//!
//! A call is a JSON object `{"tool_name": ..., "tool_args": {...}}` inside a
//! fenced block. The block opens with three backticks immediately followed by
//! the label `json`, matched ASCII case-insensitively, and closes at the next
//! bare three backticks. A label that continues with a letter, digit or `_`
//! (`jsonc`, `json5`) is not a tool-call block.
//!
//! Blocks are returned in textual order. An opening marker without a closing
//! fence ends the scan; whatever was collected before it is returned.

use super::errors::ExtractError;
use crate::types::ToolCall;
use tracing::{debug, warn};

const FENCE: &str = "```";
const OPENING_MARKER: &str = "```json";

pub fn extract_tool_calls(content: &str) -> Result<Vec<ToolCall>, ExtractError> {
    // ASCII folding keeps byte offsets identical, so indices found in
    // `folded` slice `content` safely.
    let folded = content.to_ascii_lowercase();
    let mut calls = Vec::new();
    let mut cursor = 0;

    while let Some(found) = folded[cursor..].find(OPENING_MARKER) {
        let payload_start = cursor + found + OPENING_MARKER.len();

        if continues_label(&folded[payload_start..]) {
            cursor = payload_start;
            continue;
        }

        let Some(close) = folded[payload_start..].find(FENCE) else {
            warn!(
                offset = payload_start,
                parsed = calls.len(),
                "unterminated tool call block, ignoring the rest of the response"
            );
            break;
        };
        let payload_end = payload_start + close;
        let payload = content[payload_start..payload_end].trim();

        let call: ToolCall =
            serde_json::from_str(payload).map_err(|source| ExtractError::InvalidPayload {
                index: calls.len() + 1,
                source,
            })?;
        debug!(tool = %call.tool_name, "extracted tool call");
        calls.push(call);

        cursor = payload_end + FENCE.len();
    }

    Ok(calls)
}

fn continues_label(rest: &str) -> bool {
    rest.chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plain_text_has_no_calls() {
        let calls = extract_tool_calls("Hello! How can I help you today?").expect("no error");
        assert!(calls.is_empty());
    }

    #[test]
    fn empty_text_has_no_calls() {
        assert!(extract_tool_calls("").expect("no error").is_empty());
    }

    #[test]
    fn parses_single_block_with_surrounding_prose() {
        let content = concat!(
            "I will use the add tool.\n",
            "```json\n{\"tool_name\": \"add\", \"tool_args\": {\"a\": 2, \"b\": 2}}\n```\n",
            "Let me know."
        );
        let calls = extract_tool_calls(content).expect("valid block");

        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].tool_name, "add");
        assert_eq!(calls[0].tool_args.get("a"), Some(&json!(2)));
        assert_eq!(calls[0].tool_args.get("b"), Some(&json!(2)));
    }

    #[test]
    fn label_match_ignores_case_but_keeps_payload_case() {
        let content =
            "```JSON\n{\"tool_name\": \"Greet\", \"tool_args\": {\"name\": \"Ada\"}}\n```";
        let calls = extract_tool_calls(content).expect("valid block");

        assert_eq!(calls[0].tool_name, "Greet");
        assert_eq!(calls[0].tool_args.get("name"), Some(&json!("Ada")));
    }

    #[test]
    fn payload_on_the_marker_line_is_accepted() {
        let content = "```json{\"tool_name\":\"now\",\"tool_args\":{}}```";
        let calls = extract_tool_calls(content).expect("valid block");
        assert_eq!(calls[0].tool_name, "now");
        assert!(calls[0].tool_args.is_empty());
    }

    #[test]
    fn other_languages_are_not_tool_calls() {
        let content = "```python\nprint('hi')\n```\n```jsonc\n{\"tool_name\": 1}\n```";
        let calls = extract_tool_calls(content).expect("nothing to parse");
        assert!(calls.is_empty());
    }

    #[test]
    fn invalid_json_fails_the_whole_extraction() {
        let content = "```json\n{\"tool_name\": \"add\", \"tool_args\": {\"a\": 1,}}\n```";
        let err = extract_tool_calls(content).expect_err("malformed payload");
        assert!(matches!(err, ExtractError::InvalidPayload { index: 1, .. }));
    }

    #[test]
    fn non_object_arguments_are_rejected() {
        let content = "```json\n{\"tool_name\": \"add\", \"tool_args\": [1, 2]}\n```";
        assert!(extract_tool_calls(content).is_err());
    }

    #[test]
    fn missing_arguments_are_rejected() {
        let content = "```json\n{\"tool_name\": \"add\"}\n```";
        assert!(extract_tool_calls(content).is_err());
    }

    #[test]
    fn extra_fields_are_ignored() {
        let content =
            "```json\n{\"tool_name\": \"add\", \"tool_args\": {}, \"reason\": \"math\"}\n```";
        let calls = extract_tool_calls(content).expect("valid block");
        assert_eq!(calls[0].tool_name, "add");
    }

    #[test]
    fn error_index_points_at_the_failing_block() {
        let content = concat!(
            "```json\n{\"tool_name\": \"add\", \"tool_args\": {}}\n```\n",
            "```json\nnot json\n```"
        );
        let err = extract_tool_calls(content).expect_err("second block is malformed");
        assert!(matches!(err, ExtractError::InvalidPayload { index: 2, .. }));
    }

    #[test]
    fn nested_fence_closes_at_the_first_backticks() {
        let content = "```json\n{\"tool_name\": \"a\", ```json\n{}\n```\n}\n```";
        assert!(extract_tool_calls(content).is_err());
    }

    #[test]
    fn non_ascii_prose_keeps_offsets_valid() {
        let content = concat!(
            "Ünïcödé → ```json\n",
            "{\"tool_name\": \"echo-é\", \"tool_args\": {\"t\": \"ß\"}}\n``` ✓"
        );
        let calls = extract_tool_calls(content).expect("valid block");
        assert_eq!(calls[0].tool_name, "echo-é");
        assert_eq!(calls[0].tool_args.get("t"), Some(&json!("ß")));
    }
}
