//! Renders the system, task and result prompts.

use crate::config::PromptsConfig;
use crate::config::defaults::{DEFAULT_RESULT_PROMPT, DEFAULT_SYSTEM_PROMPT, DEFAULT_TASK_PROMPT};
use crate::types::{ToolDescriptor, ToolResult};

/// Template strings with `{tools}`, `{query}` and `{results}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplates {
    pub system: String,
    pub task: String,
    pub result: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            system: DEFAULT_SYSTEM_PROMPT.to_string(),
            task: DEFAULT_TASK_PROMPT.to_string(),
            result: DEFAULT_RESULT_PROMPT.to_string(),
        }
    }
}

impl PromptTemplates {
    pub fn from_config(config: &PromptsConfig) -> Self {
        let defaults = Self::default();
        Self {
            system: config.system.clone().unwrap_or(defaults.system),
            task: config.task.clone().unwrap_or(defaults.task),
            result: config.result.clone().unwrap_or(defaults.result),
        }
    }
}

/// The two prompts that open a turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnPrompt {
    pub system: String,
    pub task: String,
}

#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    templates: PromptTemplates,
}

impl PromptBuilder {
    pub fn new(templates: PromptTemplates) -> Self {
        Self { templates }
    }

    pub fn build(&self, tools: &[ToolDescriptor], query: &str) -> TurnPrompt {
        let catalog = render_catalog(tools);
        TurnPrompt {
            system: self.templates.system.clone(),
            task: render_template(
                &self.templates.task,
                &[("tools", catalog.as_str()), ("query", query)],
            ),
        }
    }

    /// Prompt that hands tool results back to the model.
    pub fn result_prompt(&self, query: &str, results: &[ToolResult]) -> String {
        let encoded = ToolResult::encode_all(results);
        render_template(
            &self.templates.result,
            &[("results", encoded.as_str()), ("query", query)],
        )
    }
}

/// One `tool_name / description / input_schema` entry per tool, in order.
pub fn render_catalog(tools: &[ToolDescriptor]) -> String {
    let mut catalog = String::new();
    for tool in tools {
        catalog.push_str("tool_name: ");
        catalog.push_str(&tool.name);
        catalog.push_str("\ndescription: ");
        catalog.push_str(tool.description.as_deref().unwrap_or_default());
        catalog.push_str("\ninput_schema: ");
        catalog.push_str(&tool.input_schema.to_string());
        catalog.push_str("\n\n");
    }
    catalog
}

/// Replaces `{key}` placeholders in a single pass.
///
/// Unknown brace text is copied as-is and substituted values are never
/// scanned again.
pub fn render_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut rendered = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        rendered.push_str(&rest[..open]);
        let tail = &rest[open + 1..];
        let hit = values.iter().find(|(key, _)| {
            tail.strip_prefix(*key)
                .is_some_and(|after| after.starts_with('}'))
        });
        match hit {
            Some((key, value)) => {
                rendered.push_str(value);
                rest = &tail[key.len() + 1..];
            }
            None => {
                rendered.push('{');
                rest = tail;
            }
        }
    }

    rendered.push_str(rest);
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn add_tool() -> ToolDescriptor {
        ToolDescriptor::new(
            "add",
            "Add two numbers",
            json!({
                "type": "object",
                "properties": {"a": {"type": "integer"}, "b": {"type": "integer"}},
                "required": ["a", "b"]
            }),
        )
    }

    #[test]
    fn task_prompt_lists_every_tool_with_full_schema() {
        let compare =
            ToolDescriptor::new("compare", "Compare two numbers", json!({"type": "object"}));
        let tools = vec![add_tool(), compare];
        let prompt = PromptBuilder::default().build(&tools, "what is 2+2");

        for tool in &tools {
            assert!(prompt.task.contains(&format!("tool_name: {}", tool.name)));
            assert!(prompt.task.contains(&tool.input_schema.to_string()));
        }
        assert!(prompt.task.contains("what is 2+2"));
        assert!(prompt.task.find("tool_name: add") < prompt.task.find("tool_name: compare"));
    }

    #[test]
    fn empty_catalog_renders_without_error() {
        let prompt = PromptBuilder::default().build(&[], "hello");
        assert!(prompt.task.contains("hello"));
        assert!(!prompt.task.contains("{tools}"));
        assert!(!prompt.task.contains("tool_name: "));
        assert_eq!(render_catalog(&[]), "");
    }

    #[test]
    fn missing_description_renders_blank() {
        let tool = ToolDescriptor {
            name: "ping".into(),
            description: None,
            input_schema: json!({}),
        };
        assert_eq!(
            render_catalog(&[tool]),
            "tool_name: ping\ndescription: \ninput_schema: {}\n\n"
        );
    }

    #[test]
    fn example_json_in_template_survives() {
        let prompt = PromptBuilder::default().build(&[], "q");
        assert!(prompt.task.contains("\"tool_name\": \"tool_name\""));
        assert!(prompt.task.contains("```json"));
    }

    #[test]
    fn system_prompt_names_the_tool_call_envelope() {
        let prompt = PromptBuilder::default().build(&[], "q");
        assert!(prompt.system.contains("```json"));
        assert!(prompt.system.contains("tool_args"));
    }

    #[test]
    fn substituted_values_are_not_rescanned() {
        let rendered =
            render_template("{tools}|{query}", &[("tools", "{query}"), ("query", "q")]);
        assert_eq!(rendered, "{query}|q");
    }

    #[test]
    fn unknown_and_unclosed_braces_pass_through() {
        let rendered = render_template("{a} {query {query}", &[("query", "x")]);
        assert_eq!(rendered, "{a} {query x");
    }

    #[test]
    fn result_prompt_embeds_query_and_results() {
        let results = vec![ToolResult {
            tool_name: "add".into(),
            text: "4".into(),
        }];
        let prompt = PromptBuilder::default().result_prompt("what is 2+2", &results);
        assert!(prompt.contains("what is 2+2"));
        assert!(prompt.contains(r#"[{"add":"4"}]"#));
    }

    #[test]
    fn config_overrides_replace_only_given_templates() {
        let templates = PromptTemplates::from_config(&PromptsConfig {
            system: Some("custom system".into()),
            task: None,
            result: None,
        });
        assert_eq!(templates.system, "custom system");
        assert_eq!(templates.task, DEFAULT_TASK_PROMPT);
    }
}
