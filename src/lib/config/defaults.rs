//! Built-in defaults used when `config/client.toml` is absent or silent.

pub const DEFAULT_PROVIDER_ID: &str = "ollama";
pub const DEFAULT_PROVIDER_TYPE: &str = "openai";
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434/v1";
pub const DEFAULT_API_KEY: &str = "ollama";
pub const DEFAULT_MODEL: &str = "qwq";
pub const DEFAULT_MAX_TOKENS: u32 = 64_000;
pub const DEFAULT_SERVER_NAME: &str = "tools";

pub const DEFAULT_SYSTEM_PROMPT: &str = r#"
You are a helpful assistant. Prefer answering the user with the tools they provide.
To call a tool, reply with a fenced ```json block holding "tool_name" and "tool_args".
Answer directly when no tool fits.
When the user gives you tool results, answer directly from those results.
"#;

pub const DEFAULT_TASK_PROMPT: &str = r#"
## Available Tools:

{tools}
## Task:

{query}

## Output Format:
If you decide to answer with a tool, reply with the `tool_name` and the
`tool_args` as JSON inside a fenced block like this:
```json
{
    "tool_name": "tool_name",
    "tool_args": {
        "arg1": value1,
        "arg2": value2
    }
}
```
Use one block per tool call. Otherwise answer the task directly.
"#;

pub const DEFAULT_RESULT_PROMPT: &str = r#"
The tools you proposed for {query} returned `{results}`.
Check the results and answer me directly from them without calling any more tools.
"#;
