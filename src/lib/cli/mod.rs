use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Default)]
#[command(
    name = "mcp-prompt-client",
    version,
    about = "MCP client that lets the model pick tools through fenced JSON blocks"
)]
pub struct Cli {
    /// Configuration file (defaults to config/client.toml)
    #[arg(long, short)]
    pub config: Option<PathBuf>,
    /// Provider id to send completions to
    #[arg(long)]
    pub provider: Option<String>,
    /// Model name to request
    #[arg(long)]
    pub model: Option<String>,
    /// Upper bound on generated tokens per completion
    #[arg(long)]
    pub max_tokens: Option<u32>,
    /// Tool server script (.py runs with python, .js with node)
    #[arg(long)]
    pub server_script: Option<PathBuf>,
    /// Lower-case answers given without tool calls
    #[arg(long)]
    pub lowercase: bool,
    /// Re-read the tool catalogue before every query
    #[arg(long)]
    pub refresh_tools: bool,
    /// Log at info level instead of warn
    #[arg(long, short)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_overrides() {
        let cli = Cli::try_parse_from([
            "mcp-prompt-client",
            "--model",
            "llama3",
            "--max-tokens",
            "2048",
            "--server-script",
            "calc.py",
            "--lowercase",
        ])
        .expect("arguments parse");

        assert_eq!(cli.model.as_deref(), Some("llama3"));
        assert_eq!(cli.max_tokens, Some(2048));
        assert_eq!(cli.server_script, Some(PathBuf::from("calc.py")));
        assert!(cli.lowercase);
        assert!(!cli.refresh_tools);
    }

    #[test]
    fn rejects_non_numeric_max_tokens() {
        assert!(Cli::try_parse_from(["mcp-prompt-client", "--max-tokens", "lots"]).is_err());
    }
}
