use super::defaults::DEFAULT_SERVER_NAME;
use super::error::ConfigError;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// How to launch the MCP server that hosts the tools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub name: String,
    pub command: PathBuf,
    pub args: Vec<String>,
    pub env: HashMap<String, String>,
    pub workdir: Option<PathBuf>,
    /// Upper bound for a single JSON-RPC request; `None` waits indefinitely.
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawServer {
    #[serde(default)]
    name: Option<String>,
    command: String,
    #[serde(default)]
    args: Vec<String>,
    #[serde(default)]
    env: HashMap<String, String>,
    workdir: Option<String>,
    #[serde(default)]
    request_timeout_secs: Option<u64>,
}

impl From<RawServer> for ServerConfig {
    fn from(raw: RawServer) -> Self {
        let expand = |s: &str| -> String {
            shellexpand::full(s)
                .map(|cow| cow.into_owned())
                .unwrap_or_else(|_| s.to_string())
        };

        let command = PathBuf::from(expand(&raw.command));
        let workdir = raw.workdir.map(|d| PathBuf::from(expand(&d)));
        let args = raw.args.into_iter().map(|arg| expand(&arg)).collect();

        Self {
            name: raw
                .name
                .unwrap_or_else(|| DEFAULT_SERVER_NAME.to_string()),
            command,
            args,
            env: raw.env,
            workdir,
            request_timeout_secs: raw.request_timeout_secs,
        }
    }
}

impl ServerConfig {
    /// Builds a launch config for a server script, picking the interpreter
    /// from the extension: `.py` runs with `python`, `.js` with `node`.
    pub fn from_script(path: &Path) -> Result<Self, ConfigError> {
        let interpreter = match path.extension().and_then(|ext| ext.to_str()) {
            Some("py") => "python",
            Some("js") => "node",
            _ => {
                return Err(ConfigError::UnsupportedScript {
                    path: path.to_path_buf(),
                });
            }
        };

        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(DEFAULT_SERVER_NAME)
            .to_string();

        Ok(Self {
            name,
            command: PathBuf::from(interpreter),
            args: vec![path.to_string_lossy().into_owned()],
            env: HashMap::new(),
            workdir: None,
            request_timeout_secs: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    #[test]
    #[serial]
    fn expands_env_vars_in_command_and_args() {
        unsafe {
            env::set_var("TEST_MCP_ROOT", "/path/to/mcp");
            env::set_var("TEST_ARG", "example-arg");
        }

        let raw = RawServer {
            name: Some("test-server".to_string()),
            command: "${TEST_MCP_ROOT}/server".to_string(),
            args: vec!["--flag", "${TEST_ARG}"]
                .into_iter()
                .map(String::from)
                .collect(),
            env: HashMap::new(),
            workdir: Some("${TEST_MCP_ROOT}/work".to_string()),
            request_timeout_secs: Some(5),
        };

        let config = ServerConfig::from(raw);

        assert_eq!(config.command, PathBuf::from("/path/to/mcp/server"));
        assert_eq!(config.args, vec!["--flag", "example-arg"]);
        assert_eq!(config.workdir, Some(PathBuf::from("/path/to/mcp/work")));
        assert_eq!(config.request_timeout_secs, Some(5));

        unsafe {
            env::remove_var("TEST_MCP_ROOT");
            env::remove_var("TEST_ARG");
        }
    }

    #[test]
    fn python_script_runs_with_python() {
        let config = ServerConfig::from_script(Path::new("servers/calculator_server.py"))
            .expect("python script accepted");
        assert_eq!(config.command, PathBuf::from("python"));
        assert_eq!(config.args, vec!["servers/calculator_server.py"]);
        assert_eq!(config.name, "calculator_server");
    }

    #[test]
    fn node_script_runs_with_node() {
        let config =
            ServerConfig::from_script(Path::new("weather.js")).expect("node script accepted");
        assert_eq!(config.command, PathBuf::from("node"));
    }

    #[test]
    fn other_extensions_are_rejected() {
        let result = ServerConfig::from_script(Path::new("server.rb"));
        assert!(matches!(result, Err(ConfigError::UnsupportedScript { .. })));

        let result = ServerConfig::from_script(Path::new("server"));
        assert!(matches!(result, Err(ConfigError::UnsupportedScript { .. })));
    }
}
