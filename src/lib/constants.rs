//! Application constants
//!
//! Single source of truth for paths and protocol identifiers.

/// Default configuration file path
pub const CONFIG_PATH: &str = "config/client.toml";

/// Default environment file path
pub const ENV_PATH: &str = "config/.env";

/// MCP protocol revision announced during `initialize`
pub const MCP_PROTOCOL_VERSION: &str = "2025-06-18";

/// Default OpenAI-compatible chat completions path, relative to the endpoint
pub const DEFAULT_OPENAI_API_PATH: &str = "/chat/completions";
