use super::defaults::{DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_PROVIDER_ID};
use super::error::ConfigError;
use super::provider::ModelProviderConfig;
use super::server::ServerConfig;
use serde::Deserialize;
use std::path::Path;

/// Application configuration loaded from client.toml
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub default_provider: String,
    pub model: String,
    pub max_tokens: u32,
    /// Lower-case answers that come straight from the first completion.
    pub lowercase_response: bool,
    /// Re-read the tool catalogue before every turn instead of once at connect.
    pub refresh_tools_each_turn: bool,
    pub server: Option<ServerConfig>,
    pub prompts: PromptsConfig,
    pub providers: Vec<ModelProviderConfig>,
}

/// Optional overrides for the three prompt templates.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct PromptsConfig {
    #[serde(default)]
    pub system: Option<String>,
    #[serde(default)]
    pub task: Option<String>,
    #[serde(default)]
    pub result: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_provider: DEFAULT_PROVIDER_ID.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            lowercase_response: false,
            refresh_tools_each_turn: false,
            server: None,
            prompts: PromptsConfig::default(),
            providers: vec![ModelProviderConfig::builtin()],
        }
    }
}

impl AppConfig {
    /// Load configuration from a file path (or default path if None)
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        super::loader::load_config(path)
    }

    pub fn provider(&self, id: &str) -> Option<&ModelProviderConfig> {
        self.providers.iter().find(|provider| provider.id == id)
    }

    /// Server to connect to, failing when neither config nor CLI named one.
    pub fn require_server(&self) -> Result<&ServerConfig, ConfigError> {
        self.server.as_ref().ok_or(ConfigError::MissingServer)
    }
}
