//! # Provider Configuration
//!
//! Completion backends the client can talk to.
//!
//! | Type     | Wire format                         | API key |
//! |----------|-------------------------------------|---------|
//! | `openai` | OpenAI-compatible chat completions  | Optional bearer token |
//! | `ollama` | Ollama native `/api/chat`           | No |
//!
//! Unknown types fall back to the OpenAI-compatible format.

use super::defaults::{
    DEFAULT_API_KEY, DEFAULT_ENDPOINT, DEFAULT_PROVIDER_ID, DEFAULT_PROVIDER_TYPE,
};
use serde::Deserialize;

/// Information about an available model from a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelInfo {
    /// Model identifier used in API calls (e.g., "qwq")
    pub name: String,
    /// Human-readable display name
    pub display_name: Option<String>,
}

/// Configuration for a completion provider.
///
/// # Example
///
/// ```toml
/// [[providers]]
/// id = "ollama"
/// type = "openai"
/// endpoint = "http://localhost:11434/v1"
/// api_key = "${OLLAMA_API_KEY}"
/// timeout_secs = 300
/// models = ["qwq", { name = "llama3.1", display_name = "Llama 3.1" }]
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelProviderConfig {
    /// Unique identifier for this provider (e.g., "ollama", "openai")
    pub id: String,
    /// The provider type determines the API format: "openai" or "ollama"
    pub provider_type: String,
    /// API endpoint URL
    pub endpoint: String,
    /// API key, already expanded from `${VAR}` syntax
    pub api_key: Option<String>,
    /// Custom API path override (e.g., "/chat/completions")
    pub api_path: Option<String>,
    /// Per-request timeout; `None` waits indefinitely
    pub timeout_secs: Option<u64>,
    /// Models accepted by this provider; empty accepts any model
    pub models: Vec<ModelInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct RawProviderConfig {
    pub(super) id: String,
    #[serde(rename = "type", default)]
    pub(super) provider_type: Option<String>,
    pub(super) endpoint: Option<String>,
    pub(super) api_key: Option<String>,
    #[serde(default)]
    pub(super) api_path: Option<String>,
    #[serde(default)]
    pub(super) timeout_secs: Option<u64>,
    #[serde(default)]
    pub(super) models: Vec<RawModelInfo>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(super) enum RawModelInfo {
    Name(String),
    Detailed {
        name: String,
        #[serde(default)]
        display_name: Option<String>,
    },
}

impl From<RawModelInfo> for ModelInfo {
    fn from(value: RawModelInfo) -> Self {
        match value {
            RawModelInfo::Name(name) => Self {
                name,
                display_name: None,
            },
            RawModelInfo::Detailed { name, display_name } => Self { name, display_name },
        }
    }
}

impl From<RawProviderConfig> for ModelProviderConfig {
    fn from(raw: RawProviderConfig) -> Self {
        Self {
            id: raw.id,
            provider_type: raw
                .provider_type
                .filter(|kind| !kind.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_PROVIDER_TYPE.to_string()),
            endpoint: raw.endpoint.unwrap_or_default(),
            api_key: raw.api_key.as_deref().and_then(expand_api_key),
            api_path: raw.api_path,
            timeout_secs: raw.timeout_secs,
            models: raw.models.into_iter().map(ModelInfo::from).collect(),
        }
    }
}

impl ModelProviderConfig {
    /// Local Ollama through its OpenAI-compatible endpoint.
    pub fn builtin() -> Self {
        Self {
            id: DEFAULT_PROVIDER_ID.to_string(),
            provider_type: DEFAULT_PROVIDER_TYPE.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: Some(DEFAULT_API_KEY.to_string()),
            api_path: None,
            timeout_secs: None,
            models: Vec::new(),
        }
    }

    /// Ensure a model exists in this provider's model list
    pub fn ensure_model(&mut self, model: &str) {
        if !self.models.is_empty() && self.models.iter().all(|info| info.name != model) {
            self.models.push(ModelInfo {
                name: model.to_string(),
                display_name: None,
            });
        }
    }

    /// Check if this is an Ollama-native provider (case-insensitive).
    ///
    /// # Examples
    ///
    /// ```
    /// use mcp_prompt_client::config::ModelProviderConfig;
    ///
    /// let mut provider = ModelProviderConfig::builtin();
    /// assert!(!provider.is_ollama());
    /// provider.provider_type = "Ollama".to_string();
    /// assert!(provider.is_ollama());
    /// ```
    pub fn is_ollama(&self) -> bool {
        self.provider_type.eq_ignore_ascii_case("ollama")
    }
}

fn expand_api_key(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let expanded = shellexpand::env(trimmed)
        .map(|value| value.into_owned())
        .unwrap_or_else(|_| trimmed.to_string());
    if expanded.trim().is_empty() {
        None
    } else {
        Some(expanded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    fn raw(api_key: Option<&str>) -> RawProviderConfig {
        RawProviderConfig {
            id: "remote".into(),
            provider_type: None,
            endpoint: Some("https://api.example.com/v1".into()),
            api_key: api_key.map(String::from),
            api_path: None,
            timeout_secs: Some(30),
            models: vec![RawModelInfo::Name("gpt-test".into())],
        }
    }

    #[test]
    #[serial]
    fn expands_api_key_from_environment() {
        unsafe {
            env::set_var("TEST_PROVIDER_KEY", "secret-value");
        }

        let config = ModelProviderConfig::from(raw(Some("${TEST_PROVIDER_KEY}")));
        assert_eq!(config.api_key.as_deref(), Some("secret-value"));
        assert_eq!(config.provider_type, "openai");
        assert_eq!(config.timeout_secs, Some(30));

        unsafe {
            env::remove_var("TEST_PROVIDER_KEY");
        }
    }

    #[test]
    #[serial]
    fn unset_variable_leaves_key_literal() {
        unsafe {
            env::remove_var("TEST_PROVIDER_KEY_MISSING");
        }
        let config = ModelProviderConfig::from(raw(Some("${TEST_PROVIDER_KEY_MISSING}")));
        assert_eq!(
            config.api_key.as_deref(),
            Some("${TEST_PROVIDER_KEY_MISSING}")
        );
    }

    #[test]
    fn blank_key_is_dropped() {
        let config = ModelProviderConfig::from(raw(Some("   ")));
        assert!(config.api_key.is_none());
    }

    #[test]
    fn ensure_model_only_extends_restricted_lists() {
        let mut restricted = ModelProviderConfig::from(raw(None));
        restricted.ensure_model("other");
        assert_eq!(restricted.models.len(), 2);

        let mut open = ModelProviderConfig::builtin();
        open.ensure_model("qwq");
        assert!(open.models.is_empty());
    }
}
