//! Provider factory - creates clients from config

use super::clients::{OllamaClient, OpenAIClient};
use super::traits::ModelClient;
use super::types::ModelError;
use crate::config::ModelProviderConfig;

/// Factory for creating model clients from provider config.
pub struct ProviderFactory;

impl ProviderFactory {
    /// Creates a model client based on provider type.
    ///
    /// Supported types:
    /// - `ollama`, `localai` → Ollama native format
    /// - Others → OpenAI-compatible format (default)
    pub fn create(config: &ModelProviderConfig) -> Result<Box<dyn ModelClient>, ModelError> {
        match config.provider_type.to_lowercase().as_str() {
            "ollama" | "localai" => Ok(Box::new(OllamaClient::from_config(config)?)),
            _ => Ok(Box::new(OpenAIClient::from_config(config)?)),
        }
    }
}
