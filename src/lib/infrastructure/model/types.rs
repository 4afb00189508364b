//! Model types - Request, Response, and Error types

use crate::types::{ChatMessage, MessageRole};
use reqwest::StatusCode;
use thiserror::Error;

/// Model request for LLM chat
#[derive(Debug, Clone)]
pub struct ModelRequest {
    pub provider: String,
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
}

/// Model response from LLM
#[derive(Debug, Clone)]
pub struct ModelResponse {
    pub message: ChatMessage,
}

impl ModelResponse {
    pub fn new(content: String) -> Self {
        Self {
            message: ChatMessage::new(MessageRole::Assistant, content),
        }
    }

    pub fn into_content(self) -> String {
        self.message.content
    }
}

/// Model errors
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("provider '{provider}' is not configured")]
    ProviderNotFound { provider: String },
    #[error("model '{model}' is not available for provider '{provider}'")]
    ModelNotFound { provider: String, model: String },
    #[error("failed to build HTTP client for provider '{provider}': {source}")]
    ClientInit {
        provider: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("network error calling provider '{provider}': {source}")]
    Network {
        provider: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("provider '{provider}' returned invalid response: {reason}")]
    InvalidResponse { provider: String, reason: String },
}

impl ModelError {
    pub fn provider_not_found(provider: impl Into<String>) -> Self {
        Self::ProviderNotFound {
            provider: provider.into(),
        }
    }

    pub fn model_not_found(provider: impl Into<String>, model: impl Into<String>) -> Self {
        Self::ModelNotFound {
            provider: provider.into(),
            model: model.into(),
        }
    }

    pub fn network(provider: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            provider: provider.into(),
            source,
        }
    }

    pub fn invalid_response(provider: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            provider: provider.into(),
            reason: reason.into(),
        }
    }

    /// Short explanation suitable for the interactive prompt
    pub fn user_message(&self) -> String {
        match self {
            ModelError::ProviderNotFound { provider } => {
                format!("Model provider '{provider}' is not configured. Check config/client.toml.")
            }
            ModelError::ModelNotFound { provider, model } => {
                format!("Model '{model}' is not available from provider '{provider}'.")
            }
            ModelError::ClientInit { provider, .. } => {
                format!("Could not prepare the HTTP client for '{provider}'.")
            }
            ModelError::Network { provider, source } => {
                if source.is_connect() {
                    format!("Cannot reach model provider '{provider}'.")
                } else if source.is_timeout() {
                    format!("Request to '{provider}' timed out.")
                } else if let Some(status) = source.status() {
                    match status {
                        StatusCode::NOT_FOUND => {
                            format!("Endpoint for '{provider}' was not found.")
                        }
                        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                            format!("Provider '{provider}' rejected the credentials.")
                        }
                        StatusCode::SERVICE_UNAVAILABLE | StatusCode::BAD_GATEWAY => {
                            format!("Provider '{provider}' is currently unavailable.")
                        }
                        _ => format!("Request to '{provider}' failed: {}", status.as_u16()),
                    }
                } else {
                    format!("Network error while calling '{provider}'.")
                }
            }
            ModelError::InvalidResponse { provider, reason } => {
                format!("Response from '{provider}' was not usable: {reason}.")
            }
        }
    }
}
