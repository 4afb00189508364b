//! Model traits

use super::types::{ModelError, ModelRequest, ModelResponse};
use async_trait::async_trait;

/// Sends one message sequence to a completion endpoint and returns its text.
///
/// Implementations do not retry; every failure is returned to the caller.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    async fn chat(&self, request: ModelRequest) -> Result<ModelResponse, ModelError>;
}

/// Trait for individual model clients
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Get the client ID
    fn id(&self) -> &str;

    /// Send a chat request
    async fn chat(&self, request: ModelRequest) -> Result<ModelResponse, ModelError>;
}
