pub mod app;
pub mod defaults;
pub mod error;
pub mod loader;
pub mod provider;
pub mod server;

pub use app::{AppConfig, PromptsConfig};
pub use error::ConfigError;
pub use provider::{ModelInfo, ModelProviderConfig};
pub use server::ServerConfig;
