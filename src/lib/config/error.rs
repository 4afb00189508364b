use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found at {path:?}")]
    NotFound { path: PathBuf },

    #[error("failed to read config from {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config from {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("several providers are configured but 'default_provider' is not set")]
    MissingDefaultProvider,

    #[error("default provider '{provider}' not found in configured providers")]
    ProviderNotFound { provider: String },

    #[error("provider '{provider}' is missing required field 'endpoint'")]
    MissingEndpoint { provider: String },

    #[error("'max_tokens' must be greater than zero")]
    InvalidMaxTokens,

    #[error("server script must be a .py or .js file, got {path:?}")]
    UnsupportedScript { path: PathBuf },

    #[error("no MCP server configured; add a [server] table or pass --server-script")]
    MissingServer,
}
