use super::app::{AppConfig, PromptsConfig};
use super::defaults::{DEFAULT_MAX_TOKENS, DEFAULT_MODEL};
use super::error::ConfigError;
use super::provider::{ModelProviderConfig, RawProviderConfig};
use super::server::{RawServer, ServerConfig};
use crate::constants::{CONFIG_PATH, ENV_PATH};
use dotenvy::from_filename;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::Once;
use tracing::debug;

static ENV_LOADER: Once = Once::new();

/// Raw configuration structure for deserialization from TOML
#[derive(Debug, Deserialize, Default)]
pub(super) struct RawConfig {
    pub model: Option<String>,
    pub default_provider: Option<String>,
    pub max_tokens: Option<u32>,
    #[serde(default)]
    pub lowercase_response: bool,
    #[serde(default)]
    pub refresh_tools_each_turn: bool,
    pub server: Option<RawServer>,
    #[serde(default)]
    pub prompts: PromptsConfig,
    #[serde(default)]
    pub providers: Vec<RawProviderConfig>,
}

/// Ensures environment variables are loaded from config/.env
pub fn ensure_env_loaded() {
    ENV_LOADER.call_once(|| {
        let _ = from_filename(ENV_PATH);
    });
}

/// Load and validate configuration.
///
/// An explicit `path` must exist. Without one, `config/client.toml` is read
/// when present and built-in defaults are used otherwise.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    ensure_env_loaded();
    match path {
        Some(path) => read_config(path),
        None => {
            let default_path = Path::new(CONFIG_PATH);
            if default_path.exists() {
                read_config(default_path)
            } else {
                debug!(path = CONFIG_PATH, "No configuration file, using defaults");
                Ok(AppConfig::default())
            }
        }
    }
}

fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    debug!(path = %path.display(), "Reading client configuration file");

    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ConfigError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    parse_config(&content).map_err(|err| match err {
        ParseFailure::Toml(source) => ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        },
        ParseFailure::Invalid(err) => err,
    })
}

enum ParseFailure {
    Toml(toml::de::Error),
    Invalid(ConfigError),
}

fn parse_config(content: &str) -> Result<AppConfig, ParseFailure> {
    let parsed: RawConfig = toml::from_str(content).map_err(ParseFailure::Toml)?;
    validate_and_build(parsed).map_err(ParseFailure::Invalid)
}

fn validate_and_build(parsed: RawConfig) -> Result<AppConfig, ConfigError> {
    let model = parsed.model.unwrap_or_else(|| DEFAULT_MODEL.to_string());
    let max_tokens = parsed.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS);
    if max_tokens == 0 {
        return Err(ConfigError::InvalidMaxTokens);
    }

    let mut providers: Vec<ModelProviderConfig> = Vec::new();
    for raw_provider in parsed.providers {
        if raw_provider
            .endpoint
            .as_deref()
            .is_none_or(|endpoint| endpoint.trim().is_empty())
        {
            return Err(ConfigError::MissingEndpoint {
                provider: raw_provider.id.clone(),
            });
        }
        providers.push(ModelProviderConfig::from(raw_provider));
    }
    if providers.is_empty() {
        providers.push(ModelProviderConfig::builtin());
    }

    let default_provider = match parsed.default_provider {
        Some(id) => id,
        None if providers.len() == 1 => providers[0].id.clone(),
        None => return Err(ConfigError::MissingDefaultProvider),
    };

    let Some(provider) = providers.iter_mut().find(|p| p.id == default_provider) else {
        return Err(ConfigError::ProviderNotFound {
            provider: default_provider,
        });
    };
    provider.ensure_model(&model);

    Ok(AppConfig {
        default_provider,
        model,
        max_tokens,
        lowercase_response: parsed.lowercase_response,
        refresh_tools_each_turn: parsed.refresh_tools_each_turn,
        server: parsed.server.map(ServerConfig::from),
        prompts: parsed.prompts,
        providers,
    })
}
