pub mod application;
pub mod cli;
pub mod config;
pub mod constants;
pub mod domain;
pub mod infrastructure;

pub use application::{agent, stdio, tooling};
pub use cli::Cli;
pub use config::{AppConfig, ModelProviderConfig};
pub use domain::types;
pub use infrastructure::model;

use agent::{PromptBuilder, PromptTemplates, TurnController, TurnSettings};
use config::{ConfigError, ServerConfig};
use infrastructure::model::DynamicModelProvider;
use std::error::Error;
use std::sync::Arc;
use tooling::McpProcess;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt};

pub async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    init_tracing(cli.verbose);
    info!("Starting mcp-prompt-client");
    debug!(
        config = ?cli.config,
        provider = ?cli.provider,
        model = ?cli.model,
        "CLI arguments parsed"
    );

    let mut config = AppConfig::load(cli.config.as_deref())?;
    apply_cli_overrides(&cli, &mut config)?;
    info!(
        provider = config.default_provider.as_str(),
        model = config.model.as_str(),
        "Configuration ready"
    );

    let server = config.require_server()?.clone();
    let provider = DynamicModelProvider::from_configs(&config.providers)?;

    let process = McpProcess::connect(server).await?;
    info!(server = process.name(), "Connected to tool server");
    if let Some(instructions) = process.instructions().await {
        debug!(server = process.name(), %instructions, "Server sent instructions");
    }

    let prompts = PromptBuilder::new(PromptTemplates::from_config(&config.prompts));
    let settings = TurnSettings::from_config(&config);
    let session = Arc::new(process.clone());
    let result: Result<(), Box<dyn Error>> =
        match TurnController::connect(provider, session, prompts, settings).await {
            Ok(mut controller) => stdio::run(&mut controller).await.map_err(Into::into),
            Err(err) => Err(err.into()),
        };

    process.shutdown().await;
    info!("Client execution finished");
    result
}

fn init_tracing(verbose: bool) {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let fallback = if verbose { "info" } else { "warn" };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_level(true)
            .init();
    });
}

/// Folds command-line flags into the loaded configuration.
pub fn apply_cli_overrides(cli: &Cli, config: &mut AppConfig) -> Result<(), ConfigError> {
    if let Some(provider) = &cli.provider {
        if config.provider(provider).is_none() {
            return Err(ConfigError::ProviderNotFound {
                provider: provider.clone(),
            });
        }
        config.default_provider = provider.clone();
    }
    if let Some(model) = &cli.model {
        config.model = model.clone();
    }
    if let Some(max_tokens) = cli.max_tokens {
        if max_tokens == 0 {
            return Err(ConfigError::InvalidMaxTokens);
        }
        config.max_tokens = max_tokens;
    }
    if let Some(script) = &cli.server_script {
        info!(script = %script.display(), "Using tool server script from CLI");
        config.server = Some(ServerConfig::from_script(script)?);
    }
    config.lowercase_response |= cli.lowercase;
    config.refresh_tools_each_turn |= cli.refresh_tools;

    let model = config.model.clone();
    let default_provider = config.default_provider.clone();
    if let Some(provider) = config
        .providers
        .iter_mut()
        .find(|provider| provider.id == default_provider)
    {
        provider.ensure_model(&model);
    }
    Ok(())
}
