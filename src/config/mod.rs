mod types;

pub use types::*;

use crate::{Error, Result};
use std::env;
use std::path::Path;
use tracing::debug;

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Loads configuration from `CONFIG_PATH` (or `config.yaml`) and applies
/// environment overrides on top.
pub async fn load() -> Result<Config> {
    let explicit = env::var("CONFIG_PATH").ok();
    let mut config = load_from(explicit.as_deref()).await?;
    apply_env_overrides(&mut config, |key| env::var(key).ok())?;
    Ok(config)
}

/// Reads a YAML configuration file. With no explicit path a missing
/// `config.yaml` falls back to built-in defaults.
pub async fn load_from(path: Option<&str>) -> Result<Config> {
    let config_path = path.unwrap_or(DEFAULT_CONFIG_PATH);

    if path.is_none() && !Path::new(config_path).exists() {
        debug!("No {} found, using default configuration", config_path);
        return Ok(Config::default());
    }

    debug!("Loading configuration from: {}", config_path);

    let config_str = tokio::fs::read_to_string(config_path).await?;
    parse(&config_str)
}

pub fn parse(config_str: &str) -> Result<Config> {
    // An empty document deserializes to unit, not to an empty mapping.
    if config_str.trim().is_empty() {
        return Ok(Config::default());
    }
    Ok(serde_yaml::from_str(config_str)?)
}

/// Checks a log filter the way the subscriber will parse it, so directives
/// such as `penguin_mass=debug,tower_http=info` are accepted.
pub fn validate_log_level(level: &str) -> Result<()> {
    tracing_subscriber::EnvFilter::try_new(level).map_err(|e| {
        Error::config(format!(
            "Invalid log level: '{}' ({}). Valid levels: error, warn, info, debug, trace",
            level, e
        ))
    })?;
    Ok(())
}

/// Applies `PORT`, `HOST`, `MODEL_PATH` and `MODEL_COLUMNS_PATH`.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(port) = lookup("PORT") {
        config.server.port = port
            .trim()
            .parse()
            .map_err(|_| Error::config(format!("Invalid PORT value: '{}'", port)))?;
    }
    if let Some(host) = lookup("HOST") {
        config.server.host = host;
    }
    if let Some(model_path) = lookup("MODEL_PATH") {
        config.model.model_path = model_path;
    }
    if let Some(columns_path) = lookup("MODEL_COLUMNS_PATH") {
        config.model.columns_path = columns_path;
    }
    Ok(())
}
