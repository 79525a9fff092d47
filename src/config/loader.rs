use std::path::Path;

use config::{Config, Environment, File, FileFormat};
use eyre::{Context, Result};

use crate::config::models::ServerConfig;

/// Prefix for environment overrides, e.g. `WAF_FIXTURE__LISTEN_ADDR`
pub const ENV_PREFIX: &str = "WAF_FIXTURE";

/// Load configuration from a file using the config crate, then apply
/// environment overrides. A missing file falls back to defaults.
/// Supports multiple formats: TOML, YAML, JSON, etc.
pub async fn load_config(config_path: &str) -> Result<ServerConfig> {
    load_config_sync(config_path)
}

/// Load configuration synchronously
pub fn load_config_sync(config_path: &str) -> Result<ServerConfig> {
    load_with_env(config_path, Environment::with_prefix(ENV_PREFIX).separator("__"))
}

fn load_with_env(config_path: &str, env: Environment) -> Result<ServerConfig> {
    let config_path = Path::new(config_path);

    // Determine file format based on extension
    let format = match config_path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => FileFormat::Yaml,
        Some("json") => FileFormat::Json,
        Some("ini") => FileFormat::Ini,
        _ => FileFormat::Toml, // Default to TOML
    };

    if !config_path.exists() {
        tracing::info!(
            "Configuration file {} not found, using defaults",
            config_path.display()
        );
    }

    let settings = Config::builder()
        .add_source(
            File::new(
                config_path
                    .to_str()
                    .ok_or_else(|| eyre::eyre!("Invalid UTF-8 path: {}", config_path.display()))?,
                format,
            )
            .required(false),
        )
        .add_source(env)
        .build()
        .with_context(|| format!("Failed to build config from {}", config_path.display()))?;

    let server_config: ServerConfig = settings.try_deserialize().with_context(|| {
        format!(
            "Failed to deserialize config from {}",
            config_path.display()
        )
    })?;

    Ok(server_config)
}
