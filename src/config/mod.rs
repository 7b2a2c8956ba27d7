pub mod settings;

pub use settings::{ApiSettings, Settings, TelemetrySettings};

use anyhow::{Context, Result};
use config::{Config as ConfigBuilder, Environment, File};
use std::env;
use tracing::{debug, info};

/// Environment variable pointing at an explicit configuration file
pub const CONFIG_FILE_ENV: &str = "SECUTILS_CONFIG";

/// Prefix of environment variable overrides, e.g. `SECUTILS__API__BASE_URL`
pub const ENV_PREFIX: &str = "SECUTILS";

/// Load configuration from defaults, configuration files and environment variables
pub fn load_config() -> Result<Settings> {
    // 1. Pick up a .env file if there is one
    if let Ok(path) = dotenvy::dotenv() {
        debug!("Loaded environment from {}", path.display());
    }

    let defaults = Settings::default();
    let mut builder = ConfigBuilder::builder()
        .set_default("api.base_url", defaults.api.base_url)?
        .set_default("api.timeout_seconds", defaults.api.timeout_seconds)?
        .set_default("api.user_agent", defaults.api.user_agent)?
        .set_default("telemetry.log_level", defaults.telemetry.log_level)?
        .set_default("telemetry.structured_logging", defaults.telemetry.structured_logging)?;

    // 2. Explicit file, or the default and per-environment files if present
    if let Ok(config_path) = env::var(CONFIG_FILE_ENV) {
        debug!("Loading configuration from {}", config_path);
        builder = builder.add_source(File::with_name(&config_path));
    } else {
        builder = builder.add_source(File::with_name("config/default").required(false));

        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        builder = builder.add_source(File::with_name(&format!("config/{}", app_env)).required(false));
    }

    // 3. Environment variables override everything
    builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

    let settings: Settings = builder
        .build()
        .context("Failed to build configuration")?
        .try_deserialize()
        .context("Failed to parse configuration")?;

    validate_config(&settings)?;

    info!("Configuration loaded successfully");
    Ok(settings)
}

/// Validate configuration values
pub fn validate_config(settings: &Settings) -> Result<()> {
    let base_url = settings
        .api
        .base_url()
        .with_context(|| format!("Invalid API base URL: {}", settings.api.base_url))?;

    if !matches!(base_url.scheme(), "http" | "https") {
        return Err(anyhow::anyhow!(
            "API base URL must use http or https: {}",
            settings.api.base_url
        ));
    }

    if settings.api.timeout_seconds == 0 {
        return Err(anyhow::anyhow!("API timeout cannot be zero"));
    }

    Ok(())
}
