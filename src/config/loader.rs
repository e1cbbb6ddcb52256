//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::{EdgeConfig, PROXY_URL_ENV, SECRET_KEY_ENV};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file, then apply environment overrides.
pub fn load_config(path: &Path) -> Result<EdgeConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: EdgeConfig = toml::from_str(&content)?;
    finalize(config)
}

/// Build a configuration from defaults plus environment overrides.
pub fn from_env() -> Result<EdgeConfig, ConfigError> {
    finalize(EdgeConfig::default())
}

fn finalize(mut config: EdgeConfig) -> Result<EdgeConfig, ConfigError> {
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Overlay the proxy URL and secret key from the environment.
///
/// A variable that is unset leaves the file value in place, which itself
/// defaults to the empty string.
pub fn apply_env_overrides<F>(config: &mut EdgeConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(proxy_url) = lookup(PROXY_URL_ENV) {
        config.frontend_api.proxy_url = proxy_url;
    }
    if let Some(secret_key) = lookup(SECRET_KEY_ENV) {
        config.frontend_api.secret_key = secret_key;
    }
}
