use crate::config::types::{Config, ProviderConfig};
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Environment variable that overrides any configured API key
pub const API_KEY_ENV: &str = "RIOT_API_KEY";

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;

    let config: Config = toml::from_str(&content)?;

    validate(&config)?;

    Ok(config)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Logged at startup so a run can be tied back to the exact settings it used.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}

/// Resolves the upstream API key
///
/// Precedence: `RIOT_API_KEY` environment variable, then `api-key`, then the
/// contents of `api-key-file`.
pub fn resolve_api_key(provider: &ProviderConfig) -> Result<String, ConfigError> {
    resolve_api_key_with(provider, std::env::var(API_KEY_ENV).ok())
}

fn resolve_api_key_with(
    provider: &ProviderConfig,
    from_env: Option<String>,
) -> Result<String, ConfigError> {
    if let Some(key) = from_env.filter(|k| !k.trim().is_empty()) {
        return Ok(key.trim().to_string());
    }

    if let Some(key) = provider.api_key.as_ref().filter(|k| !k.trim().is_empty()) {
        return Ok(key.trim().to_string());
    }

    if let Some(path) = &provider.api_key_file {
        let key = std::fs::read_to_string(path)?;
        let key = key.trim();
        if !key.is_empty() {
            return Ok(key.to_string());
        }
    }

    Err(ConfigError::MissingApiKey)
}
