use crate::config::types::{
    Config, CrawlerConfig, NotFoundConfig, ProviderConfig, RetryConfig, StorageConfig,
};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_provider_config(&config.provider)?;
    validate_crawler_config(&config.crawler)?;
    validate_retry_config(&config.retry)?;
    validate_not_found_config(&config.not_found)?;
    validate_storage_config(&config.storage)?;
    Ok(())
}

/// Validates the upstream provider configuration
fn validate_provider_config(config: &ProviderConfig) -> Result<(), ConfigError> {
    if let Some(base_url) = &config.base_url {
        let url = Url::parse(base_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

        if url.scheme() != "https" && url.scheme() != "http" {
            return Err(ConfigError::InvalidUrl(format!(
                "base-url '{}' must use http or https",
                base_url
            )));
        }
    }

    if config.request_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "request-timeout-secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_consecutive_errors < 1 {
        return Err(ConfigError::Validation(format!(
            "max-consecutive-errors must be >= 1, got {}",
            config.max_consecutive_errors
        )));
    }

    Ok(())
}

/// Validates retry configuration
fn validate_retry_config(config: &RetryConfig) -> Result<(), ConfigError> {
    if config.max_attempts < 1 || config.max_attempts > 20 {
        return Err(ConfigError::Validation(format!(
            "max-attempts must be between 1 and 20, got {}",
            config.max_attempts
        )));
    }

    Ok(())
}

/// Validates the not-found thresholds; they must escalate strictly
fn validate_not_found_config(config: &NotFoundConfig) -> Result<(), ConfigError> {
    if !(config.warn < config.error && config.error < config.exit) {
        return Err(ConfigError::Validation(format!(
            "not-found thresholds must satisfy warn < error < exit, got {} / {} / {}",
            config.warn, config.error, config.exit
        )));
    }

    Ok(())
}

/// Validates storage configuration
fn validate_storage_config(config: &StorageConfig) -> Result<(), ConfigError> {
    if config.database_path.is_empty() {
        return Err(ConfigError::Validation(
            "database-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
