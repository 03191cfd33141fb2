use crate::config::types::{Config, ProviderConfig, RateLimitConfig};
use crate::ConfigError;
use url::Url;

/// Largest accepted attempt count
const MAX_RETRIES_LIMIT: u32 = 10;

/// Largest accepted base retry delay (milliseconds)
const MAX_RETRY_DELAY_MS: u64 = 60_000;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_provider_config(&config.provider)?;
    config
        .analysis
        .validate()
        .map_err(|e| ConfigError::Validation(format!("analysis: {}", e)))?;
    validate_rate_limit_config(&config.rate_limit)?;
    Ok(())
}

/// Validates provider configuration
fn validate_provider_config(config: &ProviderConfig) -> Result<(), ConfigError> {
    let endpoint = Url::parse(&config.endpoint)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid endpoint: {}", e)))?;

    if !matches!(endpoint.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidUrl(format!(
            "endpoint must use http or https, got '{}'",
            endpoint.scheme()
        )));
    }

    if config.api_key_env.is_empty() {
        return Err(ConfigError::Validation(
            "api_key_env cannot be empty".to_string(),
        ));
    }

    if config.max_retries < 1 || config.max_retries > MAX_RETRIES_LIMIT {
        return Err(ConfigError::Validation(format!(
            "max_retries must be between 1 and {}, got {}",
            MAX_RETRIES_LIMIT, config.max_retries
        )));
    }

    if config.retry_delay_ms > MAX_RETRY_DELAY_MS {
        return Err(ConfigError::Validation(format!(
            "retry_delay_ms must be <= {}ms, got {}ms",
            MAX_RETRY_DELAY_MS, config.retry_delay_ms
        )));
    }

    Ok(())
}

/// Validates rate limit configuration
fn validate_rate_limit_config(config: &RateLimitConfig) -> Result<(), ConfigError> {
    if config.max_requests < 1 {
        return Err(ConfigError::Validation(format!(
            "max_requests must be >= 1, got {}",
            config.max_requests
        )));
    }

    if config.window_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "window_secs must be >= 1, got {}",
            config.window_secs
        )));
    }

    Ok(())
}
