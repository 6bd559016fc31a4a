use crate::config::types::{Config, FetcherConfig, ServerConfig};
use crate::{ConfigError, ConfigResult};

/// Upper bound on the total request timeout (seconds)
const MAX_TIMEOUT_SECS: u64 = 300;

/// Validates the entire configuration
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_fetcher_config(&config.fetcher)?;
    validate_server_config(&config.server)?;
    Ok(())
}

/// Validates HTTP client configuration
fn validate_fetcher_config(config: &FetcherConfig) -> ConfigResult<()> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs < 1 || config.timeout_secs > MAX_TIMEOUT_SECS {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be between 1 and {}, got {}",
            MAX_TIMEOUT_SECS, config.timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 || config.connect_timeout_secs > config.timeout_secs {
        return Err(ConfigError::Validation(format!(
            "connect_timeout_secs must be between 1 and timeout_secs ({}), got {}",
            config.timeout_secs, config.connect_timeout_secs
        )));
    }

    Ok(())
}

/// Validates server identity configuration
fn validate_server_config(config: &ServerConfig) -> ConfigResult<()> {
    // Name: non-empty, alphanumeric + hyphens only
    if config.name.is_empty() {
        return Err(ConfigError::Validation("name cannot be empty".to_string()));
    }

    if !config.name.chars().all(|c| c.is_alphanumeric() || c == '-') {
        return Err(ConfigError::Validation(format!(
            "name must contain only alphanumeric characters and hyphens, got '{}'",
            config.name
        )));
    }

    if config.version.trim().is_empty() {
        return Err(ConfigError::Validation(
            "version cannot be empty".to_string(),
        ));
    }

    Ok(())
}
