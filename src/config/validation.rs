use crate::config::types::{Config, FetchConfig, ProbeConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

const MIN_TIMEOUT_MS: u64 = 100;
const MAX_TIMEOUT_MS: u64 = 300_000;
const MIN_BODY_BYTES: usize = 1024;
const MAX_CONCURRENT_PROBES: usize = 256;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_fetch_config(&config.fetch)?;
    validate_probe_config(&config.probe)?;
    validate_user_agent_config(&config.user_agent)?;
    Ok(())
}

/// Validates page fetch configuration
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    validate_timeout("fetch.timeout-ms", config.timeout_ms)?;
    validate_timeout("fetch.connect-timeout-ms", config.connect_timeout_ms)?;

    if config.connect_timeout_ms > config.timeout_ms {
        return Err(ConfigError::Validation(format!(
            "fetch.connect-timeout-ms ({}ms) cannot exceed fetch.timeout-ms ({}ms)",
            config.connect_timeout_ms, config.timeout_ms
        )));
    }

    if config.max_body_bytes < MIN_BODY_BYTES {
        return Err(ConfigError::Validation(format!(
            "fetch.max-body-bytes must be >= {}, got {}",
            MIN_BODY_BYTES, config.max_body_bytes
        )));
    }

    Ok(())
}

/// Validates liveness probe configuration
fn validate_probe_config(config: &ProbeConfig) -> Result<(), ConfigError> {
    if config.max_concurrent_probes < 1 || config.max_concurrent_probes > MAX_CONCURRENT_PROBES {
        return Err(ConfigError::Validation(format!(
            "probe.max-concurrent-probes must be between 1 and {}, got {}",
            MAX_CONCURRENT_PROBES, config.max_concurrent_probes
        )));
    }

    validate_timeout("probe.timeout-ms", config.timeout_ms)
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if config.crawler_version.trim().is_empty() {
        return Err(ConfigError::Validation(
            "crawler_version cannot be empty".to_string(),
        ));
    }

    if let Some(contact_url) = &config.contact_url {
        Url::parse(contact_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;
    }

    Ok(())
}

fn validate_timeout(name: &str, value_ms: u64) -> Result<(), ConfigError> {
    if !(MIN_TIMEOUT_MS..=MAX_TIMEOUT_MS).contains(&value_ms) {
        return Err(ConfigError::Validation(format!(
            "{} must be between {}ms and {}ms, got {}ms",
            name, MIN_TIMEOUT_MS, MAX_TIMEOUT_MS, value_ms
        )));
    }
    Ok(())
}
