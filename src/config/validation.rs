use crate::config::types::{
    BackoffConfig, Config, FilterConfig, OutputConfig, ScannerConfig, SearchConfig,
};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_search_config(&config.search)?;
    validate_backoff_config(&config.backoff)?;
    validate_scanner_config(&config.scanner)?;
    validate_filter_config(&config.filter)?;
    validate_output_config(&config.output)?;
    Ok(())
}

fn validate_search_config(config: &SearchConfig) -> Result<(), ConfigError> {
    let endpoint = Url::parse(&config.endpoint)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid search endpoint: {}", e)))?;

    if endpoint.scheme() != "http" && endpoint.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "Search endpoint '{}' must use http or https",
            config.endpoint
        )));
    }

    if config.pages_per_keyword < 1 {
        return Err(ConfigError::Validation(
            "pages_per_keyword must be >= 1".to_string(),
        ));
    }

    if config.results_per_page < 1 {
        return Err(ConfigError::Validation(
            "results_per_page must be >= 1".to_string(),
        ));
    }

    if config.redirect_prefix.is_empty() {
        return Err(ConfigError::Validation(
            "redirect_prefix cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_backoff_config(config: &BackoffConfig) -> Result<(), ConfigError> {
    if config.max_retries < 1 {
        return Err(ConfigError::Validation(format!(
            "max_retries must be >= 1, got {}",
            config.max_retries
        )));
    }

    Ok(())
}

fn validate_scanner_config(config: &ScannerConfig) -> Result<(), ConfigError> {
    if config.concurrency < 1 || config.concurrency > 100 {
        return Err(ConfigError::Validation(format!(
            "concurrency must be between 1 and 100, got {}",
            config.concurrency
        )));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "request_timeout_secs must be >= 1".to_string(),
        ));
    }

    if config.scheme != "http" && config.scheme != "https" {
        return Err(ConfigError::Validation(format!(
            "scheme must be 'http' or 'https', got '{}'",
            config.scheme
        )));
    }

    if config.platform_name.trim().is_empty() {
        return Err(ConfigError::Validation(
            "platform_name cannot be empty".to_string(),
        ));
    }

    if config.markers.is_empty() || config.markers.iter().any(|m| m.is_empty()) {
        return Err(ConfigError::Validation(
            "markers must contain at least one non-empty entry".to_string(),
        ));
    }

    Ok(())
}

fn validate_filter_config(config: &FilterConfig) -> Result<(), ConfigError> {
    // An empty substring would exclude every host
    if config.excluded.iter().any(|e| e.is_empty()) {
        return Err(ConfigError::Validation(
            "excluded entries cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.domains_path.is_empty() {
        return Err(ConfigError::Validation(
            "domains_path cannot be empty".to_string(),
        ));
    }

    if config.results_path.is_empty() {
        return Err(ConfigError::Validation(
            "results_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
