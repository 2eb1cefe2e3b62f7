use crate::config::types::{Config, HttpConfig, LoggingConfig, PathsConfig, UrlsConfig};
use crate::ConfigError;
use url::Url;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_urls_config(&config.urls)?;
    validate_paths_config(&config.paths)?;
    validate_logging_config(&config.logging)?;
    validate_http_config(&config.http)?;
    Ok(())
}

/// Validates site roots
fn validate_urls_config(config: &UrlsConfig) -> Result<(), ConfigError> {
    validate_root_url("main-doc-url", &config.main_doc_url)?;
    validate_root_url("pep-index-url", &config.pep_index_url)?;
    Ok(())
}

/// Site roots are joined with relative paths, so they must be directory URLs
fn validate_root_url(key: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {}: {}", key, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} must use http or https, got '{}'",
            key,
            url.scheme()
        )));
    }

    if !url.path().ends_with('/') {
        return Err(ConfigError::InvalidUrl(format!(
            "{} must end with '/', got '{}'",
            key, value
        )));
    }

    Ok(())
}

/// Validates output locations
fn validate_paths_config(config: &PathsConfig) -> Result<(), ConfigError> {
    for (key, value) in [
        ("logs-dir", &config.logs_dir),
        ("downloads-dir", &config.downloads_dir),
        ("results-dir", &config.results_dir),
        ("cache-file", &config.cache_file),
    ] {
        if value.trim().is_empty() {
            return Err(ConfigError::Validation(format!("{} cannot be empty", key)));
        }
    }

    Ok(())
}

/// Validates log rotation settings
fn validate_logging_config(config: &LoggingConfig) -> Result<(), ConfigError> {
    if config.file_name.trim().is_empty() {
        return Err(ConfigError::Validation(
            "file-name cannot be empty".to_string(),
        ));
    }

    if config.max_bytes < 1024 {
        return Err(ConfigError::Validation(format!(
            "max-bytes must be >= 1024, got {}",
            config.max_bytes
        )));
    }

    if !LOG_LEVELS.contains(&config.level.to_ascii_lowercase().as_str()) {
        return Err(ConfigError::Validation(format!(
            "level must be one of {}, got '{}'",
            LOG_LEVELS.join(", "),
            config.level
        )));
    }

    Ok(())
}

/// Largest cache lifetime a `chrono::Duration` can hold
pub const MAX_EXPIRE_AFTER_SECS: u64 = i64::MAX as u64 / 1000;

/// Validates HTTP client settings
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "connect-timeout-secs must be >= 1, got {}",
            config.connect_timeout_secs
        )));
    }

    if let Some(secs) = config.expire_after_secs {
        if !(1..=MAX_EXPIRE_AFTER_SECS).contains(&secs) {
            return Err(ConfigError::Validation(format!(
                "expire-after-secs must be between 1 and {}, got {}",
                MAX_EXPIRE_AFTER_SECS, secs
            )));
        }
    }

    Ok(())
}
