use crate::config::types::{
    Config, CrawlerConfig, ExtractionConfig, OutputConfig, ScopeConfig, UserAgentConfig,
};
use crate::crawler::compile_selector;
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_scope_config(&config.scope)?;
    validate_extraction_config(&config.extraction)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    let base = parse_http_url("base-url", &config.base_url)?;
    let seed = parse_http_url("seed-url", &config.seed_url)?;

    if seed.origin() != base.origin() {
        return Err(ConfigError::Validation(format!(
            "seed-url '{}' must share the origin of base-url '{}'",
            config.seed_url, config.base_url
        )));
    }

    if config.request_timeout < 1 {
        return Err(ConfigError::Validation(format!(
            "request-timeout must be >= 1s, got {}s",
            config.request_timeout
        )));
    }

    Ok(())
}

/// Validates the namespace definition
fn validate_scope_config(config: &ScopeConfig) -> Result<(), ConfigError> {
    if !config.path_prefix.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "path-prefix must start with '/', got '{}'",
            config.path_prefix
        )));
    }

    // An empty keyword would be contained in every URL and exclude everything
    if config.excluded_keywords.iter().any(|k| k.is_empty()) {
        return Err(ConfigError::Validation(
            "excluded-keywords cannot contain empty strings".to_string(),
        ));
    }

    Ok(())
}

/// Validates that every configured selector compiles
fn validate_extraction_config(config: &ExtractionConfig) -> Result<(), ConfigError> {
    compile_selector(&config.content_selector)?;
    compile_selector(&config.fallback_selector)?;
    for element in &config.stripped_elements {
        compile_selector(element)?;
    }
    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler-name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler-name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if let Some(contact) = config.contact_url.as_deref().filter(|u| !u.is_empty()) {
        Url::parse(contact)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact-url: {}", e)))?;
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.csv_path.is_empty() {
        return Err(ConfigError::Validation(
            "csv-path cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Parses an absolute http(s) URL for the given config key
fn parse_http_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", key, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' must use http or https",
            key, value
        )));
    }

    Ok(url)
}
