use super::models::Config;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Fetch timeout must be positive: {field} = 0")]
    InvalidTimeout { field: String },

    #[error("Invalid {field} '{url}': must start with http:// or https://")]
    InvalidUrl { field: String, url: String },

    #[error("fetch.wait_selector must not be empty")]
    EmptyWaitSelector,

    #[error("extractor.max_items must be at least 1")]
    InvalidItemCap,
}

/// Validate the entire configuration
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    validate_fetch(config)?;
    validate_extractor(config)?;
    Ok(())
}

fn validate_fetch(config: &Config) -> Result<(), ValidationError> {
    let fetch = &config.fetch;

    for (field, value) in [
        ("connect_timeout_secs", fetch.connect_timeout_secs),
        ("sync_timeout_secs", fetch.sync_timeout_secs),
        ("background_timeout_secs", fetch.background_timeout_secs),
    ] {
        if value == 0 {
            return Err(ValidationError::InvalidTimeout {
                field: field.to_string(),
            });
        }
    }

    for (field, url) in [
        ("fetch.endpoint", &fetch.endpoint),
        ("fetch.target_url", &fetch.target_url),
    ] {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ValidationError::InvalidUrl {
                field: field.to_string(),
                url: url.clone(),
            });
        }
    }

    if fetch.wait_selector.trim().is_empty() {
        return Err(ValidationError::EmptyWaitSelector);
    }

    Ok(())
}

fn validate_extractor(config: &Config) -> Result<(), ValidationError> {
    if config.extractor.max_items == 0 {
        return Err(ValidationError::InvalidItemCap);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        let config = Config::default();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_zero_timeout() {
        let mut config = Config::default();
        config.fetch.sync_timeout_secs = 0;

        let result = validate(&config);
        assert!(matches!(
            result,
            Err(ValidationError::InvalidTimeout { .. })
        ));
    }

    #[test]
    fn test_invalid_endpoint_url() {
        let mut config = Config::default();
        config.fetch.endpoint = "ftp://app.scrapingbee.com".to_string();

        let result = validate(&config);
        assert!(matches!(result, Err(ValidationError::InvalidUrl { .. })));
    }

    #[test]
    fn test_empty_wait_selector() {
        let mut config = Config::default();
        config.fetch.wait_selector = "  ".to_string();

        let result = validate(&config);
        assert!(matches!(result, Err(ValidationError::EmptyWaitSelector)));
    }

    #[test]
    fn test_zero_item_cap() {
        let mut config = Config::default();
        config.extractor.max_items = 0;

        let result = validate(&config);
        assert!(matches!(result, Err(ValidationError::InvalidItemCap)));
    }
}
