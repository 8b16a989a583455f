use crate::config::types::Config;
use crate::url::ResourceId;
use crate::ConfigError;

/// Validates a parsed configuration
///
/// Checks that concurrency and budget values are usable and that every
/// configured seed parses into a valid resource identifier.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.crawler.max_concurrent_fetches == 0 {
        return Err(ConfigError::Validation(
            "max-concurrent-fetches must be at least 1".to_string(),
        ));
    }

    if config.crawler.max_pages == Some(0) {
        return Err(ConfigError::Validation(
            "max-pages must be at least 1 when set".to_string(),
        ));
    }

    if config.fetch.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent must not be empty".to_string(),
        ));
    }

    for seed in &config.seeds {
        ResourceId::parse(seed).map_err(|e| ConfigError::InvalidSeed(format!("{}: {}", seed, e)))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let mut config = Config::default();
        config.crawler.max_concurrent_fetches = 0;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_zero_page_budget_rejected() {
        let mut config = Config::default();
        config.crawler.max_pages = Some(0);
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_empty_user_agent_rejected() {
        let mut config = Config::default();
        config.fetch.user_agent = "  ".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_invalid_seed_rejected() {
        let mut config = Config::default();
        config.seeds = vec!["not a url".to_string()];
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidSeed(_))
        ));
    }

    #[test]
    fn test_valid_seed_accepted() {
        let mut config = Config::default();
        config.seeds = vec!["https://example.com/".to_string()];
        assert!(validate(&config).is_ok());
    }
}
