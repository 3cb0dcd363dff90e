use crate::config::types::{Config, CrawlerConfig, FetchConfig, SiteConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_crawler_config(&config.crawler)?;
    validate_fetch_config(&config.fetch)?;
    Ok(())
}

/// Validates the source site settings
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url '{}' must use http or https",
            config.base_url
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url '{}' has no host",
            config.base_url
        )));
    }

    Ok(())
}

/// Validates crawler pacing settings
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max-pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    if config.tag_page_size < 1 || config.tag_page_size > 100 {
        return Err(ConfigError::Validation(format!(
            "tag-page-size must be between 1 and 100, got {}",
            config.tag_page_size
        )));
    }

    Ok(())
}

/// Validates HTTP settings
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.timeout < 100 {
        return Err(ConfigError::Validation(format!(
            "timeout must be >= 100ms, got {}ms",
            config.timeout
        )));
    }

    if config.max_retries > 10 {
        return Err(ConfigError::Validation(format!(
            "max-retries must be <= 10, got {}",
            config.max_retries
        )));
    }

    if config.backoff_base > config.backoff_max {
        return Err(ConfigError::Validation(format!(
            "backoff-base ({}ms) cannot exceed backoff-max ({}ms)",
            config.backoff_base, config.backoff_max
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_base_url() {
        let mut site = SiteConfig::default();
        assert!(validate_site_config(&site).is_ok());

        site.base_url = "http://127.0.0.1:8080".to_string();
        assert!(validate_site_config(&site).is_ok());

        site.base_url = "not a url".to_string();
        assert!(matches!(
            validate_site_config(&site),
            Err(ConfigError::InvalidUrl(_))
        ));

        site.base_url = "ftp://example.com".to_string();
        assert!(validate_site_config(&site).is_err());
    }

    #[test]
    fn test_validate_tag_page_size_bounds() {
        let mut crawler = CrawlerConfig::default();
        crawler.tag_page_size = 0;
        assert!(validate_crawler_config(&crawler).is_err());

        crawler.tag_page_size = 101;
        assert!(validate_crawler_config(&crawler).is_err());

        crawler.tag_page_size = 100;
        assert!(validate_crawler_config(&crawler).is_ok());
    }

    #[test]
    fn test_validate_fetch_config() {
        let mut fetch = FetchConfig::default();
        fetch.user_agent = "   ".to_string();
        assert!(validate_fetch_config(&fetch).is_err());

        let mut fetch = FetchConfig::default();
        fetch.backoff_base = 10_000;
        fetch.backoff_max = 1_000;
        assert!(validate_fetch_config(&fetch).is_err());

        let mut fetch = FetchConfig::default();
        fetch.max_retries = 11;
        assert!(validate_fetch_config(&fetch).is_err());

        let mut fetch = FetchConfig::default();
        fetch.timeout = 50;
        assert!(validate_fetch_config(&fetch).is_err());
    }
}
