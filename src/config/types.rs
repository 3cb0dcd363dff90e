use serde::Deserialize;
use std::time::Duration;

/// Browser-like identification sent with every request to reduce block risk
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Main configuration structure for Overflow-Harvest
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
}

/// Source site configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Scheme and host of the site, e.g. `https://stackoverflow.com`
    #[serde(rename = "base-url", default = "default_base_url")]
    pub base_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Crawl pacing and depth configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Pause between paginated page fetches (milliseconds)
    #[serde(rename = "politeness-delay", default = "default_politeness_delay")]
    pub politeness_delay: u64,

    /// Upper bound on pages visited by one paginated crawl
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: u32,

    /// Page size requested from the collective tag listing
    #[serde(rename = "tag-page-size", default = "default_tag_page_size")]
    pub tag_page_size: u32,

    /// Visit answer owners' profile pages to recover numeric ids
    #[serde(rename = "resolve-owner-ids", default = "default_true")]
    pub resolve_owner_ids: bool,
}

impl CrawlerConfig {
    pub fn politeness_delay(&self) -> Duration {
        Duration::from_millis(self.politeness_delay)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            politeness_delay: default_politeness_delay(),
            max_pages: default_max_pages(),
            tag_page_size: default_tag_page_size(),
            resolve_owner_ids: true,
        }
    }
}

/// HTTP behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// User-Agent header attached to every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout (milliseconds)
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Retries after the first attempt for transient failures
    #[serde(rename = "max-retries", default = "default_max_retries")]
    pub max_retries: u32,

    /// Delay before the first retry; doubled for every further retry (milliseconds)
    #[serde(rename = "backoff-base", default = "default_backoff_base")]
    pub backoff_base: u64,

    /// Cap on a single backoff delay (milliseconds)
    #[serde(rename = "backoff-max", default = "default_backoff_max")]
    pub backoff_max: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout: default_timeout(),
            max_retries: default_max_retries(),
            backoff_base: default_backoff_base(),
            backoff_max: default_backoff_max(),
        }
    }
}

fn default_base_url() -> String {
    "https://stackoverflow.com".to_string()
}

fn default_politeness_delay() -> u64 {
    1000
}

fn default_max_pages() -> u32 {
    50
}

fn default_tag_page_size() -> u32 {
    30
}

fn default_true() -> bool {
    true
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_timeout() -> u64 {
    30_000
}

fn default_max_retries() -> u32 {
    3
}

fn default_backoff_base() -> u64 {
    500
}

fn default_backoff_max() -> u64 {
    8_000
}
