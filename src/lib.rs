//! Overflow-Harvest: a markup-driven Q&A site harvester
//!
//! This crate crawls the rendered HTML of a public question-and-answer site and
//! republishes collectives, questions, answers, and their owners as normalized
//! JSON records. No official data API is used; every field is reconciled from
//! markup that exposes the same fact in several inconsistent shapes.

pub mod assemble;
pub mod config;
pub mod crawler;
pub mod extract;
pub mod harvester;
pub mod model;
pub mod normalize;
pub mod site;

use thiserror::Error;

/// Main error type for Overflow-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("{resource} not found")]
    NotFound { resource: String },

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),
}

impl HarvestError {
    /// Returns true if the error means the requested resource does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::Fetch(FetchError::NotFound { .. })
        )
    }
}

/// Failure of a single logical page fetch
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP 404; never retried
    #[error("Page not found: {url}")]
    NotFound { url: String },

    /// Any other client error status; never retried
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    /// The request could not be built or its redirects could not be followed
    #[error("Request for {url} failed: {message}")]
    Request { url: String, message: String },

    /// Connection error, timeout, or 5xx that survived every retry
    #[error("Transient failure for {url} after {attempts} attempt(s): {message}")]
    Transient {
        url: String,
        attempts: u32,
        message: String,
    },
}

impl FetchError {
    /// Returns true if the failure was network-class rather than a definitive answer
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient { .. })
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Overflow-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Document, Fetcher, HttpFetcher};
pub use harvester::Harvester;
pub use model::{Answer, AnswerThread, Collective, ExternalLink, Owner, Question, UserType};
