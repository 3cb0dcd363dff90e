//! HTTP fetcher implementation
//!
//! This module handles every HTTP request the harvester makes:
//! - Building the HTTP client with a browser-like user agent
//! - One GET per logical page, parsed into a [`Document`]
//! - Exponential backoff for transient failures
//! - Error classification into [`FetchError`]

use crate::config::FetchConfig;
use crate::crawler::document::Document;
use crate::FetchError;
use reqwest::{redirect::Policy, Client, StatusCode};
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

/// Source of page markup
///
/// Extractors and the paginator only ever see this trait, so tests can swap in
/// a fixture-backed implementation.
#[allow(async_fn_in_trait)]
pub trait Fetcher {
    /// Fetches the raw body of one page
    async fn fetch_html(&self, url: &str) -> Result<String, FetchError>;

    /// Fetches one page and parses it
    async fn fetch(&self, url: &str) -> Result<Document, FetchError> {
        let body = self.fetch_html(url).await?;
        Ok(Document::parse(&body))
    }
}

/// Backoff schedule for transient failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Delay before the first retry
    pub base_delay: Duration,
    /// Cap on any single delay
    pub max_delay: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &FetchConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            base_delay: Duration::from_millis(config.backoff_base),
            max_delay: Duration::from_millis(config.backoff_max),
        }
    }

    /// Delay before retry number `retry` (1-based): base * 2^(retry - 1), capped
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = 2u32.saturating_pow(retry.saturating_sub(1));
        self.base_delay
            .checked_mul(factor)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&FetchConfig::default())
    }
}

/// Builds an HTTP client with the configured user agent and timeout
///
/// Redirects are followed (answer permalinks redirect to their question page).
///
/// # Example
///
/// ```no_run
/// use overflow_harvest::config::FetchConfig;
/// use overflow_harvest::crawler::build_http_client;
///
/// let client = build_http_client(&FetchConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetchConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_millis(config.timeout))
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Outcome of a single attempt
enum Attempt {
    Done(Result<String, FetchError>),
    Retry(String),
}

/// reqwest-backed [`Fetcher`] with retry logic
///
/// # Retry Logic
///
/// | Condition | Action |
/// |-----------|--------|
/// | HTTP 404 | Immediate → `NotFound` |
/// | Other 4xx | Immediate → `Status` |
/// | HTTP 5xx | Retry with backoff |
/// | Timeout / connection error | Retry with backoff |
/// | Invalid URL / redirect loop | Immediate → `Request` |
///
/// Every retry increments a counter readable through [`HttpFetcher::retry_count`].
pub struct HttpFetcher {
    client: Client,
    policy: RetryPolicy,
    retries: AtomicU32,
}

impl HttpFetcher {
    pub fn new(client: Client, policy: RetryPolicy) -> Self {
        Self {
            client,
            policy,
            retries: AtomicU32::new(0),
        }
    }

    /// Builds the client and retry policy from configuration
    pub fn from_config(config: &FetchConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::new(
            build_http_client(config)?,
            RetryPolicy::from_config(config),
        ))
    }

    /// Total retries performed by this fetcher so far
    pub fn retry_count(&self) -> u32 {
        self.retries.load(Ordering::Relaxed)
    }

    async fn attempt(&self, url: &str) -> Attempt {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) if e.is_builder() || e.is_redirect() => {
                return Attempt::Done(Err(FetchError::Request {
                    url: url.to_string(),
                    message: e.to_string(),
                }));
            }
            Err(e) if e.is_timeout() => return Attempt::Retry("Request timeout".to_string()),
            Err(e) if e.is_connect() => return Attempt::Retry("Connection refused".to_string()),
            Err(e) => return Attempt::Retry(e.to_string()),
        };

        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Attempt::Done(Err(FetchError::NotFound {
                url: url.to_string(),
            }));
        }

        if status.is_server_error() {
            return Attempt::Retry(format!("HTTP {}", status.as_u16()));
        }

        if !status.is_success() {
            return Attempt::Done(Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            }));
        }

        match response.text().await {
            Ok(body) => Attempt::Done(Ok(body)),
            Err(e) => Attempt::Retry(format!("Failed to read body: {}", e)),
        }
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch_html(&self, url: &str) -> Result<String, FetchError> {
        let mut attempts = 0;

        loop {
            attempts += 1;
            tracing::debug!("GET {} (attempt {})", url, attempts);

            let message = match self.attempt(url).await {
                Attempt::Done(result) => return result,
                Attempt::Retry(message) => message,
            };

            if attempts > self.policy.max_retries {
                tracing::warn!("Giving up on {} after {} attempts: {}", url, attempts, message);
                return Err(FetchError::Transient {
                    url: url.to_string(),
                    attempts,
                    message,
                });
            }

            let delay = self.policy.delay_for(attempts);
            self.retries.fetch_add(1, Ordering::Relaxed);
            tracing::warn!(
                "Transient failure for {} ({}), retrying in {:?}",
                url,
                message,
                delay
            );
            tokio::time::sleep(delay).await;
        }
    }
}
