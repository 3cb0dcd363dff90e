//! In-memory collaborators backed by fixture markup
//!
//! [`FixtureFetcher`] maps exact URLs to canned responses and records every
//! request, so tests can assert both what was extracted and which pages were
//! (not) visited. [`PauseCounter`] counts politeness pauses without sleeping.

use crate::crawler::fetcher::Fetcher;
use crate::crawler::politeness::Politeness;
use crate::FetchError;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Canned response for one URL
#[derive(Debug, Clone)]
pub enum FixtureResponse {
    Page(String),
    NotFound,
    Transient,
}

/// Fixture-backed fetcher; URLs without a registered response are `NotFound`
#[derive(Debug, Default)]
pub struct FixtureFetcher {
    responses: HashMap<String, FixtureResponse>,
    requests: Mutex<Vec<String>>,
}

impl FixtureFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a page body for a URL
    pub fn with_page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.responses
            .insert(url.into(), FixtureResponse::Page(html.into()));
        self
    }

    /// Makes a URL fail with a transient network error
    pub fn with_transient(mut self, url: impl Into<String>) -> Self {
        self.responses.insert(url.into(), FixtureResponse::Transient);
        self
    }

    /// Makes a URL answer 404
    pub fn with_not_found(mut self, url: impl Into<String>) -> Self {
        self.responses.insert(url.into(), FixtureResponse::NotFound);
        self
    }

    /// Every URL requested so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    /// Whether a URL was requested at least once
    pub fn was_requested(&self, url: &str) -> bool {
        self.requests().iter().any(|r| r == url)
    }
}

impl Fetcher for FixtureFetcher {
    async fn fetch_html(&self, url: &str) -> Result<String, FetchError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_string());
        }

        match self.responses.get(url) {
            Some(FixtureResponse::Page(html)) => Ok(html.clone()),
            Some(FixtureResponse::Transient) => Err(FetchError::Transient {
                url: url.to_string(),
                attempts: 1,
                message: "simulated network failure".to_string(),
            }),
            Some(FixtureResponse::NotFound) | None => Err(FetchError::NotFound {
                url: url.to_string(),
            }),
        }
    }
}

/// Politeness double that records how often it was asked to wait
#[derive(Debug, Default)]
pub struct PauseCounter {
    pauses: AtomicUsize,
}

impl PauseCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.pauses.load(Ordering::SeqCst)
    }
}

impl Politeness for PauseCounter {
    async fn pause(&self) {
        self.pauses.fetch_add(1, Ordering::SeqCst);
    }
}
