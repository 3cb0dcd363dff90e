//! Crawler module for page fetching and traversal
//!
//! This module contains the crawl plumbing the extractors sit on:
//! - HTTP fetching with retry logic
//! - The queryable document tree
//! - Politeness pacing between page fetches
//! - Listing pagination

mod document;
mod fetcher;
pub mod fixture;
mod paginator;
mod politeness;

pub use document::{Document, Element, Query};
pub use fetcher::{build_http_client, Fetcher, HttpFetcher, RetryPolicy};
pub use fixture::{FixtureFetcher, FixtureResponse, PauseCounter};
pub use paginator::{CrawlOutcome, PageYield, Paginator, StopReason};
pub use politeness::{FixedDelay, NoDelay, Politeness};
