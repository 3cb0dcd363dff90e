//! Paginated listing crawls
//!
//! Drives an extraction function across pages 1, 2, 3, ... of a listing
//! endpoint. The crawl ends on the first page with zero raw matched elements,
//! on a fetch failure (records collected so far are kept), or at the
//! configured page ceiling.

use crate::crawler::document::Document;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::politeness::Politeness;
use crate::FetchError;

/// What one listing page produced
#[derive(Debug, Clone, PartialEq)]
pub struct PageYield<T> {
    /// Raw DOM matches before any filtering
    pub matched: usize,
    /// Records kept from this page
    pub records: Vec<T>,
}

impl<T> PageYield<T> {
    /// A page where every matched element became a record
    pub fn all(records: Vec<T>) -> Self {
        Self {
            matched: records.len(),
            records,
        }
    }
}

/// Why a crawl stopped
#[derive(Debug)]
pub enum StopReason {
    /// A page yielded zero matched elements
    Exhausted { page: u32 },
    /// The page ceiling was reached
    MaxPages,
    /// A page could not be fetched
    FetchFailed(FetchError),
}

/// Records collected by a crawl and how it ended
#[derive(Debug)]
pub struct CrawlOutcome<T> {
    pub records: Vec<T>,
    pub pages_fetched: u32,
    pub stop: StopReason,
}

impl<T> CrawlOutcome<T> {
    /// True when the crawl ended because the source ran dry
    pub fn is_complete(&self) -> bool {
        matches!(self.stop, StopReason::Exhausted { .. })
    }
}

/// Drives an extractor over successive listing pages
pub struct Paginator<'a, F, P> {
    fetcher: &'a F,
    politeness: &'a P,
    max_pages: u32,
}

impl<'a, F: Fetcher, P: Politeness> Paginator<'a, F, P> {
    pub fn new(fetcher: &'a F, politeness: &'a P, max_pages: u32) -> Self {
        Self {
            fetcher,
            politeness,
            max_pages,
        }
    }

    /// Crawls pages starting at 1
    ///
    /// `page_url` maps a page number to its URL; `extract` turns one page into
    /// records. Page N's records always precede page N+1's.
    pub async fn crawl<T, U, E>(&self, page_url: U, mut extract: E) -> CrawlOutcome<T>
    where
        U: Fn(u32) -> String,
        E: FnMut(&Document) -> PageYield<T>,
    {
        let mut records = Vec::new();
        let mut pages_fetched = 0;
        let mut page = 1;

        let stop = loop {
            let url = page_url(page);

            let yielded = match self.fetcher.fetch(&url).await {
                Ok(document) => extract(&document),
                Err(e) => {
                    tracing::warn!("Pagination stopped at page {}: {}", page, e);
                    break StopReason::FetchFailed(e);
                }
            };
            pages_fetched += 1;

            if yielded.matched == 0 {
                tracing::debug!("Page {} of {} matched nothing", page, url);
                break StopReason::Exhausted { page };
            }

            tracing::debug!(
                "Page {} matched {} element(s), kept {}",
                page,
                yielded.matched,
                yielded.records.len()
            );
            records.extend(yielded.records);

            if page >= self.max_pages {
                tracing::warn!("Reached page ceiling of {} at {}", self.max_pages, url);
                break StopReason::MaxPages;
            }

            self.politeness.pause().await;
            page += 1;
        };

        CrawlOutcome {
            records,
            pages_fetched,
            stop,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::fixture::{FixtureFetcher, PauseCounter};
    use crate::crawler::politeness::NoDelay;
    use crate::crawler::Query;

    fn page_url(page: u32) -> String {
        format!("https://x.test/tags?page={}", page)
    }

    fn items(names: &[&str]) -> String {
        let items: String = names
            .iter()
            .map(|n| format!(r#"<a class="s-tag post-tag">{}</a>"#, n))
            .collect();
        format!("<html><body>{}</body></html>", items)
    }

    fn extract_tags(doc: &Document) -> PageYield<String> {
        PageYield::all(
            doc.find_all("a", &["post-tag"])
                .iter()
                .map(|e| e.text())
                .collect(),
        )
    }

    #[tokio::test]
    async fn test_stops_at_first_empty_page() {
        let fetcher = FixtureFetcher::new()
            .with_page(page_url(1), items(&["rust", "go"]))
            .with_page(page_url(2), items(&["java"]))
            .with_page(page_url(3), items(&[]))
            .with_page(page_url(4), items(&["never"]));

        let outcome = Paginator::new(&fetcher, &NoDelay, 50)
            .crawl(page_url, extract_tags)
            .await;

        assert_eq!(outcome.records, vec!["rust", "go", "java"]);
        assert_eq!(outcome.pages_fetched, 3);
        assert!(outcome.is_complete());
        assert!(!fetcher.was_requested(&page_url(4)));
    }

    #[tokio::test]
    async fn test_pauses_between_pages_only() {
        let fetcher = FixtureFetcher::new()
            .with_page(page_url(1), items(&["rust"]))
            .with_page(page_url(2), items(&["go"]))
            .with_page(page_url(3), items(&["java"]))
            .with_page(page_url(4), items(&[]));
        let politeness = PauseCounter::new();

        let outcome = Paginator::new(&fetcher, &politeness, 50)
            .crawl(page_url, extract_tags)
            .await;

        assert_eq!(outcome.pages_fetched, 4);
        // one pause after each of pages 1-3, none after the empty page
        assert_eq!(politeness.count(), 3);
    }

    #[tokio::test]
    async fn test_no_pause_after_last_page_at_ceiling() {
        let fetcher = FixtureFetcher::new()
            .with_page(page_url(1), items(&["a"]))
            .with_page(page_url(2), items(&["b"]));
        let politeness = PauseCounter::new();

        let outcome = Paginator::new(&fetcher, &politeness, 2)
            .crawl(page_url, extract_tags)
            .await;

        assert!(matches!(outcome.stop, StopReason::MaxPages));
        assert_eq!(politeness.count(), 1);
    }

    #[tokio::test]
    async fn test_filtered_page_does_not_end_pagination() {
        let fetcher = FixtureFetcher::new()
            .with_page(page_url(1), items(&["go"]))
            .with_page(page_url(2), items(&["rust"]))
            .with_page(page_url(3), items(&[]));

        let outcome = Paginator::new(&fetcher, &NoDelay, 50)
            .crawl(page_url, |doc| {
                let all = extract_tags(doc);
                PageYield {
                    matched: all.matched,
                    records: all.records.into_iter().filter(|t| t == "rust").collect(),
                }
            })
            .await;

        assert_eq!(outcome.records, vec!["rust"]);
        assert_eq!(outcome.pages_fetched, 3);
    }

    #[tokio::test]
    async fn test_fetch_failure_keeps_collected_records() {
        let fetcher = FixtureFetcher::new()
            .with_page(page_url(1), items(&["rust"]))
            .with_transient(page_url(2));

        let outcome = Paginator::new(&fetcher, &NoDelay, 50)
            .crawl(page_url, extract_tags)
            .await;

        assert_eq!(outcome.records, vec!["rust"]);
        assert!(matches!(
            outcome.stop,
            StopReason::FetchFailed(FetchError::Transient { .. })
        ));
    }

    #[tokio::test]
    async fn test_page_ceiling_bounds_the_crawl() {
        let fetcher = FixtureFetcher::new()
            .with_page(page_url(1), items(&["a"]))
            .with_page(page_url(2), items(&["b"]))
            .with_page(page_url(3), items(&["c"]));

        let outcome = Paginator::new(&fetcher, &NoDelay, 2)
            .crawl(page_url, extract_tags)
            .await;

        assert_eq!(outcome.records, vec!["a", "b"]);
        assert!(matches!(outcome.stop, StopReason::MaxPages));
        assert!(!fetcher.was_requested(&page_url(3)));
    }

    #[tokio::test]
    async fn test_unreachable_first_page() {
        let fetcher = FixtureFetcher::new();

        let outcome = Paginator::new(&fetcher, &NoDelay, 50)
            .crawl(page_url, extract_tags)
            .await;

        assert!(outcome.records.is_empty());
        assert_eq!(outcome.pages_fetched, 0);
        assert!(!outcome.is_complete());
    }
}
