//! The harvesting service
//!
//! [`Harvester`] is built once from configuration and exposes the five
//! operations consumers call: list collectives, list questions, get one
//! question, get the answers of a question, and get one answer. Each call owns
//! its records from fetch to return; nothing is cached between calls.

use crate::config::{Config, CrawlerConfig};
use crate::crawler::{Document, FixedDelay, Fetcher, HttpFetcher, Politeness};
use crate::extract::{
    extract_answers, extract_collectives, extract_questions, parse_question_detail,
    question_present, thread_license,
};
use crate::model::{Answer, AnswerThread, Collective, Question};
use crate::site::Site;
use crate::{FetchError, HarvestError, Result};
use chrono::Utc;

/// Most filter tags a question listing accepts
pub const MAX_FILTER_TAGS: usize = 3;

/// Trims filter tags, drops blank ones and keeps the first three
pub fn normalize_tags<S: AsRef<str>>(tags: &[S]) -> Vec<String> {
    tags.iter()
        .map(|tag| tag.as_ref().trim())
        .filter(|tag| !tag.is_empty())
        .take(MAX_FILTER_TAGS)
        .map(str::to_string)
        .collect()
}

/// Service object holding the site, crawl settings and collaborators
pub struct Harvester<F, P> {
    site: Site,
    crawler: CrawlerConfig,
    fetcher: F,
    politeness: P,
}

impl Harvester<HttpFetcher, FixedDelay> {
    /// Creates a harvester with the HTTP fetcher and fixed politeness delay
    ///
    /// # Arguments
    ///
    /// * `config` - A validated configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Harvester)` - Ready to serve requests
    /// * `Err(HarvestError)` - The base URL or the HTTP client was unusable
    pub fn from_config(config: &Config) -> Result<Self> {
        let site = Site::new(&config.site.base_url)?;
        let fetcher = HttpFetcher::from_config(&config.fetch)?;
        let politeness = FixedDelay::new(config.crawler.politeness_delay());

        Ok(Self::new(site, config.crawler.clone(), fetcher, politeness))
    }
}

impl<F: Fetcher, P: Politeness> Harvester<F, P> {
    pub fn new(site: Site, crawler: CrawlerConfig, fetcher: F, politeness: P) -> Self {
        Self {
            site,
            crawler,
            fetcher,
            politeness,
        }
    }

    pub fn site(&self) -> &Site {
        &self.site
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Every collective with its tags and external links
    pub async fn list_collectives(&self) -> Result<Vec<Collective>> {
        tracing::info!("Listing collectives");
        let url = self.site.collectives_url();
        let doc = self.fetch_primary(&url, "collectives listing").await?;

        let collectives = extract_collectives(
            &self.fetcher,
            &self.politeness,
            &self.site,
            &doc,
            &self.crawler,
        )
        .await;

        tracing::info!("Listed {} collective(s)", collectives.len());
        Ok(collectives)
    }

    /// One page of the question listing, optionally filtered by tags
    ///
    /// Up to three tags are used after trimming; a question is kept only if it
    /// carries all of them. An empty result is `Ok` and left to the caller.
    pub async fn list_questions<S: AsRef<str>>(
        &self,
        page: u32,
        page_size: u32,
        tags: &[S],
    ) -> Result<Vec<Question>> {
        let tags = normalize_tags(tags);
        let page = page.max(1);
        let page_size = page_size.max(1);
        tracing::info!(
            "Listing questions: page {}, page size {}, tags {:?}",
            page,
            page_size,
            tags
        );

        let url = self.site.questions_url(page, page_size, &tags);
        let doc = self.fetch_primary(&url, "question listing").await?;

        let extraction = extract_questions(
            &self.fetcher,
            &self.site,
            &doc,
            &tags,
            Utc::now(),
            self.crawler.resolve_owner_ids,
        )
        .await;
        extraction.log_summary("questions");

        tracing::info!("Listed {} question(s)", extraction.records.len());
        Ok(extraction.records)
    }

    /// Full record for one question from its detail page
    pub async fn get_question(&self, question_id: u64) -> Result<Question> {
        tracing::info!("Fetching question {}", question_id);
        let doc = self.question_page(question_id).await?;
        Ok(parse_question_detail(&doc, question_id, &self.site))
    }

    /// Every answer to a question plus the question's license
    pub async fn get_answers(&self, question_id: u64) -> Result<AnswerThread> {
        tracing::info!("Fetching answers for question {}", question_id);
        let doc = self.question_page(question_id).await?;

        let answers = extract_answers(
            &self.fetcher,
            &self.site,
            &doc,
            self.crawler.resolve_owner_ids,
        )
        .await;

        Ok(AnswerThread {
            question_id,
            content_license: thread_license(&doc),
            answers,
        })
    }

    /// Answers on the page an answer permalink leads to
    ///
    /// The permalink lands on the whole question page, so every answer there is
    /// returned, not only the requested one.
    pub async fn get_answer(&self, answer_id: u64) -> Result<Vec<Answer>> {
        tracing::info!("Fetching answer {}", answer_id);
        let resource = format!("answer {}", answer_id);
        let url = self.site.answer_url(answer_id);
        let doc = self.fetch_primary(&url, &resource).await?;

        let answers = extract_answers(
            &self.fetcher,
            &self.site,
            &doc,
            self.crawler.resolve_owner_ids,
        )
        .await;

        if answers.is_empty() {
            return Err(HarvestError::NotFound { resource });
        }
        Ok(answers)
    }

    async fn question_page(&self, question_id: u64) -> Result<Document> {
        let resource = format!("question {}", question_id);
        let url = self.site.question_url(question_id);
        let doc = self.fetch_primary(&url, &resource).await?;

        if !question_present(&doc) {
            tracing::warn!("No question block on {}", url);
            return Err(HarvestError::NotFound { resource });
        }
        Ok(doc)
    }

    /// Fetches the page an operation cannot do without
    ///
    /// A 404 becomes `NotFound` for `resource`; any other failure is returned
    /// as is.
    async fn fetch_primary(&self, url: &str, resource: &str) -> Result<Document> {
        match self.fetcher.fetch(url).await {
            Ok(doc) => Ok(doc),
            Err(FetchError::NotFound { .. }) => Err(HarvestError::NotFound {
                resource: resource.to_string(),
            }),
            Err(e) => {
                tracing::error!("Failed to fetch {}: {}", url, e);
                Err(e.into())
            }
        }
    }
}
