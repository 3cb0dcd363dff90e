//! Question listing pages
//!
//! A listing summary under-specifies a question: dates are relative phrases
//! and the accepted answer is only a marker. [`extract_questions`] fills the
//! gaps with one timeline fetch per row and, for rows showing the accepted
//! marker, one detail-page fetch.

use crate::assemble::assemble_question;
use crate::crawler::{Document, Element, Fetcher, Query};
use crate::extract::{accepted_answer_id, listing_owner, parse_timeline, resolve_owner_ids};
use crate::extract::{Extraction, Misses};
use crate::model::Question;
use crate::normalize::{canonical_license, parse_count, parse_date, parse_relative, parse_score};
use crate::site::{numeric_segment_after, Site};
use chrono::{DateTime, Utc};

const ACCEPTED_MARKER: &str = "div.s-post-summary--stats-item.has-answers.has-accepted-answer";

/// One listing summary before supplementary data is merged in
#[derive(Debug, Clone, PartialEq)]
pub struct ListingRow {
    pub question: Question,
    /// The summary's own (usually relative) activity date
    pub summary_date: Option<DateTime<Utc>>,
    /// The summary shows the "has accepted answer" stat marker
    pub shows_accepted: bool,
}

/// True when every filter tag appears among the row's tags, ignoring case
pub fn matches_filter(row_tags: &[String], filter: &[String]) -> bool {
    filter
        .iter()
        .all(|wanted| row_tags.iter().any(|tag| tag.eq_ignore_ascii_case(wanted)))
}

/// Extracts every post summary on a listing page
///
/// `matched` counts raw summary blocks, so rows dropped by `filter` never
/// look like an exhausted page. A summary without a title link becomes a
/// record with null id, title, link and dates.
pub fn parse_listing(
    doc: &Document,
    site: &Site,
    filter: &[String],
    now: DateTime<Utc>,
) -> Extraction<ListingRow> {
    let summaries = doc.find_all("div", &["s-post-summary"]);
    let mut misses = Misses::new();
    let mut rows = Vec::new();

    for (index, summary) in summaries.iter().enumerate() {
        let tags: Vec<String> = summary
            .select_all("a.post-tag")
            .iter()
            .map(|tag| tag.text())
            .collect();

        if !matches_filter(&tags, filter) {
            tracing::trace!("Summary {} filtered out by tags {:?}", index, tags);
            continue;
        }

        misses.at(index);
        rows.push(parse_summary(*summary, tags, site, now, &mut misses));
    }

    Extraction::new(summaries.len(), rows, misses)
}

fn parse_summary(
    summary: Element<'_>,
    tags: Vec<String>,
    site: &Site,
    now: DateTime<Utc>,
    misses: &mut Misses,
) -> ListingRow {
    let owner = listing_owner(summary, site, misses);

    let title_link = summary
        .select_one("h3.s-post-summary--content-title a")
        .filter(|a| a.attr_nonempty("href").is_some());

    let (question_id, title, link) = match title_link {
        Some(anchor) => {
            let href = anchor.attr_nonempty("href").unwrap_or_default();
            let id = misses.parsed("question_id", Some(href), |h| {
                numeric_segment_after(h, "questions")
            });
            (id, Some(anchor.text()), site.resolve(href))
        }
        None => {
            misses.absent("link");
            (None, None, None)
        }
    };

    let summary_date = if question_id.is_some() {
        summary
            .select_one("span.relativetime")
            .and_then(|span| {
                span.attr("title")
                    .and_then(parse_date)
                    .or_else(|| parse_relative(&span.text(), now))
            })
    } else {
        None
    };

    let (score, answer_count, view_count) = parse_stats(summary, misses);

    let question = Question {
        question_id,
        title,
        link,
        tags,
        owner,
        creation_date: None,
        last_edit_date: None,
        closed_date: None,
        locked_date: None,
        last_activity_date: None,
        content_license: summary_license(summary),
        score,
        answer_count,
        view_count,
        is_answered: false,
        accepted_answer_id: None,
        has_accepted_answer: false,
    };

    ListingRow {
        question,
        summary_date,
        shows_accepted: summary.select_one(ACCEPTED_MARKER).is_some(),
    }
}

/// Share sheet license name first, then the meta text
fn summary_license(summary: Element<'_>) -> String {
    let share = summary
        .select_one("a.js-share-link")
        .and_then(|a| a.attr_nonempty("data-se-share-sheet-license-name"));
    if let Some(name) = share {
        return name.to_string();
    }

    let meta = summary
        .select_one("div.s-post-summary--meta div.s-post-summary--meta-text")
        .map(|e| e.text());
    canonical_license(meta.as_deref())
}

/// Score, answer count and view count from the titled stat cells
fn parse_stats(summary: Element<'_>, misses: &mut Misses) -> (i64, u64, u64) {
    let mut score = None;
    let mut answers = None;
    let mut views = None;

    for item in summary.select_all(".s-post-summary--stats-item") {
        let Some(value) = item
            .select_one(".s-post-summary--stats-item-number")
            .map(|e| e.text())
        else {
            continue;
        };

        let label = item
            .attr_nonempty("title")
            .map(str::to_string)
            .or_else(|| {
                item.select_one(".s-post-summary--stats-item-unit")
                    .map(|e| e.text())
            })
            .unwrap_or_default()
            .to_lowercase();

        if label.contains("score") || label.contains("vote") {
            score.get_or_insert(parse_score(&value));
        } else if label.contains("answer") {
            answers.get_or_insert(parse_count(&value));
        } else if label.contains("view") {
            views.get_or_insert(parse_count(&value));
        }
    }

    (
        misses.or_default("score", score, 0),
        misses.or_default("answer_count", answers, 0),
        misses.or_default("view_count", views, 0),
    )
}

/// Extracts a listing page and enriches each kept row
///
/// Supplementary fetches run one at a time in row order. A failed timeline
/// fetch leaves the listing's fallback dates in place; a failed detail fetch
/// leaves `accepted_answer_id` null. Neither drops the row.
pub async fn extract_questions<F: Fetcher>(
    fetcher: &F,
    site: &Site,
    doc: &Document,
    filter: &[String],
    now: DateTime<Utc>,
    resolve_ids: bool,
) -> Extraction<Question> {
    let Extraction {
        matched,
        records: rows,
        misses,
    } = parse_listing(doc, site, filter, now);

    let mut questions = Vec::with_capacity(rows.len());

    for mut row in rows {
        let Some(question_id) = row.question.question_id else {
            questions.push(assemble_question(row, None, None));
            continue;
        };

        let timeline = match fetcher.fetch(&site.timeline_url(question_id)).await {
            Ok(page) => Some(parse_timeline(&page)).filter(|dates| !dates.is_empty()),
            Err(e) => {
                tracing::warn!("Timeline unavailable for question {}: {}", question_id, e);
                None
            }
        };

        let accepted = match (row.shows_accepted, row.question.link.clone()) {
            (true, Some(link)) => match fetcher.fetch(&link).await {
                Ok(page) => accepted_answer_id(&page),
                Err(e) => {
                    tracing::warn!("Detail page unavailable for question {}: {}", question_id, e);
                    None
                }
            },
            _ => None,
        };

        if resolve_ids {
            resolve_owner_ids(fetcher, &mut row.question.owner).await;
        }

        questions.push(assemble_question(row, timeline, accepted));
    }

    Extraction {
        matched,
        records: questions,
        misses,
    }
}
