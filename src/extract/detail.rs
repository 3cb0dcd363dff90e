//! Question detail pages: the full record in one pass

use super::cascade::{answer_id_attr, first_match, ACCEPTED_ANSWER_SELECTORS};
use crate::assemble::is_answered;
use crate::crawler::{Document, Query};
use crate::extract::{detail_owner, Misses};
use crate::model::Question;
use crate::normalize::{canonical_license, first_number, parse_count, parse_date, parse_score};
use crate::site::Site;

const TITLE_SELECTORS: &[&str] = &[
    "#question-header h1 a",
    "h1.fs-headline1 a",
    "h1.fs-headline1",
    "h1[itemprop='name']",
];

const LICENSE_SELECTORS: &[&str] = &["a[rel='license']", "a.js-license-link"];

/// Builds a question record from its detail page
///
/// Fields are read from the `#question` block when present, else the whole
/// page. Last edit, closed and locked dates are not shown on the page and
/// stay null.
pub fn parse_question_detail(doc: &Document, question_id: u64, site: &Site) -> Question {
    let scope = doc.select_one("#question").unwrap_or_else(|| doc.root());
    let mut misses = Misses::new();

    let title = first_match(doc, TITLE_SELECTORS)
        .map(|(_, heading)| heading.text())
        .filter(|text| !text.is_empty());
    if title.is_none() {
        misses.absent("title");
    }

    let tags = scope
        .select_all("a.post-tag")
        .iter()
        .map(|tag| tag.text())
        .collect();

    let owner = detail_owner(scope, site, &mut misses);

    // "Asked" sits in the header row above #question on current pages
    let creation_raw = scope
        .select_one("time[itemprop='dateCreated']")
        .or_else(|| doc.select_one("time[itemprop='dateCreated']"))
        .and_then(|t| t.attr("datetime"));
    let creation_date = misses.parsed("creation_date", creation_raw, parse_date);

    let last_activity_raw = scope
        .select_one("time[itemprop='dateModified']")
        .and_then(|t| t.attr("datetime"))
        .or_else(|| {
            doc.select_one("a[href='?lastactivity']")
                .and_then(|a| a.attr("title"))
        });
    let last_activity_date = misses.parsed("last_activity_date", last_activity_raw, parse_date);

    let license = first_match(scope, LICENSE_SELECTORS).map(|(_, link)| link.text());

    let score = match scope.select_one("div.js-vote-count") {
        Some(votes) => parse_score(votes.attr_nonempty("data-value").unwrap_or(&votes.text())),
        None => misses.or_default("score", None, 0),
    };

    let answer_count = misses.or_default("answer_count", answer_count(doc), 0);
    let view_count = misses.or_default("view_count", view_count(doc), 0);

    let accepted_block = first_match(doc, ACCEPTED_ANSWER_SELECTORS).map(|(_, block)| block);
    let accepted_answer_id = accepted_block.as_ref().and_then(answer_id_attr);

    if !misses.is_empty() {
        tracing::debug!(
            "Question {}: {} field miss(es) on detail page",
            question_id,
            misses.len()
        );
    }

    Question {
        question_id: Some(question_id),
        title,
        link: Some(site.question_url(question_id)),
        tags,
        owner,
        creation_date,
        last_edit_date: None,
        closed_date: None,
        locked_date: None,
        last_activity_date,
        content_license: canonical_license(license.as_deref()),
        score,
        answer_count,
        view_count,
        is_answered: is_answered(score),
        accepted_answer_id,
        has_accepted_answer: accepted_block.is_some(),
    }
}

/// Count from the "N Answers" heading, its data attribute, or the element after it
fn answer_count(doc: &Document) -> Option<u64> {
    let heading = doc
        .select_all("h2.mb0")
        .into_iter()
        .find(|h| h.text().contains("Answer"))?;

    heading
        .attr_nonempty("data-answercount")
        .and_then(|n| n.parse().ok())
        .or_else(|| first_number(&heading.text()))
        .or_else(|| heading.next_element().and_then(|e| first_number(&e.text())))
}

/// Views from the "Viewed N times" block, preferring its exact title
fn view_count(doc: &Document) -> Option<u64> {
    let block = doc
        .select_all("div[title^='Viewed']")
        .into_iter()
        .next()
        .or_else(|| {
            doc.select_all("div.flex--item")
                .into_iter()
                .find(|d| d.text().starts_with("Viewed"))
        })?;

    block.attr("title").and_then(first_number).or_else(|| {
        let text = block.text();
        let figure = text
            .trim_start_matches("Viewed")
            .trim_end_matches("times")
            .trim();
        figure
            .chars()
            .any(|c| c.is_ascii_digit())
            .then(|| parse_count(figure))
    })
}
