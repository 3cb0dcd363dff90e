use super::cascade::answer_id_attr;
use crate::crawler::{Document, Element, Fetcher, Query};
use crate::extract::{detail_owner, resolve_owner_ids, Extraction, Misses};
use crate::model::Answer;
use crate::normalize::{canonical_license, parse_date, parse_score};
use crate::site::Site;

/// Whether the page carries a question block at all
pub fn question_present(doc: &Document) -> bool {
    doc.select_one("#question").is_some()
}

/// License of the question a thread belongs to, from its post menu
pub fn thread_license(doc: &Document) -> String {
    let link = doc
        .select_one("#question .post-menu a.js-license-link")
        .or_else(|| doc.select_one("#question a[rel='license']"))
        .map(|a| a.text());
    canonical_license(link.as_deref())
}

/// Every answer block on a question page, in page order
pub fn parse_answers(doc: &Document, site: &Site) -> Extraction<Answer> {
    let blocks = doc.find_all("div", &["answer"]);
    let mut misses = Misses::new();

    let answers = blocks
        .iter()
        .enumerate()
        .map(|(index, block)| {
            misses.at(index);
            parse_answer(*block, site, &mut misses)
        })
        .collect();

    Extraction::new(blocks.len(), answers, misses)
}

fn parse_answer(block: Element<'_>, site: &Site, misses: &mut Misses) -> Answer {
    let answer_id = answer_id_attr(&block);
    if answer_id.is_none() {
        misses.absent("answer_id");
    }

    let score = match block.select_one("div.js-vote-count") {
        Some(votes) => parse_score(votes.attr_nonempty("data-value").unwrap_or(&votes.text())),
        None => misses.or_default("score", None, 0),
    };

    let creation_date = misses.parsed(
        "creation_date",
        block
            .select_one("time[itemprop='dateCreated']")
            .and_then(|t| t.attr("datetime")),
        parse_date,
    );

    let modified = block
        .select_one("time[itemprop='dateModified']")
        .or_else(|| block.select_one(".grid--cell.ws-nowrap.mr16.mb8 time"))
        .and_then(|t| t.attr("datetime"));
    let last_activity_date = misses.parsed("last_activity_date", modified, parse_date);

    Answer {
        answer_id,
        score,
        is_accepted: block.has_class("accepted-answer"),
        creation_date,
        last_activity_date,
        owner: detail_owner(block, site, misses),
    }
}

/// Extracts every answer and, when asked, recovers owner account ids
///
/// Profile fetches run one at a time, in answer order.
pub async fn extract_answers<F: Fetcher>(
    fetcher: &F,
    site: &Site,
    doc: &Document,
    resolve_ids: bool,
) -> Vec<Answer> {
    let extraction = parse_answers(doc, site);
    extraction.log_summary("answers");

    let mut answers = extraction.records;
    if resolve_ids {
        for answer in &mut answers {
            resolve_owner_ids(fetcher, &mut answer.owner).await;
        }
    }
    answers
}
