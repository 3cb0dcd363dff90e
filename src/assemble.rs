//! Record assembly: listing rows merged with supplementary page data
//!
//! Precedence is fixed. Timeline dates override anything the listing
//! carried; the listing's relative summary date only fills `creation_date`
//! and `last_activity_date` when the timeline produced nothing for them.

use crate::extract::{ListingRow, TimelineDates};
use crate::model::Question;

/// Whether a question counts as answered
///
/// Derived from the vote score, for every operation that builds a question.
pub fn is_answered(score: i64) -> bool {
    score > 0
}

/// Merges a listing row with its timeline dates and accepted answer id
///
/// `timeline` is None when the timeline fetch failed; an empty timeline is
/// treated the same way for the fallback fields.
pub fn assemble_question(
    row: ListingRow,
    timeline: Option<TimelineDates>,
    accepted_answer_id: Option<u64>,
) -> Question {
    let ListingRow {
        mut question,
        summary_date,
        shows_accepted,
    } = row;

    let dates = timeline.unwrap_or_default();

    question.creation_date = dates.creation.or(question.creation_date).or(summary_date);
    question.last_activity_date = dates
        .last_activity
        .or(question.last_activity_date)
        .or(summary_date);
    question.last_edit_date = dates.last_edit.or(question.last_edit_date);
    question.closed_date = dates.closed.or(question.closed_date);
    question.locked_date = dates.locked.or(question.locked_date);

    if accepted_answer_id.is_some() {
        question.accepted_answer_id = accepted_answer_id;
    }
    question.has_accepted_answer = shows_accepted || question.accepted_answer_id.is_some();
    question.is_answered = is_answered(question.score);

    question
}
