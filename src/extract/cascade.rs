//! Selector cascades: ordered alternative lookups, first non-empty match wins

use crate::crawler::{Element, Query};

/// Alternative markings of the accepted answer block, most specific first
pub const ACCEPTED_ANSWER_SELECTORS: &[&str] = &[
    "div.answer.accepted-answer",
    "div[itemprop='acceptedAnswer']",
    "div.accepted-answer",
    "div.js-accepted-answer",
];

/// Tries each selector in order; returns the index that matched and the element
pub fn first_match<'a, Q: Query<'a>>(scope: Q, selectors: &[&str]) -> Option<(usize, Element<'a>)> {
    selectors
        .iter()
        .enumerate()
        .find_map(|(index, css)| scope.select_one(css).map(|element| (index, element)))
}

/// Id of the accepted answer on a question page, if one is marked
///
/// Reads `data-answerid`, then `data-answer-id`, from the first block the
/// cascade finds.
pub fn accepted_answer_id<'a, Q: Query<'a>>(scope: Q) -> Option<u64> {
    let (index, block) = first_match(scope, ACCEPTED_ANSWER_SELECTORS)?;
    tracing::trace!(
        "Accepted answer found with selector {:?}",
        ACCEPTED_ANSWER_SELECTORS[index]
    );
    answer_id_attr(&block)
}

/// Answer id carried by an answer block
pub(crate) fn answer_id_attr(block: &Element<'_>) -> Option<u64> {
    block
        .attr_nonempty("data-answerid")
        .or_else(|| block.attr_nonempty("data-answer-id"))
        .and_then(|id| id.parse().ok())
}
