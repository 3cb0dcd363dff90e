//! Post timeline pages: lifecycle events with exact timestamps

use crate::crawler::{Document, Query};
use crate::normalize::parse_date;
use chrono::{DateTime, Utc};

/// Lifecycle dates recovered from a timeline page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimelineDates {
    pub creation: Option<DateTime<Utc>>,
    pub last_edit: Option<DateTime<Utc>>,
    pub closed: Option<DateTime<Utc>>,
    pub locked: Option<DateTime<Utc>>,
    pub last_activity: Option<DateTime<Utc>>,
}

impl TimelineDates {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Maps timeline rows onto the five lifecycle dates
///
/// Event types: `question` sets creation, `edit` the last edit, `closed` and
/// `locked` their own dates, `protected` the last activity. Rows come newest
/// first on the site but order is not relied on: creation keeps the earliest
/// timestamp and every other field the latest.
pub fn parse_timeline(doc: &Document) -> TimelineDates {
    let mut dates = TimelineDates::default();

    for row in doc.select_all("tr[data-eventtype]") {
        let Some(event) = row.attr("data-eventtype") else {
            continue;
        };
        let Some(when) = row
            .select_one("span.relativetime")
            .and_then(|span| span.attr("title"))
            .and_then(parse_date)
        else {
            tracing::trace!("Timeline row {:?} has no readable date", event);
            continue;
        };

        match event {
            "question" => dates.creation = Some(earliest(dates.creation, when)),
            "edit" => dates.last_edit = Some(latest(dates.last_edit, when)),
            "closed" => dates.closed = Some(latest(dates.closed, when)),
            "locked" => dates.locked = Some(latest(dates.locked, when)),
            "protected" => dates.last_activity = Some(latest(dates.last_activity, when)),
            _ => {}
        }
    }

    dates
}

fn earliest(current: Option<DateTime<Utc>>, candidate: DateTime<Utc>) -> DateTime<Utc> {
    current.map_or(candidate, |c| c.min(candidate))
}

fn latest(current: Option<DateTime<Utc>>, candidate: DateTime<Utc>) -> DateTime<Utc> {
    current.map_or(candidate, |c| c.max(candidate))
}
