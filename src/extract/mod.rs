//! Extractors: markup in, canonical records out
//!
//! Each extractor walks a [`Document`](crate::crawler::Document) and produces
//! records plus a ledger of field-level misses. A miss is never an error: the
//! field resolves to its documented default and the miss is kept for
//! diagnostics. Extractors that need facts the page does not carry (precise
//! dates, accepted answer ids, numeric account ids) issue their own
//! supplementary fetches, one at a time.

mod answers;
mod cascade;
mod collective;
mod detail;
mod listing;
mod owner;
mod profile;
mod timeline;

pub use answers::{extract_answers, parse_answers, question_present, thread_license};
pub use cascade::{accepted_answer_id, first_match, ACCEPTED_ANSWER_SELECTORS};
pub use collective::{
    extract_collectives, parse_collective_cards, parse_external_links, parse_tag_page,
    CollectiveCard,
};
pub use detail::parse_question_detail;
pub use listing::{extract_questions, matches_filter, parse_listing, ListingRow};
pub use owner::{detail_owner, listing_owner};
pub use profile::{parse_profile_ids, resolve_owner_ids, ProfileIds};
pub use timeline::{parse_timeline, TimelineDates};

/// How a field went missing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissKind {
    /// No element or attribute carried the field
    Absent,
    /// Something was there but could not be parsed
    Malformed,
}

/// One non-fatal extraction miss
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMiss {
    /// Index of the record within its page
    pub record: usize,
    pub field: &'static str,
    pub kind: MissKind,
}

/// Miss ledger for one extraction pass
#[derive(Debug, Default)]
pub struct Misses {
    record: usize,
    entries: Vec<FieldMiss>,
}

impl Misses {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attributes subsequent misses to record `index`
    pub fn at(&mut self, index: usize) -> &mut Self {
        self.record = index;
        self
    }

    pub fn absent(&mut self, field: &'static str) {
        self.push(field, MissKind::Absent);
    }

    pub fn malformed(&mut self, field: &'static str) {
        self.push(field, MissKind::Malformed);
    }

    /// Resolves an optional value, recording an `Absent` miss when it is None
    pub fn or_default<T>(&mut self, field: &'static str, value: Option<T>, default: T) -> T {
        match value {
            Some(value) => value,
            None => {
                self.absent(field);
                default
            }
        }
    }

    /// Parses a raw value; absent raw text and failed parses are recorded separately
    pub fn parsed<T>(
        &mut self,
        field: &'static str,
        raw: Option<&str>,
        parse: impl FnOnce(&str) -> Option<T>,
    ) -> Option<T> {
        let Some(raw) = raw else {
            self.absent(field);
            return None;
        };
        let value = parse(raw);
        if value.is_none() {
            self.malformed(field);
        }
        value
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_vec(self) -> Vec<FieldMiss> {
        self.entries
    }

    fn push(&mut self, field: &'static str, kind: MissKind) {
        tracing::trace!("record {}: {:?} field {}", self.record, kind, field);
        self.entries.push(FieldMiss {
            record: self.record,
            field,
            kind,
        });
    }
}

/// Records produced by one extraction pass
#[derive(Debug)]
pub struct Extraction<T> {
    /// Raw element matches on the page, before any filtering
    pub matched: usize,
    pub records: Vec<T>,
    pub misses: Vec<FieldMiss>,
}

impl<T> Extraction<T> {
    pub fn new(matched: usize, records: Vec<T>, misses: Misses) -> Self {
        Self {
            matched,
            records,
            misses: misses.into_vec(),
        }
    }

    /// Logs a one-line summary at debug level
    pub fn log_summary(&self, what: &str) {
        tracing::debug!(
            "{}: {} matched, {} kept, {} field miss(es)",
            what,
            self.matched,
            self.records.len(),
            self.misses.len()
        );
    }
}
