//! Relative and absolute date parsing
//!
//! Months are approximated as 30 days and years as 365 days. This is a known
//! imprecision of the relative phrases the site renders, not a calendar
//! computation.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, Utc};
use regex::Regex;
use std::sync::LazyLock;

const DAYS_PER_MONTH: i64 = 30;
const DAYS_PER_YEAR: i64 = 365;

static YEARS_MONTHS_AGO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+) years?, (\d+) months? ago").expect("valid regex"));
static YEARS_AGO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+) years? ago").expect("valid regex"));
static MONTHS_AGO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+) months? ago").expect("valid regex"));
static DAYS_AGO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+) days? ago").expect("valid regex"));
static UNITS_AGO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:modified )?(\d+) (sec|min|hour)s? ago").expect("valid regex")
});

/// Naive layouts seen in `title` and `datetime` attributes, all UTC
const NAIVE_LAYOUTS: &[&str] = &[
    "%Y-%m-%d %H:%M:%SZ",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%b %d, %Y at %H:%M",
    "%b %e, %Y at %H:%M",
];

const DATE_LAYOUTS: &[&str] = &["%Y-%m-%d", "%b %d, %Y", "%b %e, %Y"];

/// Resolves a humanized phrase like "3 days ago" against `now`
///
/// Recognized phrases (case-insensitive): `today`, `yesterday`, `N days ago`,
/// `N months ago`, `N years ago`, `N years, M months ago`, and
/// `[modified] N secs|mins|hours ago`. Anything else is handed to
/// [`parse_date`]; if that fails too the result is None.
pub fn parse_relative(text: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let phrase = text.trim().to_lowercase();

    if phrase.contains("today") {
        return Some(now);
    }

    if phrase.contains("yesterday") {
        return now.checked_sub_signed(TimeDelta::days(1));
    }

    if let Some(caps) = YEARS_MONTHS_AGO.captures(&phrase) {
        let years = number(&caps[1])?;
        let months = number(&caps[2])?;
        let days = years
            .checked_mul(DAYS_PER_YEAR)?
            .checked_add(months.checked_mul(DAYS_PER_MONTH)?)?;
        return days_before(now, days);
    }

    if let Some(caps) = YEARS_AGO.captures(&phrase) {
        return days_before(now, number(&caps[1])?.checked_mul(DAYS_PER_YEAR)?);
    }

    if let Some(caps) = MONTHS_AGO.captures(&phrase) {
        return days_before(now, number(&caps[1])?.checked_mul(DAYS_PER_MONTH)?);
    }

    if let Some(caps) = DAYS_AGO.captures(&phrase) {
        return days_before(now, number(&caps[1])?);
    }

    if let Some(caps) = UNITS_AGO.captures(&phrase) {
        let amount = number(&caps[1])?;
        let delta = match &caps[2] {
            "sec" => TimeDelta::try_seconds(amount)?,
            "min" => TimeDelta::try_minutes(amount)?,
            _ => TimeDelta::try_hours(amount)?,
        };
        return now.checked_sub_signed(delta);
    }

    parse_date(text)
}

/// Parses an absolute date string into a UTC instant
///
/// Accepts RFC 3339, the site's `2024-01-02 10:11:12Z` title format, naive ISO
/// timestamps (taken as UTC), and `Jan 5, 2024 [at 10:11]`.
pub fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }

    for layout in NAIVE_LAYOUTS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, layout) {
            return Some(naive.and_utc());
        }
    }

    for layout in DATE_LAYOUTS {
        if let Ok(date) = NaiveDate::parse_from_str(text, layout) {
            return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }
    }

    None
}

fn number(digits: &str) -> Option<i64> {
    digits.parse().ok()
}

fn days_before(now: DateTime<Utc>, days: i64) -> Option<DateTime<Utc>> {
    now.checked_sub_signed(TimeDelta::try_days(days)?)
}
