//! Display formatting for canonical events.
//!
//! These helpers turn dates into the strings the rendered listing shows:
//! - [`format_date_display`]: a compact summary of a date span
//! - [`month_key`] / [`month_label`]: grouping key and its long-form label
//! - [`group_by_month`]: adjacent grouping that preserves pipeline order
//! - [`html_escape`]: escaping for text interpolated into HTML

use chrono::{Datelike, NaiveDate};

use crate::event::CanonicalEvent;

const FULL_DATE: &str = "%b %d, %Y";
const MONTH_DAY: &str = "%b %d";
const DAY_YEAR: &str = "%d, %Y";

/// Separator between the two ends of a span (en dash).
pub const SPAN_SEPARATOR: char = '\u{2013}';

/// Formats a human-readable summary of a date span.
///
/// `end` is the last inclusive day, or `None` for a single-day span.
///
/// - single day: `Mar 01, 2026`
/// - same month: `Mar 15–17, 2026`
/// - same year: `Mar 30–Apr 02, 2026`
/// - across years: `Dec 30, 2025–Jan 02, 2026`
pub fn format_date_display(start: NaiveDate, end: Option<NaiveDate>) -> String {
    let Some(end) = end.filter(|end| *end != start) else {
        return start.format(FULL_DATE).to_string();
    };

    if start.year() == end.year() && start.month() == end.month() {
        format!(
            "{}{}{}",
            start.format(MONTH_DAY),
            SPAN_SEPARATOR,
            end.format(DAY_YEAR)
        )
    } else if start.year() == end.year() {
        format!(
            "{}{}{}",
            start.format(MONTH_DAY),
            SPAN_SEPARATOR,
            end.format(FULL_DATE)
        )
    } else {
        format!(
            "{}{}{}",
            start.format(FULL_DATE),
            SPAN_SEPARATOR,
            end.format(FULL_DATE)
        )
    }
}

/// Returns the `YYYY-MM` key of the month containing `date`.
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Converts a `YYYY-MM` key to a long-form label such as `March 2026`.
///
/// Keys that do not parse are returned unchanged.
pub fn month_label(month_key: &str) -> String {
    parse_month_key(month_key)
        .map(|first| first.format("%B %Y").to_string())
        .unwrap_or_else(|| month_key.to_string())
}

fn parse_month_key(month_key: &str) -> Option<NaiveDate> {
    let (year, month) = month_key.split_once('-')?;
    let year = year.parse::<i32>().ok()?;
    let month = month.parse::<u32>().ok()?;
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Events sharing one month key, in the order they were given.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthGroup<'a> {
    pub month_key: &'a str,
    pub events: Vec<&'a CanonicalEvent>,
}

impl MonthGroup<'_> {
    /// Long-form label for this group's month.
    pub fn label(&self) -> String {
        month_label(self.month_key)
    }
}

/// Groups consecutive events with the same month key.
///
/// This never reorders: on an already sorted sequence every month appears
/// once, in sequence order.
pub fn group_by_month(events: &[CanonicalEvent]) -> Vec<MonthGroup<'_>> {
    let mut groups: Vec<MonthGroup<'_>> = Vec::new();
    for event in events {
        match groups.last_mut() {
            Some(group) if group.month_key == event.month_key => group.events.push(event),
            _ => groups.push(MonthGroup {
                month_key: &event.month_key,
                events: vec![event],
            }),
        }
    }
    groups
}

/// Escapes text for inclusion in HTML element content or attribute values.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Formats an event count such as `1 event` or `3 events`.
pub fn pluralize_events(count: usize) -> String {
    if count == 1 {
        "1 event".to_string()
    } else {
        format!("{} events", count)
    }
}
