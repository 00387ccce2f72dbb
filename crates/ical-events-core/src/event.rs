//! Canonical event model.
//!
//! This module provides the display-ready types produced by the normalizer:
//! - [`EventSpan`]: the inclusive date span of an event plus its original times
//! - [`CanonicalEvent`]: a fully derived event ready for rendering
//! - [`anchor_id`]: the deterministic deep-link identifier for a UID

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::format::{format_date_display, month_key};
use crate::time::ZonedDateTime;

/// Title used when an entry has no usable summary.
pub const UNTITLED_EVENT: &str = "Untitled Event";

/// Length of an anchor id in hex characters.
pub const ANCHOR_ID_LEN: usize = 8;

/// Derives the anchor id for a UID.
///
/// The first eight hex characters of the MD5 digest of the UID's UTF-8
/// bytes. Changing the hash changes every published `#event-…` link.
pub fn anchor_id(uid: &str) -> String {
    let digest = md5::compute(uid.as_bytes());
    let mut hex = format!("{:x}", digest);
    hex.truncate(ANCHOR_ID_LEN);
    hex
}

/// The inclusive date span of an event.
///
/// Constructors clamp the last day so it is never before the first day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSpan {
    /// First day of the event.
    pub start: NaiveDate,
    /// Last day of the event (inclusive).
    pub last_day: NaiveDate,
    /// Original start value, for timed events only.
    pub start_datetime: Option<ZonedDateTime>,
    /// Original end value, for timed events with an end.
    pub end_datetime: Option<ZonedDateTime>,
}

impl EventSpan {
    /// An all-day span covering `start..=last_day`.
    pub fn all_day(start: NaiveDate, last_day: NaiveDate) -> Self {
        Self {
            start,
            last_day: last_day.max(start),
            start_datetime: None,
            end_datetime: None,
        }
    }

    /// A timed span; it ends on the date of `end`, or on the start date when
    /// there is no end.
    pub fn timed(start: ZonedDateTime, end: Option<ZonedDateTime>) -> Self {
        let start_date = start.date();
        let last_day = end.as_ref().map_or(start_date, ZonedDateTime::date);
        Self {
            start: start_date,
            last_day: last_day.max(start_date),
            start_datetime: Some(start),
            end_datetime: end,
        }
    }

    /// Returns `true` if the span has no time of day.
    pub fn is_all_day(&self) -> bool {
        self.start_datetime.is_none()
    }

    /// Returns `true` if the span starts and ends on the same day.
    pub fn is_single_day(&self) -> bool {
        self.start == self.last_day
    }

    /// Number of days covered, counting both ends.
    pub fn duration_days(&self) -> i64 {
        (self.last_day - self.start).num_days() + 1
    }

    /// Checks whether the span overlaps the inclusive window `[from, until]`.
    pub fn overlaps(&self, from: NaiveDate, until: NaiveDate) -> bool {
        self.start <= until && self.last_day >= from
    }
}

/// A display-ready calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalEvent {
    /// Source UID, possibly empty and not guaranteed unique.
    pub uid: String,
    /// Display title.
    pub summary: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub url: Option<String>,
    /// First day of the event.
    pub start_date: NaiveDate,
    /// Last inclusive day, or `None` for single-day events.
    pub end_date: Option<NaiveDate>,
    /// Original start for timed events.
    pub start_datetime: Option<ZonedDateTime>,
    /// Original end for timed events.
    pub end_datetime: Option<ZonedDateTime>,
    pub is_all_day: bool,
    pub categories: Vec<String>,
    /// `YYYY-MM` of the start date.
    pub month_key: String,
    /// Deep-link id derived from the UID.
    pub anchor_id: String,
    /// Human-readable date span.
    pub date_display: String,
    /// Inclusive day count, at least 1.
    pub duration_days: i64,
}

impl CanonicalEvent {
    /// Creates an event from a span, computing every derived field.
    pub fn new(uid: impl Into<String>, summary: impl Into<String>, span: EventSpan) -> Self {
        let uid = uid.into();
        let end_date = (!span.is_single_day()).then_some(span.last_day);
        Self {
            anchor_id: anchor_id(&uid),
            uid,
            summary: summary.into(),
            description: None,
            location: None,
            url: None,
            start_date: span.start,
            end_date,
            is_all_day: span.is_all_day(),
            month_key: month_key(span.start),
            date_display: format_date_display(span.start, end_date),
            duration_days: span.duration_days(),
            start_datetime: span.start_datetime,
            end_datetime: span.end_datetime,
            categories: Vec::new(),
        }
    }

    /// Shorthand for an all-day event covering `start..=last_day`.
    pub fn all_day(
        uid: impl Into<String>,
        summary: impl Into<String>,
        start: NaiveDate,
        last_day: NaiveDate,
    ) -> Self {
        Self::new(uid, summary, EventSpan::all_day(start, last_day))
    }

    /// The last inclusive day, whether or not the event spans several days.
    pub fn last_day(&self) -> NaiveDate {
        self.end_date.unwrap_or(self.start_date)
    }

    /// Returns `true` if the event covers more than one day.
    pub fn is_multi_day(&self) -> bool {
        self.end_date.is_some()
    }

    /// Builder method to set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builder method to set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Builder method to set the URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Builder method to set the categories.
    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = categories;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_opt(h, min, 0).unwrap()
    }

    mod anchors {
        use super::*;

        #[test]
        fn matches_md5_prefix() {
            // md5("hello") = 5d41402abc4b2a76b9719d911017c592
            assert_eq!(anchor_id("hello"), "5d41402a");
            // md5("") = d41d8cd98f00b204e9800998ecf8427e
            assert_eq!(anchor_id(""), "d41d8cd9");
        }

        #[test]
        fn is_stable_and_well_formed() {
            let first = anchor_id("test-allday-1@test");
            let second = anchor_id("test-allday-1@test");
            assert_eq!(first, second);
            assert_eq!(first.len(), ANCHOR_ID_LEN);
            assert!(first.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        }

        #[test]
        fn differs_between_uids() {
            assert_ne!(anchor_id("a@test"), anchor_id("b@test"));
        }
    }

    mod spans {
        use super::*;

        #[test]
        fn all_day_single() {
            let span = EventSpan::all_day(date(2026, 3, 1), date(2026, 3, 1));
            assert!(span.is_all_day());
            assert!(span.is_single_day());
            assert_eq!(span.duration_days(), 1);
        }

        #[test]
        fn all_day_clamps_inverted_end() {
            let span = EventSpan::all_day(date(2026, 3, 1), date(2026, 2, 28));
            assert_eq!(span.last_day, date(2026, 3, 1));
            assert_eq!(span.duration_days(), 1);
        }

        #[test]
        fn timed_without_end() {
            let span = EventSpan::timed(ZonedDateTime::floating(at(2026, 3, 1, 18, 0)), None);
            assert!(!span.is_all_day());
            assert_eq!(span.start, date(2026, 3, 1));
            assert_eq!(span.last_day, date(2026, 3, 1));
            assert_eq!(span.end_datetime, None);
        }

        #[test]
        fn timed_overnight() {
            let span = EventSpan::timed(
                ZonedDateTime::utc(at(2026, 3, 1, 22, 0)),
                Some(ZonedDateTime::utc(at(2026, 3, 2, 2, 0))),
            );
            assert_eq!(span.last_day, date(2026, 3, 2));
            assert_eq!(span.duration_days(), 2);
        }

        #[test]
        fn overlap_is_inclusive() {
            let span = EventSpan::all_day(date(2025, 12, 30), date(2026, 1, 1));
            assert!(span.overlaps(date(2026, 1, 1), date(2026, 12, 31)));
            assert!(span.overlaps(date(2025, 1, 1), date(2025, 12, 30)));
            assert!(!span.overlaps(date(2026, 1, 2), date(2026, 12, 31)));
            assert!(!span.overlaps(date(2025, 1, 1), date(2025, 12, 29)));
        }
    }

    mod canonical {
        use super::*;

        #[test]
        fn derives_fields_for_single_day() {
            let event = CanonicalEvent::all_day("ev1", "First Event", date(2026, 3, 1), date(2026, 3, 1));
            assert_eq!(event.end_date, None);
            assert_eq!(event.last_day(), date(2026, 3, 1));
            assert!(!event.is_multi_day());
            assert_eq!(event.month_key, "2026-03");
            assert_eq!(event.date_display, "Mar 01, 2026");
            assert_eq!(event.duration_days, 1);
            assert_eq!(event.anchor_id, anchor_id("ev1"));
            assert!(event.is_all_day);
        }

        #[test]
        fn derives_fields_for_multi_day() {
            let event = CanonicalEvent::all_day("ev2", "Conference", date(2026, 3, 15), date(2026, 3, 17));
            assert_eq!(event.end_date, Some(date(2026, 3, 17)));
            assert_eq!(event.date_display, "Mar 15\u{2013}17, 2026");
            assert_eq!(event.duration_days, 3);
        }

        #[test]
        fn timed_event_keeps_original_values() {
            let start = ZonedDateTime::named(at(2026, 3, 1, 18, 0), "America/New_York");
            let event = CanonicalEvent::new("ev3", "Meetup", EventSpan::timed(start.clone(), None));
            assert!(!event.is_all_day);
            assert_eq!(event.start_datetime, Some(start));
            assert_eq!(event.end_datetime, None);
            assert_eq!(event.end_date, None);
            assert_eq!(event.duration_days, 1);
        }

        #[test]
        fn builder_sets_optional_fields() {
            let event = CanonicalEvent::all_day("ev4", "Talk", date(2026, 4, 1), date(2026, 4, 1))
                .with_description("About things")
                .with_location("Room 1")
                .with_url("https://example.com/talk")
                .with_categories(vec!["Tech".to_string()]);
            assert_eq!(event.description.as_deref(), Some("About things"));
            assert_eq!(event.location.as_deref(), Some("Room 1"));
            assert_eq!(event.url.as_deref(), Some("https://example.com/talk"));
            assert_eq!(event.categories, vec!["Tech"]);
        }

        #[test]
        fn serde_roundtrip() {
            let event = CanonicalEvent::all_day("ev5", "Party", date(2026, 5, 1), date(2026, 5, 2));
            let json = serde_json::to_string(&event).unwrap();
            let parsed: CanonicalEvent = serde_json::from_str(&json).unwrap();
            assert_eq!(event, parsed);
        }
    }
}
