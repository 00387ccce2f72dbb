//! Temporal values for calendar entries.
//!
//! Calendar feeds describe event boundaries either as a bare date (all-day
//! events) or as a date-time with an optional timezone reference. This module
//! models that as the tagged [`EventTime`] variant so every consumer has to
//! handle both cases explicitly.
//!
//! Wall-clock values are carried verbatim: a `TZID` is kept as a label and
//! never used to shift the time.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// The zone attached to a date-time value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "tzid", rename_all = "snake_case")]
pub enum TimeZoneRef {
    /// No zone; the value is local to whoever reads it.
    Floating,
    /// UTC (`Z` suffix in iCalendar).
    Utc,
    /// An IANA (or vendor) identifier taken from a `TZID` parameter.
    Named(String),
}

impl TimeZoneRef {
    /// Returns the short label shown next to a time, if any.
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Floating => None,
            Self::Utc => Some("UTC"),
            Self::Named(tzid) => Some(tzid),
        }
    }
}

/// A wall-clock date-time together with its zone reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ZonedDateTime {
    /// The date-time exactly as written in the feed.
    pub local: NaiveDateTime,
    /// The zone the feed attached to it.
    pub zone: TimeZoneRef,
}

impl ZonedDateTime {
    pub fn new(local: NaiveDateTime, zone: TimeZoneRef) -> Self {
        Self { local, zone }
    }

    pub fn floating(local: NaiveDateTime) -> Self {
        Self::new(local, TimeZoneRef::Floating)
    }

    pub fn utc(local: NaiveDateTime) -> Self {
        Self::new(local, TimeZoneRef::Utc)
    }

    pub fn named(local: NaiveDateTime, tzid: impl Into<String>) -> Self {
        Self::new(local, TimeZoneRef::Named(tzid.into()))
    }

    /// The calendar date of the wall-clock value.
    pub fn date(&self) -> NaiveDate {
        self.local.date()
    }

    /// ISO 8601 rendering, with a trailing `Z` for UTC values.
    pub fn to_iso_string(&self) -> String {
        let base = self.local.format("%Y-%m-%dT%H:%M:%S").to_string();
        match self.zone {
            TimeZoneRef::Utc => format!("{}Z", base),
            _ => base,
        }
    }
}

impl fmt::Display for ZonedDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.local.format("%Y-%m-%d %H:%M:%S"))?;
        if let Some(label) = self.zone.label() {
            write!(f, " {}", label)?;
        }
        Ok(())
    }
}

/// The start or end boundary of a calendar entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum EventTime {
    /// An all-day boundary (no time of day).
    AllDay(NaiveDate),
    /// A boundary with a time of day.
    DateTime(ZonedDateTime),
}

impl EventTime {
    /// Creates an all-day boundary.
    pub fn from_date(date: NaiveDate) -> Self {
        Self::AllDay(date)
    }

    /// Creates a timed boundary.
    pub fn from_datetime(dt: ZonedDateTime) -> Self {
        Self::DateTime(dt)
    }

    /// Returns `true` if this boundary carries no time of day.
    pub fn is_all_day(&self) -> bool {
        matches!(self, Self::AllDay(_))
    }

    /// Returns the date-time if this is a `DateTime` variant.
    pub fn as_datetime(&self) -> Option<&ZonedDateTime> {
        match self {
            Self::DateTime(dt) => Some(dt),
            Self::AllDay(_) => None,
        }
    }

    /// Returns the date portion, with any time of day stripped.
    pub fn date(&self) -> NaiveDate {
        match self {
            Self::AllDay(date) => *date,
            Self::DateTime(dt) => dt.date(),
        }
    }

    /// Short name of the variant, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AllDay(_) => "date",
            Self::DateTime(_) => "date-time",
        }
    }
}

impl fmt::Display for EventTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllDay(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::DateTime(dt) => write!(f, "{}", dt),
        }
    }
}
