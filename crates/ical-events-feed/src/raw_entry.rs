//! Raw calendar entry type.
//!
//! [`RawCalendarEntry`] is what the feed decoder hands to the normalizer:
//! the handful of VEVENT fields the listing needs, with every field still
//! optional and loosely typed exactly as the feed provided it.

use ical_events_core::EventTime;
use serde::{Deserialize, Serialize};

/// One VEVENT from a calendar feed, before normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCalendarEntry {
    /// The entry's UID, if it had one.
    pub uid: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub url: Option<String>,
    /// Start boundary; entries without one are dropped by the normalizer.
    pub dtstart: Option<EventTime>,
    /// End boundary. Exclusive when all-day.
    pub dtend: Option<EventTime>,
    /// Category labels in source order.
    #[serde(default)]
    pub categories: Vec<String>,
}

impl RawCalendarEntry {
    /// Creates an entry with the given start boundary.
    pub fn new(uid: impl Into<String>, dtstart: EventTime) -> Self {
        Self {
            uid: Some(uid.into()),
            dtstart: Some(dtstart),
            ..Self::default()
        }
    }

    /// Returns `true` if the start boundary is a bare date.
    pub fn is_all_day(&self) -> bool {
        self.dtstart.as_ref().is_some_and(EventTime::is_all_day)
    }

    /// The UID for log messages.
    pub fn display_uid(&self) -> &str {
        self.uid.as_deref().unwrap_or("<no uid>")
    }

    /// Builder method to set the end boundary.
    pub fn with_end(mut self, dtend: EventTime) -> Self {
        self.dtend = Some(dtend);
        self
    }

    /// Builder method to set the summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
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

    /// Builder method to add a category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.categories.push(category.into());
        self
    }
}
