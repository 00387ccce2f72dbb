//! Date-range and count filters applied by the pipeline.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Criteria deciding which events make it into the listing.
///
/// The window `[start_date, end_date]` is inclusive on both ends and is
/// tested for overlap, so an event that started before `start_date` but is
/// still running on it is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// First day of the window.
    pub start_date: NaiveDate,
    /// Last day of the window; one year after "today" when unset.
    pub end_date: Option<NaiveDate>,
    /// Maximum number of events to keep after sorting.
    pub max_events: Option<usize>,
}

impl FilterCriteria {
    /// Creates criteria starting at `start_date` with no upper bound or cap.
    pub fn new(start_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date: None,
            max_events: None,
        }
    }

    /// Builder method to set the last day of the window.
    #[must_use]
    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// Builder method to cap the number of events.
    #[must_use]
    pub fn with_max_events(mut self, max_events: usize) -> Self {
        self.max_events = Some(max_events);
        self
    }

    /// Returns the last day of the window, defaulting to one year after `today`.
    pub fn effective_end_date(&self, today: NaiveDate) -> NaiveDate {
        self.end_date.unwrap_or_else(|| one_year_after(today))
    }
}

/// Same month and day one year later.
///
/// February 29 maps to February 28 when the following year is not a leap year.
pub fn one_year_after(date: NaiveDate) -> NaiveDate {
    let year = date.year() + 1;
    date.with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, date.month(), 28))
        .unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn explicit_end_date_wins() {
        let criteria = FilterCriteria::new(date(2026, 1, 1)).with_end_date(date(2026, 6, 30));
        assert_eq!(
            criteria.effective_end_date(date(2026, 10, 18)),
            date(2026, 6, 30)
        );
    }

    #[test]
    fn default_end_is_one_year_from_today() {
        let criteria = FilterCriteria::new(date(2026, 1, 1));
        assert_eq!(
            criteria.effective_end_date(date(2026, 10, 18)),
            date(2027, 10, 18)
        );
    }

    #[test]
    fn leap_day_rolls_back_to_feb_28() {
        assert_eq!(one_year_after(date(2028, 2, 29)), date(2029, 2, 28));
        assert_eq!(one_year_after(date(2027, 2, 28)), date(2028, 2, 28));
    }

    #[test]
    fn builder_methods() {
        let criteria = FilterCriteria::new(date(2026, 1, 1))
            .with_end_date(date(2026, 12, 31))
            .with_max_events(2);
        assert_eq!(criteria.end_date, Some(date(2026, 12, 31)));
        assert_eq!(criteria.max_events, Some(2));
    }
}
