//! Event normalization and the pipeline that orders it.
//!
//! [`normalize_entry_on`] turns one [`RawCalendarEntry`] into a display-ready
//! [`CanonicalEvent`], or skips it. [`run_pipeline_on`] applies it to a whole
//! feed, then sorts and truncates the survivors. Both take "today" explicitly;
//! the `normalize_entry`/`run_pipeline` wrappers read it from the local clock.

use chrono::{Local, NaiveDate};
use ical_events_core::{
    CanonicalEvent, EventSpan, EventTime, FilterCriteria, UNTITLED_EVENT,
};
use tracing::{debug, info};

use crate::error::NormalizeError;
use crate::raw_entry::RawCalendarEntry;

/// Normalizes one entry against `filters`, using the local date as "today".
pub fn normalize_entry(
    entry: &RawCalendarEntry,
    filters: &FilterCriteria,
) -> Result<Option<CanonicalEvent>, NormalizeError> {
    normalize_entry_on(entry, filters, Local::now().date_naive())
}

/// Normalizes one entry against `filters`.
///
/// Returns `Ok(None)` when the entry has no start or falls entirely outside
/// the filter window. `today` only matters when `filters.end_date` is unset.
///
/// # Errors
///
/// Returns [`NormalizeError::MismatchedBoundaryKinds`] when the entry's start
/// and end are not both dates or both date-times.
pub fn normalize_entry_on(
    entry: &RawCalendarEntry,
    filters: &FilterCriteria,
    today: NaiveDate,
) -> Result<Option<CanonicalEvent>, NormalizeError> {
    let Some(span) = span_of(entry)? else {
        debug!(uid = %entry.display_uid(), "Skipping entry without start time");
        return Ok(None);
    };

    let window_end = filters.effective_end_date(today);
    if !span.overlaps(filters.start_date, window_end) {
        debug!(
            uid = %entry.display_uid(),
            start = %span.start,
            end = %span.last_day,
            window_start = %filters.start_date,
            window_end = %window_end,
            "Entry outside filter window"
        );
        return Ok(None);
    }

    let summary = non_blank(entry.summary.as_deref()).unwrap_or(UNTITLED_EVENT);
    let uid = entry.uid.as_deref().unwrap_or_default();

    let mut event = CanonicalEvent::new(uid, summary, span)
        .with_categories(entry.categories.clone());
    event.description = non_blank(entry.description.as_deref()).map(str::to_string);
    event.location = non_blank(entry.location.as_deref()).map(str::to_string);
    event.url = non_blank(entry.url.as_deref()).map(str::to_string);

    Ok(Some(event))
}

/// Builds the inclusive span of an entry, or `None` if it has no start.
fn span_of(entry: &RawCalendarEntry) -> Result<Option<EventSpan>, NormalizeError> {
    let Some(start) = entry.dtstart.as_ref() else {
        return Ok(None);
    };

    let span = match (start, entry.dtend.as_ref()) {
        (EventTime::AllDay(start), None) => EventSpan::all_day(*start, *start),
        // DTEND is exclusive for dates; the day before it is the last day.
        (EventTime::AllDay(start), Some(EventTime::AllDay(end))) => {
            EventSpan::all_day(*start, end.pred_opt().unwrap_or(*end))
        }
        (EventTime::DateTime(start), None) => EventSpan::timed(start.clone(), None),
        (EventTime::DateTime(start), Some(EventTime::DateTime(end))) => {
            EventSpan::timed(start.clone(), Some(end.clone()))
        }
        (start, Some(end)) => {
            return Err(NormalizeError::MismatchedBoundaryKinds {
                uid: entry.display_uid().to_string(),
                start_kind: start.kind(),
                end_kind: end.kind(),
            });
        }
    };

    Ok(Some(span))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Runs the pipeline with the local date as "today".
pub fn run_pipeline(
    entries: &[RawCalendarEntry],
    filters: &FilterCriteria,
) -> Result<Vec<CanonicalEvent>, NormalizeError> {
    run_pipeline_on(entries, filters, Local::now().date_naive())
}

/// Normalizes, sorts, and truncates a feed's entries.
///
/// The output is ordered by start date, then by summary (byte order); ties
/// keep feed order. When `filters.max_events` is set, only that many of the
/// earliest events are kept.
///
/// # Errors
///
/// Fails on the first entry that violates the decoder contract; no partial
/// result is returned.
pub fn run_pipeline_on(
    entries: &[RawCalendarEntry],
    filters: &FilterCriteria,
    today: NaiveDate,
) -> Result<Vec<CanonicalEvent>, NormalizeError> {
    let mut events = Vec::with_capacity(entries.len());
    let mut skipped = 0usize;
    for entry in entries {
        match normalize_entry_on(entry, filters, today)? {
            Some(event) => events.push(event),
            None => skipped += 1,
        }
    }

    events.sort_by(|a, b| {
        a.start_date
            .cmp(&b.start_date)
            .then_with(|| a.summary.cmp(&b.summary))
    });

    let matched = events.len();
    if let Some(max) = filters.max_events {
        events.truncate(max);
    }

    info!(
        entries = entries.len(),
        skipped,
        matched,
        emitted = events.len(),
        "Normalized calendar entries"
    );

    Ok(events)
}
