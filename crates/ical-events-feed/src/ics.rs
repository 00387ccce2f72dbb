//! ICS/iCalendar decoding.
//!
//! This module turns iCalendar (RFC 5545) text into [`RawCalendarEntry`]
//! values. Only top-level VEVENT components are read; recurrence rules are
//! left unexpanded, so a recurring event appears once at its first instance.

use icalendar::{
    CalendarDateTime, DatePerhapsTime,
    parser::{Component, read_calendar, unfold},
};
use ical_events_core::{EventTime, ZonedDateTime};
use tracing::{debug, warn};

use crate::error::{FeedError, FeedResult};
use crate::raw_entry::RawCalendarEntry;

const CALENDAR_START: &str = "BEGIN:VCALENDAR";
const CATEGORIES: &str = "CATEGORIES";

/// Decodes ICS content into raw entries, in document order.
///
/// # Errors
///
/// Returns an `InvalidCalendar` error when the text is not a readable
/// iCalendar document. Individual malformed properties never fail the
/// whole document; they are treated as absent.
pub fn decode_calendar(ics: &str) -> FeedResult<Vec<RawCalendarEntry>> {
    let unfolded = unfold(ics);
    let body = unfolded.trim_start_matches('\u{feff}').trim_start();
    if !body
        .get(..CALENDAR_START.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(CALENDAR_START))
    {
        return Err(FeedError::invalid_calendar(
            "data does not start with BEGIN:VCALENDAR",
        ));
    }

    let calendar = read_calendar(body).map_err(|e| {
        FeedError::invalid_calendar(format!("failed to parse calendar data: {}", e))
    })?;

    let vevents: Vec<&Component<'_>> = calendar
        .components
        .iter()
        .filter(|component| component.name == "VEVENT")
        .collect();

    // The parser unescapes CATEGORIES before we can split it, so the lists
    // are read from the raw lines instead.
    let mut raw_categories = raw_category_lists(body);
    if raw_categories.len() != vevents.len() {
        warn!(
            parsed = vevents.len(),
            scanned = raw_categories.len(),
            "VEVENT count mismatch, using parsed CATEGORIES values"
        );
        raw_categories = vevents.iter().map(|v| parsed_categories(v)).collect();
    }

    let entries: Vec<RawCalendarEntry> = vevents
        .into_iter()
        .zip(raw_categories)
        .map(|(vevent, categories)| decode_event(vevent, categories))
        .collect();

    debug!(count = entries.len(), "Decoded calendar entries");
    Ok(entries)
}

/// Decodes a single VEVENT component.
fn decode_event(vevent: &Component<'_>, categories: Vec<String>) -> RawCalendarEntry {
    let entry = RawCalendarEntry {
        uid: vevent.find_prop("UID").map(|p| p.val.as_ref().trim().to_string()),
        summary: text_prop(vevent, "SUMMARY"),
        description: text_prop(vevent, "DESCRIPTION"),
        location: text_prop(vevent, "LOCATION"),
        url: vevent.find_prop("URL").map(|p| p.val.as_ref().trim().to_string()),
        dtstart: time_prop(vevent, "DTSTART"),
        dtend: time_prop(vevent, "DTEND"),
        categories,
    };

    debug!(
        uid = %entry.display_uid(),
        summary = ?entry.summary,
        start = ?entry.dtstart,
        "Decoded entry from ICS"
    );

    entry
}

/// Reads a TEXT property; the parser has already unescaped it.
fn text_prop(vevent: &Component<'_>, name: &str) -> Option<String> {
    vevent.find_prop(name).map(|p| p.val.to_string())
}

/// Reads a DATE or DATE-TIME property.
fn time_prop(vevent: &Component<'_>, name: &str) -> Option<EventTime> {
    let prop = vevent.find_prop(name)?;
    match DatePerhapsTime::try_from(prop) {
        Ok(value) => Some(to_event_time(value)),
        Err(_) => {
            warn!(
                property = name,
                value = %prop.val,
                "Ignoring unreadable date value"
            );
            None
        }
    }
}

/// Converts icalendar's value into an [`EventTime`], keeping the zone as a label.
fn to_event_time(value: DatePerhapsTime) -> EventTime {
    match value {
        DatePerhapsTime::Date(date) => EventTime::from_date(date),
        DatePerhapsTime::DateTime(cdt) => EventTime::from_datetime(match cdt {
            CalendarDateTime::Utc(dt) => ZonedDateTime::utc(dt.naive_utc()),
            CalendarDateTime::Floating(naive) => ZonedDateTime::floating(naive),
            CalendarDateTime::WithTimezone { date_time, tzid } => {
                ZonedDateTime::named(date_time, tzid)
            }
        }),
    }
}

/// Fallback when the raw scan disagrees with the parser: values arrive
/// unescaped, so escaped commas can no longer be told apart.
fn parsed_categories(vevent: &Component<'_>) -> Vec<String> {
    vevent
        .properties
        .iter()
        .filter(|p| p.name.as_str().eq_ignore_ascii_case(CATEGORIES))
        .flat_map(|p| p.val.as_ref().split(','))
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Collects the CATEGORIES of every top-level VEVENT from unfolded ICS
/// text, in document order, splitting on unescaped commas before unescaping.
fn raw_category_lists(unfolded: &str) -> Vec<Vec<String>> {
    let mut lists = Vec::new();
    let mut stack: Vec<&str> = Vec::new();

    for line in unfolded.lines() {
        let line = line.trim_end_matches('\r');
        let Some((name, value)) = split_content_line(line) else {
            continue;
        };

        if name.eq_ignore_ascii_case("BEGIN") {
            let component = value.trim();
            let top_level = stack
                .last()
                .is_some_and(|parent| parent.eq_ignore_ascii_case("VCALENDAR"));
            if top_level && component.eq_ignore_ascii_case("VEVENT") {
                lists.push(Vec::new());
            }
            stack.push(component);
        } else if name.eq_ignore_ascii_case("END") {
            stack.pop();
        } else if name.eq_ignore_ascii_case(CATEGORIES)
            && stack.len() == 2
            && stack[1].eq_ignore_ascii_case("VEVENT")
        {
            if let Some(list) = lists.last_mut() {
                list.extend(split_list_value(value));
            }
        }
    }

    lists
}

/// Splits a content line into its property name and raw value. Parameters
/// are dropped; colons inside quoted parameter values are skipped.
fn split_content_line(line: &str) -> Option<(&str, &str)> {
    let name_end = line.find([';', ':'])?;
    let mut in_quotes = false;
    for (i, c) in line[name_end..].char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ':' if !in_quotes => {
                return Some((line[..name_end].trim(), &line[name_end + i + 1..]));
            }
            _ => {}
        }
    }
    None
}

fn split_list_value(value: &str) -> Vec<String> {
    split_escaped_commas(value)
        .into_iter()
        .map(|item| unescape_text(item).trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

/// Splits on commas that are not escaped with a backslash.
fn split_escaped_commas(value: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut escaped = false;
    for (i, c) in value.char_indices() {
        match c {
            '\\' if !escaped => escaped = true,
            ',' if !escaped => {
                parts.push(&value[start..i]);
                start = i + 1;
            }
            _ => escaped = false,
        }
    }
    parts.push(&value[start..]);
    parts
}

/// Reverses RFC 5545 TEXT escaping (`\n`, `\N`, `\,`, `\;`, `\\`).
///
/// Unknown escapes are kept as written.
pub fn unescape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => out.push('\n'),
            Some(other @ ('\\' | ',' | ';' | ':')) => out.push(other),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
