//! Core types: temporal values, canonical events, filters, display formatting

pub mod event;
pub mod filter;
pub mod format;
pub mod time;
pub mod tracing;

pub use event::{ANCHOR_ID_LEN, CanonicalEvent, EventSpan, UNTITLED_EVENT, anchor_id};
pub use filter::{FilterCriteria, one_year_after};
pub use format::{
    MonthGroup, SPAN_SEPARATOR, format_date_display, group_by_month, html_escape, month_key,
    month_label, pluralize_events,
};
pub use time::{EventTime, TimeZoneRef, ZonedDateTime};
pub use crate::tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
