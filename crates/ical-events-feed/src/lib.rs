//! Calendar feed loading, decoding, and normalization.
//!
//! This crate turns a calendar source into an ordered list of display-ready
//! events:
//!
//! - [`load_source`] - Reads ICS text from a URL or a local file
//! - [`decode_calendar`] - Parses ICS text into [`RawCalendarEntry`] values
//! - [`normalize_entry`] - Filters one entry and derives its display fields
//! - [`run_pipeline`] - Normalizes, sorts, and truncates a whole feed
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐
//! │   HTTP(S) URL   │    │   Local file    │
//! └────────┬────────┘    └────────┬────────┘
//!          │                      │
//!          └──────────┬───────────┘
//!                     │ load_source()
//!                     ▼
//!              ┌─────────────┐
//!              │  ICS text   │
//!              └──────┬──────┘
//!                     │ decode_calendar()
//!                     ▼
//!           ┌───────────────────┐
//!           │ RawCalendarEntry  │
//!           └─────────┬─────────┘
//!                     │ run_pipeline()
//!                     ▼
//!           ┌───────────────────┐
//!           │  CanonicalEvent   │
//!           └───────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use ical_events_core::FilterCriteria;
//! use ical_events_feed::{decode_calendar, load_source, run_pipeline};
//!
//! async fn upcoming(source: &str, filters: &FilterCriteria) -> Vec<CanonicalEvent> {
//!     let ics = load_source(source).await?;
//!     let entries = decode_calendar(&ics)?;
//!     run_pipeline(&entries, filters)?
//! }
//! ```

pub mod error;
pub mod ics;
pub mod normalize;
pub mod raw_entry;
pub mod source;

pub use error::{FeedError, FeedErrorCode, FeedResult, NormalizeError};
pub use ics::decode_calendar;
pub use normalize::{normalize_entry, normalize_entry_on, run_pipeline, run_pipeline_on};
pub use raw_entry::RawCalendarEntry;
pub use source::{CalendarSource, FETCH_TIMEOUT, load_source};
