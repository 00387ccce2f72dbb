//! Error types for loading, decoding, and normalizing calendar feeds.
//!
//! [`FeedError`] covers I/O and decoding of the feed as a whole.
//! [`NormalizeError`] is raised only when an entry breaks the decoder's
//! contract; ordinary incomplete entries are skipped, not reported.

use std::fmt;
use thiserror::Error;

/// The category of a feed error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedErrorCode {
    /// The calendar file does not exist.
    NotFound,
    /// The calendar file exists but could not be read.
    Io,
    /// The HTTP request failed before a response arrived.
    Network,
    /// The server answered with a non-success status.
    HttpStatus,
    /// The payload is not a readable iCalendar document.
    InvalidCalendar,
}

impl FeedErrorCode {
    /// Returns a machine-friendly name for this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Io => "io_error",
            Self::Network => "network_error",
            Self::HttpStatus => "http_status",
            Self::InvalidCalendar => "invalid_calendar",
        }
    }
}

impl fmt::Display for FeedErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An error that occurred while loading or decoding a calendar feed.
#[derive(Debug, Error)]
pub struct FeedError {
    code: FeedErrorCode,
    message: String,
    /// The feed location (URL or path), when known.
    source_location: Option<String>,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl FeedError {
    /// Creates a new feed error with the given code and message.
    pub fn new(code: FeedErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source_location: None,
            source: None,
        }
    }

    /// Creates a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(FeedErrorCode::NotFound, message)
    }

    /// Creates an I/O error.
    pub fn io(message: impl Into<String>) -> Self {
        Self::new(FeedErrorCode::Io, message)
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(FeedErrorCode::Network, message)
    }

    /// Creates an HTTP status error.
    pub fn http_status(message: impl Into<String>) -> Self {
        Self::new(FeedErrorCode::HttpStatus, message)
    }

    /// Creates an invalid calendar error.
    pub fn invalid_calendar(message: impl Into<String>) -> Self {
        Self::new(FeedErrorCode::InvalidCalendar, message)
    }

    /// Sets the feed location for this error.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.source_location = Some(location.into());
        self
    }

    /// Sets the source error for this error.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    pub fn code(&self) -> FeedErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn location(&self) -> Option<&str> {
        self.source_location.as_deref()
    }
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)?;
        if let Some(ref location) = self.source_location {
            write!(f, " ({})", location)?;
        }
        Ok(())
    }
}

/// A specialized Result type for feed operations.
pub type FeedResult<T> = Result<T, FeedError>;

/// A calendar entry that violates the decoder's typing contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// DTSTART and DTEND use different value types (one date, one date-time).
    #[error("entry {uid}: DTSTART is a {start_kind} but DTEND is a {end_kind}")]
    MismatchedBoundaryKinds {
        uid: String,
        start_kind: &'static str,
        end_kind: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_code_names() {
        assert_eq!(FeedErrorCode::NotFound.as_str(), "not_found");
        assert_eq!(FeedErrorCode::InvalidCalendar.as_str(), "invalid_calendar");
    }

    #[test]
    fn display_includes_location() {
        let err = FeedError::not_found("calendar file not found")
            .with_location("/nonexistent/calendar.ics");
        assert_eq!(
            err.to_string(),
            "not_found: calendar file not found (/nonexistent/calendar.ics)"
        );
        assert_eq!(err.location(), Some("/nonexistent/calendar.ics"));
    }

    #[test]
    fn keeps_source() {
        use std::error::Error;
        let io_err = std::io::Error::other("permission denied");
        let err = FeedError::io("cannot read calendar file").with_source(io_err);
        assert_eq!(err.code(), FeedErrorCode::Io);
        assert!(err.source().is_some());
    }

    #[test]
    fn normalize_error_message() {
        let err = NormalizeError::MismatchedBoundaryKinds {
            uid: "ev-1".to_string(),
            start_kind: "date",
            end_kind: "date-time",
        };
        assert_eq!(
            err.to_string(),
            "entry ev-1: DTSTART is a date but DTEND is a date-time"
        );
    }
}
