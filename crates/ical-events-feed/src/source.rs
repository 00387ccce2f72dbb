//! Calendar source loading.
//!
//! A source is either an `http(s)://` URL, fetched with a plain GET, or a
//! path on the local filesystem.

use std::time::Duration;

use tracing::{debug, info};
use url::Url;

use crate::error::{FeedError, FeedResult};

/// Timeout applied to remote calendar fetches.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Where a calendar comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarSource {
    /// A remote feed reached over HTTP(S).
    Remote(Url),
    /// A file on the local filesystem.
    File(String),
}

impl CalendarSource {
    /// Classifies a source string. Only `http` and `https` URLs are remote.
    pub fn parse(source: &str) -> Self {
        match Url::parse(source) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Self::Remote(url),
            _ => Self::File(source.to_string()),
        }
    }

    /// Returns `true` for remote sources.
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }

    /// The source as given, for log and error messages.
    pub fn location(&self) -> &str {
        match self {
            Self::Remote(url) => url.as_str(),
            Self::File(path) => path,
        }
    }
}

/// Loads the ICS text of a calendar source.
///
/// # Errors
///
/// - `NotFound` when the file does not exist
/// - `Io` when the file cannot be read
/// - `Network` when the HTTP request fails
/// - `HttpStatus` when the server answers with a non-success status
pub async fn load_source(source: &str) -> FeedResult<String> {
    let source = CalendarSource::parse(source);
    let text = match &source {
        CalendarSource::Remote(url) => fetch_remote(url).await,
        CalendarSource::File(path) => read_file(path).await,
    }
    .map_err(|e| e.with_location(source.location()))?;

    info!(
        source = %source.location(),
        remote = source.is_remote(),
        bytes = text.len(),
        "Loaded calendar source"
    );
    Ok(text)
}

async fn fetch_remote(url: &Url) -> FeedResult<String> {
    debug!(url = %url, "Fetching remote calendar");

    let client = reqwest::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(|e| FeedError::network(format!("failed to create HTTP client: {}", e)))?;

    let response = client.get(url.clone()).send().await.map_err(|e| {
        if e.is_timeout() {
            FeedError::network("request timeout")
        } else if e.is_connect() {
            FeedError::network(format!("connection failed: {}", e))
        } else {
            FeedError::network(format!("request failed: {}", e))
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FeedError::http_status(format!(
            "server returned {}",
            status
        )));
    }

    response
        .text()
        .await
        .map_err(|e| FeedError::network(format!("failed to read response body: {}", e)).with_source(e))
}

async fn read_file(path: &str) -> FeedResult<String> {
    debug!(path, "Reading calendar file");

    tokio::fs::read_to_string(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            FeedError::not_found("calendar file not found").with_source(e)
        } else {
            FeedError::io(format!("cannot read calendar file: {}", e)).with_source(e)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FeedErrorCode;
    use std::io::Write;

    #[test]
    fn classifies_sources() {
        assert!(CalendarSource::parse("https://example.com/cal.ics").is_remote());
        assert!(CalendarSource::parse("http://example.com/cal.ics").is_remote());
        assert!(!CalendarSource::parse("./calendar.ics").is_remote());
        assert!(!CalendarSource::parse("/var/data/calendar.ics").is_remote());
        assert!(!CalendarSource::parse("file:///tmp/calendar.ics").is_remote());
        assert!(!CalendarSource::parse("webcal://example.com/cal.ics").is_remote());
    }

    #[test]
    fn location_echoes_input() {
        assert_eq!(CalendarSource::parse("events.ics").location(), "events.ics");
        assert_eq!(
            CalendarSource::parse("https://example.com/cal.ics").location(),
            "https://example.com/cal.ics"
        );
    }

    #[tokio::test]
    async fn reads_local_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "BEGIN:VCALENDAR\r\nEND:VCALENDAR\r\n").unwrap();

        let text = load_source(file.path().to_str().unwrap()).await.unwrap();
        assert!(text.starts_with("BEGIN:VCALENDAR"));
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.ics");

        let err = load_source(path.to_str().unwrap()).await.unwrap_err();
        assert_eq!(err.code(), FeedErrorCode::NotFound);
        assert_eq!(err.location(), path.to_str());
    }

    #[tokio::test]
    async fn directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();

        let err = load_source(dir.path().to_str().unwrap()).await.unwrap_err();
        assert_eq!(err.code(), FeedErrorCode::Io);
    }
}
