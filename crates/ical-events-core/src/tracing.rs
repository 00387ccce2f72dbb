//! Tracing setup for ical-events.
//!
//! Logs always go to stderr so the generator's own stdout summary stays
//! clean for scripts.
//!
//! ```ignore
//! use ical_events_core::tracing::{init_tracing, TracingConfig};
//!
//! init_tracing(TracingConfig { verbose: true, ..Default::default() })?;
//! ```

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, prelude::*};

/// Module path prefixes of the workspace crates.
const CRATE_TARGETS: &[&str] = &[
    "ical_events",
    "ical_events_core",
    "ical_events_feed",
    "ical_events_cli",
];

/// Errors that can occur during tracing initialization
#[derive(Debug, Error)]
pub enum TracingError {
    /// Failed to set global subscriber
    #[error("failed to set global tracing subscriber: {0}")]
    SetGlobalSubscriber(#[from] tracing::subscriber::SetGlobalDefaultError),

    /// Failed to parse env filter directive
    #[error("failed to parse env filter: {0}")]
    EnvFilter(#[from] tracing_subscriber::filter::ParseError),
}

/// Output format for tracing logs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TracingOutputFormat {
    /// Compact single-line format
    #[default]
    Compact,
    /// One JSON object per line, for CI log collectors
    Json,
}

/// What the command line decides about logging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TracingConfig {
    /// Debug level, with file, line and target on each event.
    pub verbose: bool,
    pub format: TracingOutputFormat,
    /// Explicit filter directive; wins over RUST_LOG.
    pub filter: Option<String>,
}

impl TracingConfig {
    /// Level applied to workspace crates when no directive is given.
    pub fn level(&self) -> Level {
        if self.verbose { Level::DEBUG } else { Level::WARN }
    }

    /// The directive used when neither `filter` nor RUST_LOG is set.
    pub fn default_directive(&self) -> String {
        let level = self.level();
        CRATE_TARGETS
            .iter()
            .map(|target| format!("{}={}", target, level))
            .collect::<Vec<_>>()
            .join(",")
    }

    fn env_filter(&self) -> Result<EnvFilter, TracingError> {
        if let Some(directive) = &self.filter {
            return Ok(EnvFilter::try_new(directive)?);
        }
        match EnvFilter::try_from_default_env() {
            Ok(filter) => Ok(filter),
            Err(_) => Ok(EnvFilter::try_new(self.default_directive())?),
        }
    }
}

/// Installs the global subscriber, writing to stderr.
///
/// # Errors
///
/// Fails when a subscriber is already installed or the filter directive
/// does not parse.
pub fn init_tracing(config: TracingConfig) -> Result<(), TracingError> {
    let env_filter = config.env_filter()?;

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_file(config.verbose)
        .with_line_number(config.verbose)
        .with_target(config.verbose);
    let layer: Box<dyn Layer<Registry> + Send + Sync> = match config.format {
        TracingOutputFormat::Compact => layer.compact().without_time().boxed(),
        TracingOutputFormat::Json => layer.json().boxed(),
    };

    let subscriber = tracing_subscriber::registry().with(layer).with(env_filter);
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
