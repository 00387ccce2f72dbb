//! Command-line interface definition.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use ical_events_core::{TracingConfig, TracingOutputFormat};

/// ical-events - Generate a static HTML event listing from an ICS calendar
#[derive(Debug, Parser)]
#[command(name = "ical-events")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to YAML configuration file
    #[arg(env = "ICAL_EVENTS_CONFIG")]
    pub config: PathBuf,

    /// Override output file path
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Treat this date (YYYY-MM-DD) as today when resolving default filters
    #[arg(long)]
    pub today: Option<NaiveDate>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    /// Log filter directive, e.g. `ical_events_feed=trace` (overrides RUST_LOG)
    #[arg(long, env = "ICAL_EVENTS_LOG")]
    pub log_filter: Option<String>,
}

/// Log line format on stderr.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl From<LogFormat> for TracingOutputFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Compact => Self::Compact,
            LogFormat::Json => Self::Json,
        }
    }
}

impl Cli {
    /// Builds the tracing configuration for these flags.
    pub fn tracing_config(&self) -> TracingConfig {
        TracingConfig {
            verbose: self.debug,
            format: self.log_format.into(),
            filter: self.log_filter.clone(),
        }
    }
}
