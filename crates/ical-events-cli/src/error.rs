//! Application error types and process exit codes.

use ical_events_feed::{FeedError, NormalizeError};
use thiserror::Error;

use crate::config::ConfigError;
use crate::deploy::DeployError;
use crate::output::OutputError;
use crate::render::RenderError;

/// Result type for a generator run.
pub type AppResult<T> = Result<T, AppError>;

/// Errors that end a generator run.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("calendar source error: {0}")]
    Feed(#[from] FeedError),

    #[error("calendar entry error: {0}")]
    Normalize(#[from] NormalizeError),

    #[error("template rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error(transparent)]
    Output(#[from] OutputError),

    #[error(transparent)]
    Deploy(#[from] DeployError),
}

impl AppError {
    /// Process exit code for this error.
    ///
    /// | code | stage |
    /// |---|---|
    /// | 1 | configuration |
    /// | 2 | fetching, parsing, or normalizing the calendar |
    /// | 3 | rendering |
    /// | 4 | writing the output file |
    /// | 5 | deploying |
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => 1,
            Self::Feed(_) | Self::Normalize(_) => 2,
            Self::Render(_) => 3,
            Self::Output(_) => 4,
            Self::Deploy(_) => 5,
        }
    }
}
