//! CLI, configuration, page rendering, output, deploy
//!
//! This crate provides the `ical-events` command-line interface.

pub mod app;
pub mod cli;
pub mod config;
pub mod deploy;
pub mod error;
pub mod output;
pub mod render;

pub use cli::Cli;
pub use config::{Config, ConfigError, load_config};
pub use error::{AppError, AppResult};
pub use render::{RenderError, render_page};
