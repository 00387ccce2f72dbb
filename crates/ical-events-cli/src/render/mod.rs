//! HTML rendering of the event listing.
//!
//! The page is a single self-contained document: stylesheets, scripts, and
//! structured data are all inlined so it can be served from any static host.

mod jsonld;
mod page;


use ical_events_core::CanonicalEvent;
use thiserror::Error;

use crate::config::Config;

pub use jsonld::JsonLdDocument;

const STYLESHEETS: [&str; 3] = [
    include_str!("../../assets/styles/base.css"),
    include_str!("../../assets/styles/themes.css"),
    include_str!("../../assets/styles/components.css"),
];

const SCRIPTS: [&str; 3] = [
    include_str!("../../assets/scripts/theme.js"),
    include_str!("../../assets/scripts/favorites.js"),
    include_str!("../../assets/scripts/filter.js"),
];

/// Theme applied before the visitor picks one.
pub const DEFAULT_THEME: &str = "win95";

/// Selectable themes: `data-theme` value and button label.
pub const THEMES: &[(&str, &str)] = &[
    ("win95", "Win95"),
    ("system7", "System 7"),
    ("y2k", "Y2K"),
    ("phosphor", "Phosphor"),
    ("redhat", "Red Hat"),
    ("mr-robot", "Mr. Robot"),
    ("tron", "Tron"),
];

/// Errors that can occur while rendering the page.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write page markup: {0}")]
    Markup(#[from] std::fmt::Error),

    #[error("failed to serialize structured data: {0}")]
    StructuredData(#[from] serde_json::Error),
}

/// Renders the full listing page for `events`, which must already be in
/// display order.
pub fn render_page(config: &Config, events: &[CanonicalEvent]) -> Result<String, RenderError> {
    let jsonld = JsonLdDocument::new(config, events).to_script_body()?;
    let page = page::Page {
        config,
        events,
        css: STYLESHEETS.join("\n"),
        js: SCRIPTS.join("\n"),
        jsonld,
    };

    let html = page.render()?;
    tracing::debug!(events = events.len(), bytes = html.len(), "Rendered listing page");
    Ok(html)
}
