//! Page markup.

use std::fmt::{self, Write};

use ical_events_core::{CanonicalEvent, group_by_month, html_escape, pluralize_events};

use super::{DEFAULT_THEME, THEMES};
use crate::config::Config;

const HEART_EMPTY: char = '\u{2661}';
const TIME_FORMAT: &str = "%H:%M";

/// Everything the page template needs, already prepared.
pub(super) struct Page<'a> {
    pub config: &'a Config,
    pub events: &'a [CanonicalEvent],
    pub css: String,
    pub js: String,
    pub jsonld: String,
}

impl Page<'_> {
    pub fn render(&self) -> Result<String, fmt::Error> {
        let mut out = String::with_capacity(self.css.len() + self.js.len() + 4096);
        writeln!(out, "<!DOCTYPE html>")?;
        writeln!(out, "<html lang=\"en\">")?;
        self.write_head(&mut out)?;
        writeln!(out, "<body data-theme=\"{}\">", DEFAULT_THEME)?;
        writeln!(out, "<a class=\"skip-link\" href=\"#events\">Skip to events</a>")?;
        self.write_header(&mut out)?;
        self.write_main(&mut out)?;
        writeln!(out, "<script>\n{}\n</script>", self.js)?;
        writeln!(out, "</body>")?;
        writeln!(out, "</html>")?;
        Ok(out)
    }

    fn write_head(&self, out: &mut String) -> fmt::Result {
        let site = &self.config.site;
        let meta = &self.config.meta;
        let title = html_escape(&site.title);
        let description = html_escape(&site.description);

        writeln!(out, "<head>")?;
        writeln!(out, "<meta charset=\"utf-8\">")?;
        writeln!(
            out,
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">"
        )?;
        writeln!(out, "<title>{}</title>", title)?;
        writeln!(out, "<meta name=\"description\" content=\"{}\">", description)?;

        // Open Graph
        writeln!(out, "<meta property=\"og:title\" content=\"{}\">", title)?;
        writeln!(out, "<meta property=\"og:description\" content=\"{}\">", description)?;
        writeln!(out, "<meta property=\"og:type\" content=\"website\">")?;
        if let Some(url) = &site.homepage_url {
            writeln!(out, "<meta property=\"og:url\" content=\"{}\">", html_escape(url))?;
        }
        if let Some(image) = &meta.image {
            writeln!(out, "<meta property=\"og:image\" content=\"{}\">", html_escape(image))?;
        }

        // Twitter
        let card = if meta.image.is_some() {
            "summary_large_image"
        } else {
            "summary"
        };
        writeln!(out, "<meta name=\"twitter:card\" content=\"{}\">", card)?;
        if let Some(username) = &site.x_username {
            let handle = html_escape(username.trim_start_matches('@'));
            writeln!(out, "<meta name=\"twitter:site\" content=\"@{}\">", handle)?;
            writeln!(out, "<meta name=\"twitter:creator\" content=\"@{}\">", handle)?;
        }
        writeln!(out, "<meta name=\"twitter:title\" content=\"{}\">", title)?;
        writeln!(out, "<meta name=\"twitter:description\" content=\"{}\">", description)?;
        if let Some(image) = &meta.image {
            writeln!(out, "<meta name=\"twitter:image\" content=\"{}\">", html_escape(image))?;
        }

        for (name, content) in &meta.custom {
            writeln!(
                out,
                "<meta name=\"{}\" content=\"{}\">",
                html_escape(name),
                html_escape(content)
            )?;
        }

        writeln!(out, "<style>\n{}\n</style>", self.css)?;
        writeln!(
            out,
            "<script type=\"application/ld+json\">\n{}\n</script>",
            self.jsonld
        )?;
        writeln!(out, "</head>")
    }

    fn write_header(&self, out: &mut String) -> fmt::Result {
        let site = &self.config.site;

        writeln!(out, "<header class=\"site-header\">")?;
        if let Some(url) = &site.homepage_url {
            writeln!(
                out,
                "  <a class=\"home-link\" href=\"{}\">&larr; Back to site</a>",
                html_escape(url)
            )?;
        }
        writeln!(out, "  <h1 class=\"site-title\">{}</h1>", html_escape(&site.title))?;
        writeln!(
            out,
            "  <p class=\"site-description\">{}</p>",
            html_escape(&site.description)
        )?;
        write_theme_picker(out)?;
        writeln!(out, "</header>")
    }

    fn write_main(&self, out: &mut String) -> fmt::Result {
        writeln!(out, "<main id=\"events\" class=\"event-list\">")?;
        writeln!(out, "<div class=\"filter-bar\">")?;
        writeln!(
            out,
            "  <span class=\"event-count\" aria-live=\"polite\">{}</span>",
            pluralize_events(self.events.len())
        )?;
        writeln!(
            out,
            "  <button type=\"button\" class=\"favorites-toggle\" aria-pressed=\"false\">Favorites Only</button>"
        )?;
        writeln!(out, "</div>")?;

        for group in group_by_month(self.events) {
            writeln!(
                out,
                "<h2 class=\"month-separator\" data-month=\"{}\">{}</h2>",
                html_escape(group.month_key),
                html_escape(&group.label())
            )?;
            for event in &group.events {
                write_event_card(out, event)?;
            }
        }

        if self.events.is_empty() {
            writeln!(
                out,
                "<p class=\"empty-state\">No upcoming events. Check back soon.</p>"
            )?;
        } else {
            writeln!(out, "<p class=\"empty-state hidden\"></p>")?;
        }
        writeln!(out, "</main>")
    }
}

fn write_theme_picker(out: &mut String) -> fmt::Result {
    writeln!(
        out,
        "  <div class=\"theme-picker\" role=\"radiogroup\" aria-label=\"Color theme\">"
    )?;
    for (value, label) in THEMES {
        writeln!(
            out,
            "    <button type=\"button\" class=\"theme-btn\" role=\"radio\" aria-checked=\"{}\" data-theme-value=\"{}\">{}</button>",
            *value == DEFAULT_THEME,
            value,
            label
        )?;
    }
    writeln!(out, "  </div>")
}

/// Writes one event card.
pub(super) fn write_event_card(out: &mut String, event: &CanonicalEvent) -> fmt::Result {
    let uid = html_escape(&event.uid);
    let anchor = html_escape(&event.anchor_id);
    let summary = html_escape(&event.summary);

    writeln!(
        out,
        "<article class=\"event-card\" id=\"event-{}\" data-uid=\"{}\" data-month=\"{}\">",
        anchor,
        uid,
        html_escape(&event.month_key)
    )?;

    writeln!(out, "  <div class=\"event-date\">")?;
    writeln!(
        out,
        "    <time datetime=\"{}\">{}</time>",
        event.start_date,
        html_escape(&event.date_display)
    )?;
    if event.is_multi_day() {
        writeln!(
            out,
            "    <span class=\"event-duration\">{} days</span>",
            event.duration_days
        )?;
    }
    if let Some(range) = time_range(event) {
        writeln!(out, "    <span class=\"event-time\">{}</span>", html_escape(&range))?;
    }
    writeln!(out, "  </div>")?;

    match &event.url {
        Some(url) => writeln!(
            out,
            "  <h3 class=\"event-title\"><a href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a></h3>",
            html_escape(url),
            summary
        )?,
        None => writeln!(out, "  <h3 class=\"event-title\">{}</h3>", summary)?,
    }

    if let Some(location) = &event.location {
        writeln!(out, "  <p class=\"event-location\">{}</p>", html_escape(location))?;
    }
    if let Some(description) = &event.description {
        writeln!(
            out,
            "  <p class=\"event-description\">{}</p>",
            html_escape(description).replace('\n', "<br>")
        )?;
    }
    if !event.categories.is_empty() {
        writeln!(out, "  <ul class=\"event-categories\" aria-label=\"Categories\">")?;
        for category in &event.categories {
            writeln!(out, "    <li class=\"category-tag\">{}</li>", html_escape(category))?;
        }
        writeln!(out, "  </ul>")?;
    }

    writeln!(out, "  <div class=\"event-actions\">")?;
    writeln!(
        out,
        "    <button type=\"button\" class=\"action-btn copy-btn\" data-anchor=\"{}\" aria-label=\"Copy link to {}\">Copy link<span class=\"copy-feedback\" role=\"status\">Copied!</span></button>",
        anchor, summary
    )?;
    writeln!(
        out,
        "    <button type=\"button\" class=\"action-btn favorite-btn\" data-uid=\"{}\" aria-pressed=\"false\" aria-label=\"Add to favorites\">{}</button>",
        uid, HEART_EMPTY
    )?;
    writeln!(out, "  </div>")?;
    writeln!(out, "</article>")
}

/// Wall-clock time range for timed events, e.g. `18:00–20:00 UTC`.
fn time_range(event: &CanonicalEvent) -> Option<String> {
    let start = event.start_datetime.as_ref()?;
    let mut range = start.local.format(TIME_FORMAT).to_string();
    if let Some(end) = &event.end_datetime {
        range.push('\u{2013}');
        if end.date() != start.date() {
            range.push_str(&end.local.format("%b %d ").to_string());
        }
        range.push_str(&end.local.format(TIME_FORMAT).to_string());
    }
    if let Some(label) = start.zone.label() {
        range.push(' ');
        range.push_str(label);
    }
    Some(range)
}
