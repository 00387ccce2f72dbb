//! schema.org structured data for the listing page.

use ical_events_core::CanonicalEvent;
use serde::Serialize;

use super::RenderError;
use crate::config::{Config, OrganizationConfig};

const SCHEMA_CONTEXT: &str = "https://schema.org";

/// The JSON-LD document embedded in the page head.
///
/// With one item the item's fields sit at the top level; with several they
/// go under `@graph`; with none only `@context` remains.
#[derive(Debug, Serialize)]
pub struct JsonLdDocument<'a> {
    #[serde(rename = "@context")]
    context: &'static str,
    #[serde(flatten)]
    body: Option<JsonLdBody<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum JsonLdBody<'a> {
    Single(JsonLdItem<'a>),
    Graph {
        #[serde(rename = "@graph")]
        graph: Vec<JsonLdItem<'a>>,
    },
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum JsonLdItem<'a> {
    Organization(OrganizationLd<'a>),
    Event(EventLd<'a>),
}

#[derive(Debug, Serialize)]
struct OrganizationLd<'a> {
    #[serde(rename = "@type")]
    kind: &'static str,
    name: &'a str,
    url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    logo: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EventLd<'a> {
    #[serde(rename = "@type")]
    kind: &'static str,
    name: &'a str,
    start_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<PlaceLd<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct PlaceLd<'a> {
    #[serde(rename = "@type")]
    kind: &'static str,
    name: &'a str,
}

impl<'a> OrganizationLd<'a> {
    fn from_config(org: &'a OrganizationConfig) -> Self {
        Self {
            kind: "Organization",
            name: &org.name,
            url: &org.url,
            logo: org.logo.as_deref(),
        }
    }
}

impl<'a> EventLd<'a> {
    /// Timed events carry their wall-clock times; all-day events carry dates.
    fn from_event(event: &'a CanonicalEvent) -> Self {
        let start_date = match &event.start_datetime {
            Some(start) => start.to_iso_string(),
            None => event.start_date.to_string(),
        };
        let end_date = match &event.end_datetime {
            Some(end) => Some(end.to_iso_string()),
            None => event.end_date.map(|d| d.to_string()),
        };

        Self {
            kind: "Event",
            name: &event.summary,
            start_date,
            end_date,
            description: event.description.as_deref(),
            location: event.location.as_deref().map(|name| PlaceLd {
                kind: "Place",
                name,
            }),
            url: event.url.as_deref(),
        }
    }
}

impl<'a> JsonLdDocument<'a> {
    /// Builds the document for a page.
    pub fn new(config: &'a Config, events: &'a [CanonicalEvent]) -> Self {
        let mut items: Vec<JsonLdItem<'a>> = Vec::with_capacity(events.len() + 1);
        if let Some(org) = &config.structured_data.organization {
            items.push(JsonLdItem::Organization(OrganizationLd::from_config(org)));
        }
        items.extend(events.iter().map(|e| JsonLdItem::Event(EventLd::from_event(e))));

        let body = match items.len() {
            0 => None,
            1 => items.pop().map(JsonLdBody::Single),
            _ => Some(JsonLdBody::Graph { graph: items }),
        };

        Self {
            context: SCHEMA_CONTEXT,
            body,
        }
    }

    /// Serializes the document for a `<script type="application/ld+json">` body.
    ///
    /// `</` is written as `<\/` so text can never close the script element.
    pub fn to_script_body(&self) -> Result<String, RenderError> {
        let json = serde_json::to_string_pretty(self)?;
        Ok(json.replace("</", "<\\/"))
    }
}
