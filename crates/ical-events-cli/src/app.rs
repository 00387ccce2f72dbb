//! The generator run: config → calendar → events → page → file → deploy.

use chrono::{Local, NaiveDate};
use ical_events_core::CanonicalEvent;
use ical_events_feed::{decode_calendar, load_source, run_pipeline_on};
use tracing::{info, warn};

use crate::cli::Cli;
use crate::config::{Config, load_config};
use crate::deploy::deploy_pages;
use crate::error::AppResult;
use crate::output::{output_dir, write_output};
use crate::render::render_page;

/// Runs the generator as configured by the command line.
pub async fn run(cli: &Cli) -> AppResult<()> {
    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());

    let mut config = load_config(&cli.config)?;
    if let Some(output) = &cli.output {
        config.output.file = output.clone();
    }

    let count = build_site(&config, today).await?;
    println!(
        "Generated {} events \u{2192} {}",
        count,
        config.output.file.display()
    );

    if let Some(project) = &config.wrangler_pages_project {
        println!("Deploying to Cloudflare Pages project: {}", project);
        deploy_pages(&output_dir(&config.output.file), project).await?;
    }

    Ok(())
}

/// Loads the calendar and returns the events to list, in display order.
pub async fn collect_events(config: &Config, today: NaiveDate) -> AppResult<Vec<CanonicalEvent>> {
    let filters = config.filters.to_criteria(today);
    let ics = load_source(&config.calendar).await?;
    let entries = decode_calendar(&ics)?;
    let events = run_pipeline_on(&entries, &filters, today)?;

    info!(
        decoded = entries.len(),
        listed = events.len(),
        window_start = %filters.start_date,
        window_end = %filters.effective_end_date(today),
        "Collected events"
    );
    Ok(events)
}

/// Generates the page and writes it; returns the number of listed events.
pub async fn build_site(config: &Config, today: NaiveDate) -> AppResult<usize> {
    let events = collect_events(config, today).await?;
    if events.is_empty() {
        warn!("No events found matching the configured filters");
    }

    let html = render_page(config, &events)?;
    write_output(&html, &config.output.file).await?;
    Ok(events.len())
}
