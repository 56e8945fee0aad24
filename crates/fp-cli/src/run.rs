//! The search run: fetch, flatten, filter and print talks.

use std::io::Write;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use fp_cache::SqliteCache;
use fp_core::{
    Criteria, NO_TALKS_MESSAGE, PresentOptions, RawSchedule, flatten, present, select,
};
use fp_fetch::Fetcher;

use crate::table::{TableFormat, render};
use crate::{Cli, Config};

/// Runs one search and writes the table (or the no-talks message) to `writer`.
pub fn run<W: Write>(writer: &mut W, cli: &Cli, config: &Config) -> Result<()> {
    let schedules = fetch_schedules(config, cli.update_cache)?;
    let criteria = criteria(cli, config);
    let options = present_options(cli, config);
    let format = cli.tablefmt.unwrap_or(config.table_format);
    write_talks(writer, &schedules, &criteria, &options, format, Utc::now())
}

/// Fetches every configured feed through the response cache.
pub fn fetch_schedules(config: &Config, refresh: bool) -> Result<Vec<RawSchedule>> {
    if let Some(parent) = config.cache_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create cache directory")?;
    }
    let mut cache = SqliteCache::open(&config.cache_path)
        .with_context(|| format!("failed to open {}", config.cache_path.display()))?;
    let fetcher = Fetcher::new(Duration::from_secs(config.timeout_secs))?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to initialize tokio runtime")?;
    let schedules = runtime
        .block_on(fetcher.fetch_all(&config.sources, &mut cache, refresh))
        .context("failed to fetch schedules")?;

    tracing::debug!(schedules = schedules.len(), "fetched schedules");
    Ok(schedules)
}

/// Builds filter criteria from flags, falling back to config defaults.
pub fn criteria(cli: &Cli, config: &Config) -> Criteria {
    let conference = cli
        .conference
        .clone()
        .unwrap_or_else(|| config.conference.clone());
    Criteria {
        speaker: cli.speaker.clone(),
        title: cli.title.clone(),
        track: cli.track.clone(),
        start: cli.start,
        exclude_past: cli.no_past,
        ..Criteria::default()
    }
    .with_conference(conference)
    .with_room(cli.room.clone())
    .with_day(cli.day)
}

pub fn present_options(cli: &Cli, config: &Config) -> PresentOptions {
    PresentOptions {
        sort: cli.sort,
        reverse: cli.reverse,
        show_abstract: cli.show_abstract,
        show_description: cli.show_description,
        column_width: cli.column_width.or(config.column_width),
    }
}

/// Flattens, filters and prints `schedules`.
///
/// Format and parse errors abort; an empty result prints [`NO_TALKS_MESSAGE`].
pub fn write_talks<W: Write>(
    writer: &mut W,
    schedules: &[RawSchedule],
    criteria: &Criteria,
    options: &PresentOptions,
    format: TableFormat,
    now: DateTime<Utc>,
) -> Result<()> {
    let talks = flatten(schedules).context("failed to flatten schedules")?;
    let matching = select(talks, criteria, now).context("failed to filter talks")?;

    match present(matching, options) {
        Ok(table) => write!(writer, "{}", render(&table, format))?,
        Err(err) => {
            tracing::debug!(error = %err, "nothing to present");
            writeln!(writer, "{NO_TALKS_MESSAGE}")?;
        }
    }
    Ok(())
}
