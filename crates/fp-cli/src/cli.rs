//! Command-line argument definitions.

use std::path::PathBuf;

use chrono::NaiveTime;
use clap::Parser;
use fp_core::time::parse_clock_time;
use fp_core::{ALL, ALL_DAYS, SortKey};

use crate::TableFormat;

/// Search the Chaos Communication Congress Fahrplan.
///
/// Downloads the schedules of 32C3 to 36C3, rC3 and rC3 2021, filters
/// their talks and prints the matches as a table.
#[derive(Debug, Parser)]
#[command(name = "fahrplan", version, about, long_about = None)]
pub struct Cli {
    /// Name of a speaker you want to search.
    #[arg(short, long)]
    pub speaker: Option<String>,

    /// A part of the title of the talk(s) you want to search.
    #[arg(short, long)]
    pub title: Option<String>,

    /// A part of the track description you want to search.
    #[arg(long)]
    pub track: Option<String>,

    /// Day you want to filter, or -1 for all days.
    #[arg(short, long, default_value_t = ALL_DAYS, allow_negative_numbers = true)]
    pub day: i64,

    /// Show talks running at (or starting in the same hour as) this time, as HH:MM.
    #[arg(long, value_parser = parse_clock_time)]
    pub start: Option<NaiveTime>,

    /// Name of the room you want to filter, or 'all' for all rooms.
    #[arg(short, long, default_value = ALL)]
    pub room: String,

    /// Conference acronym (e.g. 36c3, rc3) to filter on, 'all' for all conferences.
    #[arg(short, long)]
    pub conference: Option<String>,

    /// Show talk abstracts.
    #[arg(long)]
    pub show_abstract: bool,

    /// Show talk descriptions.
    #[arg(long)]
    pub show_description: bool,

    /// Sort by day|speakers|title|track|room|talk_start.
    #[arg(long)]
    pub sort: Option<SortKey>,

    /// Reverse results.
    #[arg(long)]
    pub reverse: bool,

    /// Table layout.
    #[arg(long, value_enum)]
    pub tablefmt: Option<TableFormat>,

    /// Wrap text columns at this many characters.
    #[arg(long)]
    pub column_width: Option<usize>,

    /// Clear the response cache and download all schedules again.
    #[arg(long)]
    pub update_cache: bool,

    /// Filter out talks that lie in the past.
    #[arg(long)]
    pub no_past: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_mean_no_filtering() {
        let cli = Cli::try_parse_from(["fahrplan"]).unwrap();
        assert_eq!(cli.day, ALL_DAYS);
        assert_eq!(cli.room, ALL);
        assert_eq!(cli.conference, None);
        assert_eq!(cli.start, None);
        assert!(!cli.no_past);
    }

    #[test]
    fn parses_filters() {
        let cli = Cli::try_parse_from([
            "fahrplan", "-s", "carina", "-c", "32c3", "-d", "2", "--start", "14:00", "--sort",
            "talk_start", "--reverse", "--tablefmt", "github",
        ])
        .unwrap();
        assert_eq!(cli.speaker.as_deref(), Some("carina"));
        assert_eq!(cli.conference.as_deref(), Some("32c3"));
        assert_eq!(cli.day, 2);
        assert_eq!(cli.start, NaiveTime::from_hms_opt(14, 0, 0));
        assert_eq!(cli.sort, Some(SortKey::TalkStart));
        assert!(cli.reverse);
        assert_eq!(cli.tablefmt, Some(TableFormat::Github));
    }

    #[test]
    fn accepts_negative_day() {
        let cli = Cli::try_parse_from(["fahrplan", "--day", "-1"]).unwrap();
        assert_eq!(cli.day, -1);
    }

    #[test]
    fn rejects_unknown_sort_key() {
        assert!(Cli::try_parse_from(["fahrplan", "--sort", "duration"]).is_err());
    }

    #[test]
    fn rejects_malformed_start() {
        assert!(Cli::try_parse_from(["fahrplan", "--start", "noon"]).is_err());
    }
}
