//! Sorting and shaping of matched talks into table rows.
//!
//! Rendering the rows is left to the caller; this module only decides row
//! order, columns and cell contents.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::TalkRecord;

/// Message shown instead of a table when there is nothing to show.
pub const NO_TALKS_MESSAGE: &str = "No talks in this period.";

/// Presentation errors. Callers show [`NO_TALKS_MESSAGE`] for all of them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PresentError {
    /// No talks matched.
    #[error("no talks to present")]
    NoTalks,
    /// The requested sort field is not sortable.
    #[error("cannot sort by {key:?}, expected one of: {}", SortKey::NAMES.join(", "))]
    UnknownSortKey { key: String },
}

/// Fields talks can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Day,
    Speakers,
    Title,
    Track,
    Room,
    TalkStart,
}

impl SortKey {
    /// Accepted names, in help order.
    pub const NAMES: [&'static str; 6] =
        ["day", "speakers", "title", "track", "room", "talk_start"];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Speakers => "speakers",
            Self::Title => "title",
            Self::Track => "track",
            Self::Room => "room",
            Self::TalkStart => "talk_start",
        }
    }

    fn sort(self, talks: &mut [TalkRecord]) {
        // `sort_by` is stable, ties keep flattening order.
        match self {
            Self::Day => talks.sort_by_key(|t| t.day),
            Self::Speakers => talks.sort_by(|a, b| a.speakers.cmp(&b.speakers)),
            Self::Title => talks.sort_by(|a, b| a.title.cmp(&b.title)),
            Self::Track => talks.sort_by(|a, b| a.track.cmp(&b.track)),
            Self::Room => talks.sort_by(|a, b| a.room.cmp(&b.room)),
            Self::TalkStart => talks.sort_by(|a, b| a.talk_start.cmp(&b.talk_start)),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = PresentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(Self::Day),
            "speakers" => Ok(Self::Speakers),
            "title" => Ok(Self::Title),
            "track" => Ok(Self::Track),
            "room" => Ok(Self::Room),
            "talk_start" => Ok(Self::TalkStart),
            _ => Err(PresentError::UnknownSortKey { key: s.to_string() }),
        }
    }
}

/// A table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Conference,
    Day,
    Start,
    Duration,
    Room,
    Title,
    Speakers,
    Track,
    Abstract,
    Description,
}

impl Column {
    /// Columns shown for every talk.
    pub const BASE: [Self; 8] = [
        Self::Conference,
        Self::Day,
        Self::Start,
        Self::Duration,
        Self::Room,
        Self::Title,
        Self::Speakers,
        Self::Track,
    ];

    #[must_use]
    pub const fn header(&self) -> &'static str {
        match self {
            Self::Conference => "Conference",
            Self::Day => "Day",
            Self::Start => "Talk Start",
            Self::Duration => "Duration",
            Self::Room => "Room",
            Self::Title => "Title",
            Self::Speakers => "Speaker(s)",
            Self::Track => "Track",
            Self::Abstract => "Abstract",
            Self::Description => "Description",
        }
    }

    fn cell(self, talk: &TalkRecord) -> String {
        match self {
            Self::Conference => talk.conference_title.clone(),
            Self::Day => talk.day.to_string(),
            Self::Start => talk.talk_start.clone(),
            Self::Duration => talk.talk_duration.clone(),
            Self::Room => talk.room.clone(),
            Self::Title => talk.title.clone(),
            Self::Speakers => talk.speakers.clone(),
            Self::Track => talk.track.clone(),
            Self::Abstract => talk.talk_abstract.clone(),
            Self::Description => talk.talk_description.clone(),
        }
    }

    /// Whether the column holds free text that may be wrapped.
    const fn is_text(self) -> bool {
        !matches!(self, Self::Day)
    }
}

/// How matched talks are ordered and shaped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresentOptions {
    pub sort: Option<SortKey>,
    /// Reverse the final order, after sorting.
    pub reverse: bool,
    pub show_abstract: bool,
    pub show_description: bool,
    /// Cut text cells into chunks of this many characters.
    pub column_width: Option<usize>,
}

impl PresentOptions {
    /// Columns in display order.
    pub fn columns(&self) -> Vec<Column> {
        let mut columns = Column::BASE.to_vec();
        if self.show_abstract {
            columns.push(Column::Abstract);
        }
        if self.show_description {
            columns.push(Column::Description);
        }
        columns
    }
}

/// Talks shaped into rows of display strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TalkTable {
    pub title: String,
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl TalkTable {
    pub fn headers(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(Column::header)
    }
}

/// Sorts, orders and shapes `talks` into a table.
pub fn present(
    mut talks: Vec<TalkRecord>,
    options: &PresentOptions,
) -> Result<TalkTable, PresentError> {
    if let Some(key) = options.sort {
        key.sort(&mut talks);
    }
    if options.reverse {
        talks.reverse();
    }

    let first = talks.first().ok_or(PresentError::NoTalks)?;
    let title = format!("Your conference information for {}", first.conference_title);

    let columns = options.columns();
    let rows = talks
        .iter()
        .map(|talk| {
            columns
                .iter()
                .map(|column| {
                    let cell = column.cell(talk);
                    match options.column_width {
                        Some(width) if column.is_text() => wrap_cell(&cell, width),
                        _ => cell,
                    }
                })
                .collect()
        })
        .collect();

    Ok(TalkTable {
        title,
        columns,
        rows,
    })
}

/// Cuts `value` into `width`-character chunks joined by `" \n"`.
///
/// Values shorter than `width` are returned unchanged.
pub fn wrap_cell(value: &str, width: usize) -> String {
    let chars: Vec<char> = value.chars().collect();
    if width == 0 || chars.len() < width {
        return value.to_string();
    }
    chars
        .chunks(width)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" \n")
}
