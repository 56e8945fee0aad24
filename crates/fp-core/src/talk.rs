//! Flat talk records and the flattener that produces them.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schedule::{RawSchedule, Schedule, Talk};

/// Flattening errors.
#[derive(Debug, Error)]
pub enum FlattenError {
    /// A schedule is missing a required field or has an unexpected shape.
    #[error("schedule #{index} has an invalid format: {source}")]
    DataFormat {
        /// Position of the schedule in the input sequence.
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// A talk identifier as published by the feed.
///
/// Older feeds use integers, some newer ones use strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TalkId {
    Number(i64),
    Text(String),
}

impl fmt::Display for TalkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

/// One talk in one room on one conference day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TalkRecord {
    pub conference_title: String,
    /// Short conference identifier, e.g. `32c3`.
    pub conference_acronym: String,
    /// Conference-local day index, not a calendar date.
    pub day: i64,
    pub room: String,
    pub title: String,
    pub talk_guid: Option<String>,
    pub talk_id: TalkId,
    /// Wall-clock start as `HH:MM`.
    pub talk_start: String,
    /// Full ISO 8601 start datetime.
    pub talk_date: String,
    /// Elapsed length as `HH:MM`.
    pub talk_duration: String,
    pub talk_description: String,
    pub talk_abstract: String,
    pub track: String,
    /// Display names of all persons, joined with `", "`.
    pub speakers: String,
}

impl TalkRecord {
    fn from_talk(
        conference_title: &str,
        conference_acronym: &str,
        day: i64,
        room: &str,
        talk: Talk,
    ) -> Self {
        let speakers = talk
            .persons
            .iter()
            .map(|person| person.display_name())
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            conference_title: conference_title.to_string(),
            conference_acronym: conference_acronym.to_string(),
            day,
            room: room.to_string(),
            title: talk.title,
            talk_guid: talk.guid,
            talk_id: talk.id,
            talk_start: talk.start,
            talk_date: talk.date,
            talk_duration: talk.duration,
            talk_description: talk.description.unwrap_or_default(),
            talk_abstract: talk.abstract_text.unwrap_or_default(),
            track: talk.track.unwrap_or_default(),
            speakers,
        }
    }
}

/// Flattens schedules into one record per talk.
///
/// Records follow schedule, day, room and talk order. A schedule with a
/// missing required field fails the whole call; no partial output is returned.
pub fn flatten(schedules: &[RawSchedule]) -> Result<Vec<TalkRecord>, FlattenError> {
    let mut records = Vec::new();

    for (index, raw) in schedules.iter().enumerate() {
        let schedule: Schedule = serde_json::from_str(raw.as_str())
            .map_err(|source| FlattenError::DataFormat { index, source })?;
        let conference = schedule.conference;
        let before = records.len();

        for day in conference.days {
            for (room, talks) in day.rooms.0 {
                for talk in talks {
                    records.push(TalkRecord::from_talk(
                        &conference.title,
                        &conference.acronym,
                        day.index,
                        &room,
                        talk,
                    ));
                }
            }
        }

        tracing::debug!(
            conference = %conference.acronym,
            talks = records.len() - before,
            "flattened schedule"
        );
    }

    Ok(records)
}
