//! Filter engine for talk records.
//!
//! A [`Criteria`] value holds every optional filter. Unset criteria match
//! everything, and all set criteria must hold for a record to match.

use chrono::{DateTime, NaiveDate, NaiveTime, Timelike, Utc};

use crate::TalkRecord;
use crate::time::{ParseError, parse_clock_time, parse_elapsed, parse_talk_date};

/// Sentinel for the conference and room filters that matches every value.
pub const ALL: &str = "all";

/// Sentinel for the day filter that matches every day.
///
/// Day `0` is a real day index in some feeds, so it cannot be used here.
pub const ALL_DAYS: i64 = -1;

/// Filter criteria for talks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    /// Case-insensitive substring of the speakers.
    pub speaker: Option<String>,
    /// Case-insensitive substring of the title.
    pub title: Option<String>,
    /// Case-insensitive substring of the track.
    pub track: Option<String>,
    /// Exact conference acronym, or [`ALL`].
    pub conference: Option<String>,
    /// Case-insensitive substring of the room name, or [`ALL`].
    pub room: Option<String>,
    /// Exact day index, or [`ALL_DAYS`].
    pub day: Option<i64>,
    /// Time of day the talk should be running at (or starting around).
    pub start: Option<NaiveTime>,
    /// Reject talks that ended before `now`.
    pub exclude_past: bool,
}

impl Criteria {
    /// Sets the conference filter, mapping [`ALL`] to no filter.
    #[must_use]
    pub fn with_conference(mut self, conference: impl Into<String>) -> Self {
        self.conference = Some(conference.into()).filter(|c| c != ALL);
        self
    }

    /// Sets the room filter, mapping [`ALL`] to no filter.
    #[must_use]
    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.room = Some(room.into()).filter(|r| r != ALL);
        self
    }

    /// Sets the day filter, mapping [`ALL_DAYS`] to no filter.
    #[must_use]
    pub fn with_day(mut self, day: i64) -> Self {
        self.day = Some(day).filter(|d| *d != ALL_DAYS);
        self
    }
}

fn contains_ignore_case(needle: Option<&str>, haystack: &str) -> bool {
    needle.is_none_or(|needle| haystack.to_lowercase().contains(&needle.to_lowercase()))
}

/// Returns whether `record` satisfies every set criterion.
///
/// Criteria are checked in a fixed order and evaluation stops at the first
/// mismatch, so a malformed time value only surfaces for records that pass
/// the plain text filters.
pub fn matches(
    record: &TalkRecord,
    criteria: &Criteria,
    now: DateTime<Utc>,
) -> Result<bool, ParseError> {
    let conference_matches = criteria
        .conference
        .as_deref()
        .is_none_or(|c| c == ALL || c == record.conference_acronym);
    if !conference_matches
        || !contains_ignore_case(criteria.speaker.as_deref(), &record.speakers)
        || !contains_ignore_case(criteria.title.as_deref(), &record.title)
        || !contains_ignore_case(criteria.track.as_deref(), &record.track)
    {
        return Ok(false);
    }

    if !criteria
        .day
        .is_none_or(|day| day == ALL_DAYS || day == record.day)
    {
        return Ok(false);
    }

    if let Some(start) = criteria.start {
        if !is_in_time_range(record, start)? {
            return Ok(false);
        }
    }

    let room = criteria.room.as_deref().filter(|room| *room != ALL);
    if !contains_ignore_case(room, &record.room) {
        return Ok(false);
    }

    if criteria.exclude_past && is_in_past(record, now)? {
        return Ok(false);
    }

    Ok(true)
}

/// Returns whether the talk is on at `at`.
///
/// A talk is on if it is running at `at` (end excluded), or if it starts in
/// the same clock hour as `at`, so asking for 14:00 also finds a talk starting
/// at 14:05. Both sides are plain times of day, anchored on one shared date:
/// a talk running past midnight extends beyond 24:00 rather than wrapping.
pub fn is_in_time_range(record: &TalkRecord, at: NaiveTime) -> Result<bool, ParseError> {
    let talk_start = parse_clock_time(&record.talk_start)?;
    let duration = parse_elapsed(&record.talk_duration)?;

    let anchor = NaiveDate::default();
    let start = anchor.and_time(talk_start);
    let end = start + duration;
    let at = anchor.and_time(at);
    let running = start <= at && at < end;

    let same_hour = at.hour() == talk_start.hour();

    Ok(running || same_hour)
}

/// Returns whether the talk ended before `now`.
pub fn is_in_past(record: &TalkRecord, now: DateTime<Utc>) -> Result<bool, ParseError> {
    let start = parse_talk_date(&record.talk_date)?;
    let duration = parse_elapsed(&record.talk_duration)?;
    Ok(now > start + duration)
}

/// Keeps the records matching `criteria`, in input order.
pub fn select(
    records: Vec<TalkRecord>,
    criteria: &Criteria,
    now: DateTime<Utc>,
) -> Result<Vec<TalkRecord>, ParseError> {
    let total = records.len();
    let mut selected = Vec::new();
    for record in records {
        if matches(&record, criteria, now)? {
            selected.push(record);
        }
    }
    tracing::debug!(total, selected = selected.len(), "filtered talks");
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::TalkId;

    fn opening() -> TalkRecord {
        TalkRecord {
            conference_title: "32. Chaos Communication Congress".to_string(),
            conference_acronym: "32c3".to_string(),
            day: 1,
            room: "Hall 1".to_string(),
            title: "Opening Event".to_string(),
            talk_guid: None,
            talk_id: TalkId::Number(7550),
            talk_start: "11:00".to_string(),
            talk_date: "2015-12-27T11:00:00+01:00".to_string(),
            talk_duration: "01:00".to_string(),
            talk_description: String::new(),
            talk_abstract: String::new(),
            track: "CCC".to_string(),
            speakers: "Carina Haupt, Linus Neumann".to_string(),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
    }

    fn at(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    fn check(criteria: &Criteria) -> bool {
        matches(&opening(), criteria, now()).unwrap()
    }

    #[test]
    fn default_criteria_match_everything() {
        assert!(check(&Criteria::default()));
    }

    #[test]
    fn conference_filter_is_exact() {
        assert!(check(&Criteria::default().with_conference("32c3")));
        assert!(!check(&Criteria::default().with_conference("rc")));
        assert!(!check(&Criteria::default().with_conference("32C3")));
        assert!(check(&Criteria::default().with_conference(ALL)));
    }

    #[test]
    fn conference_all_sentinel_matches_when_set_directly() {
        let criteria = Criteria {
            conference: Some(ALL.to_string()),
            room: Some(ALL.to_string()),
            day: Some(ALL_DAYS),
            ..Criteria::default()
        };
        assert!(check(&criteria));
    }

    #[test]
    fn speaker_filter_is_case_insensitive_substring() {
        let matching = Criteria {
            speaker: Some("CaRiNa".to_string()),
            ..Criteria::default()
        };
        let other = Criteria {
            speaker: Some("CaRiNa2".to_string()),
            ..Criteria::default()
        };
        assert!(check(&matching));
        assert!(!check(&other));
    }

    #[test]
    fn title_filter_is_case_insensitive_substring() {
        let matching = Criteria {
            title: Some("OPENIng".to_string()),
            ..Criteria::default()
        };
        let other = Criteria {
            title: Some("0p3N!ng".to_string()),
            ..Criteria::default()
        };
        assert!(check(&matching));
        assert!(!check(&other));
    }

    #[test]
    fn track_filter_is_case_insensitive_substring() {
        let matching = Criteria {
            track: Some("ccc".to_string()),
            ..Criteria::default()
        };
        let other = Criteria {
            track: Some("Hardware".to_string()),
            ..Criteria::default()
        };
        assert!(check(&matching));
        assert!(!check(&other));
    }

    #[test]
    fn day_filter_is_exact() {
        assert!(check(&Criteria::default().with_day(1)));
        assert!(!check(&Criteria::default().with_day(5)));
        assert!(check(&Criteria::default().with_day(ALL_DAYS)));
    }

    #[test]
    fn day_zero_is_a_real_day() {
        assert!(!check(&Criteria::default().with_day(0)));
    }

    #[test]
    fn room_filter_is_substring_or_all() {
        assert!(check(&Criteria::default().with_room("Hall 1")));
        assert!(check(&Criteria::default().with_room("hall")));
        assert!(!check(&Criteria::default().with_room("Hall 10")));
        assert!(check(&Criteria::default().with_room(ALL)));
    }

    #[test]
    fn start_filter_matches_running_talk() {
        let criteria = |start| Criteria {
            start: Some(start),
            ..Criteria::default()
        };
        assert!(check(&criteria(at(11, 0))));
        assert!(check(&criteria(at(11, 30))));
        assert!(!check(&criteria(at(12, 0))));
        assert!(!check(&criteria(at(10, 59))));
    }

    #[test]
    fn start_filter_matches_talk_starting_in_same_hour() {
        let mut talk = opening();
        talk.talk_start = "14:05".to_string();
        talk.talk_duration = "00:10".to_string();

        assert!(is_in_time_range(&talk, at(14, 0)).unwrap());
        assert!(is_in_time_range(&talk, at(14, 59)).unwrap());
        assert!(!is_in_time_range(&talk, at(15, 0)).unwrap());
        assert!(!is_in_time_range(&talk, at(13, 59)).unwrap());
    }

    #[test]
    fn time_range_does_not_wrap_at_midnight() {
        let mut talk = opening();
        talk.talk_start = "23:30".to_string();
        talk.talk_duration = "01:00".to_string();

        assert!(is_in_time_range(&talk, at(23, 50)).unwrap());
        assert!(!is_in_time_range(&talk, at(0, 15)).unwrap());
    }

    #[test]
    fn malformed_duration_is_reported() {
        let mut talk = opening();
        talk.talk_duration = "one hour".to_string();
        let criteria = Criteria {
            start: Some(at(11, 0)),
            ..Criteria::default()
        };

        let err = matches(&talk, &criteria, now()).unwrap_err();
        assert!(matches!(err, ParseError::Duration { .. }));
    }

    #[test]
    fn past_filter_excludes_finished_talks() {
        let excluding = Criteria {
            exclude_past: true,
            ..Criteria::default()
        };
        assert!(check(&Criteria::default()));
        assert!(!check(&excluding));
    }

    #[test]
    fn past_filter_keeps_running_and_future_talks() {
        let talk = opening();
        let during = Utc.with_ymd_and_hms(2015, 12, 27, 10, 30, 0).unwrap();
        let at_end = Utc.with_ymd_and_hms(2015, 12, 27, 11, 0, 0).unwrap();
        let after = Utc.with_ymd_and_hms(2015, 12, 27, 11, 0, 1).unwrap();

        assert!(!is_in_past(&talk, during).unwrap());
        assert!(!is_in_past(&talk, at_end).unwrap());
        assert!(is_in_past(&talk, after).unwrap());
    }

    #[test]
    fn past_filter_reports_bad_dates() {
        let mut talk = opening();
        talk.talk_date = "tomorrow".to_string();
        let criteria = Criteria {
            exclude_past: true,
            ..Criteria::default()
        };
        assert!(matches!(
            matches(&talk, &criteria, now()),
            Err(ParseError::Date { .. })
        ));
    }

    #[test]
    fn criteria_are_combined_with_and() {
        let criteria = Criteria {
            speaker: Some("linus".to_string()),
            title: Some("closing".to_string()),
            ..Criteria::default()
        }
        .with_conference("32c3");
        assert!(!check(&criteria));
    }

    #[test]
    fn select_preserves_order() {
        let mut second = opening();
        second.title = "Second".to_string();
        second.day = 2;
        let mut third = opening();
        third.title = "Third".to_string();

        let selected = select(
            vec![opening(), second, third],
            &Criteria::default().with_day(1),
            now(),
        )
        .unwrap();
        let titles: Vec<_> = selected.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Opening Event", "Third"]);
    }
}
