//! Raw schedule documents as published by the Fahrplan feeds.
//!
//! Feeds wrap the schedule in a top-level `schedule` key:
//!
//! ```json
//! {"schedule": {"conference": {"title": "...", "acronym": "32c3", "days": [...]}}}
//! ```
//!
//! A [`RawSchedule`] keeps the JSON text of that inner value untouched. It is
//! only interpreted during flattening, so a feed that is valid JSON but breaks
//! the expected shape is reported as a data format problem rather than a
//! fetch failure.

use std::fmt;

use serde::Deserialize;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde_json::value::RawValue;

/// The as-fetched schedule document of one conference feed.
#[derive(Debug, Clone)]
pub struct RawSchedule {
    json: Box<RawValue>,
}

#[derive(Deserialize)]
struct Feed {
    schedule: Box<RawValue>,
}

impl RawSchedule {
    /// Extracts the schedule from a full feed body.
    ///
    /// Fails if the body is not JSON or has no `schedule` key.
    pub fn from_feed(body: &str) -> Result<Self, serde_json::Error> {
        let feed: Feed = serde_json::from_str(body)?;
        Ok(Self {
            json: feed.schedule,
        })
    }

    /// Wraps an already-extracted schedule value.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let json: Box<RawValue> = serde_json::from_str(json)?;
        Ok(Self { json })
    }

    /// Returns the schedule JSON text.
    pub fn as_str(&self) -> &str {
        self.json.get()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct Schedule {
    pub conference: Conference,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Conference {
    pub title: String,
    pub acronym: String,
    pub days: Vec<Day>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Day {
    pub index: i64,
    pub rooms: Rooms,
}

/// Rooms of a day in document order.
#[derive(Debug, Default)]
pub(crate) struct Rooms(pub Vec<(String, Vec<Talk>)>);

impl<'de> Deserialize<'de> for Rooms {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RoomsVisitor;

        impl<'de> Visitor<'de> for RoomsVisitor {
            type Value = Rooms;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of room names to talk lists")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut rooms = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, talks)) = map.next_entry::<String, Vec<Talk>>()? {
                    rooms.push((name, talks));
                }
                Ok(Rooms(rooms))
            }
        }

        deserializer.deserialize_map(RoomsVisitor)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct Talk {
    pub id: crate::TalkId,
    #[serde(default)]
    pub guid: Option<String>,
    pub title: String,
    pub start: String,
    pub date: String,
    pub duration: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "abstract")]
    pub abstract_text: Option<String>,
    #[serde(default)]
    pub track: Option<String>,
    #[serde(default)]
    pub persons: Vec<Person>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Person {
    #[serde(default)]
    pub public_name: Option<String>,
    #[serde(default)]
    pub full_public_name: Option<String>,
}

impl Person {
    /// Name shown in the speakers column.
    pub fn display_name(&self) -> &str {
        self.public_name
            .as_deref()
            .or(self.full_public_name.as_deref())
            .unwrap_or_default()
    }
}
