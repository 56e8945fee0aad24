//! Core domain logic for Fahrplan.
//!
//! This crate contains the fundamental types and logic for:
//! - Schedules: the raw conference documents as published by the feeds
//! - Flattening: turning conference → day → room → talk nesting into [`TalkRecord`]s
//! - Filtering: matching talks against user [`Criteria`]
//! - Presentation: sorting and shaping matches into a [`TalkTable`]

pub mod filter;
pub mod present;
pub mod schedule;
pub mod talk;
pub mod time;

pub use filter::{ALL, ALL_DAYS, Criteria, matches, select};
pub use present::{
    Column, NO_TALKS_MESSAGE, PresentError, PresentOptions, SortKey, TalkTable, present,
};
pub use schedule::RawSchedule;
pub use talk::{FlattenError, TalkId, TalkRecord, flatten};
pub use time::ParseError;
