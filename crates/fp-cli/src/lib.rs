//! Fahrplan CLI library.
//!
//! This crate provides the CLI interface for searching conference schedules.

mod cli;
mod config;
pub mod run;
pub mod table;

pub use cli::Cli;
pub use config::Config;
pub use table::TableFormat;
