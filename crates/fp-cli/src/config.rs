//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use crate::TableFormat;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Path to the response cache database.
    pub cache_path: PathBuf,
    /// Per-feed request timeout in seconds.
    pub timeout_secs: u64,
    /// Feed URLs to fetch, in order.
    pub sources: Vec<String>,
    /// Conference filter used when `--conference` is not given.
    pub conference: String,
    /// Table layout used when `--tablefmt` is not given.
    pub table_format: TableFormat,
    /// Wrap text columns at this many characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_width: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            cache_path: data_dir.join("cache.db"),
            timeout_secs: fp_fetch::DEFAULT_TIMEOUT.as_secs(),
            sources: fp_fetch::default_sources(),
            conference: fp_core::ALL.to_string(),
            table_format: TableFormat::default(),
            column_width: None,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (FAHRPLAN_*)
        figment = figment.merge(Env::prefixed("FAHRPLAN_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for fahrplan.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("fahrplan"))
}

/// Returns the platform-specific data directory for fahrplan.
///
/// On Linux: `~/.local/share/fahrplan`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("fahrplan"))
}
