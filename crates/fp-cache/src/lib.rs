//! Response cache for Fahrplan feeds.
//!
//! Feed bodies are cached by request URL so unchanged schedules are not
//! downloaded on every run. The cache has no expiry: it is cleared wholesale
//! when the user asks for fresh data, then refilled by the next fetch.
//!
//! # Implementations
//!
//! - [`SqliteCache`] persists bodies in a SQLite file using `rusqlite`.
//! - [`MemoryCache`] keeps bodies in a map; useful for testing.
//!
//! # Thread Safety
//!
//! [`SqliteCache`] wraps a `rusqlite::Connection`, which is `Send` but not
//! `Sync`. The cache is meant for a single process doing one run at a time;
//! there is no locking between concurrent invocations.

use std::collections::HashMap;
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use thiserror::Error;

/// Cache errors.
#[derive(Debug, Error)]
pub enum CacheError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// A store of response bodies keyed by URL.
pub trait ResponseCache {
    /// Returns the cached body for `url`, if any.
    fn get(&self, url: &str) -> Result<Option<String>, CacheError>;

    /// Stores `body` for `url`, replacing any previous entry.
    fn put(&mut self, url: &str, body: &str) -> Result<(), CacheError>;

    /// Removes every entry.
    fn clear(&mut self) -> Result<(), CacheError>;
}

/// SQLite-backed response cache.
///
/// See the [module documentation](self) for thread safety considerations.
pub struct SqliteCache {
    conn: Connection,
}

impl SqliteCache {
    /// Opens a cache at the given path, creating it if necessary.
    ///
    /// The schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, CacheError> {
        let conn = Connection::open(path)?;
        let cache = Self { conn };
        cache.init()?;
        Ok(cache)
    }

    /// Opens an in-memory cache.
    ///
    /// The cache is destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, CacheError> {
        let conn = Connection::open_in_memory()?;
        let cache = Self { conn };
        cache.init()?;
        Ok(cache)
    }

    /// Initializes the schema.
    ///
    /// This is idempotent - safe to call on an already-initialized cache.
    fn init(&self) -> Result<(), CacheError> {
        self.conn.execute_batch(
            "
            -- fetched_at: ISO 8601 format (e.g., '2024-01-15T10:30:00Z')
            CREATE TABLE IF NOT EXISTS responses (
                url TEXT PRIMARY KEY,
                body TEXT NOT NULL,
                fetched_at TEXT NOT NULL
            );
            ",
        )?;
        Ok(())
    }

    /// Returns the number of cached responses.
    pub fn len(&self) -> Result<usize, CacheError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM responses", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> Result<bool, CacheError> {
        Ok(self.len()? == 0)
    }
}

impl ResponseCache for SqliteCache {
    fn get(&self, url: &str) -> Result<Option<String>, CacheError> {
        let body = self
            .conn
            .query_row(
                "SELECT body FROM responses WHERE url = ?1",
                params![url],
                |row| row.get(0),
            )
            .optional()?;
        Ok(body)
    }

    fn put(&mut self, url: &str, body: &str) -> Result<(), CacheError> {
        let fetched_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        self.conn.execute(
            "INSERT OR REPLACE INTO responses (url, body, fetched_at) VALUES (?1, ?2, ?3)",
            params![url, body, fetched_at],
        )?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), CacheError> {
        let removed = self.conn.execute("DELETE FROM responses", [])?;
        tracing::debug!(removed, "cleared response cache");
        Ok(())
    }
}

/// In-memory response cache.
#[derive(Debug, Default, Clone)]
pub struct MemoryCache {
    entries: HashMap<String, String>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ResponseCache for MemoryCache {
    fn get(&self, url: &str) -> Result<Option<String>, CacheError> {
        Ok(self.entries.get(url).cloned())
    }

    fn put(&mut self, url: &str, body: &str) -> Result<(), CacheError> {
        self.entries.insert(url.to_string(), body.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), CacheError> {
        self.entries.clear();
        Ok(())
    }
}
