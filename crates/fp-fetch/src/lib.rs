//! Fetching of Fahrplan schedule feeds.
//!
//! Feeds are requested one after another. A feed that cannot be downloaded
//! or does not contain a schedule is logged and skipped; the run only fails
//! when no feed at all yields a schedule.

pub mod sources;

use std::time::Duration;

use fp_cache::{CacheError, ResponseCache};
use fp_core::RawSchedule;
use thiserror::Error;

pub use sources::default_sources;

/// Default request timeout per feed.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetch errors.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Failed to build HTTP client.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    /// HTTP request failed.
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// The feed answered with a non-success status.
    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },
    /// The body is not JSON or has no `schedule` key.
    #[error("{url} is not a schedule feed: {source}")]
    InvalidFeed {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    /// Reading or writing the response cache failed.
    #[error("response cache failed: {0}")]
    Cache(#[from] CacheError),
    /// Not a single feed yielded a schedule.
    #[error("no schedule could be fetched from any of {sources} feeds")]
    NoSchedules { sources: usize },
}

/// Sequential feed fetcher.
#[derive(Debug, Clone)]
pub struct Fetcher {
    http: reqwest::Client,
}

impl Fetcher {
    /// Creates a fetcher whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("fahrplan/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(FetchError::ClientBuild)?;
        Ok(Self { http })
    }

    /// Fetches every feed in `urls`, in order.
    ///
    /// With `refresh`, the cache is cleared first so every feed is
    /// downloaded again. Feeds that fail are skipped with a warning.
    pub async fn fetch_all<C>(
        &self,
        urls: &[String],
        cache: &mut C,
        refresh: bool,
    ) -> Result<Vec<RawSchedule>, FetchError>
    where
        C: ResponseCache + ?Sized,
    {
        if refresh {
            cache.clear()?;
        }

        let mut schedules = Vec::with_capacity(urls.len());
        for url in urls {
            match self.fetch_one(url, cache).await {
                Ok(schedule) => schedules.push(schedule),
                Err(FetchError::Cache(err)) => return Err(FetchError::Cache(err)),
                Err(err) => {
                    tracing::warn!(%url, error = %err, "skipping feed");
                }
            }
        }

        if schedules.is_empty() {
            return Err(FetchError::NoSchedules {
                sources: urls.len(),
            });
        }
        Ok(schedules)
    }

    async fn fetch_one<C>(&self, url: &str, cache: &mut C) -> Result<RawSchedule, FetchError>
    where
        C: ResponseCache + ?Sized,
    {
        if let Some(body) = cache.get(url)? {
            tracing::debug!(%url, "using cached feed");
            return parse_feed(url, &body);
        }

        let request_error = |source| FetchError::Request {
            url: url.to_string(),
            source,
        };
        let response = self.http.get(url).send().await.map_err(request_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let body = response.text().await.map_err(request_error)?;

        let schedule = parse_feed(url, &body)?;
        cache.put(url, &body)?;
        tracing::debug!(%url, bytes = body.len(), "downloaded feed");
        Ok(schedule)
    }
}

fn parse_feed(url: &str, body: &str) -> Result<RawSchedule, FetchError> {
    RawSchedule::from_feed(body).map_err(|source| FetchError::InvalidFeed {
        url: url.to_string(),
        source,
    })
}
