// src/images.rs

//! Illustrative image lookup per task title.
//!
//! Talks to a Pexels-compatible search API and returns a single URL (or
//! none) per title. Lookups fan out concurrently but are bounded by a
//! semaphore, so a large task list cannot flood the service with one
//! request per task all at once.

use std::sync::Arc;

use serde::Deserialize;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::errors::{Result, TaskdagError};
use crate::store::{Task, TaskId};

const DEFAULT_ENDPOINT: &str = "https://api.pexels.com/v1/search";

/// Env var holding the search API key.
pub const API_KEY_ENV: &str = "TASKDAG_PEXELS_KEY";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    photos: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    src: PhotoSrc,
}

#[derive(Debug, Deserialize)]
struct PhotoSrc {
    medium: String,
}

/// Client for the image search service.
#[derive(Debug, Clone)]
pub struct ImageClient {
    http: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl ImageClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    /// Read the API key from [`API_KEY_ENV`].
    pub fn from_env() -> Result<Self> {
        let key = std::env::var(API_KEY_ENV)
            .map_err(|_| TaskdagError::ConfigError(format!("{API_KEY_ENV} is not set")))?;
        Ok(Self::new(key))
    }

    /// Point the client at a different search endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Search for a single image matching `title`.
    ///
    /// Returns the first photo's medium-size URL, or `None` when the search
    /// comes back empty.
    pub async fn lookup(&self, title: &str) -> Result<Option<String>> {
        let response = self
            .http
            .get(&self.endpoint)
            .header(reqwest::header::AUTHORIZATION, self.api_key.as_str())
            .query(&[("query", title), ("per_page", "1")])
            .send()
            .await?
            .error_for_status()?;

        let body: SearchResponse = response.json().await?;
        let url = body.photos.into_iter().next().map(|p| p.src.medium);

        debug!(title, found = url.is_some(), "image lookup finished");
        Ok(url)
    }

    /// Look up an image for every task, with at most `limit` requests in
    /// flight at a time.
    ///
    /// Individual failures are logged and reported as `None` rather than
    /// failing the whole sweep. Results come back sorted by task id.
    pub async fn lookup_all(
        &self,
        tasks: &[Task],
        limit: usize,
    ) -> Vec<(TaskId, Option<String>)> {
        let semaphore = Arc::new(Semaphore::new(limit.max(1)));
        let mut join_set = JoinSet::new();

        for task in tasks {
            let client = self.clone();
            let semaphore = Arc::clone(&semaphore);
            let id = task.id;
            let title = task.title.clone();

            join_set.spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_closed) => return (id, None),
                };

                match client.lookup(&title).await {
                    Ok(url) => (id, url),
                    Err(err) => {
                        warn!(task = id, %err, "image lookup failed");
                        (id, None)
                    }
                }
            });
        }

        let mut results: Vec<(TaskId, Option<String>)> = Vec::new();
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok(entry) => results.push(entry),
                Err(err) => warn!(%err, "image lookup task panicked"),
            }
        }

        results.sort_unstable_by_key(|(id, _)| *id);
        results
    }
}
