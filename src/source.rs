//! Entity sources.
//!
//! A source yields the full record collection for one listing. The core
//! treats every fetch as a fresh snapshot; there is no caching here.
//!
//! | Source | Config | Transport |
//! |--------|--------|-----------|
//! | [`JsonFileSource`] | `path = "..."` | static JSON bundle on disk |
//! | [`HttpSource`] | `url = "..."` | `GET` returning a JSON array |
//!
//! Deletion is only supported by the static bundle; the file is rewritten
//! without the deleted record.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use eco_directory_core::models::{EntityId, LoadState, Record};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::SourceConfig;

/// A provider of a listing's records.
#[async_trait]
pub trait EntitySource<T>: Send + Sync {
    /// Human-readable origin, e.g. `file:data/accelerators.json`.
    fn describe(&self) -> String;

    /// Fetch the current collection.
    async fn fetch(&self) -> Result<Vec<T>>;

    /// Delete the record with `id`. Returns `false` if no such record exists.
    async fn delete(&self, _id: &EntityId) -> Result<bool> {
        bail!("{} is read-only", self.describe())
    }
}

/// Records stored as a JSON array in a local file.
pub struct JsonFileSource<T> {
    path: PathBuf,
    _record: PhantomData<fn() -> T>,
}

impl<T> JsonFileSource<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _record: PhantomData,
        }
    }
}

#[async_trait]
impl<T> EntitySource<T> for JsonFileSource<T>
where
    T: Record + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }

    async fn fetch(&self) -> Result<Vec<T>> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let records: Vec<T> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", self.path.display()))?;
        tracing::debug!(source = %self.describe(), count = records.len(), "loaded records");
        Ok(records)
    }

    async fn delete(&self, id: &EntityId) -> Result<bool> {
        let mut records: Vec<T> = self.fetch().await?;
        let before = records.len();
        records.retain(|r| &r.id() != id);
        if records.len() == before {
            return Ok(false);
        }

        let body = serde_json::to_string_pretty(&records)?;
        tokio::fs::write(&self.path, body)
            .await
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        tracing::info!(source = %self.describe(), %id, "deleted record");
        Ok(true)
    }
}

/// Records served by a remote endpoint.
pub struct HttpSource<T> {
    url: String,
    client: reqwest::Client,
    _record: PhantomData<fn() -> T>,
}

impl<T> HttpSource<T> {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            url: url.into(),
            client,
            _record: PhantomData,
        })
    }
}

#[async_trait]
impl<T> EntitySource<T> for HttpSource<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    fn describe(&self) -> String {
        format!("http:{}", self.url)
    }

    async fn fetch(&self) -> Result<Vec<T>> {
        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", self.url))?;

        let status = resp.status();
        if !status.is_success() {
            bail!("{} returned {}", self.url, status);
        }

        let records: Vec<T> = resp
            .json()
            .await
            .with_context(|| format!("Invalid JSON from {}", self.url))?;
        tracing::debug!(source = %self.describe(), count = records.len(), "fetched records");
        Ok(records)
    }
}

/// Build the source described by `config`.
pub fn open_source<T>(config: &SourceConfig) -> Result<Box<dyn EntitySource<T>>>
where
    T: Record + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    match (&config.path, &config.url) {
        (Some(path), None) => Ok(Box::new(JsonFileSource::new(path.clone()))),
        (None, Some(url)) => Ok(Box::new(HttpSource::new(
            url.clone(),
            Duration::from_secs(config.timeout_secs),
        )?)),
        _ => bail!("source must set exactly one of path or url"),
    }
}

/// Fetch once and fold the outcome into a [`LoadState`].
pub async fn load<T>(source: &dyn EntitySource<T>) -> LoadState<Vec<T>> {
    match source.fetch().await {
        Ok(records) => LoadState::Resolved(records),
        Err(e) => {
            tracing::warn!(source = %source.describe(), error = %format!("{:#}", e), "fetch failed");
            LoadState::Failed(format!("{:#}", e))
        }
    }
}
