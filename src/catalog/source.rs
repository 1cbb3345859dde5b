//! Catalog source providers
//!
//! A source yields the raw manifest bytes; decoding lives in the loader.
//! Local file reads and remote HTTP fetches sit behind the same trait so the
//! rest of the system never cares where the manifest came from.

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("failed to read manifest: {0}")]
    Read(#[from] std::io::Error),

    #[error("manifest fetch failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("manifest is not a JSON list of records: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Provider of raw manifest bytes.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<u8>, SourceError>;
}

/// Reads the manifest from a local file.
#[derive(Debug, Clone)]
pub struct LocalFileSource {
    path: PathBuf,
}

impl LocalFileSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl CatalogSource for LocalFileSource {
    async fn fetch(&self) -> Result<Vec<u8>, SourceError> {
        Ok(tokio::fs::read(&self.path).await?)
    }
}

/// Fetches the manifest over HTTP.
#[derive(Debug, Clone)]
pub struct RemoteSource {
    client: reqwest::Client,
    url: String,
}

impl RemoteSource {
    pub fn new(url: impl Into<String>) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .user_agent(crate::USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl CatalogSource for RemoteSource {
    async fn fetch(&self) -> Result<Vec<u8>, SourceError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    }
}
