//! Fetching remote HTML documents.
use reqwest::blocking::{Client, ClientBuilder};
use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum FetchError {
    /// The request couldn't be sent, or its body couldn't be read.
    #[error(transparent)]
    Request(#[from] reqwest::Error),

    /// The server responded, but not with a success status.
    #[error("server responded with HTTP {0}")]
    Status(StatusCode),
}

/// Issues single GET requests, with no retries.
#[derive(Clone, Debug)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Creates a fetcher whose requests give up after `timeout`. If that's `None`, requests wait indefinitely.
    pub fn new(timeout: Option<Duration>) -> Result<Self, FetchError> {
        Self::from_builder(Client::builder(), timeout)
    }

    fn from_builder(builder: ClientBuilder, timeout: Option<Duration>) -> Result<Self, FetchError> {
        let client = builder.timeout(timeout).build()?;
        Ok(Self { client })
    }

    pub fn get(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        let body = response.text()?;
        debug!(url, status = status.as_u16(), bytes = body.len(), "fetched document");
        Ok(body)
    }
}
