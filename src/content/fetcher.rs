//! Remote retrieval of JSON resources.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("HTTP error! status: {0}")]
    Status(u16),
    #[error("Response is not valid JSON: {0}")]
    Decode(String),
    #[error("Invalid resource locator {locator}: {reason}")]
    InvalidLocator { locator: String, reason: String },
}

#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Retrieve and parse the JSON document at `locator`.
    async fn fetch(&self, locator: &str) -> Result<Value, FetchError>;
}

/// Fetches resources over HTTP relative to a base URL.
pub struct HttpFetcher {
    client: Client,
    base_url: Url,
}

impl HttpFetcher {
    pub fn new(base_url: &str, timeout: Duration, user_agent: &str) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        // A base without a trailing slash would drop its last segment on join.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&normalized).map_err(|e| FetchError::InvalidLocator {
            locator: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn resolve(&self, locator: &str) -> Result<Url, FetchError> {
        self.base_url
            .join(locator)
            .map_err(|e| FetchError::InvalidLocator {
                locator: locator.to_string(),
                reason: e.to_string(),
            })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    #[instrument(skip(self))]
    async fn fetch(&self, locator: &str) -> Result<Value, FetchError> {
        let url = self.resolve(locator)?;

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))?;

        debug!(%url, "Fetched resource");
        Ok(body)
    }
}
