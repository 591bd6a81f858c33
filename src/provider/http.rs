//! REST Entry Provider
//!
//! HTTP client for a JSON posts endpoint:
//!
//! - `GET <endpoint>` returns an array of entries
//! - `POST <endpoint>` with `{title, body, userId}` returns the created entry
//!
//! Failures are returned to the caller as-is, there is no retry.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::{Provider, ProviderError};
use crate::journal::{Entry, NewEntry};

/// Public placeholder endpoint used when nothing else is configured
pub const DEFAULT_ENTRIES_URL: &str = "https://jsonplaceholder.typicode.com/posts";

/// Configuration for the REST provider
#[derive(Debug, Clone)]
pub struct HttpProviderConfig {
    /// Full URL of the entries collection
    pub entries_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for HttpProviderConfig {
    fn default() -> Self {
        Self {
            entries_url: DEFAULT_ENTRIES_URL.to_string(),
            request_timeout_ms: 10_000,
        }
    }
}

/// REST provider backed by reqwest
pub struct HttpProvider {
    client: Client,
    config: HttpProviderConfig,
}

impl HttpProvider {
    /// Create a new provider with the given configuration
    pub fn new(config: HttpProviderConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .user_agent(concat!("journal/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ProviderError::Client(e.to_string()))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &HttpProviderConfig {
        &self.config
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            Err(ProviderError::Status {
                status: status.as_u16(),
                message: text,
            })
        }
    }
}

#[async_trait]
impl Provider for HttpProvider {
    fn name(&self) -> &str {
        &self.config.entries_url
    }

    async fn list_entries(&self) -> Result<Vec<Entry>, ProviderError> {
        let response = self
            .client
            .get(&self.config.entries_url)
            .send()
            .await
            .map_err(ProviderError::from_transport)?;

        let response = Self::check_status(response).await?;

        response
            .json::<Vec<Entry>>()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))
    }

    async fn create_entry(&self, new_entry: &NewEntry) -> Result<Entry, ProviderError> {
        // .json() sets Content-Type: application/json
        let response = self
            .client
            .post(&self.config.entries_url)
            .json(new_entry)
            .send()
            .await
            .map_err(ProviderError::from_transport)?;

        let response = Self::check_status(response).await?;

        response
            .json::<Entry>()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))
    }
}
