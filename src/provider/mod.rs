//! Entry Providers
//!
//! The external data source backing journal entries.
//!
//! - **HttpProvider**: REST client for a remote posts endpoint
//! - **MemoryProvider**: in-process collection, used by the local provider
//!   server and in tests

mod http;
mod memory;

pub use http::{HttpProvider, HttpProviderConfig, DEFAULT_ENTRIES_URL};
pub use memory::MemoryProvider;

use async_trait::async_trait;
use thiserror::Error;

use crate::journal::{Entry, NewEntry};

/// Source of journal entries
#[async_trait]
pub trait Provider: Send + Sync {
    /// Human-readable name for logs
    fn name(&self) -> &str;

    /// Fetch the full entry collection, in provider order
    async fn list_entries(&self) -> Result<Vec<Entry>, ProviderError>;

    /// Create an entry, returning it with the provider-assigned id
    async fn create_entry(&self, new_entry: &NewEntry) -> Result<Entry, ProviderError>;
}

/// Errors that can occur when talking to a provider
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider unavailable")]
    Unavailable,

    #[error("Request timeout")]
    Timeout,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Provider returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error("HTTP client error: {0}")]
    Client(String),

    #[error("No entry id left after {0}")]
    IdsExhausted(u64),
}

impl ProviderError {
    /// Classify a transport-level reqwest error
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout
        } else if err.is_connect() {
            ProviderError::Unavailable
        } else {
            ProviderError::Request(err)
        }
    }
}
