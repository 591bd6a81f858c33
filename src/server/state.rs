//! Server State
//!
//! Shared state accessible by all handlers.

use std::sync::Arc;
use std::time::Instant;

use crate::provider::Provider;

/// Shared state for the local provider server
#[derive(Clone)]
pub struct ServerState {
    /// Provider that stores the posts
    pub provider: Arc<dyn Provider>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl ServerState {
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        Self {
            provider,
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

/// Listen address for the local provider server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3030,
        }
    }
}

impl ServerConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// URL of the posts collection served at this address
    pub fn entries_url(&self) -> String {
        format!("http://{}/posts", self.addr())
    }
}
