//! # Journal
//!
//! A small journal client: entries come from a REST posts endpoint, new
//! entries are created through a form, and entries can be flagged as
//! important for the current session.
//!
//! ## Modules
//!
//! - [`journal`]: Entry types and the `JournalStore` state holder
//! - [`provider`]: The `Provider` trait with REST and in-memory backends
//! - [`server`]: Local provider server with Axum
//! - [`render`]: Terminal rendering
//! - [`config`]: TOML and environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use journal::journal::{Draft, JournalStore};
//! use journal::provider::{HttpProvider, HttpProviderConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = HttpProvider::new(HttpProviderConfig::default())?;
//!     let store = JournalStore::new(Arc::new(provider));
//!
//!     store.load().await?;
//!     let entry = store.create(Draft::new("Today", "Went for a walk")).await?;
//!     store.toggle_important(entry.id).await;
//!
//!     println!("{} entries", store.entries().await.len());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod journal;
pub mod provider;
pub mod render;
pub mod server;

pub use crate::journal::{
    Draft, DraftError, Entry, EntryId, ImportantSet, JournalError, JournalResult,
    JournalSnapshot, JournalState, JournalStore, NewEntry, DEFAULT_USER_ID,
};

pub use provider::{HttpProvider, HttpProviderConfig, MemoryProvider, Provider, ProviderError};

pub use server::{build_router, serve, ServerError, ServerState};

pub use config::{Config, ConfigError, LoggingConfig};
