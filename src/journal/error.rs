//! Journal store error types

use thiserror::Error;

use crate::provider::ProviderError;

/// Failures of store operations
///
/// Both are terminal for the operation; the store state is left as it was
/// before the call.
#[derive(Error, Debug)]
pub enum JournalError {
    /// Listing entries from the provider failed
    #[error("Failed to fetch entries: {0}")]
    FetchFailed(ProviderError),

    /// Creating an entry on the provider failed
    #[error("Failed to create entry: {0}")]
    CreateFailed(ProviderError),
}

impl JournalError {
    /// Short failure kind, used as a log field
    pub fn kind(&self) -> &'static str {
        match self {
            JournalError::FetchFailed(_) => "FetchFailed",
            JournalError::CreateFailed(_) => "CreateFailed",
        }
    }
}

/// Result type alias for store operations
pub type JournalResult<T> = Result<T, JournalError>;
