//! Journal
//!
//! The client-side journal model: entries fetched from a provider, drafts
//! from the entry form, and session-local important flags.
//!
//! ## Data Flow
//!
//! 1. `JournalStore::load` fills the entry list from the provider
//! 2. `JournalStore::create` sends a draft and prepends the created entry
//! 3. `JournalStore::toggle_important` only touches local state

mod error;
mod store;
mod types;

pub use error::{JournalError, JournalResult};
pub use store::{JournalSnapshot, JournalState, JournalStore};
pub use types::{Draft, DraftError, Entry, EntryId, ImportantSet, NewEntry, DEFAULT_USER_ID};
