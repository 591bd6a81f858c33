//! Journal data types
//!
//! Entries as the provider returns them, drafts from the entry form, and
//! the session-local set of important entry ids.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Identifier assigned to an entry by the provider
pub type EntryId = u64;

/// Author id attached to every entry created from this client
pub const DEFAULT_USER_ID: u64 = 1;

/// A journal post record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Provider-assigned identifier
    pub id: EntryId,
    pub title: String,
    pub body: String,
    /// Author of the entry
    pub user_id: u64,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Entry {}

impl std::hash::Hash for Entry {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Unsaved input destined to become an [`Entry`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    pub title: String,
    pub body: String,
}

impl Draft {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Update a single form field by name (`title` or `body`)
    pub fn set_field(&mut self, field: &str, value: impl Into<String>) -> Result<(), DraftError> {
        match field {
            "title" => self.title = value.into(),
            "body" => self.body = value.into(),
            other => return Err(DraftError::UnknownField(other.to_string())),
        }
        Ok(())
    }

    /// Both fields are required by the entry form
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.title.trim().is_empty() {
            return Err(DraftError::EmptyTitle);
        }
        if self.body.trim().is_empty() {
            return Err(DraftError::EmptyBody);
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.body.is_empty()
    }

    /// Build the request body sent to the provider
    pub fn to_new_entry(&self) -> NewEntry {
        NewEntry {
            title: self.title.clone(),
            body: self.body.clone(),
            user_id: DEFAULT_USER_ID,
        }
    }
}

/// Request body for creating an entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEntry {
    pub title: String,
    pub body: String,
    pub user_id: u64,
}

/// Form validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    #[error("Title is required")]
    EmptyTitle,

    #[error("Content is required")]
    EmptyBody,

    #[error("Unknown form field: {0}")]
    UnknownField(String),
}

/// Entry ids flagged as important for the current session
///
/// Membership does not depend on the entry list; ids of entries that are
/// no longer listed stay in the set.
#[derive(Debug, Clone, Default)]
pub struct ImportantSet {
    ids: HashSet<EntryId>,
}

impl ImportantSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, id: EntryId) -> bool {
        self.ids.insert(id)
    }

    pub fn remove(&mut self, id: EntryId) -> bool {
        self.ids.remove(&id)
    }

    pub fn contains(&self, id: EntryId) -> bool {
        self.ids.contains(&id)
    }

    /// Flip membership of `id`, returning whether it is now important
    pub fn toggle(&mut self, id: EntryId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Ids in ascending order
    pub fn ids(&self) -> Vec<EntryId> {
        let mut ids: Vec<EntryId> = self.ids.iter().copied().collect();
        ids.sort_unstable();
        ids
    }
}
