//! In-memory Entry Provider
//!
//! Keeps posts in process memory. New entries get the next id after the
//! highest one seen and are appended to the collection.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Provider, ProviderError};
use crate::journal::{Entry, EntryId, NewEntry};

#[derive(Debug, Default)]
pub struct MemoryProvider {
    entries: RwLock<Vec<Entry>>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider seeded with existing entries
    pub fn with_entries(entries: Vec<Entry>) -> Self {
        Self {
            entries: RwLock::new(entries),
        }
    }

    /// Number of stored entries
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    fn next_id(entries: &[Entry]) -> Result<EntryId, ProviderError> {
        let highest = entries.iter().map(|e| e.id).max().unwrap_or(0);
        highest
            .checked_add(1)
            .ok_or(ProviderError::IdsExhausted(highest))
    }
}

#[async_trait]
impl Provider for MemoryProvider {
    fn name(&self) -> &str {
        "memory"
    }

    async fn list_entries(&self) -> Result<Vec<Entry>, ProviderError> {
        Ok(self.entries.read().await.clone())
    }

    async fn create_entry(&self, new_entry: &NewEntry) -> Result<Entry, ProviderError> {
        let mut entries = self.entries.write().await;

        let entry = Entry {
            id: Self::next_id(&entries)?,
            title: new_entry.title.clone(),
            body: new_entry.body.clone(),
            user_id: new_entry.user_id,
        };
        entries.push(entry.clone());

        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_entry(title: &str) -> NewEntry {
        NewEntry {
            title: title.into(),
            body: "body".into(),
            user_id: 1,
        }
    }

    #[tokio::test]
    async fn test_empty_provider_starts_at_one() {
        let provider = MemoryProvider::new();
        assert!(provider.is_empty().await);

        let entry = provider.create_entry(&new_entry("a")).await.unwrap();
        assert_eq!(entry.id, 1);
        assert_eq!(provider.len().await, 1);
    }

    #[tokio::test]
    async fn test_ids_follow_highest_existing() {
        let provider = MemoryProvider::with_entries(vec![Entry {
            id: 100,
            title: "seed".into(),
            body: "seed".into(),
            user_id: 3,
        }]);

        let entry = provider.create_entry(&new_entry("next")).await.unwrap();
        assert_eq!(entry.id, 101);

        let listed = provider.list_entries().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[1].title, "next");
    }

    #[tokio::test]
    async fn test_create_after_max_id_fails() {
        let provider = MemoryProvider::with_entries(vec![Entry {
            id: u64::MAX,
            title: "last".into(),
            body: "last".into(),
            user_id: 1,
        }]);

        let err = provider.create_entry(&new_entry("overflow")).await.unwrap_err();
        assert!(matches!(err, ProviderError::IdsExhausted(u64::MAX)));
        assert_eq!(provider.len().await, 1);
    }
}
