//! Journal Store
//!
//! Owns the in-memory entry list, the loading flag, the important set and
//! the entry form state. The presentation layer reads it through
//! [`JournalStore::snapshot`] and drives it through the three operations:
//!
//! - [`JournalStore::load`] replaces the entry list with the provider's
//! - [`JournalStore::create`] prepends a newly created entry
//! - [`JournalStore::toggle_important`] flips a local flag, no network
//!
//! Provider failures are logged and returned; nothing is retried.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::error::{JournalError, JournalResult};
use super::types::{Draft, DraftError, Entry, EntryId, ImportantSet};
use crate::provider::Provider;

/// Client-side journal state holder
pub struct JournalStore {
    provider: Arc<dyn Provider>,
    state: Arc<RwLock<JournalState>>,
    loading: Arc<AtomicBool>,
}

/// Mutable store state
#[derive(Debug, Clone, Default)]
pub struct JournalState {
    /// Entries in display order, newest creations first
    pub entries: Vec<Entry>,
    /// Ids flagged important during this session
    pub important: ImportantSet,
    /// Current entry form input
    pub draft: Draft,
    /// Whether the entry form is shown
    pub form_visible: bool,
}

/// Point-in-time copy of the store for rendering
#[derive(Debug, Clone, Default)]
pub struct JournalSnapshot {
    pub state: JournalState,
    pub loading: bool,
}

/// Sets the loading flag for its lifetime
///
/// Dropping the guard clears the flag whether the operation succeeded,
/// failed, or was cancelled.
struct BusyGuard {
    flag: Arc<AtomicBool>,
}

impl BusyGuard {
    fn enter(flag: &Arc<AtomicBool>) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self {
            flag: Arc::clone(flag),
        }
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

impl JournalStore {
    /// Create an empty, idle store backed by `provider`
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        Self {
            provider,
            state: Arc::new(RwLock::new(JournalState::default())),
            loading: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Replace the entry list with the provider's full collection
    ///
    /// Returns the number of entries loaded. On failure the previous list
    /// is kept.
    pub async fn load(&self) -> JournalResult<usize> {
        let _busy = BusyGuard::enter(&self.loading);

        match self.provider.list_entries().await {
            Ok(entries) => {
                let count = entries.len();
                self.state.write().await.entries = entries;
                tracing::info!(provider = %self.provider.name(), count, "Loaded entries");
                Ok(count)
            }
            Err(e) => {
                let err = JournalError::FetchFailed(e);
                tracing::error!(kind = err.kind(), error = %err, "Error fetching entries");
                Err(err)
            }
        }
    }

    /// Like [`load`](Self::load), calling `on_busy` with a snapshot taken
    /// while the request is still pending
    ///
    /// `on_busy` is skipped when the provider answers without suspending.
    pub async fn load_with_progress<F>(&self, on_busy: F) -> JournalResult<usize>
    where
        F: FnOnce(&JournalSnapshot),
    {
        let load = self.load();
        tokio::pin!(load);

        // First poll marks the store busy and sends the request
        tokio::select! {
            biased;
            result = &mut load => return result,
            _ = std::future::ready(()) => {}
        }

        on_busy(&self.snapshot().await);
        load.await
    }

    /// Create an entry from `draft` and put it at the front of the list
    ///
    /// On success the stored draft is cleared and the form hidden. On
    /// failure the list and draft are unchanged.
    pub async fn create(&self, draft: Draft) -> JournalResult<Entry> {
        let _busy = BusyGuard::enter(&self.loading);
        let new_entry = draft.to_new_entry();

        match self.provider.create_entry(&new_entry).await {
            Ok(entry) => {
                let mut state = self.state.write().await;
                state.entries.insert(0, entry.clone());
                state.draft = Draft::default();
                state.form_visible = false;
                tracing::info!(id = entry.id, title = %entry.title, "Created entry");
                Ok(entry)
            }
            Err(e) => {
                let err = JournalError::CreateFailed(e);
                tracing::error!(kind = err.kind(), error = %err, "Error creating entry");
                Err(err)
            }
        }
    }

    /// Create an entry from the store's current draft
    pub async fn submit(&self) -> JournalResult<Entry> {
        let draft = self.draft().await;
        self.create(draft).await
    }

    /// Flip the important flag of `id`, returning the new state
    ///
    /// `id` does not have to be in the entry list.
    pub async fn toggle_important(&self, id: EntryId) -> bool {
        let important = self.state.write().await.important.toggle(id);
        tracing::debug!(id, important, "Toggled important flag");
        important
    }

    pub async fn is_important(&self, id: EntryId) -> bool {
        self.state.read().await.important.contains(id)
    }

    /// Important ids in ascending order
    pub async fn important_ids(&self) -> Vec<EntryId> {
        self.state.read().await.important.ids()
    }

    pub async fn entries(&self) -> Vec<Entry> {
        self.state.read().await.entries.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    pub async fn draft(&self) -> Draft {
        self.state.read().await.draft.clone()
    }

    /// Update one field of the stored draft
    pub async fn update_draft(&self, field: &str, value: &str) -> Result<(), DraftError> {
        self.state.write().await.draft.set_field(field, value)
    }

    pub async fn is_form_visible(&self) -> bool {
        self.state.read().await.form_visible
    }

    /// Show or hide the entry form, returning the new visibility
    pub async fn toggle_form(&self) -> bool {
        let mut state = self.state.write().await;
        state.form_visible = !state.form_visible;
        state.form_visible
    }

    pub async fn snapshot(&self) -> JournalSnapshot {
        JournalSnapshot {
            state: self.state.read().await.clone(),
            loading: self.is_loading(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::{NewEntry, DEFAULT_USER_ID};
    use crate::provider::{MemoryProvider, ProviderError};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tokio::sync::Notify;

    fn entry(id: EntryId, title: &str) -> Entry {
        Entry {
            id,
            title: title.into(),
            body: format!("{} body", title),
            user_id: 1,
        }
    }

    /// Provider whose calls can be switched to fail
    struct FlakyProvider {
        inner: MemoryProvider,
        fail: AtomicBool,
        last_request: Mutex<Option<NewEntry>>,
    }

    impl FlakyProvider {
        fn new(entries: Vec<Entry>) -> Self {
            Self {
                inner: MemoryProvider::with_entries(entries),
                fail: AtomicBool::new(false),
                last_request: Mutex::new(None),
            }
        }

        fn set_failing(&self, fail: bool) {
            self.fail.store(fail, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl Provider for FlakyProvider {
        fn name(&self) -> &str {
            "flaky"
        }

        async fn list_entries(&self) -> Result<Vec<Entry>, ProviderError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(ProviderError::Status {
                    status: 500,
                    message: "unavailable".into(),
                });
            }
            self.inner.list_entries().await
        }

        async fn create_entry(&self, new_entry: &NewEntry) -> Result<Entry, ProviderError> {
            *self.last_request.lock().unwrap() = Some(new_entry.clone());
            if self.fail.load(Ordering::SeqCst) {
                return Err(ProviderError::Unavailable);
            }
            self.inner.create_entry(new_entry).await
        }
    }

    /// Provider that blocks `list_entries` until released
    struct GatedProvider {
        gate: Notify,
    }

    #[async_trait]
    impl Provider for GatedProvider {
        fn name(&self) -> &str {
            "gated"
        }

        async fn list_entries(&self) -> Result<Vec<Entry>, ProviderError> {
            self.gate.notified().await;
            Ok(vec![entry(1, "late")])
        }

        async fn create_entry(&self, new_entry: &NewEntry) -> Result<Entry, ProviderError> {
            self.gate.notified().await;
            Ok(Entry {
                id: 9,
                title: new_entry.title.clone(),
                body: new_entry.body.clone(),
                user_id: new_entry.user_id,
            })
        }
    }

    /// Provider that counts every call it receives
    #[derive(Default)]
    struct CountingProvider {
        calls: std::sync::atomic::AtomicUsize,
    }

    #[async_trait]
    impl Provider for CountingProvider {
        fn name(&self) -> &str {
            "counting"
        }

        async fn list_entries(&self) -> Result<Vec<Entry>, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![entry(1, "a")])
        }

        async fn create_entry(&self, _new_entry: &NewEntry) -> Result<Entry, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(ProviderError::Unavailable)
        }
    }

    async fn wait_until_loading(store: &JournalStore) {
        for _ in 0..100 {
            if store.is_loading() {
                break;
            }
            tokio::task::yield_now().await;
        }
    }

    fn store_with(provider: Arc<FlakyProvider>) -> JournalStore {
        JournalStore::new(provider)
    }

    #[tokio::test]
    async fn test_new_store_is_idle_and_empty() {
        let store = JournalStore::new(Arc::new(MemoryProvider::new()));
        assert!(!store.is_loading());
        assert!(store.entries().await.is_empty());
        assert!(store.important_ids().await.is_empty());
        assert!(!store.is_form_visible().await);
    }

    #[tokio::test]
    async fn test_load_replaces_list_in_provider_order() {
        let provider = Arc::new(FlakyProvider::new(vec![
            entry(3, "c"),
            entry(1, "a"),
            entry(2, "b"),
        ]));
        let store = store_with(Arc::clone(&provider));

        assert_eq!(store.load().await.unwrap(), 3);
        let ids: Vec<EntryId> = store.entries().await.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_load_does_not_merge() {
        let provider = Arc::new(FlakyProvider::new(vec![entry(1, "a")]));
        let store = store_with(Arc::clone(&provider));

        store.load().await.unwrap();
        store.load().await.unwrap();
        assert_eq!(store.entries().await.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_load_keeps_previous_list() {
        let provider = Arc::new(FlakyProvider::new(vec![entry(1, "a"), entry(2, "b")]));
        let store = store_with(Arc::clone(&provider));
        store.load().await.unwrap();
        let before = store.entries().await;

        provider.set_failing(true);
        let err = store.load().await.unwrap_err();

        assert!(matches!(err, JournalError::FetchFailed(_)));
        assert_eq!(store.entries().await, before);
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_create_prepends_and_clears_draft() {
        let provider = Arc::new(FlakyProvider::new(vec![entry(1, "a"), entry(2, "b")]));
        let store = store_with(Arc::clone(&provider));
        store.load().await.unwrap();
        let before = store.entries().await;

        store.toggle_form().await;
        store.update_draft("title", "T").await.unwrap();
        store.update_draft("body", "B").await.unwrap();

        let created = store.create(Draft::new("T", "B")).await.unwrap();
        assert_eq!(created.id, 3);

        let after = store.entries().await;
        assert_eq!(after.len(), before.len() + 1);
        assert_eq!(after[0].id, 3);
        assert_eq!(after[0].title, "T");
        assert_eq!(&after[1..], &before[..]);

        assert!(store.draft().await.is_empty());
        assert!(!store.is_form_visible().await);
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_create_sends_default_user_id() {
        let provider = Arc::new(FlakyProvider::new(vec![]));
        let store = store_with(Arc::clone(&provider));

        store.create(Draft::new("T", "B")).await.unwrap();

        let sent = provider.last_request.lock().unwrap().clone().unwrap();
        assert_eq!(sent.user_id, DEFAULT_USER_ID);
        assert_eq!(sent.title, "T");
        assert_eq!(sent.body, "B");
    }

    #[tokio::test]
    async fn test_failed_create_leaves_state_unchanged() {
        let provider = Arc::new(FlakyProvider::new(vec![entry(1, "a")]));
        let store = store_with(Arc::clone(&provider));
        store.load().await.unwrap();
        store.update_draft("title", "keep me").await.unwrap();

        provider.set_failing(true);
        let err = store.submit().await.unwrap_err();

        assert!(matches!(err, JournalError::CreateFailed(_)));
        assert_eq!(store.entries().await.len(), 1);
        assert_eq!(store.draft().await.title, "keep me");
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_submit_uses_stored_draft() {
        let provider = Arc::new(FlakyProvider::new(vec![]));
        let store = store_with(Arc::clone(&provider));

        store.update_draft("title", "From form").await.unwrap();
        store.update_draft("body", "Typed in").await.unwrap();
        let created = store.submit().await.unwrap();

        assert_eq!(created.title, "From form");
        assert_eq!(created.body, "Typed in");
        assert!(store.draft().await.is_empty());
    }

    #[tokio::test]
    async fn test_toggle_important_twice_restores_state() {
        let provider = Arc::new(FlakyProvider::new(vec![entry(1, "a")]));
        let store = store_with(Arc::clone(&provider));
        store.load().await.unwrap();

        assert!(store.toggle_important(1).await);
        assert!(store.is_important(1).await);
        assert!(!store.toggle_important(1).await);
        assert!(!store.is_important(1).await);
    }

    #[tokio::test]
    async fn test_toggle_important_for_unlisted_id() {
        let store = JournalStore::new(Arc::new(MemoryProvider::new()));

        assert!(store.toggle_important(42).await);
        assert_eq!(store.important_ids().await, vec![42]);
        assert!(store.entries().await.is_empty());
    }

    #[tokio::test]
    async fn test_important_flags_survive_reload() {
        let provider = Arc::new(FlakyProvider::new(vec![entry(1, "a")]));
        let store = store_with(Arc::clone(&provider));
        store.load().await.unwrap();
        store.toggle_important(1).await;

        store.load().await.unwrap();
        assert!(store.is_important(1).await);
    }

    #[tokio::test]
    async fn test_loading_flag_set_while_in_flight() {
        let provider = Arc::new(GatedProvider {
            gate: Notify::new(),
        });
        let store = Arc::new(JournalStore::new(Arc::clone(&provider) as Arc<dyn Provider>));

        let task = {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.load().await })
        };

        wait_until_loading(&store).await;
        assert!(store.is_loading());
        assert!(store.snapshot().await.loading);

        provider.gate.notify_one();
        assert_eq!(task.await.unwrap().unwrap(), 1);
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_loading_flag_set_while_create_in_flight() {
        let provider = Arc::new(GatedProvider {
            gate: Notify::new(),
        });
        let store = Arc::new(JournalStore::new(Arc::clone(&provider) as Arc<dyn Provider>));

        let task = {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.create(Draft::new("T", "B")).await })
        };

        wait_until_loading(&store).await;
        assert!(store.is_loading());
        assert!(store.snapshot().await.loading);
        assert!(store.entries().await.is_empty());

        provider.gate.notify_one();
        let created = task.await.unwrap().unwrap();
        assert_eq!(created.id, 9);
        assert!(!store.is_loading());
        assert!(!store.snapshot().await.loading);
        assert_eq!(store.entries().await[0].id, 9);
    }

    #[tokio::test]
    async fn test_toggle_important_never_calls_provider() {
        let provider = Arc::new(CountingProvider::default());
        let store = JournalStore::new(Arc::clone(&provider) as Arc<dyn Provider>);

        store.toggle_important(1).await;
        store.toggle_important(2).await;
        store.toggle_important(1).await;

        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
        assert_eq!(store.important_ids().await, vec![2]);
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_load_with_progress_reports_placeholder_state() {
        let provider = Arc::new(GatedProvider {
            gate: Notify::new(),
        });
        let store = JournalStore::new(Arc::clone(&provider) as Arc<dyn Provider>);

        let mut seen = None;
        let count = store
            .load_with_progress(|snapshot| {
                seen = Some((snapshot.loading, snapshot.state.entries.len()));
                provider.gate.notify_one();
            })
            .await
            .unwrap();

        assert_eq!(count, 1);
        assert_eq!(seen, Some((true, 0)));
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_load_with_progress_skips_callback_when_immediate() {
        let provider = Arc::new(FlakyProvider::new(vec![entry(1, "a")]));
        let store = store_with(provider);

        let mut called = false;
        store.load_with_progress(|_| called = true).await.unwrap();

        assert!(!called);
        assert_eq!(store.entries().await.len(), 1);
    }

    #[tokio::test]
    async fn test_cancelled_load_clears_loading() {
        let provider = Arc::new(GatedProvider {
            gate: Notify::new(),
        });
        let store = JournalStore::new(provider);

        let result =
            tokio::time::timeout(std::time::Duration::from_millis(20), store.load()).await;
        assert!(result.is_err());
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_toggle_form() {
        let store = JournalStore::new(Arc::new(MemoryProvider::new()));
        assert!(store.toggle_form().await);
        assert!(store.is_form_visible().await);
        assert!(!store.toggle_form().await);
    }
}
