//! WishlistStore - 心愿单
//!
//! Saved items are kept as owned `Dress` copies keyed by id and written
//! through to durable storage after every mutation. Mutations are
//! serialized by `write_lock`, so persistence writes never interleave.

use parking_lot::RwLock;
use shared::Dress;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::storage::{KeyValueStore, WISHLIST_STORAGE_KEY};

#[derive(Debug, Clone, Default)]
pub struct WishlistState {
    pub items: Vec<Dress>,
    pub is_loading: bool,
}

pub struct WishlistStore {
    storage: Arc<dyn KeyValueStore>,
    state: RwLock<WishlistState>,
    write_lock: Mutex<()>,
}

impl WishlistStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            storage,
            state: RwLock::new(WishlistState::default()),
            write_lock: Mutex::new(()),
        }
    }

    pub fn items(&self) -> Vec<Dress> {
        self.state.read().items.clone()
    }

    pub fn len(&self) -> usize {
        self.state.read().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().items.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().is_loading
    }

    /// In-memory membership test, no I/O
    pub fn contains(&self, dress_id: &str) -> bool {
        self.state.read().items.iter().any(|d| d.id == dress_id)
    }

    /// Append `dress` unless its id is already saved.
    ///
    /// Returns `true` if the collection changed. A duplicate add neither
    /// mutates nor persists.
    pub async fn add(&self, dress: Dress) -> bool {
        let _guard = self.write_lock.lock().await;

        let snapshot = {
            let mut state = self.state.write();
            if state.items.iter().any(|d| d.id == dress.id) {
                tracing::debug!(id = %dress.id, "Dress already in wishlist");
                return false;
            }
            state.items.push(dress);
            state.items.clone()
        };

        self.persist(&snapshot).await;
        true
    }

    /// Remove by id; absent ids are a no-op. Persists either way.
    pub async fn remove(&self, dress_id: &str) -> bool {
        let _guard = self.write_lock.lock().await;

        let (removed, snapshot) = {
            let mut state = self.state.write();
            let before = state.items.len();
            state.items.retain(|d| d.id != dress_id);
            (state.items.len() != before, state.items.clone())
        };

        self.persist(&snapshot).await;
        removed
    }

    pub async fn clear(&self) {
        let _guard = self.write_lock.lock().await;
        self.state.write().items.clear();
        self.persist(&[]).await;
    }

    /// Rehydrate from durable storage; safe to call repeatedly.
    ///
    /// Nothing stored leaves the in-memory list untouched.
    pub async fn fetch(&self) {
        let _guard = self.write_lock.lock().await;
        self.state.write().is_loading = true;

        match self.storage.get_item(WISHLIST_STORAGE_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Dress>>(&raw) {
                Ok(items) => {
                    tracing::info!(count = items.len(), "Wishlist loaded from storage");
                    self.state.write().items = items;
                }
                Err(e) => tracing::error!(error = %e, "Failed to parse persisted wishlist"),
            },
            Ok(None) => tracing::debug!("No persisted wishlist"),
            Err(e) => tracing::error!(error = %e, "Failed to load persisted wishlist"),
        }

        self.state.write().is_loading = false;
    }

    async fn persist(&self, items: &[Dress]) {
        let json = match serde_json::to_string(items) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize wishlist");
                return;
            }
        };
        if let Err(e) = self.storage.set_item(WISHLIST_STORAGE_KEY, &json).await {
            tracing::warn!(error = %e, "Failed to persist wishlist");
        }
    }
}
