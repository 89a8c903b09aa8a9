//! Profile photo URI, persisted as a JSON string

use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::storage::{KeyValueStore, PROFILE_PHOTO_KEY};

pub struct ProfilePhotoStore {
    storage: Arc<dyn KeyValueStore>,
    photo: RwLock<Option<String>>,
    is_loading: RwLock<bool>,
    write_lock: Mutex<()>,
}

impl ProfilePhotoStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            storage,
            photo: RwLock::new(None),
            is_loading: RwLock::new(false),
            write_lock: Mutex::new(()),
        }
    }

    pub fn photo(&self) -> Option<String> {
        self.photo.read().clone()
    }

    pub fn is_loading(&self) -> bool {
        *self.is_loading.read()
    }

    pub async fn load(&self) {
        match self.storage.get_item(PROFILE_PHOTO_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<String>(&raw) {
                Ok(uri) => *self.photo.write() = Some(uri),
                Err(e) => tracing::error!(error = %e, "Stored profile photo is corrupt"),
            },
            Ok(None) => {}
            Err(e) => tracing::error!(error = %e, "Failed to load profile photo"),
        }
    }

    /// Persist first, then update memory; returns `false` if persisting failed
    pub async fn save(&self, uri: &str) -> bool {
        let _guard = self.write_lock.lock().await;
        *self.is_loading.write() = true;

        let json = match serde_json::to_string(uri) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize profile photo");
                *self.is_loading.write() = false;
                return false;
            }
        };
        let saved = match self.storage.set_item(PROFILE_PHOTO_KEY, &json).await {
            Ok(()) => {
                *self.photo.write() = Some(uri.to_string());
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to save profile photo");
                false
            }
        };

        *self.is_loading.write() = false;
        saved
    }

    pub async fn clear(&self) {
        let _guard = self.write_lock.lock().await;
        match self.storage.remove_item(PROFILE_PHOTO_KEY).await {
            Ok(()) => *self.photo.write() = None,
            Err(e) => tracing::error!(error = %e, "Failed to clear profile photo"),
        }
    }
}
