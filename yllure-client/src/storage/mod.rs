//! Durable local key-value storage
//!
//! String-keyed blob store surviving process restarts. Values are JSON
//! strings; callers own serialization.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use thiserror::Error;

/// Serialized `User` of the current session
pub const USER_STORAGE_KEY: &str = "yllure_user";
/// Bearer token issued at login (remote auth only)
pub const AUTH_TOKEN_KEY: &str = "yllure_auth_token";
/// Serialized `Vec<Dress>` of saved items
pub const WISHLIST_STORAGE_KEY: &str = "yllure_wishlist";
/// Profile photo URI, as a JSON string
pub const PROFILE_PHOTO_KEY: &str = "yllure_profile_photo";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// `None` when the key was never written or has been removed
    async fn get_item(&self, key: &str) -> StorageResult<Option<String>>;

    async fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Removing an absent key is not an error
    async fn remove_item(&self, key: &str) -> StorageResult<()>;

    async fn multi_remove(&self, keys: &[&str]) -> StorageResult<()> {
        for key in keys {
            self.remove_item(key).await?;
        }
        Ok(())
    }
}
