//! Yllure Client - catalog, wishlist and session services
//!
//! Remote access to the dress-rental backend with a local mock fallback,
//! client-side filtering, and the state stores consumed by the front end.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod filter;
pub mod logger;
pub mod remote;
pub mod storage;
pub mod store;

pub use api::ApiService;
pub use app::AppContext;
pub use config::{AuthMode, ClientConfig, Platform};
pub use error::{ClientError, ClientResult};
pub use remote::{ApiRequest, FallbackClient, MockClient, NetworkHttpClient, RemoteClient};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use store::{CatalogStore, ProfilePhotoStore, SessionState, UserStore, WishlistStore};

// Re-export shared types for convenience
pub use shared::{ApiResponse, Dress, DressFilters, Size, User, UserUpdate, Wishlist, WishlistItem};
