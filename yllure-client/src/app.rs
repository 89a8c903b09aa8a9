//! AppContext - 应用上下文
//!
//! Builds every service once per process and hands them out by reference.

use std::sync::Arc;

use crate::storage::KeyValueStore;
use crate::store::{CatalogStore, ProfilePhotoStore, UserStore, WishlistStore};
use crate::{ApiService, ClientConfig, ClientResult};

pub struct AppContext {
    pub config: ClientConfig,
    pub api: Arc<ApiService>,
    pub catalog: CatalogStore,
    pub wishlist: WishlistStore,
    pub user: UserStore,
    pub profile_photo: ProfilePhotoStore,
}

impl AppContext {
    /// Wire the stores with the client stack described by `config`
    pub fn new(config: ClientConfig, storage: Arc<dyn KeyValueStore>) -> ClientResult<Self> {
        let api = Arc::new(ApiService::from_config(&config)?);
        Ok(Self::with_api(config, api, storage))
    }

    /// Wire the stores around an existing API service
    pub fn with_api(
        config: ClientConfig,
        api: Arc<ApiService>,
        storage: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self {
            catalog: CatalogStore::new(api.clone()),
            wishlist: WishlistStore::new(storage.clone()),
            user: UserStore::new(api.clone(), storage.clone(), config.auth_mode),
            profile_photo: ProfilePhotoStore::new(storage),
            api,
            config,
        }
    }

    /// Start-up hydration: session, wishlist, profile photo
    pub async fn restore(&self) {
        self.user.load_session().await;
        self.wishlist.fetch().await;
        self.profile_photo.load().await;
        tracing::info!(
            authenticated = self.user.is_authenticated(),
            wishlist = self.wishlist.len(),
            "Local state restored"
        );
    }
}
