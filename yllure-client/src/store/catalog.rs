//! CatalogStore - 目录缓存
//!
//! Holds the last fetched catalog and the filtered view derived from it.

use parking_lot::RwLock;
use shared::{Dress, DressFilters};
use std::sync::Arc;

use crate::ApiService;
use crate::filter::{apply_filters, search_items};

#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    pub items: Vec<Dress>,
    pub featured_items: Vec<Dress>,
    pub filtered_items: Vec<Dress>,
    pub is_loading: bool,
}

pub struct CatalogStore {
    api: Arc<ApiService>,
    state: RwLock<CatalogState>,
}

impl CatalogStore {
    pub fn new(api: Arc<ApiService>) -> Self {
        Self {
            api,
            state: RwLock::new(CatalogState::default()),
        }
    }

    pub fn items(&self) -> Vec<Dress> {
        self.state.read().items.clone()
    }

    pub fn featured_items(&self) -> Vec<Dress> {
        self.state.read().featured_items.clone()
    }

    pub fn filtered_items(&self) -> Vec<Dress> {
        self.state.read().filtered_items.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().is_loading
    }

    fn set_loading(&self, loading: bool) {
        self.state.write().is_loading = loading;
    }

    /// Replace the catalog wholesale; `[]` on any failure
    pub async fn fetch_all(&self) {
        self.set_loading(true);
        tracing::debug!("Fetching dresses");

        let items = match self.api.get_dresses(&DressFilters::default()).await {
            Ok(response) => match response.into_data() {
                Some(items) => items,
                None => {
                    tracing::warn!("No dresses data received");
                    Vec::new()
                }
            },
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch dresses");
                Vec::new()
            }
        };

        tracing::info!(count = items.len(), "Catalog loaded");
        let mut state = self.state.write();
        state.filtered_items = items.clone();
        state.items = items;
        state.is_loading = false;
    }

    /// Available items, narrowed locally to featured ones
    pub async fn fetch_featured(&self) {
        self.set_loading(true);
        tracing::debug!("Fetching featured dresses");

        let featured: Vec<Dress> = match self.api.get_available_dresses().await {
            Ok(response) => response
                .into_data()
                .unwrap_or_default()
                .into_iter()
                .filter(|d| d.featured)
                .collect(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch featured dresses");
                Vec::new()
            }
        };

        tracing::info!(count = featured.len(), "Featured dresses loaded");
        let mut state = self.state.write();
        state.featured_items = featured;
        state.is_loading = false;
    }

    /// Single item by id; `None` if not found or on error
    pub async fn fetch_one(&self, id: &str) -> Option<Dress> {
        tracing::debug!(id = %id, "Fetching dress");
        match self.api.get_dress(id).await {
            Ok(response) => {
                let dress = response.into_data();
                if dress.is_none() {
                    tracing::warn!(id = %id, "No dress data received");
                }
                dress
            }
            Err(e) => {
                tracing::error!(id = %id, error = %e, "Failed to fetch dress");
                None
            }
        }
    }

    /// Re-fetch with a server-side search hint, then match locally.
    ///
    /// Only the filtered view changes. A blank query resets the view
    /// without a network call.
    pub async fn search(&self, query: &str) {
        if query.trim().is_empty() {
            self.reset_filters();
            return;
        }

        self.set_loading(true);
        tracing::debug!(query = %query, "Searching dresses");

        let results = match self.api.search_dresses(query).await {
            Ok(response) => search_items(&response.into_data().unwrap_or_default(), query),
            Err(e) => {
                tracing::error!(query = %query, error = %e, "Failed to search dresses");
                Vec::new()
            }
        };

        tracing::info!(query = %query, count = results.len(), "Search finished");
        let mut state = self.state.write();
        state.filtered_items = results;
        state.is_loading = false;
    }

    /// Recompute the filtered view from the cached catalog (no I/O)
    pub fn apply_filters(&self, filters: &DressFilters) {
        let mut state = self.state.write();
        tracing::debug!(?filters, count = state.items.len(), "Applying filters");
        state.filtered_items = apply_filters(&state.items, filters);
    }

    pub fn reset_filters(&self) {
        let mut state = self.state.write();
        state.filtered_items = state.items.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClientError;
    use crate::remote::{ApiRequest, MockClient, RemoteClient};
    use async_trait::async_trait;
    use serde_json::Value;
    use shared::ApiResponse;
    use std::time::Duration;

    struct Offline;

    #[async_trait]
    impl RemoteClient for Offline {
        async fn send(&self, _request: &ApiRequest) -> crate::ClientResult<ApiResponse<Value>> {
            Err(ClientError::Timeout(Duration::from_secs(10)))
        }
    }

    fn mock_store() -> CatalogStore {
        let api = ApiService::new(Arc::new(MockClient::new().with_latency(Duration::ZERO)));
        CatalogStore::new(Arc::new(api))
    }

    fn offline_store() -> CatalogStore {
        CatalogStore::new(Arc::new(ApiService::new(Arc::new(Offline))))
    }

    #[tokio::test]
    async fn test_fetch_all_populates_both_views() {
        let store = mock_store();
        store.fetch_all().await;

        assert_eq!(store.items().len(), 3);
        assert_eq!(store.filtered_items(), store.items());
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_fetch_all_failure_clears_and_stops_loading() {
        let store = offline_store();
        store.fetch_all().await;

        assert!(store.items().is_empty());
        assert!(store.filtered_items().is_empty());
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_fetch_featured() {
        let store = mock_store();
        store.fetch_featured().await;

        let featured = store.featured_items();
        assert_eq!(featured.len(), 2);
        assert!(featured.iter().all(|d| d.featured && d.available));
    }

    #[tokio::test]
    async fn test_fetch_featured_error_is_swallowed() {
        let store = offline_store();
        store.fetch_featured().await;
        assert!(store.featured_items().is_empty());
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_fetch_one() {
        let store = mock_store();
        assert_eq!(store.fetch_one("3").await.unwrap().name, "Bohemian Maxi Dress");
        assert!(store.fetch_one("nope").await.is_none());
        assert!(offline_store().fetch_one("1").await.is_none());
    }

    #[tokio::test]
    async fn test_search_updates_filtered_only() {
        let store = mock_store();
        store.fetch_all().await;
        store.search("gown").await;

        let names: Vec<_> = store.filtered_items().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["Elegant Evening Gown"]);
        assert_eq!(store.items().len(), 3);
    }

    #[tokio::test]
    async fn test_blank_search_resets_view() {
        let store = mock_store();
        store.fetch_all().await;
        store.apply_filters(&DressFilters::new().with_available(false));
        assert_eq!(store.filtered_items().len(), 1);

        store.search("  ").await;
        assert_eq!(store.filtered_items().len(), 3);
    }

    #[tokio::test]
    async fn test_apply_and_reset_filters() {
        let store = mock_store();
        store.fetch_all().await;

        store.apply_filters(&DressFilters::new().with_available(true));
        assert_eq!(store.filtered_items().len(), 2);

        store.reset_filters();
        assert_eq!(store.filtered_items(), store.items());
    }

    #[test]
    fn test_apply_filters_on_empty_catalog() {
        let store = mock_store();
        store.apply_filters(&DressFilters::new().with_search("gown"));
        assert!(store.filtered_items().is_empty());
    }
}
