//! Typed API facade
//!
//! Builds requests for each backend operation and decodes the untyped
//! envelope returned by the [`RemoteClient`] stack.

use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::client::{AddWishlistItemRequest, CreateWishlistRequest, LoginRequest};
use shared::{ApiResponse, Dress, DressFilters, User, Wishlist, WishlistItem};
use std::sync::Arc;

use crate::remote::{
    ApiRequest, DRESSES_PATH, FallbackClient, MockClient, NetworkHttpClient, RemoteClient,
    endpoint_with_query,
};
use crate::{ClientConfig, ClientError, ClientResult};

/// Typed access to the catalog backend
#[derive(Clone)]
pub struct ApiService {
    client: Arc<dyn RemoteClient>,
}

impl ApiService {
    pub fn new(client: Arc<dyn RemoteClient>) -> Self {
        Self { client }
    }

    /// Build the client stack from configuration
    ///
    /// - `force_mock`: mock responder only
    /// - `use_mock_data`: network, falling back to the mock responder
    /// - otherwise: network only
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        let mock = || -> Arc<dyn RemoteClient> {
            Arc::new(MockClient::new().with_latency(config.mock_latency()))
        };

        let client: Arc<dyn RemoteClient> = if config.force_mock {
            tracing::info!("Using mock data for all requests");
            mock()
        } else {
            let network: Arc<dyn RemoteClient> = Arc::new(NetworkHttpClient::new(config)?);
            if config.use_mock_data {
                Arc::new(FallbackClient::new(network, mock()))
            } else {
                network
            }
        };

        tracing::debug!(
            base_url = %config.base_url,
            environment = %config.environment,
            force_mock = config.force_mock,
            use_mock_data = config.use_mock_data,
            "API service configured"
        );
        Ok(Self::new(client))
    }

    /// Send a request and decode its payload into `T`
    ///
    /// A payload that does not decode is re-sent to the client's fallback,
    /// if it has one.
    pub async fn request<T: DeserializeOwned>(&self, request: ApiRequest) -> ClientResult<ApiResponse<T>> {
        let envelope = self.client.send(&request).await?;
        match decode(&request, envelope) {
            Ok(response) => Ok(response),
            Err(e) => {
                let Some(fallback) = self.client.fallback() else {
                    return Err(e);
                };
                tracing::warn!(
                    endpoint = %request.endpoint,
                    error = %e,
                    "Unexpected response shape, serving fallback data"
                );
                decode(&request, fallback.send(&request).await?)
            }
        }
    }

    // ========== Dress API ==========

    pub async fn get_dresses(&self, filters: &DressFilters) -> ClientResult<ApiResponse<Vec<Dress>>> {
        let endpoint = endpoint_with_query(DRESSES_PATH, &filters.query_pairs())?;
        self.request(ApiRequest::get(endpoint)).await
    }

    pub async fn get_dress(&self, id: &str) -> ClientResult<ApiResponse<Dress>> {
        let endpoint = endpoint_with_query(&format!("{}/{}", DRESSES_PATH, id), &[])?;
        self.request(ApiRequest::get(endpoint)).await
    }

    pub async fn get_available_dresses(&self) -> ClientResult<ApiResponse<Vec<Dress>>> {
        self.get_dresses(&DressFilters::new().with_available(true)).await
    }

    pub async fn get_featured_dresses(&self) -> ClientResult<ApiResponse<Vec<Dress>>> {
        let endpoint = endpoint_with_query(
            DRESSES_PATH,
            &[("featured", "true".to_string()), ("available", "true".to_string())],
        )?;
        self.request(ApiRequest::get(endpoint)).await
    }

    pub async fn search_dresses(&self, query: &str) -> ClientResult<ApiResponse<Vec<Dress>>> {
        self.get_dresses(&DressFilters::new().with_search(query)).await
    }

    // ========== Wishlist API ==========

    pub async fn create_wishlist(&self, name: &str) -> ClientResult<ApiResponse<Wishlist>> {
        let body = CreateWishlistRequest {
            name: name.to_string(),
        };
        self.request(ApiRequest::post("/api/wishlists", &body)?).await
    }

    pub async fn get_wishlist(&self, id: &str) -> ClientResult<ApiResponse<Wishlist>> {
        let endpoint = endpoint_with_query(&format!("/api/wishlists/{}", id), &[])?;
        self.request(ApiRequest::get(endpoint)).await
    }

    pub async fn add_to_wishlist(
        &self,
        wishlist_id: &str,
        dress_id: &str,
    ) -> ClientResult<ApiResponse<WishlistItem>> {
        let endpoint = endpoint_with_query(&format!("/api/wishlists/{}/items", wishlist_id), &[])?;
        let body = AddWishlistItemRequest {
            dress_id: dress_id.to_string(),
        };
        self.request(ApiRequest::post(endpoint, &body)?).await
    }

    pub async fn remove_from_wishlist(
        &self,
        wishlist_id: &str,
        dress_id: &str,
    ) -> ClientResult<ApiResponse<()>> {
        let endpoint = endpoint_with_query(
            &format!("/api/wishlists/{}/items", wishlist_id),
            &[("dressId", dress_id.to_string())],
        )?;
        self.request(ApiRequest::delete(endpoint)).await
    }

    // ========== Auth API ==========

    pub async fn login(&self, email: &str, password: &str) -> ClientResult<ApiResponse<User>> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.request(ApiRequest::post("/api/auth/login", &body)?).await
    }

    pub async fn logout(&self) -> ClientResult<ApiResponse<()>> {
        self.request(ApiRequest::post_empty("/api/auth/logout")).await
    }

    /// Server-side session validation; `data` is `None` when unknown
    pub async fn current_user(&self) -> ClientResult<ApiResponse<User>> {
        self.request(ApiRequest::get("/api/auth/me")).await
    }
}

fn decode<T: DeserializeOwned>(
    request: &ApiRequest,
    envelope: ApiResponse<Value>,
) -> ClientResult<ApiResponse<T>> {
    envelope
        .try_map_data(serde_json::from_value)
        .map_err(|e| ClientError::InvalidResponse(format!("{}: {}", request.endpoint, e)))
}
