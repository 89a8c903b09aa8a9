//! Mock responder
//!
//! Serves the backend's endpoint shapes from a static in-memory dataset so
//! the app stays usable offline. Never returns `Err`; unknown routes get a
//! `success: false` envelope.

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use shared::client::{AddWishlistItemRequest, CreateWishlistRequest, LoginRequest};
use shared::{ApiResponse, Dress, Size, User, Wishlist, WishlistItem};
use std::collections::HashMap;
use std::time::Duration;

use super::{ApiRequest, RemoteClient};
use crate::ClientResult;
use crate::config::DEFAULT_MOCK_LATENCY_MS;

/// Built-in catalog served by the mock responder
pub fn mock_dresses() -> Vec<Dress> {
    let now = Utc::now();
    let dress = |id: &str,
                 name: &str,
                 description: &str,
                 price: i64,
                 size: Size,
                 available: bool,
                 image: &str,
                 featured: bool| Dress {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        price: Decimal::from(price),
        size,
        available,
        front_image: image.to_string(),
        back_image: image.to_string(),
        featured,
        created_at: now,
        updated_at: now,
    };

    vec![
        dress(
            "1",
            "Elegant Evening Gown",
            "A stunning floor-length evening gown perfect for formal occasions.",
            150,
            Size::M,
            true,
            "https://images.pexels.com/photos/1021693/pexels-photo-1021693.jpeg",
            true,
        ),
        dress(
            "2",
            "Classic Cocktail Dress",
            "A timeless cocktail dress suitable for semi-formal events.",
            100,
            Size::S,
            true,
            "https://images.pexels.com/photos/1536619/pexels-photo-1536619.jpeg",
            true,
        ),
        dress(
            "3",
            "Bohemian Maxi Dress",
            "A flowing maxi dress with bohemian flair.",
            80,
            Size::L,
            false,
            "https://images.pexels.com/photos/1239288/pexels-photo-1239288.jpeg",
            false,
        ),
    ]
}

/// Static-data stand-in for the backend
#[derive(Debug, Clone)]
pub struct MockClient {
    dresses: Vec<Dress>,
    latency: Duration,
}

impl MockClient {
    pub fn new() -> Self {
        Self {
            dresses: mock_dresses(),
            latency: Duration::from_millis(DEFAULT_MOCK_LATENCY_MS),
        }
    }

    /// Serve a custom dataset
    pub fn with_dresses(mut self, dresses: Vec<Dress>) -> Self {
        self.dresses = dresses;
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Compute the response for a request without simulated latency
    pub fn respond(&self, request: &ApiRequest) -> ApiResponse<Value> {
        let url = match reqwest::Url::parse(&format!("http://mock{}", request.endpoint)) {
            Ok(url) => url,
            Err(_) => return unknown_endpoint(request),
        };
        let segments: Vec<&str> = url
            .path()
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();
        let query: HashMap<String, String> = url.query_pairs().into_owned().collect();

        match (request.method.as_str(), segments.as_slice()) {
            ("GET", ["api", "dresses"]) => self.list_dresses(&query),
            ("GET", ["api", "dresses", id]) => self.get_dress(id),
            ("POST", ["api", "wishlists"]) => {
                let name = body_as::<CreateWishlistRequest>(request)
                    .unwrap_or_default()
                    .name;
                to_envelope(ApiResponse::ok(new_wishlist(uuid::Uuid::new_v4().to_string(), name)))
            }
            ("GET", ["api", "wishlists", id]) => {
                to_envelope(ApiResponse::ok(new_wishlist(id.to_string(), "My Wishlist".into())))
            }
            ("POST", ["api", "wishlists", id, "items"]) => self.add_wishlist_item(id, request),
            ("DELETE", ["api", "wishlists", _, "items"]) => ApiResponse::empty(),
            ("POST", ["api", "auth", "login"]) => login(request),
            ("POST", ["api", "auth", "logout"]) => ApiResponse::empty(),
            // Mock backend has no session validation
            ("GET", ["api", "auth", "me"]) => ApiResponse::empty(),
            _ => unknown_endpoint(request),
        }
    }

    fn list_dresses(&self, query: &HashMap<String, String>) -> ApiResponse<Value> {
        let available = query.get("available").and_then(|v| v.parse::<bool>().ok());
        let featured = query.get("featured").and_then(|v| v.parse::<bool>().ok());
        let size = query.get("size").and_then(|v| v.parse::<Size>().ok());

        let items: Vec<Dress> = self
            .dresses
            .iter()
            .filter(|d| available.is_none_or(|a| d.available == a))
            .filter(|d| featured.is_none_or(|f| d.featured == f))
            .filter(|d| size.is_none_or(|s| d.size == s))
            .cloned()
            .collect();

        to_envelope(ApiResponse::ok_list(items))
    }

    fn get_dress(&self, id: &str) -> ApiResponse<Value> {
        match self.dresses.iter().find(|d| d.id == id) {
            Some(dress) => to_envelope(ApiResponse::ok(dress.clone())),
            None => ApiResponse::empty().with_message("Dress not found"),
        }
    }

    fn add_wishlist_item(&self, wishlist_id: &str, request: &ApiRequest) -> ApiResponse<Value> {
        let Some(body) = body_as::<AddWishlistItemRequest>(request) else {
            return ApiResponse::empty().with_message("Missing dressId");
        };
        let Some(dress) = self.dresses.iter().find(|d| d.id == body.dress_id) else {
            return ApiResponse::empty().with_message("Dress not found");
        };

        to_envelope(ApiResponse::ok(WishlistItem {
            id: uuid::Uuid::new_v4().to_string(),
            wishlist_id: wishlist_id.to_string(),
            dress_id: dress.id.clone(),
            created_at: Utc::now(),
            dress: dress.clone(),
        }))
    }
}

impl Default for MockClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RemoteClient for MockClient {
    async fn send(&self, request: &ApiRequest) -> ClientResult<ApiResponse<Value>> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        let response = self.respond(request);
        tracing::debug!(
            method = %request.method,
            endpoint = %request.endpoint,
            success = response.success,
            "Served mock response"
        );
        Ok(response)
    }
}

fn login(request: &ApiRequest) -> ApiResponse<Value> {
    let Some(body) = body_as::<LoginRequest>(request) else {
        return ApiResponse::error("Email and password are required");
    };
    if body.email.trim().is_empty() || body.password.is_empty() {
        return ApiResponse::error("Email and password are required");
    }

    let now = Utc::now();
    to_envelope(ApiResponse::ok(User {
        id: "1".to_string(),
        name: "User".to_string(),
        email: body.email.trim().to_string(),
        created_at: now,
        updated_at: now,
    }))
}

fn new_wishlist(id: String, name: String) -> Wishlist {
    let now = Utc::now();
    Wishlist {
        id,
        name,
        items: Vec::new(),
        created_at: now,
        updated_at: now,
    }
}

fn body_as<T: serde::de::DeserializeOwned>(request: &ApiRequest) -> Option<T> {
    request
        .body
        .clone()
        .and_then(|body| serde_json::from_value(body).ok())
}

fn to_envelope<T: Serialize>(response: ApiResponse<T>) -> ApiResponse<Value> {
    response
        .try_map_data(serde_json::to_value)
        .unwrap_or_else(|e| ApiResponse::error(e.to_string()))
}

fn unknown_endpoint(request: &ApiRequest) -> ApiResponse<Value> {
    tracing::warn!(method = %request.method, endpoint = %request.endpoint, "Mock: unknown endpoint");
    ApiResponse::error(format!(
        "Unknown endpoint: {} {}",
        request.method, request.endpoint
    ))
}
