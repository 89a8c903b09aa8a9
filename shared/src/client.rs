//! Client-related request DTOs
//!
//! Request bodies sent to the backend (or the mock responder).

use serde::{Deserialize, Serialize};

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Create wishlist request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateWishlistRequest {
    pub name: String,
}

impl Default for CreateWishlistRequest {
    fn default() -> Self {
        Self {
            name: "My Wishlist".to_string(),
        }
    }
}

/// Add wishlist item request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddWishlistItemRequest {
    pub dress_id: String,
}
