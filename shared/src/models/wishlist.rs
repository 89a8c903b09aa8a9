//! Wishlist Model
//!
//! Server-side wishlist shapes. The client keeps its own saved-items list
//! as plain `Dress` copies; these types exist for server sync.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Dress;

/// Wishlist entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wishlist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub items: Vec<WishlistItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Wishlist entry joined with its dress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    pub id: String,
    pub wishlist_id: String,
    pub dress_id: String,
    pub created_at: DateTime<Utc>,
    pub dress: Dress,
}
