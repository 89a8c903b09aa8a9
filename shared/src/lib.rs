//! Shared types for the Yllure catalog client
//!
//! Wire models and the response envelope used by both the remote access
//! layer and the local stores.

pub mod client;
pub mod models;
pub mod response;

// Re-exports
pub use response::ApiResponse;
pub use serde::{Deserialize, Serialize};

pub use models::{Dress, DressFilters, Size, User, UserUpdate, Wishlist, WishlistItem};
