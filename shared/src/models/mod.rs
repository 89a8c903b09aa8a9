//! Data models
//!
//! Shared between the remote access layer, the mock responder and the
//! client-side stores. Field names follow the backend's camelCase JSON.

pub mod dress;
pub mod filter;
pub mod user;
pub mod wishlist;

// Re-exports
pub use dress::*;
pub use filter::*;
pub use user::*;
pub use wishlist::*;
