//! Client-side state stores
//!
//! Each store owns one slice of state and is built once per session with
//! its collaborators injected. Public operations never return errors:
//! failures end up as empty data or an `error` field.

mod catalog;
mod profile_photo;
mod user;
mod wishlist;

pub use catalog::{CatalogState, CatalogStore};
pub use profile_photo::ProfilePhotoStore;
pub use user::{SessionState, UserState, UserStore};
pub use wishlist::{WishlistState, WishlistStore};
