//! Client-side catalog filtering
//!
//! Predicates narrow the list in a fixed order: size, availability,
//! minimum price, maximum price, text search. Relative order of the input
//! is preserved.

use shared::{Dress, DressFilters};

/// Subset of `items` matching every active predicate of `filters`.
///
/// An empty `filters` returns the whole list unchanged.
pub fn apply_filters(items: &[Dress], filters: &DressFilters) -> Vec<Dress> {
    let mut filtered: Vec<Dress> = items.to_vec();

    if let Some(size) = filters.size {
        filtered.retain(|d| d.size == size);
        tracing::debug!(size = %size, count = filtered.len(), "After size filter");
    }

    if let Some(available) = filters.available {
        filtered.retain(|d| d.available == available);
        tracing::debug!(available, count = filtered.len(), "After availability filter");
    }

    if let Some(min) = filters.price_min {
        filtered.retain(|d| d.price >= min);
        tracing::debug!(price_min = %min, count = filtered.len(), "After min price filter");
    }

    if let Some(max) = filters.price_max {
        filtered.retain(|d| d.price <= max);
        tracing::debug!(price_max = %max, count = filtered.len(), "After max price filter");
    }

    if let Some(search) = filters.search_term() {
        filtered = search_items(&filtered, search);
        tracing::debug!(search = %search, count = filtered.len(), "After search filter");
    }

    filtered
}

/// Case-insensitive substring match against name or description
pub fn search_items(items: &[Dress], query: &str) -> Vec<Dress> {
    let needle = query.trim().to_lowercase();
    items
        .iter()
        .filter(|d| d.matches_text(&needle))
        .cloned()
        .collect()
}
