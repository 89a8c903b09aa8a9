//! Dress filters

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Size;

/// Composable predicate set applied to the catalog.
///
/// Every field is optional; `None` means no constraint on that dimension.
/// Present fields combine with logical AND.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DressFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub price_min: Option<Decimal>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub price_max: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl DressFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_available(mut self, available: bool) -> Self {
        self.available = Some(available);
        self
    }

    pub fn with_price_min(mut self, min: Decimal) -> Self {
        self.price_min = Some(min);
        self
    }

    pub fn with_price_max(mut self, max: Decimal) -> Self {
        self.price_max = Some(max);
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Search term if it is non-blank
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// No active predicate
    pub fn is_empty(&self) -> bool {
        self.size.is_none()
            && self.available.is_none()
            && self.price_min.is_none()
            && self.price_max.is_none()
            && self.search_term().is_none()
    }

    /// Query parameters for server-side filtering, in a stable order.
    ///
    /// Values are not URL-encoded here.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(size) = self.size {
            pairs.push(("size", size.to_string()));
        }
        if let Some(available) = self.available {
            pairs.push(("available", available.to_string()));
        }
        if let Some(min) = self.price_min {
            pairs.push(("priceMin", min.normalize().to_string()));
        }
        if let Some(max) = self.price_max {
            pairs.push(("priceMax", max.normalize().to_string()));
        }
        if let Some(search) = self.search_term() {
            pairs.push(("search", search.to_string()));
        }
        pairs
    }
}
