//! API Response types
//!
//! The uniform envelope returned by every remote call, real or mocked.

use serde::{Deserialize, Serialize};

/// Unified API response structure
///
/// All API responses follow this format:
/// ```json
/// {
///     "success": true,
///     "data": [ ... ],
///     "count": 3
/// }
/// ```
///
/// A failed call carries `success: false` and an `error` string. `count` is
/// only present on list responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            count: None,
            message: None,
        }
    }

    /// Successful response without payload (e.g. DELETE, logout)
    pub fn empty() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
            count: None,
            message: None,
        }
    }

    /// Create an error response
    pub fn error(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            count: None,
            message: None,
        }
    }

    /// Attach a human-readable message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Payload of a successful response, `None` otherwise
    pub fn into_data(self) -> Option<T> {
        if self.success { self.data } else { None }
    }

    /// Fallible payload transform (used when decoding untyped JSON data)
    pub fn try_map_data<U, E, F>(self, f: F) -> Result<ApiResponse<U>, E>
    where
        F: FnOnce(T) -> Result<U, E>,
    {
        let data = self.data.map(f).transpose()?;
        Ok(ApiResponse {
            success: self.success,
            data,
            error: self.error,
            count: self.count,
            message: self.message,
        })
    }
}

impl<T> ApiResponse<Vec<T>> {
    /// Successful list response, `count` set to the number of items
    pub fn ok_list(items: Vec<T>) -> Self {
        let count = items.len() as u64;
        Self {
            success: true,
            data: Some(items),
            error: None,
            count: Some(count),
            message: None,
        }
    }
}
