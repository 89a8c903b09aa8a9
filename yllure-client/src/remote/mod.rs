//! Remote access layer
//!
//! Every backend call goes through [`RemoteClient::send`] and comes back as
//! an untyped [`ApiResponse`] envelope. Three implementations:
//!
//! - [`NetworkHttpClient`]: real HTTP via reqwest
//! - [`MockClient`]: static in-memory dataset
//! - [`FallbackClient`]: tries one client, serves the other on error

mod fallback;
mod network;
pub mod images;
mod mock;

pub use fallback::FallbackClient;
pub use network::NetworkHttpClient;
pub use mock::{MockClient, mock_dresses};

use async_trait::async_trait;
use http::Method;
use serde::Serialize;
use serde_json::Value;
use shared::ApiResponse;
use std::sync::Arc;

use crate::{ClientError, ClientResult};

/// Path prefix of every catalog endpoint
pub const DRESSES_PATH: &str = "/api/dresses";

/// A single backend request
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Path plus optional query, e.g. `/api/dresses?size=M`
    pub endpoint: String,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            body: None,
        }
    }

    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(Method::GET, endpoint)
    }

    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self::new(Method::DELETE, endpoint)
    }

    /// POST with a JSON body
    pub fn post<B: Serialize>(endpoint: impl Into<String>, body: &B) -> ClientResult<Self> {
        let mut request = Self::new(Method::POST, endpoint);
        request.body = Some(serde_json::to_value(body)?);
        Ok(request)
    }

    /// POST without body
    pub fn post_empty(endpoint: impl Into<String>) -> Self {
        Self::new(Method::POST, endpoint)
    }

    /// Endpoint path without query string
    pub fn path(&self) -> &str {
        self.endpoint
            .split_once('?')
            .map_or(self.endpoint.as_str(), |(path, _)| path)
    }

    /// Whether the response carries catalog items (image rewriting applies)
    pub fn targets_dresses(&self) -> bool {
        let path = self.path();
        path == DRESSES_PATH || path.starts_with("/api/dresses/")
    }
}

/// Build `path?query` with URL-encoded values
pub fn endpoint_with_query(path: &str, pairs: &[(&str, String)]) -> ClientResult<String> {
    let mut url = reqwest::Url::parse("http://localhost")
        .map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
    url.set_path(path);
    if pairs.is_empty() {
        return Ok(url.path().to_string());
    }
    url.query_pairs_mut()
        .extend_pairs(pairs.iter().map(|(k, v)| (*k, v.as_str())));
    Ok(format!("{}?{}", url.path(), url.query().unwrap_or_default()))
}

/// Transport abstraction shared by real, mock and fallback clients
#[async_trait]
pub trait RemoteClient: Send + Sync {
    async fn send(&self, request: &ApiRequest) -> ClientResult<ApiResponse<Value>>;

    /// Client that answers when a response from this one turns out unusable
    fn fallback(&self) -> Option<Arc<dyn RemoteClient>> {
        None
    }
}
