//! Fallback decorator: primary client first, fallback client on error

use async_trait::async_trait;
use serde_json::Value;
use shared::ApiResponse;
use std::sync::Arc;

use super::{ApiRequest, RemoteClient};
use crate::ClientResult;

/// Wraps a primary client; any `Err` from it is answered by `fallback`.
///
/// `success: false` envelopes from the primary are returned as-is, only
/// transport-level failures (network, timeout, non-2xx, malformed body)
/// trigger the substitution here. Payloads that fail to decode are
/// re-sent to [`RemoteClient::fallback`] by `ApiService`.
#[derive(Clone)]
pub struct FallbackClient {
    primary: Arc<dyn RemoteClient>,
    fallback: Arc<dyn RemoteClient>,
}

impl FallbackClient {
    pub fn new(primary: Arc<dyn RemoteClient>, fallback: Arc<dyn RemoteClient>) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl RemoteClient for FallbackClient {
    async fn send(&self, request: &ApiRequest) -> ClientResult<ApiResponse<Value>> {
        match self.primary.send(request).await {
            Ok(response) => Ok(response),
            Err(e) => {
                tracing::warn!(
                    method = %request.method,
                    endpoint = %request.endpoint,
                    error = %e,
                    "Remote request failed, serving fallback data"
                );
                self.fallback.send(request).await
            }
        }
    }

    fn fallback(&self) -> Option<Arc<dyn RemoteClient>> {
        Some(self.fallback.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClientError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Fixed {
        calls: AtomicUsize,
        fail: bool,
        tag: &'static str,
    }

    impl Fixed {
        fn new(tag: &'static str, fail: bool) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail,
                tag,
            })
        }
    }

    #[async_trait]
    impl RemoteClient for Fixed {
        async fn send(&self, _request: &ApiRequest) -> ClientResult<ApiResponse<Value>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(ClientError::Status {
                    status: 503,
                    body: "down".into(),
                })
            } else {
                Ok(ApiResponse::ok(Value::String(self.tag.into())))
            }
        }
    }

    #[tokio::test]
    async fn test_primary_success_skips_fallback() {
        let primary = Fixed::new("primary", false);
        let fallback = Fixed::new("fallback", false);
        let client = FallbackClient::new(primary.clone(), fallback.clone());

        let response = client.send(&ApiRequest::get("/api/dresses")).await.unwrap();

        assert_eq!(response.data, Some(Value::String("primary".into())));
        assert_eq!(fallback.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_primary_error_uses_fallback_once() {
        let primary = Fixed::new("primary", true);
        let fallback = Fixed::new("fallback", false);
        let client = FallbackClient::new(primary.clone(), fallback.clone());

        let response = client.send(&ApiRequest::get("/api/dresses")).await.unwrap();

        assert_eq!(response.data, Some(Value::String("fallback".into())));
        assert_eq!(primary.calls.load(Ordering::SeqCst), 1);
        assert_eq!(fallback.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_both_failing_surfaces_fallback_error() {
        let client = FallbackClient::new(Fixed::new("a", true), Fixed::new("b", true));
        assert!(client.send(&ApiRequest::get("/api/dresses")).await.is_err());
    }
}
