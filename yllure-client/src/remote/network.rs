// yllure-client/src/remote/network.rs
// HTTP 客户端 - 网络通信

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use shared::ApiResponse;
use std::time::Duration;

use super::{ApiRequest, RemoteClient, images};
use crate::{ClientConfig, ClientError, ClientResult};

/// 网络 HTTP 客户端
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
    timeout: Duration,
}

impl NetworkHttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let timeout = config.timeout_duration();
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            timeout,
        })
    }

    /// Set the authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    /// Absolute URL for an endpoint; relative (web) bases cannot be dialled
    fn url_for(&self, endpoint: &str) -> ClientResult<String> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ClientError::InvalidUrl(format!(
                "base URL '{}' is not absolute",
                self.base_url
            )));
        }
        Ok(format!("{}{}", self.base_url, endpoint))
    }

    fn map_transport_error(&self, err: reqwest::Error) -> ClientError {
        if err.is_timeout() {
            ClientError::Timeout(self.timeout)
        } else {
            ClientError::Http(err)
        }
    }

    async fn handle_response(&self, response: reqwest::Response) -> ClientResult<ApiResponse<Value>> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return match status {
                StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
                StatusCode::NOT_FOUND => Err(ClientError::NotFound(text)),
                _ => Err(ClientError::Status {
                    status: status.as_u16(),
                    body: text,
                }),
            };
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.map_transport_error(e))?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl RemoteClient for NetworkHttpClient {
    async fn send(&self, request: &ApiRequest) -> ClientResult<ApiResponse<Value>> {
        let url = self.url_for(&request.endpoint)?;
        let mut req = self
            .client
            .request(request.method.clone(), &url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(auth) = self.auth_header() {
            req = req.header(AUTHORIZATION, auth);
        }
        if let Some(body) = &request.body {
            req = req.json(body);
        }

        tracing::debug!(method = %request.method, url = %url, "Sending request");
        let response = req.send().await.map_err(|e| self.map_transport_error(e))?;
        let mut envelope = self.handle_response(response).await?;

        if envelope.success
            && request.targets_dresses()
            && let Some(data) = envelope.data.as_mut()
        {
            images::rewrite_dress_images(data, &self.base_url);
        }

        Ok(envelope)
    }
}
