//! HTTP client for network-based API calls

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{ClientConfig, ClientError, ClientResult};

/// Error body returned by the backend on non-2xx responses
///
/// `message` is either a single string or a list of validation messages.
#[derive(serde::Deserialize)]
struct ApiErrorResponse {
    message: ErrorMessage,
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum ErrorMessage {
    One(String),
    Many(Vec<String>),
}

impl ErrorMessage {
    fn into_string(self) -> String {
        match self {
            Self::One(s) => s,
            Self::Many(v) => v.join("; "),
        }
    }
}

/// HTTP client trait
///
/// One call issues exactly one request. No retries, no caching.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn patch<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    /// PATCH without a body; the response body is ignored
    async fn patch_empty(&self, path: &str) -> ClientResult<()>;
    /// DELETE; the response body is ignored
    async fn delete(&self, path: &str) -> ClientResult<()>;
}

/// Network HTTP client backed by `reqwest`
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
}

impl NetworkHttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> ClientResult<reqwest::Response> {
        tracing::debug!(%method, path, "API request");

        let mut req = self.client.request(method.clone(), self.url(path));
        if let Some(body) = body {
            req = req.json(&body);
        }

        let response = req.send().await.inspect_err(|e| {
            tracing::debug!(%method, path, error = %e, "API request failed");
        })?;
        Self::check_status(response).await
    }

    async fn check_status(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await?;
        let message = serde_json::from_str::<ApiErrorResponse>(&text)
            .map(|e| e.message.into_string())
            .unwrap_or(text);

        Err(match status {
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ClientError::Validation(message)
            }
            StatusCode::CONFLICT => ClientError::Conflict(message),
            _ => ClientError::Api {
                status: status.as_u16(),
                message,
            },
        })
    }

    async fn json<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            ClientError::InvalidResponse(format!("Unexpected response body: {e}"))
        })
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.send(Method::GET, path, None).await?;
        Self::json(response).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let body = serde_json::to_value(body)?;
        let response = self.send(Method::POST, path, Some(body)).await?;
        Self::json(response).await
    }

    async fn patch<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let body = serde_json::to_value(body)?;
        let response = self.send(Method::PATCH, path, Some(body)).await?;
        Self::json(response).await
    }

    async fn patch_empty(&self, path: &str) -> ClientResult<()> {
        self.send(Method::PATCH, path, None).await?;
        Ok(())
    }

    async fn delete(&self, path: &str) -> ClientResult<()> {
        self.send(Method::DELETE, path, None).await?;
        Ok(())
    }
}
