//! HTTP transport over the remote back-office API.
//!
//! Every endpoint wraps its payload in a `{ success, data, error, message }`
//! envelope; the transport unwraps it and maps failures into typed errors.

use async_trait::async_trait;
use graha_shared::config::ApiConfig;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::error::ClientError;

/// JSON transport to the back-office API.
///
/// The trait seam exists so resource clients can be tested against a mock;
/// production code uses [`HttpTransport`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET a resource.
    async fn get(&self, path: &str) -> Result<Value, ClientError>;
    /// POST a JSON body.
    async fn post(&self, path: &str, body: Value) -> Result<Value, ClientError>;
    /// PUT a JSON body.
    async fn put(&self, path: &str, body: Value) -> Result<Value, ClientError>;
    /// DELETE a resource.
    async fn delete(&self, path: &str) -> Result<Value, ClientError>;
}

/// Response envelope used by every API endpoint.
#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl ApiEnvelope {
    fn into_data(self) -> Result<Value, ClientError> {
        if self.success {
            Ok(self.data.unwrap_or(Value::Null))
        } else {
            let message = self
                .message
                .or(self.error)
                .unwrap_or_else(|| "request rejected".to_string());
            Err(ClientError::Api(message))
        }
    }
}

/// `reqwest`-backed transport.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Builds a transport from the API configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self, ClientError> {
        let mut headers = reqwest::header::HeaderMap::new();
        if let Some(token) = &config.bearer_token {
            let value = reqwest::header::HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| ClientError::Api(format!("invalid bearer token: {e}")))?;
            headers.insert(reqwest::header::AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn handle(&self, response: reqwest::Response) -> Result<Value, ClientError> {
        let status = response.status();
        debug!(status = %status, "api response");

        if status == reqwest::StatusCode::NOT_FOUND {
            let message = envelope_message(response).await;
            return Err(ClientError::NotFound(message));
        }

        let body: ApiEnvelope = response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;
        body.into_data()
    }
}

async fn envelope_message(response: reqwest::Response) -> String {
    match response.json::<ApiEnvelope>().await {
        Ok(envelope) => envelope
            .message
            .or(envelope.error)
            .unwrap_or_else(|| "resource not found".to_string()),
        Err(_) => "resource not found".to_string(),
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str) -> Result<Value, ClientError> {
        let response = self.client.get(self.url(path)).send().await?;
        self.handle(response).await
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, ClientError> {
        let response = self.client.post(self.url(path)).json(&body).send().await?;
        self.handle(response).await
    }

    async fn put(&self, path: &str, body: Value) -> Result<Value, ClientError> {
        let response = self.client.put(self.url(path)).json(&body).send().await?;
        self.handle(response).await
    }

    async fn delete(&self, path: &str) -> Result<Value, ClientError> {
        let response = self.client.delete(self.url(path)).send().await?;
        self.handle(response).await
    }
}
