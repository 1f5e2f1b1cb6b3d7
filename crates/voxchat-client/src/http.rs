//! HTTP backend abstraction for the chat service.
//!
//! This module provides a trait-based HTTP backend that allows for
//! dependency injection and easy testing. The production implementation
//! uses reqwest with a bounded request timeout.
//!
//! This is an implementation detail; external code should go through
//! [`ChatClient`](crate::client::ChatClient) and the `ChatPort` trait.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use voxchat_core::ChatError;

/// Overall timeout for a single backend request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A JSON response with its HTTP status preserved.
///
/// The status is carried separately because the chat backend signals
/// transport-level failure via non-2xx status and service-level failure
/// via a structured body; the client needs to distinguish the two.
#[derive(Debug, Clone)]
pub struct JsonReply {
    /// HTTP status code of the response.
    pub status: u16,
    /// Parsed JSON body. Empty object when the body was not valid JSON.
    pub body: Value,
}

/// Trait for HTTP backends that can POST JSON to a URL.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// POST a JSON body and return the JSON reply with its status.
    ///
    /// Errors only on transport failure (connection refused, timeout,
    /// malformed response). HTTP error statuses are returned as a
    /// [`JsonReply`] for the caller to interpret.
    async fn post_json(&self, url: &Url, body: &Value) -> Result<JsonReply, ChatError>;
}

/// Production HTTP backend using reqwest.
pub struct ReqwestBackend {
    client: reqwest::Client,
}

impl ReqwestBackend {
    /// Create a new reqwest backend with the default timeout.
    #[must_use]
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to create HTTP client");
        Self { client }
    }
}

impl Default for ReqwestBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn post_json(&self, url: &Url, body: &Value) -> Result<JsonReply, ChatError> {
        let response = self
            .client
            .post(url.as_str())
            .json(body)
            .send()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        // Error replies are not always valid JSON; fall back to an empty
        // object so the status alone can drive the error path.
        let body = response
            .json::<Value>()
            .await
            .unwrap_or(Value::Object(serde_json::Map::new()));

        tracing::debug!(%url, status, "Chat backend replied");
        Ok(JsonReply { status, body })
    }
}
