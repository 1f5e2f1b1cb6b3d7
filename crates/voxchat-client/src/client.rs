//! `ChatClient`: the `ChatPort` implementation for the remote backend.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

use voxchat_core::{ChatError, ChatPort, ChatTurnRequest};

use crate::http::{HttpBackend, ReqwestBackend};
use crate::persona;

/// Default chat endpoint of the local backend service.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:9999/chat";

// ── Wire format ──────────────────────────────────────────────────────────────

/// Request body as the backend expects it (snake_case is the wire contract).
#[derive(Debug, Serialize)]
struct ChatRequestBody<'a> {
    model_name: &'a str,
    model_provider: &'a str,
    system_prompt: String,
    /// Exactly one logical message per call; history is never re-sent.
    messages: Vec<&'a str>,
    allowed_search: bool,
}

/// Success or error body returned by the backend.
#[derive(Debug, Deserialize)]
struct ChatResponseBody {
    response: Option<String>,
    error: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────────────

/// Sends one user turn per call to the remote chat backend.
pub struct ChatClient {
    http: Box<dyn HttpBackend>,
    endpoint: Url,
}

impl ChatClient {
    /// Create a client for the given endpoint using the production
    /// reqwest backend.
    #[must_use]
    pub fn new(endpoint: Url) -> Self {
        Self::with_backend(endpoint, Box::new(ReqwestBackend::new()))
    }

    /// Create a client with an injected HTTP backend (tests use this).
    #[must_use]
    pub fn with_backend(endpoint: Url, http: Box<dyn HttpBackend>) -> Self {
        Self { http, endpoint }
    }

    /// Client pointed at the default local backend endpoint.
    #[must_use]
    pub fn local() -> Self {
        Self::new(Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL"))
    }

    /// The endpoint this client posts to.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ChatPort for ChatClient {
    async fn send(&self, request: ChatTurnRequest) -> Result<String, ChatError> {
        let body = ChatRequestBody {
            model_name: &request.model,
            model_provider: request.provider.as_str(),
            system_prompt: persona::augment_system_prompt(&request.system_prompt),
            messages: vec![&request.text],
            allowed_search: request.allow_web_search,
        };
        let body =
            serde_json::to_value(&body).map_err(|e| ChatError::Network(e.to_string()))?;

        tracing::debug!(
            model = %request.model,
            provider = %request.provider,
            allow_web_search = request.allow_web_search,
            "Dispatching chat turn"
        );

        let reply = self.http.post_json(&self.endpoint, &body).await?;

        if !(200..300).contains(&reply.status) {
            return Err(ChatError::Network(format!(
                "HTTP error! status: {}",
                reply.status
            )));
        }

        let parsed: ChatResponseBody = serde_json::from_value(reply.body)
            .map_err(|e| ChatError::Network(format!("malformed backend reply: {e}")))?;

        if let Some(error) = parsed.error {
            return Err(ChatError::Backend(error));
        }

        parsed
            .response
            .ok_or_else(|| ChatError::Backend("reply carried neither response nor error".into()))
    }
}
