//! Chat backend port: trait abstraction over the remote chat service.
//!
//! # Design rules
//!
//! - The request here is a transport-agnostic shape; the wire format lives
//!   in `voxchat-client`, never in this crate. The dependency arrow stays
//!   one-way.
//! - Exactly one logical message is carried per call. Session-local context
//!   is not re-transmitted; context accumulation, if any, is the backend's
//!   responsibility.

use async_trait::async_trait;
use thiserror::Error;

use crate::providers::ModelProvider;

/// One user turn sent to the chat backend, with its presentation settings.
#[derive(Debug, Clone)]
pub struct ChatTurnRequest {
    /// The user's utterance or typed text.
    pub text: String,
    /// The caller-supplied system prompt (persona augmentation happens in
    /// the adapter, not here).
    pub system_prompt: String,
    /// Model identifier understood by the selected provider.
    pub model: String,
    /// Which provider serves the model.
    pub provider: ModelProvider,
    /// Whether the backend may perform a web search for this turn.
    pub allow_web_search: bool,
}

/// Errors surfaced by a chat backend adapter.
#[derive(Debug, Clone, Error)]
pub enum ChatError {
    /// Transport failure or non-2xx HTTP status.
    #[error("Network error: {0}")]
    Network(String),

    /// Structured error payload returned by the service itself.
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Port implemented by chat backend adapters.
#[async_trait]
pub trait ChatPort: Send + Sync {
    /// Send a single user turn and return the assistant's reply text.
    async fn send(&self, request: ChatTurnRequest) -> Result<String, ChatError>;
}
