//! Integration tests for `ChatClient` against a scripted HTTP backend.
//!
//! No network access is required; the backend trait is implemented by a
//! mock that records the outgoing body and returns a canned reply.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Value, json};
use url::Url;

use voxchat_client::{ChatClient, HttpBackend, JsonReply};
use voxchat_core::{ChatError, ChatPort, ChatTurnRequest, ModelProvider};

// ── Scripted backend ───────────────────────────────────────────────

/// Replays one canned reply and records every request body it sees.
struct ScriptedHttp {
    reply: Mutex<Option<Result<JsonReply, ChatError>>>,
    seen: Arc<Mutex<Vec<Value>>>,
}

impl ScriptedHttp {
    fn replying(status: u16, body: Value) -> Self {
        Self {
            reply: Mutex::new(Some(Ok(JsonReply { status, body }))),
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            reply: Mutex::new(Some(Err(ChatError::Network(message.to_string())))),
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Shared handle on the recorded request bodies, usable after boxing.
    fn log(&self) -> Arc<Mutex<Vec<Value>>> {
        Arc::clone(&self.seen)
    }
}

#[async_trait]
impl HttpBackend for ScriptedHttp {
    async fn post_json(&self, _url: &Url, body: &Value) -> Result<JsonReply, ChatError> {
        self.seen.lock().unwrap().push(body.clone());
        self.reply
            .lock()
            .unwrap()
            .take()
            .expect("scripted reply consumed twice")
    }
}

// ── Helpers ────────────────────────────────────────────────────────

fn endpoint() -> Url {
    Url::parse("http://127.0.0.1:9999/chat").unwrap()
}

fn request(text: &str) -> ChatTurnRequest {
    ChatTurnRequest {
        text: text.to_string(),
        system_prompt: "You are a helpful assistant.".to_string(),
        model: "gpt-4o-mini".to_string(),
        provider: ModelProvider::OpenAI,
        allow_web_search: false,
    }
}

// ── Tests ──────────────────────────────────────────────────────────

#[tokio::test]
async fn successful_reply_returns_response_text() {
    let http = ScriptedHttp::replying(200, json!({ "response": "Hi there!" }));
    let client = ChatClient::with_backend(endpoint(), Box::new(http));

    let reply = client.send(request("Hello")).await.unwrap();
    assert_eq!(reply, "Hi there!");
}

#[tokio::test]
async fn wire_body_carries_exactly_one_message_and_persona_prompt() {
    let http = ScriptedHttp::replying(200, json!({ "response": "ok" }));
    let log = http.log();
    let client = ChatClient::with_backend(endpoint(), Box::new(http));

    client.send(request("Hello")).await.unwrap();

    let seen = log.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let body = &seen[0];
    assert_eq!(body["model_name"], "gpt-4o-mini");
    assert_eq!(body["model_provider"], "OpenAI");
    assert_eq!(body["allowed_search"], false);
    assert_eq!(body["messages"], json!(["Hello"]));

    let prompt = body["system_prompt"].as_str().unwrap();
    assert!(prompt.starts_with("You are a helpful assistant."));
    assert!(prompt.contains("Monica"), "persona directive missing");
}

#[tokio::test]
async fn http_500_maps_to_network_error_with_status() {
    let http = ScriptedHttp::replying(500, json!({}));
    let client = ChatClient::with_backend(endpoint(), Box::new(http));

    let err = client.send(request("Hello")).await.unwrap_err();
    match err {
        ChatError::Network(msg) => assert!(msg.contains("500"), "got: {msg}"),
        other => panic!("expected Network, got {other:?}"),
    }
}

#[tokio::test]
async fn structured_error_payload_maps_to_backend_error() {
    let http = ScriptedHttp::replying(200, json!({ "error": "model overloaded" }));
    let client = ChatClient::with_backend(endpoint(), Box::new(http));

    let err = client.send(request("Hello")).await.unwrap_err();
    match err {
        ChatError::Backend(msg) => assert_eq!(msg, "model overloaded"),
        other => panic!("expected Backend, got {other:?}"),
    }
}

#[tokio::test]
async fn transport_failure_propagates_as_network_error() {
    let http = ScriptedHttp::failing("connection refused");
    let client = ChatClient::with_backend(endpoint(), Box::new(http));

    let err = client.send(request("Hello")).await.unwrap_err();
    assert!(matches!(err, ChatError::Network(_)));
}

#[tokio::test]
async fn reply_without_response_or_error_is_a_backend_error() {
    let http = ScriptedHttp::replying(200, json!({}));
    let client = ChatClient::with_backend(endpoint(), Box::new(http));

    let err = client.send(request("Hello")).await.unwrap_err();
    assert!(matches!(err, ChatError::Backend(_)));
}
