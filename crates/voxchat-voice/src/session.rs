//! Voice session controller.
//!
//! Drives the conversation loop: greet, listen, dispatch to the chat
//! backend, speak the reply, repeat. The controller owns the
//! conversation log and publishes [`SessionEvent`]s for the
//! presentation layer; it never touches a rendering surface itself.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use voxchat_core::{
    ChatPort, ChatTurnRequest, ConversationLog, ModelProvider, Speaker, DISPLAY_WINDOW,
};

use crate::capture::SpeechCaptureAdapter;
use crate::error::{CaptureError, SessionError};
use crate::event::{SessionEvent, StatusKind, ERROR_BANNER_TTL};
use crate::markup;
use crate::output::SpeechOutputAdapter;

/// Spoken when a session starts.
pub const GREETING: &str = "Hello! I'm Monica, your AI assistant. How can I help you today?";

/// Spoken when a captured utterance could not be understood.
pub const CLARIFICATION: &str =
    "I'm sorry, I couldn't understand what you said. Could you please repeat that more clearly?";

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// Not started yet.
    Idle,
    /// Started and waiting for the next turn.
    Active,
    /// Capturing the user's speech.
    Listening,
    /// Waiting on the chat backend.
    Dispatching,
    /// Vocalising a reply.
    Speaking,
    /// Ended. Terminal.
    Ended,
}

/// Per-session model selection and dispatch options.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub provider: ModelProvider,
    pub model: String,
    pub system_prompt: String,
    pub allow_web_search: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        let provider = ModelProvider::Groq;
        Self {
            provider,
            model: provider.default_model().to_string(),
            system_prompt: String::new(),
            allow_web_search: false,
        }
    }
}

/// Cloneable handle that ends the session from another task.
#[derive(Debug, Clone)]
pub struct SessionEndHandle {
    token: CancellationToken,
}

impl SessionEndHandle {
    /// Request the session to end. Any in-flight capture, dispatch or
    /// speech resolves promptly with [`SessionError::Ended`].
    pub fn end(&self) {
        self.token.cancel();
    }
}

/// Resolve `operation`, or bail out as soon as the session ends.
async fn until_ended<T>(
    ended: &CancellationToken,
    operation: impl Future<Output = T>,
) -> Result<T, SessionError> {
    tokio::select! {
        () = ended.cancelled() => Err(SessionError::Ended),
        value = operation => Ok(value),
    }
}

/// The voice session state machine.
pub struct VoiceSessionController {
    state: SessionState,
    log: ConversationLog,
    capture: Option<SpeechCaptureAdapter>,
    output: SpeechOutputAdapter,
    chat: Arc<dyn ChatPort>,
    settings: SessionSettings,
    event_tx: mpsc::UnboundedSender<SessionEvent>,
    ended: CancellationToken,
    banner_seq: Arc<AtomicU64>,
}

impl VoiceSessionController {
    /// Create a controller and the event stream it publishes to.
    ///
    /// `capture` is `None` when the platform has no speech recognition;
    /// the session still runs, with voice turns rejected.
    pub fn new(
        capture: Option<SpeechCaptureAdapter>,
        output: SpeechOutputAdapter,
        chat: Arc<dyn ChatPort>,
        settings: SessionSettings,
    ) -> (Self, mpsc::UnboundedReceiver<SessionEvent>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let controller = Self {
            state: SessionState::Idle,
            log: ConversationLog::new(),
            capture,
            output,
            chat,
            settings,
            event_tx,
            ended: CancellationToken::new(),
            banner_seq: Arc::new(AtomicU64::new(0)),
        };
        (controller, event_rx)
    }

    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub const fn capture_available(&self) -> bool {
        self.capture.is_some()
    }

    #[must_use]
    pub const fn log(&self) -> &ConversationLog {
        &self.log
    }

    /// A handle that can end this session from any task.
    #[must_use]
    pub fn end_handle(&self) -> SessionEndHandle {
        SessionEndHandle {
            token: self.ended.clone(),
        }
    }

    // ── Lifecycle ──────────────────────────────────────────────────

    /// Start the session: reset the log, greet the user aloud.
    ///
    /// # Errors
    ///
    /// Fails when the session is not idle, or when it is ended while
    /// the greeting plays.
    pub async fn start(&mut self) -> Result<(), SessionError> {
        match self.state {
            SessionState::Idle => {}
            SessionState::Ended => return Err(SessionError::Ended),
            _ => return Err(SessionError::Busy),
        }

        self.log.reset();
        self.set_state(SessionState::Active);
        self.push_turn(Speaker::Agent, GREETING);
        self.emit_status(GREETING, StatusKind::Speaking);
        tracing::info!("Voice session started");

        match until_ended(&self.ended, self.output.speak(GREETING)).await {
            Err(error) => {
                self.finish_end();
                return Err(error);
            }
            Ok(Err(error)) => {
                tracing::warn!(%error, "Greeting playback failed");
                self.emit_status(
                    "Couldn't play greeting, but voice session is active.",
                    StatusKind::Neutral,
                );
            }
            Ok(Ok(())) => {
                self.emit_status("Agent has greeted you. Please speak now!", StatusKind::Neutral);
            }
        }
        Ok(())
    }

    /// End the session. Idempotent; safe in any state.
    pub fn end(&mut self) {
        self.ended.cancel();
        self.finish_end();
    }

    /// Complete an end requested here or via a [`SessionEndHandle`].
    fn finish_end(&mut self) {
        if self.state == SessionState::Ended {
            return;
        }
        self.output.cancel();
        if let Some(capture) = &self.capture {
            capture.stop();
        }
        self.set_state(SessionState::Ended);
        self.emit_status("Voice session ended", StatusKind::Neutral);
        tracing::info!("Voice session ended");
    }

    /// One outstanding turn at a time.
    fn ensure_active(&self) -> Result<(), SessionError> {
        match self.state {
            SessionState::Active => Ok(()),
            SessionState::Idle => Err(SessionError::NotActive),
            SessionState::Ended => Err(SessionError::Ended),
            _ => Err(SessionError::Busy),
        }
    }

    // ── Turns ──────────────────────────────────────────────────────

    /// Run one full voice turn: listen, dispatch, speak the reply.
    ///
    /// # Errors
    ///
    /// Fails when the session is not ready for a turn, when capture is
    /// unavailable or denied, when the chat backend errors, or when the
    /// session ends mid-turn. No speech and an unclear utterance are
    /// handled in-session and are not errors.
    pub async fn voice_turn(&mut self) -> Result<(), SessionError> {
        self.ensure_active()?;
        if self.capture.is_none() {
            self.emit_status("Speech recognition not available", StatusKind::Neutral);
            return Err(SessionError::CaptureUnavailable);
        }

        self.set_state(SessionState::Listening);
        self.emit_status("Listening for your voice...", StatusKind::Listening);

        let captured = match &self.capture {
            Some(capture) => until_ended(&self.ended, capture.capture()).await,
            None => return Err(SessionError::CaptureUnavailable),
        };

        let transcript = match captured {
            Ok(Ok(text)) => text,
            Ok(Err(CaptureError::Unclear)) => return self.clarify().await,
            Ok(Err(error)) => {
                self.set_state(SessionState::Active);
                self.emit_status(&error.to_string(), StatusKind::Neutral);
                return Err(error.into());
            }
            Err(error) => {
                self.finish_end();
                return Err(error);
            }
        };

        let transcript = transcript.trim().to_string();
        if transcript.is_empty() {
            self.set_state(SessionState::Active);
            self.emit_status("No speech detected. Please try again.", StatusKind::Neutral);
            return Ok(());
        }

        self.emit_status(&format!("You said: {transcript}"), StatusKind::Speaking);
        self.push_turn(Speaker::User, &transcript);
        self.dispatch_and_speak(&transcript).await
    }

    /// Run one typed turn through the same dispatch-and-speak path.
    ///
    /// # Errors
    ///
    /// Fails on empty input, when the session is not ready for a turn,
    /// when the chat backend errors, or when the session ends mid-turn.
    pub async fn text_turn(&mut self, text: &str) -> Result<(), SessionError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SessionError::EmptyInput);
        }
        self.ensure_active()?;
        self.push_turn(Speaker::User, text);
        self.dispatch_and_speak(text).await
    }

    /// Ask the user to repeat after an unintelligible utterance.
    async fn clarify(&mut self) -> Result<(), SessionError> {
        self.set_state(SessionState::Speaking);
        self.emit_status(
            "Could not understand. Please speak more clearly.",
            StatusKind::Neutral,
        );
        self.push_turn(Speaker::Agent, CLARIFICATION);

        match until_ended(&self.ended, self.output.speak(CLARIFICATION)).await {
            Err(error) => {
                self.finish_end();
                return Err(error);
            }
            Ok(Err(error)) => {
                // The prompt is already on screen; the spoken copy is
                // best effort.
                tracing::warn!(%error, "Clarification playback failed");
            }
            Ok(Ok(())) => {}
        }
        self.set_state(SessionState::Active);
        Ok(())
    }

    /// Send one message to the chat backend and vocalise the reply.
    async fn dispatch_and_speak(&mut self, text: &str) -> Result<(), SessionError> {
        self.set_state(SessionState::Dispatching);
        self.emit_status("Agent is thinking...", StatusKind::Neutral);

        let request = ChatTurnRequest {
            text: text.to_string(),
            system_prompt: self.settings.system_prompt.clone(),
            model: self.settings.model.clone(),
            provider: self.settings.provider,
            allow_web_search: self.settings.allow_web_search,
        };
        let chat = Arc::clone(&self.chat);

        let reply = match until_ended(&self.ended, chat.send(request)).await {
            Ok(Ok(reply)) => reply,
            Ok(Err(error)) => {
                tracing::error!(%error, "Chat dispatch failed");
                self.set_state(SessionState::Active);
                self.emit_status(&format!("Error: {error}"), StatusKind::Neutral);
                return Err(error.into());
            }
            Err(error) => {
                self.finish_end();
                return Err(error);
            }
        };

        self.push_turn(Speaker::Agent, &reply);
        self.set_state(SessionState::Speaking);
        self.emit_status("Agent is speaking...", StatusKind::Speaking);

        match until_ended(&self.ended, self.output.speak(&reply)).await {
            Ok(Ok(())) => {
                self.set_state(SessionState::Active);
                self.emit_status("Agent finished speaking. Your turn!", StatusKind::Neutral);
                Ok(())
            }
            Ok(Err(error)) => {
                // The reply is already in the log; losing audio does
                // not fail the turn.
                tracing::warn!(%error, "Reply playback failed");
                self.set_state(SessionState::Active);
                self.emit_status(&format!("Speech error: {error}"), StatusKind::Neutral);
                Ok(())
            }
            Err(error) => {
                self.finish_end();
                Err(error)
            }
        }
    }

    /// Answer a typed query without speaking, independent of the voice
    /// loop. The reply is rendered to display HTML and also returned.
    ///
    /// # Errors
    ///
    /// Fails on empty input or when the chat backend errors; both also
    /// raise an error banner.
    pub async fn ask(&mut self, query: &str) -> Result<String, SessionError> {
        let query = query.trim();
        if query.is_empty() {
            self.error_banner("Please enter a query");
            return Err(SessionError::EmptyInput);
        }

        let request = ChatTurnRequest {
            text: query.to_string(),
            system_prompt: self.settings.system_prompt.clone(),
            model: self.settings.model.clone(),
            provider: self.settings.provider,
            allow_web_search: self.settings.allow_web_search,
        };

        match self.chat.send(request).await {
            Ok(reply) => {
                let markup = markup::render_markdown(&reply);
                self.emit(SessionEvent::ResponseRendered { markup });
                Ok(reply)
            }
            Err(error) => {
                tracing::error!(%error, "Query dispatch failed");
                self.error_banner(&format!("Failed to get response: {error}"));
                Err(error.into())
            }
        }
    }

    // ── Internals ──────────────────────────────────────────────────

    fn push_turn(&mut self, speaker: Speaker, text: &str) {
        self.log.append(speaker, text);
        let window = self.log.recent_window(DISPLAY_WINDOW).to_vec();
        self.emit(SessionEvent::LogWindow(window));
    }

    fn set_state(&mut self, next: SessionState) {
        if self.state != next {
            tracing::debug!(from = ?self.state, to = ?next, "Session state changed");
            self.state = next;
            self.emit(SessionEvent::StateChanged(next));
        }
    }

    fn emit_status(&self, text: &str, kind: StatusKind) {
        self.emit(SessionEvent::Status {
            text: text.to_string(),
            kind,
        });
    }

    /// Show an error banner and schedule its clearance.
    ///
    /// Each banner restarts the dismissal clock. The clearance is keyed
    /// to the banner it was scheduled for, so a timer outlived by a
    /// newer banner stays silent.
    fn error_banner(&self, message: &str) {
        self.emit(SessionEvent::ErrorBanner {
            message: message.to_string(),
        });
        let id = self.banner_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let seq = Arc::clone(&self.banner_seq);
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(ERROR_BANNER_TTL).await;
            if seq.load(Ordering::SeqCst) == id {
                let _ = tx.send(SessionEvent::ErrorBannerCleared);
            }
        });
    }

    fn emit(&self, event: SessionEvent) {
        if self.event_tx.send(event).is_err() {
            tracing::warn!("Session event receiver dropped");
        }
    }
}
