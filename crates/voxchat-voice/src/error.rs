//! Voice session error types.

use thiserror::Error;

/// Errors from a speech capture attempt.
///
/// A capture timeout is not an error; the adapter folds it into the
/// no-speech result (`Ok("")`).
#[derive(Debug, Error)]
pub enum CaptureError {
    /// Platform speech recognition is absent entirely. Fatal to the
    /// capture affordance, not to the session.
    #[error("Speech recognition not available")]
    NotAvailable,

    /// Microphone access was denied. Surfaced, never auto-retried.
    #[error("Microphone access denied")]
    PermissionDenied,

    /// Audio was heard but could not be understood. Triggers the
    /// clarification path instead of a hard failure.
    #[error("Could not understand speech")]
    Unclear,
}

/// Errors from speech synthesis.
#[derive(Debug, Error)]
pub enum SynthesisError {
    /// Platform speech synthesis is absent entirely.
    #[error("Text-to-speech not available")]
    Unavailable,

    /// The utterance was cut off because a newer one superseded it or
    /// the session ended. Never reported to the user.
    #[error("Utterance superseded or cancelled")]
    Interrupted,

    /// The platform reported a synthesis fault.
    #[error("Speech synthesis failed: {0}")]
    Failed(String),
}

/// Errors surfaced by the session controller.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Empty query or quick text, rejected before any async work starts.
    #[error("Please enter a query")]
    EmptyInput,

    /// A capture or synthesis operation is already outstanding.
    #[error("Another operation is already in progress")]
    Busy,

    /// The session has not been started (or has already ended).
    #[error("Voice session is not active")]
    NotActive,

    /// The capture affordance is disabled (recognition unavailable).
    #[error("Speech recognition not available")]
    CaptureUnavailable,

    /// The session was ended while an operation was in flight.
    #[error("Voice session ended")]
    Ended,

    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    Synthesis(#[from] SynthesisError),

    #[error(transparent)]
    Chat(#[from] voxchat_core::ChatError),
}
