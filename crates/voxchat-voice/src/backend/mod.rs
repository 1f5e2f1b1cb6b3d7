//! Speech service backend traits: the interface boundary to platform
//! speech APIs.
//!
//! The adapters in this crate operate on trait objects
//! (`Box<dyn CaptureBackend>`, `Box<dyn SynthesisBackend>`) so that the
//! platform services can be swapped, or mocked in tests, without
//! touching the session logic.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{CaptureError, SynthesisError};

// ── Shared types ───────────────────────────────────────────────────

/// Fixed presentation parameters for synthesised speech.
///
/// These are not user-configurable; the defaults are the product tuning
/// for the assistant's voice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeechPresets {
    /// Speaking rate multiplier.
    pub rate: f32,
    /// Pitch multiplier.
    pub pitch: f32,
    /// Output volume (0.0–1.0).
    pub volume: f32,
}

impl Default for SpeechPresets {
    fn default() -> Self {
        Self {
            rate: 0.9,
            pitch: 1.1,
            volume: 0.9,
        }
    }
}

/// One utterance handed to the synthesis backend.
///
/// The text has already been cleaned for vocalisation; backends never
/// see markup.
#[derive(Debug, Clone)]
pub struct Utterance {
    /// Natural-language text to vocalise.
    pub text: String,
    /// Selected voice, or `None` for the platform default.
    pub voice_id: Option<String>,
    /// Presentation parameters.
    pub presets: SpeechPresets,
}

/// Information about an available synthesis voice.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceInfo {
    /// Voice identifier used when requesting an utterance.
    pub id: String,
    /// Human-readable display name.
    pub name: String,
    /// Gender, when the catalog exposes one.
    pub gender: Option<VoiceGender>,
}

/// Voice gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VoiceGender {
    Female,
    Male,
}

// ── Capture backend trait ──────────────────────────────────────────

/// Platform speech-to-text service.
///
/// Implementations must be `Send + Sync` so the session can hold them
/// across `.await` points.
#[async_trait]
pub trait CaptureBackend: Send + Sync {
    /// Listen for one utterance and return its transcript.
    ///
    /// Returns `Ok("")` when the platform reports no speech. The caller
    /// bounds the wait; implementations may listen indefinitely.
    async fn listen(&self) -> Result<String, CaptureError>;

    /// Stop listening immediately. A pending `listen` should resolve
    /// with the no-speech result.
    fn stop(&self);
}

// ── Synthesis backend trait ────────────────────────────────────────

/// Platform text-to-speech service.
///
/// Implementations must be `Send + Sync` so the session can hold them
/// across `.await` points.
#[async_trait]
pub trait SynthesisBackend: Send + Sync {
    /// The voice catalog. Catalogs can populate asynchronously after
    /// initialisation; this resolves once the catalog is ready.
    async fn voices(&self) -> Vec<VoiceInfo>;

    /// Speak one utterance to completion.
    ///
    /// Resolves with [`SynthesisError::Interrupted`] when the utterance
    /// was cancelled or superseded by a newer one.
    async fn speak(&self, utterance: Utterance) -> Result<(), SynthesisError>;

    /// Cancel any utterance currently in progress. Audible cutoff is
    /// acceptable.
    fn cancel(&self);
}
