#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unused_crate_dependencies)]

pub mod backend;
pub mod capture;
pub mod error;
pub mod event;
pub mod markup;
pub mod output;
pub mod session;
pub mod text;

pub use backend::{CaptureBackend, SpeechPresets, SynthesisBackend, Utterance, VoiceGender, VoiceInfo};
pub use capture::{SpeechCaptureAdapter, CAPTURE_WINDOW};
pub use error::{CaptureError, SessionError, SynthesisError};
pub use event::{SessionEvent, StatusKind, ERROR_BANNER_TTL};
pub use output::SpeechOutputAdapter;
pub use session::{
    SessionEndHandle, SessionSettings, SessionState, VoiceSessionController, CLARIFICATION,
    GREETING,
};

#[cfg(test)]
use mockall as _;
