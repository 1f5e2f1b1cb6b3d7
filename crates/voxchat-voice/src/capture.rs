//! Speech capture adapter.
//!
//! Wraps a [`CaptureBackend`] and bounds each listening attempt with a
//! fixed window, so a silent microphone cannot stall a voice turn
//! forever.

use std::time::Duration;

use crate::backend::CaptureBackend;
use crate::error::CaptureError;

/// How long one capture waits for speech before giving up.
pub const CAPTURE_WINDOW: Duration = Duration::from_secs(10);

/// Bounded speech-to-text front end over a platform backend.
pub struct SpeechCaptureAdapter {
    backend: Box<dyn CaptureBackend>,
}

impl SpeechCaptureAdapter {
    #[must_use]
    pub fn new(backend: Box<dyn CaptureBackend>) -> Self {
        Self { backend }
    }

    /// Listen for one utterance.
    ///
    /// Returns the transcript, or an empty string when nothing was
    /// heard within [`CAPTURE_WINDOW`].
    ///
    /// # Errors
    ///
    /// Propagates backend failures such as denied microphone access or
    /// an unintelligible utterance.
    pub async fn capture(&self) -> Result<String, CaptureError> {
        match tokio::time::timeout(CAPTURE_WINDOW, self.backend.listen()).await {
            Ok(result) => result,
            Err(_) => {
                tracing::debug!("Capture window elapsed without speech");
                self.backend.stop();
                Ok(String::new())
            }
        }
    }

    /// Stop any listening in progress.
    pub fn stop(&self) {
        self.backend.stop();
    }
}
