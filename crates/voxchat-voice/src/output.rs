//! Speech output adapter.
//!
//! Wraps a [`SynthesisBackend`], cleans reply text before vocalising
//! it, resolves the preferred voice once per session, and enforces the
//! last-writer-wins rule: a new utterance always cancels the previous
//! one first.

use tokio::sync::OnceCell;

use crate::backend::{SpeechPresets, SynthesisBackend, Utterance, VoiceGender, VoiceInfo};
use crate::error::SynthesisError;
use crate::text;

/// Text-to-speech front end over a platform backend.
pub struct SpeechOutputAdapter {
    backend: Box<dyn SynthesisBackend>,
    presets: SpeechPresets,
    voice: OnceCell<Option<VoiceInfo>>,
}

impl SpeechOutputAdapter {
    #[must_use]
    pub fn new(backend: Box<dyn SynthesisBackend>) -> Self {
        Self {
            backend,
            presets: SpeechPresets::default(),
            voice: OnceCell::new(),
        }
    }

    /// Speak `text` to completion.
    ///
    /// The text is cleaned for vocalisation first; if nothing remains
    /// this resolves immediately. A previous utterance still playing is
    /// cancelled. An utterance superseded or cancelled mid-playback
    /// resolves `Ok` since it is not a reportable failure.
    ///
    /// # Errors
    ///
    /// Returns the backend's error when synthesis itself fails.
    pub async fn speak(&self, text: &str) -> Result<(), SynthesisError> {
        let cleaned = text::strip_for_speech(text);
        if cleaned.is_empty() {
            return Ok(());
        }

        // Last writer wins.
        self.backend.cancel();

        let voice = self
            .voice
            .get_or_init(|| async { pick_preferred_voice(&self.backend.voices().await) })
            .await;

        let utterance = Utterance {
            text: cleaned,
            voice_id: voice.as_ref().map(|v| v.id.clone()),
            presets: self.presets,
        };

        match self.backend.speak(utterance).await {
            Err(SynthesisError::Interrupted) => Ok(()),
            other => other,
        }
    }

    /// Cancel any utterance in progress.
    pub fn cancel(&self) {
        self.backend.cancel();
    }
}

/// Pick the assistant's preferred voice from a catalog.
///
/// Prefers a female-presenting voice, by catalog gender or by name.
/// `None` means the platform default will be used.
#[must_use]
pub fn pick_preferred_voice(catalog: &[VoiceInfo]) -> Option<VoiceInfo> {
    catalog
        .iter()
        .find(|voice| {
            if voice.gender == Some(VoiceGender::Female) {
                return true;
            }
            let name = voice.name.to_lowercase();
            name.contains("female") || name.contains("zira") || name.contains("hazel")
        })
        .cloned()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::*;

    struct RecordingBackend {
        voices: Vec<VoiceInfo>,
        catalog_reads: AtomicUsize,
        spoken: Mutex<Vec<Utterance>>,
        cancels: AtomicUsize,
        outcome: fn() -> Result<(), SynthesisError>,
    }

    impl RecordingBackend {
        fn new(voices: Vec<VoiceInfo>) -> Arc<Self> {
            Arc::new(Self {
                voices,
                catalog_reads: AtomicUsize::new(0),
                spoken: Mutex::new(Vec::new()),
                cancels: AtomicUsize::new(0),
                outcome: || Ok(()),
            })
        }
    }

    #[async_trait]
    impl SynthesisBackend for Arc<RecordingBackend> {
        async fn voices(&self) -> Vec<VoiceInfo> {
            self.catalog_reads.fetch_add(1, Ordering::SeqCst);
            self.voices.clone()
        }

        async fn speak(&self, utterance: Utterance) -> Result<(), SynthesisError> {
            self.spoken.lock().unwrap().push(utterance);
            (self.outcome)()
        }

        fn cancel(&self) {
            self.cancels.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn voice(id: &str, name: &str, gender: Option<VoiceGender>) -> VoiceInfo {
        VoiceInfo {
            id: id.to_string(),
            name: name.to_string(),
            gender,
        }
    }

    #[test]
    fn prefers_female_gender_over_position() {
        let catalog = vec![
            voice("a", "Daniel", Some(VoiceGender::Male)),
            voice("b", "Aria", Some(VoiceGender::Female)),
        ];
        assert_eq!(pick_preferred_voice(&catalog).unwrap().id, "b");
    }

    #[test]
    fn falls_back_to_name_heuristics() {
        let catalog = vec![
            voice("a", "Microsoft David", None),
            voice("b", "Microsoft Zira Desktop", None),
        ];
        assert_eq!(pick_preferred_voice(&catalog).unwrap().id, "b");
    }

    #[test]
    fn empty_catalog_means_platform_default() {
        assert!(pick_preferred_voice(&[]).is_none());
    }

    #[tokio::test]
    async fn cleans_text_and_cancels_before_speaking() {
        let backend = RecordingBackend::new(vec![]);
        let adapter = SpeechOutputAdapter::new(Box::new(Arc::clone(&backend)));

        adapter.speak("**Bold** and `code`").await.unwrap();

        assert_eq!(backend.cancels.load(Ordering::SeqCst), 1);
        let spoken = backend.spoken.lock().unwrap();
        assert_eq!(spoken.len(), 1);
        assert_eq!(spoken[0].text, "Bold and code");
        assert_eq!(spoken[0].voice_id, None);
    }

    #[tokio::test]
    async fn empty_text_speaks_nothing() {
        let backend = RecordingBackend::new(vec![]);
        let adapter = SpeechOutputAdapter::new(Box::new(Arc::clone(&backend)));

        adapter.speak("   \n  ").await.unwrap();

        assert!(backend.spoken.lock().unwrap().is_empty());
        assert_eq!(backend.cancels.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn voice_catalog_is_resolved_once() {
        let backend = RecordingBackend::new(vec![voice(
            "f",
            "Hazel",
            Some(VoiceGender::Female),
        )]);
        let adapter = SpeechOutputAdapter::new(Box::new(Arc::clone(&backend)));

        adapter.speak("first").await.unwrap();
        adapter.speak("second").await.unwrap();

        assert_eq!(backend.catalog_reads.load(Ordering::SeqCst), 1);
        let spoken = backend.spoken.lock().unwrap();
        assert!(spoken.iter().all(|u| u.voice_id.as_deref() == Some("f")));
    }

    #[tokio::test]
    async fn interrupted_utterance_is_not_an_error() {
        let backend = Arc::new(RecordingBackend {
            voices: vec![],
            catalog_reads: AtomicUsize::new(0),
            spoken: Mutex::new(Vec::new()),
            cancels: AtomicUsize::new(0),
            outcome: || Err(SynthesisError::Interrupted),
        });
        let adapter = SpeechOutputAdapter::new(Box::new(Arc::clone(&backend)));

        assert!(adapter.speak("cut off").await.is_ok());
    }

    #[tokio::test]
    async fn synthesis_failure_propagates() {
        let backend = Arc::new(RecordingBackend {
            voices: vec![],
            catalog_reads: AtomicUsize::new(0),
            spoken: Mutex::new(Vec::new()),
            cancels: AtomicUsize::new(0),
            outcome: || Err(SynthesisError::Failed("engine crashed".to_string())),
        });
        let adapter = SpeechOutputAdapter::new(Box::new(Arc::clone(&backend)));

        assert!(matches!(
            adapter.speak("hello").await,
            Err(SynthesisError::Failed(_))
        ));
    }
}
