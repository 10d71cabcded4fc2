//! Speech output
//!
//! Clicked numbers are handed to a [`SpeechSink`]. Sinks are fire-and-forget:
//! they never report failure to the caller and log it instead.

mod local;
mod remote;

use std::sync::Arc;

pub use local::LocalVoice;
pub use remote::{RemoteVoice, TextToSpeech};

use crate::Result;
use crate::config::{SpeechBackend, SpeechConfig};

/// Speaks rendered text
pub trait SpeechSink: Send + Sync {
    /// Speak `text` in `language`, without waiting for playback
    fn speak(&self, text: &str, language: &str);
}

/// Logs utterances without producing audio
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentVoice;

impl SpeechSink for SilentVoice {
    fn speak(&self, text: &str, language: &str) {
        tracing::info!(text, language, "speak");
    }
}

/// Build the sink selected by configuration
///
/// # Errors
///
/// Returns error if the selected backend is misconfigured
pub fn from_config(config: &SpeechConfig) -> Result<Arc<dyn SpeechSink>> {
    let sink: Arc<dyn SpeechSink> = match config.backend {
        SpeechBackend::Local => Arc::new(LocalVoice::new(config.local.clone())),
        SpeechBackend::Remote => Arc::new(RemoteVoice::from_config(&config.remote)?),
        SpeechBackend::Silent => Arc::new(SilentVoice),
    };

    tracing::debug!(backend = ?config.backend, "speech backend ready");
    Ok(sink)
}
