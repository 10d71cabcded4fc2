//! Shared test utilities

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use number_trainer::{GroupedDigits, RandomSource, SpeechSink, Trainer, TrainerSettings};

/// Records every utterance instead of speaking it
#[derive(Debug, Clone, Default)]
pub struct RecordingVoice {
    spoken: Arc<Mutex<Vec<(String, String)>>>,
}

impl RecordingVoice {
    /// Texts spoken so far
    pub fn texts(&self) -> Vec<String> {
        self.spoken
            .lock()
            .unwrap()
            .iter()
            .map(|(text, _)| text.clone())
            .collect()
    }

    /// (text, language) pairs spoken so far
    pub fn utterances(&self) -> Vec<(String, String)> {
        self.spoken.lock().unwrap().clone()
    }
}

impl SpeechSink for RecordingVoice {
    fn speak(&self, text: &str, language: &str) {
        self.spoken
            .lock()
            .unwrap()
            .push((text.to_string(), language.to_string()));
    }
}

/// Replays a fixed list of draws, cycling when it runs out
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    values: Vec<u64>,
    next: usize,
}

impl ScriptedSource {
    pub fn new(values: &[u64]) -> Self {
        assert!(!values.is_empty(), "script needs at least one value");
        Self {
            values: values.to_vec(),
            next: 0,
        }
    }
}

impl RandomSource for ScriptedSource {
    fn next_in(&mut self, _low: u64, _high: u64) -> u64 {
        let value = self.values[self.next % self.values.len()];
        self.next += 1;
        value
    }
}

/// Default settings with the standard 250ms window
pub fn settings() -> TrainerSettings {
    TrainerSettings {
        language: "en-US".to_string(),
        click_window: Duration::from_millis(250),
    }
}

/// A trainer wired to a recording voice and grouped-digit formatting
pub fn recording_trainer<R: RandomSource>(rng: R) -> (Trainer<R>, RecordingVoice) {
    let voice = RecordingVoice::default();
    let trainer = Trainer::new(
        rng,
        settings(),
        Arc::new(voice.clone()),
        Arc::new(GroupedDigits),
    );
    (trainer, voice)
}
