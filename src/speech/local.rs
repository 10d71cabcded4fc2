//! Local voice synthesis through an espeak-compatible command

use std::process::Stdio;
use std::sync::Mutex;

use tokio::process::{Child, Command};

use crate::config::LocalVoiceConfig;
use crate::speech::SpeechSink;
use crate::{Error, Result};

/// espeak words-per-minute at rate 1.0
const BASE_WPM: f32 = 175.0;

/// espeak amplitude at volume 1.0
const BASE_AMPLITUDE: f32 = 100.0;

/// espeak pitch at pitch 1.0 (range 0-99)
const BASE_PITCH: f32 = 50.0;

/// Speaks through a local synthesizer process
///
/// Starting a new utterance stops the one still playing.
#[derive(Debug)]
pub struct LocalVoice {
    config: LocalVoiceConfig,
    current: Mutex<Option<Child>>,
}

impl LocalVoice {
    /// Create a local voice
    #[must_use]
    pub const fn new(config: LocalVoiceConfig) -> Self {
        Self {
            config,
            current: Mutex::new(None),
        }
    }

    /// Command-line arguments for speaking `text` in `language`
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn args(&self, text: &str, language: &str) -> Vec<String> {
        let wpm = (BASE_WPM * self.config.rate).round().max(1.0) as u32;
        let amplitude = (BASE_AMPLITUDE * self.config.volume).round().clamp(0.0, 200.0) as u32;
        let pitch = (BASE_PITCH * self.config.pitch).round().clamp(0.0, 99.0) as u32;

        vec![
            "-v".to_string(),
            espeak_voice(language),
            "-s".to_string(),
            wpm.to_string(),
            "-a".to_string(),
            amplitude.to_string(),
            "-p".to_string(),
            pitch.to_string(),
            text.to_string(),
        ]
    }

    fn spawn(&self, text: &str, language: &str) -> Result<Child> {
        Command::new(&self.config.command)
            .args(self.args(text, language))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| Error::Speech(format!("failed to start {}: {e}", self.config.command)))
    }
}

impl SpeechSink for LocalVoice {
    fn speak(&self, text: &str, language: &str) {
        let Ok(mut current) = self.current.lock() else {
            tracing::warn!("local voice lock poisoned");
            return;
        };

        // Replacing the handle kills the previous utterance
        current.take();

        match self.spawn(text, language) {
            Ok(child) => {
                tracing::debug!(text, language, pid = ?child.id(), "speaking");
                *current = Some(child);
            }
            Err(e) => tracing::warn!(error = %e, "local speech failed"),
        }
    }
}

/// Map a BCP 47 tag to an espeak-ng voice name
fn espeak_voice(language: &str) -> String {
    let lower = language.replace('_', "-").to_lowercase();
    let primary = lower.split('-').next().unwrap_or_default().to_string();
    match primary.as_str() {
        "zh" if lower.contains("hk") || lower.contains("yue") => "yue".to_string(),
        "zh" => "cmn".to_string(),
        _ => lower,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_args() {
        let voice = LocalVoice::new(LocalVoiceConfig {
            rate: 1.0,
            ..LocalVoiceConfig::default()
        });
        let args = voice.args("4,300", "en-US");
        assert_eq!(
            args,
            ["-v", "en-us", "-s", "175", "-a", "100", "-p", "50", "4,300"]
        );
    }

    #[test]
    fn test_args_clamp() {
        let voice = LocalVoice::new(LocalVoiceConfig {
            command: "espeak".to_string(),
            rate: 0.1,
            volume: 0.5,
            pitch: 2.0,
        });
        let args = voice.args("x", "de");
        assert_eq!(args[3], "18");
        assert_eq!(args[5], "50");
        assert_eq!(args[7], "99");
    }

    #[test]
    fn test_espeak_voice() {
        assert_eq!(espeak_voice("zh-TW"), "cmn");
        assert_eq!(espeak_voice("zh_HK"), "yue");
        assert_eq!(espeak_voice("en-GB"), "en-gb");
    }

    #[tokio::test]
    async fn test_missing_command_is_swallowed() {
        let voice = LocalVoice::new(LocalVoiceConfig {
            command: "/nonexistent/numtrain-voice".to_string(),
            ..LocalVoiceConfig::default()
        });
        voice.speak("one", "en-US");
        assert!(voice.current.lock().unwrap().is_none());
    }
}
