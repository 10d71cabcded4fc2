//! Configuration management for the number trainer

pub mod file;

use std::time::Duration;

use serde::Deserialize;

use crate::clicks::CLICK_WINDOW;
use crate::format::DisplayStyle;
use crate::{Error, Result};

use file::TrainerConfigFile;

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Language tag
    pub language: Option<String>,
    /// Speech backend
    pub speech: Option<SpeechBackend>,
    /// Number rendering style
    pub display: Option<DisplayStyle>,
}

/// Default OpenAI-compatible speech endpoint
pub const DEFAULT_TTS_ENDPOINT: &str = "https://api.openai.com/v1/audio/speech";

/// Trainer configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Language tag for formatting and speech
    pub language: String,

    /// Number rendering style
    pub display: DisplayStyle,

    /// Click/double-click disambiguation window
    pub click_window: Duration,

    /// Speech configuration
    pub speech: SpeechConfig,
}

/// Which speech backend speaks clicked numbers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeechBackend {
    /// Local espeak-compatible command
    #[default]
    Local,
    /// Remote HTTP text-to-speech
    Remote,
    /// Log only
    Silent,
}

impl std::str::FromStr for SpeechBackend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "remote" => Ok(Self::Remote),
            "silent" | "none" => Ok(Self::Silent),
            other => Err(format!("unknown speech backend: {other}")),
        }
    }
}

/// Speech configuration
#[derive(Debug, Clone, Default)]
pub struct SpeechConfig {
    /// Selected backend
    pub backend: SpeechBackend,

    /// Local voice settings
    pub local: LocalVoiceConfig,

    /// Remote TTS settings
    pub remote: RemoteVoiceConfig,
}

/// Local voice settings, in web speech ranges
#[derive(Debug, Clone)]
pub struct LocalVoiceConfig {
    /// espeak-compatible command
    pub command: String,

    /// Speaking rate (0.1 to 10, 1 is normal)
    pub rate: f32,

    /// Volume (0 to 1)
    pub volume: f32,

    /// Pitch (0 to 2, 1 is normal)
    pub pitch: f32,
}

impl Default for LocalVoiceConfig {
    fn default() -> Self {
        Self {
            command: "espeak-ng".to_string(),
            rate: 0.9,
            volume: 1.0,
            pitch: 1.0,
        }
    }
}

/// Remote TTS settings
#[derive(Debug, Clone)]
pub struct RemoteVoiceConfig {
    /// Speech endpoint URL
    pub endpoint: String,

    /// Bearer API key (from `OPENAI_API_KEY` env)
    pub api_key: Option<String>,

    /// TTS model (e.g. "tts-1")
    pub model: String,

    /// Voice identifier (e.g. "alloy")
    pub voice: String,

    /// Audio format requested ("mp3", "wav", ...)
    pub response_format: String,

    /// Speed multiplier (0.25 to 4.0)
    pub speed: f32,

    /// Command that plays audio from stdin; audio is discarded when unset
    pub player: Option<String>,
}

impl Default for RemoteVoiceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_TTS_ENDPOINT.to_string(),
            api_key: None,
            model: "tts-1".to_string(),
            voice: "alloy".to_string(),
            response_format: "mp3".to_string(),
            speed: 1.0,
            player: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "en-US".to_string(),
            display: DisplayStyle::default(),
            click_window: CLICK_WINDOW,
            speech: SpeechConfig::default(),
        }
    }
}

/// Parse an env value, warning and ignoring it if malformed
fn parse_env<T: std::str::FromStr>(name: &str, value: Option<String>) -> Option<T> {
    let raw = value?;
    match raw.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(var = name, value = %raw, "ignoring malformed environment value");
            None
        }
    }
}

impl Config {
    /// Load configuration from the environment and the config file
    ///
    /// # Errors
    ///
    /// Returns error if the resulting configuration is invalid
    pub fn load() -> Result<Self> {
        Self::load_with_overrides(Overrides::default())
    }

    /// Load configuration, letting command-line values win over env and file
    ///
    /// Validation runs once, after the overrides are applied.
    ///
    /// # Errors
    ///
    /// Returns error if the resulting configuration is invalid
    pub fn load_with_overrides(overrides: Overrides) -> Result<Self> {
        let mut config = Self::resolve(file::load_config_file(), |name| std::env::var(name).ok());
        config.apply(overrides);
        config.validate()?;
        Ok(config)
    }

    /// Resolve and validate configuration with priority env > file > default
    ///
    /// # Errors
    ///
    /// Returns error if the resulting configuration is invalid
    pub fn from_sources<F>(fc: TrainerConfigFile, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self::resolve(fc, env);
        config.validate()?;
        Ok(config)
    }

    /// Apply command-line overrides
    pub fn apply(&mut self, overrides: Overrides) {
        if let Some(language) = overrides.language {
            self.language = language;
        }
        if let Some(backend) = overrides.speech {
            self.speech.backend = backend;
        }
        if let Some(display) = overrides.display {
            self.display = display;
        }
    }

    /// Resolve configuration with priority env > file > default, unvalidated
    pub fn resolve<F>(fc: TrainerConfigFile, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let local_defaults = LocalVoiceConfig::default();
        let remote_defaults = RemoteVoiceConfig::default();

        let local = LocalVoiceConfig {
            command: env("NUMTRAIN_VOICE_COMMAND")
                .or(fc.speech.local.command)
                .unwrap_or(local_defaults.command),
            rate: fc.speech.local.rate.unwrap_or(local_defaults.rate),
            volume: fc.speech.local.volume.unwrap_or(local_defaults.volume),
            pitch: fc.speech.local.pitch.unwrap_or(local_defaults.pitch),
        };

        let remote = RemoteVoiceConfig {
            endpoint: env("NUMTRAIN_TTS_ENDPOINT")
                .or(fc.speech.remote.endpoint)
                .unwrap_or(remote_defaults.endpoint),
            api_key: env("OPENAI_API_KEY").or(fc.api_keys.openai),
            model: env("NUMTRAIN_TTS_MODEL")
                .or(fc.speech.remote.model)
                .unwrap_or(remote_defaults.model),
            voice: env("NUMTRAIN_TTS_VOICE")
                .or(fc.speech.remote.voice)
                .unwrap_or(remote_defaults.voice),
            response_format: fc
                .speech
                .remote
                .response_format
                .unwrap_or(remote_defaults.response_format),
            speed: fc.speech.remote.speed.unwrap_or(remote_defaults.speed),
            player: env("NUMTRAIN_PLAYER").or(fc.speech.remote.player),
        };

        let speech = SpeechConfig {
            backend: parse_env("NUMTRAIN_SPEECH_BACKEND", env("NUMTRAIN_SPEECH_BACKEND"))
                .or(fc.speech.backend)
                .unwrap_or_default(),
            local,
            remote,
        };

        Self {
            language: env("NUMTRAIN_LANGUAGE")
                .or(fc.language)
                .unwrap_or(defaults.language),
            display: parse_env("NUMTRAIN_DISPLAY", env("NUMTRAIN_DISPLAY"))
                .or(fc.display)
                .unwrap_or(defaults.display),
            click_window: parse_env("NUMTRAIN_CLICK_WINDOW_MS", env("NUMTRAIN_CLICK_WINDOW_MS"))
                .or(fc.click_window_ms)
                .map_or(defaults.click_window, Duration::from_millis),
            speech,
        }
    }

    /// Check value ranges
    ///
    /// Credentials are checked when a speech backend is built, so commands
    /// that never speak still run without an API key.
    ///
    /// # Errors
    ///
    /// Returns error describing the first out-of-range setting
    pub fn validate(&self) -> Result<()> {
        if self.language.trim().is_empty() {
            return Err(Error::Config("language must not be empty".to_string()));
        }
        if self.click_window.is_zero() {
            return Err(Error::Config("click window must be positive".to_string()));
        }

        let local = &self.speech.local;
        check_range("speech.local.rate", local.rate, 0.1, 10.0)?;
        check_range("speech.local.volume", local.volume, 0.0, 1.0)?;
        check_range("speech.local.pitch", local.pitch, 0.0, 2.0)?;

        let remote = &self.speech.remote;
        check_range("speech.remote.speed", remote.speed, 0.25, 4.0)?;

        Ok(())
    }
}

fn check_range(name: &str, value: f32, min: f32, max: f32) -> Result<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(Error::Config(format!(
            "{name} must be between {min} and {max}, got {value}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_sources(TrainerConfigFile::default(), env_from(&[])).unwrap();
        assert_eq!(config.language, "en-US");
        assert_eq!(config.click_window, Duration::from_millis(250));
        assert_eq!(config.speech.backend, SpeechBackend::Local);
        assert_eq!(config.speech.local.command, "espeak-ng");
        assert!((config.speech.local.rate - 0.9).abs() < f32::EPSILON);
        assert_eq!(config.speech.remote.endpoint, DEFAULT_TTS_ENDPOINT);
        assert_eq!(config.speech.remote.response_format, "mp3");
    }

    #[test]
    fn test_env_overrides_file() {
        let fc = TrainerConfigFile {
            language: Some("de-DE".to_string()),
            click_window_ms: Some(400),
            ..Default::default()
        };
        let config = Config::from_sources(
            fc,
            env_from(&[("NUMTRAIN_LANGUAGE", "zh-TW"), ("NUMTRAIN_DISPLAY", "words")]),
        )
        .unwrap();

        assert_eq!(config.language, "zh-TW");
        assert_eq!(config.display, DisplayStyle::Words);
        assert_eq!(config.click_window, Duration::from_millis(400));
    }

    #[test]
    fn test_malformed_env_is_ignored() {
        let fc = TrainerConfigFile {
            click_window_ms: Some(180),
            ..Default::default()
        };
        let config =
            Config::from_sources(fc, env_from(&[("NUMTRAIN_CLICK_WINDOW_MS", "soon")])).unwrap();
        assert_eq!(config.click_window, Duration::from_millis(180));
    }

    #[test]
    fn test_remote_without_key_still_loads() {
        // Commands that never speak must not need a key
        let config = Config::from_sources(
            TrainerConfigFile::default(),
            env_from(&[("NUMTRAIN_SPEECH_BACKEND", "remote")]),
        )
        .unwrap();
        assert_eq!(config.speech.backend, SpeechBackend::Remote);
        assert!(config.speech.remote.api_key.is_none());

        let config = Config::from_sources(
            TrainerConfigFile::default(),
            env_from(&[
                ("NUMTRAIN_SPEECH_BACKEND", "remote"),
                ("OPENAI_API_KEY", "sk-test"),
            ]),
        )
        .unwrap();
        assert_eq!(config.speech.backend, SpeechBackend::Remote);
        assert_eq!(config.speech.remote.api_key.as_deref(), Some("sk-test"));
    }

    #[test]
    fn test_out_of_range_values() {
        let mut config = Config::default();
        config.speech.local.rate = 20.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.language = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.speech.remote.speed = 0.1;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.click_window = Duration::ZERO;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_backend_parse() {
        assert_eq!("Local".parse::<SpeechBackend>().unwrap(), SpeechBackend::Local);
        assert_eq!("none".parse::<SpeechBackend>().unwrap(), SpeechBackend::Silent);
        assert!("carrier-pigeon".parse::<SpeechBackend>().is_err());
    }

    #[test]
    fn test_overrides_win_before_validation() {
        let fc = TrainerConfigFile {
            language: Some(String::new()),
            ..Default::default()
        };
        let mut config = Config::resolve(fc, env_from(&[("NUMTRAIN_SPEECH_BACKEND", "remote")]));
        assert!(config.validate().is_err());

        config.apply(Overrides {
            language: Some("zh-TW".to_string()),
            speech: Some(SpeechBackend::Silent),
            display: Some(DisplayStyle::Words),
        });
        config.validate().unwrap();
        assert_eq!(config.language, "zh-TW");
        assert_eq!(config.speech.backend, SpeechBackend::Silent);
        assert_eq!(config.display, DisplayStyle::Words);
    }

    #[test]
    fn test_empty_overrides_keep_resolved_values() {
        let mut config = Config::resolve(
            TrainerConfigFile::default(),
            env_from(&[("NUMTRAIN_LANGUAGE", "de-DE")]),
        );
        config.apply(Overrides::default());
        assert_eq!(config.language, "de-DE");
        assert_eq!(config.speech.backend, SpeechBackend::Local);
    }
}
