//! TOML configuration file loading
//!
//! Supports `~/.config/number-trainer/config.toml` as a persistent config
//! source. All fields are optional; the file is a partial overlay on top of
//! defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::Result;
use crate::format::DisplayStyle;

use super::SpeechBackend;

/// Top-level TOML configuration file schema
#[derive(Debug, Default, Deserialize)]
pub struct TrainerConfigFile {
    /// Language tag used for formatting and speech (e.g. "en-US")
    pub language: Option<String>,

    /// How numbers are rendered ("digits" or "words")
    pub display: Option<DisplayStyle>,

    /// Click/double-click window in milliseconds
    pub click_window_ms: Option<u64>,

    /// Speech configuration
    #[serde(default)]
    pub speech: SpeechFileConfig,

    /// API keys for external services
    #[serde(default)]
    pub api_keys: ApiKeysFileConfig,
}

/// Speech configuration
#[derive(Debug, Default, Deserialize)]
pub struct SpeechFileConfig {
    /// Backend selection
    pub backend: Option<SpeechBackend>,

    /// Local voice command settings
    #[serde(default)]
    pub local: LocalVoiceFileConfig,

    /// Remote TTS settings
    #[serde(default)]
    pub remote: RemoteVoiceFileConfig,
}

/// Local voice command settings
#[derive(Debug, Default, Deserialize)]
pub struct LocalVoiceFileConfig {
    /// espeak-compatible command
    pub command: Option<String>,
    /// Speaking rate (0.1 to 10)
    pub rate: Option<f32>,
    /// Volume (0 to 1)
    pub volume: Option<f32>,
    /// Pitch (0 to 2)
    pub pitch: Option<f32>,
}

/// Remote TTS settings
#[derive(Debug, Default, Deserialize)]
pub struct RemoteVoiceFileConfig {
    /// Speech endpoint URL
    pub endpoint: Option<String>,
    /// TTS model (e.g. "tts-1")
    pub model: Option<String>,
    /// Voice identifier (e.g. "alloy")
    pub voice: Option<String>,
    /// Audio format requested ("mp3", "wav", ...)
    pub response_format: Option<String>,
    /// Speed multiplier (0.25 to 4.0)
    pub speed: Option<f32>,
    /// Command that plays audio read from stdin (e.g. "mpv --no-terminal -")
    pub player: Option<String>,
}

/// API keys configuration
#[derive(Debug, Default, Deserialize)]
pub struct ApiKeysFileConfig {
    /// OpenAI API key, used by the remote speech backend
    pub openai: Option<String>,
}

/// Load the TOML config file from the standard path
///
/// Returns `TrainerConfigFile::default()` if the file doesn't exist or can't be parsed.
pub fn load_config_file() -> TrainerConfigFile {
    config_file_path().map_or_else(TrainerConfigFile::default, |path| load_config_from(&path))
}

/// Load a TOML config file from `path`, falling back to defaults
pub fn load_config_from(path: &Path) -> TrainerConfigFile {
    if !path.exists() {
        return TrainerConfigFile::default();
    }

    match std::fs::read_to_string(path) {
        Ok(content) => match parse_config(&content) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded config file");
                config
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to parse config file, using defaults"
                );
                TrainerConfigFile::default()
            }
        },
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "failed to read config file"
            );
            TrainerConfigFile::default()
        }
    }
}

/// Parse TOML config file contents
///
/// # Errors
///
/// Returns error if the contents are not valid for the schema
pub fn parse_config(content: &str) -> Result<TrainerConfigFile> {
    Ok(toml::from_str(content)?)
}

/// Return the config file path: `~/.config/number-trainer/config.toml`
pub fn config_file_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.config_dir().join("number-trainer").join("config.toml"))
}
