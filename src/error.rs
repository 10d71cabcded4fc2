//! Error types for the number trainer

use thiserror::Error;

/// Result type alias for trainer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the number trainer
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Text-to-speech request error
    #[error("TTS error: {0}")]
    Tts(String),

    /// Local speech command error
    #[error("speech error: {0}")]
    Speech(String),

    /// Index does not address an item on the board
    #[error("no item at index {index} (board has {len})")]
    NoSuchItem {
        /// Requested index
        index: usize,
        /// Number of items on the board
        len: usize,
    },

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP error
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// TOML parsing error
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}
