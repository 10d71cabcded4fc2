//! Number Trainer - practice reading large numbers aloud
//!
//! Generates sparse-digit numbers (only the top two digits non-zero once a
//! number passes two digits), keeps them hidden, and on interaction either
//! speaks them or reveals the digits:
//! - Single click: speak the number after a short disambiguation window
//! - Double click: cancel the pending speak and reveal the number
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │            Presentation (numtrain)          │
//! │     click  │  double click  │  regenerate   │
//! └──────────────────────┬──────────────────────┘
//!                        │
//! ┌──────────────────────▼──────────────────────┐
//! │                   Trainer                   │
//! │   Board  │  ClickDisambiguator  │ Generator │
//! └──────────────────────┬──────────────────────┘
//!                        │
//! ┌──────────────────────▼──────────────────────┐
//! │                Collaborators                │
//! │  NumberFormatter  │  SpeechSink (local/TTS) │
//! └─────────────────────────────────────────────┘
//! ```

pub mod board;
pub mod clicks;
pub mod config;
pub mod drill;
pub mod error;
pub mod format;
pub mod generator;
pub mod speech;
pub mod trainer;

pub use board::Board;
pub use clicks::{CLICK_WINDOW, ClickDisambiguator, ClickState};
pub use config::{Config, SpeechBackend};
pub use error::{Error, Result};
pub use format::{DisplayStyle, GroupedDigits, NumberFormatter, NumeralWords};
pub use generator::{RandomSource, RngSource, generate, generate_numbers, sparse_number};
pub use speech::{LocalVoice, RemoteVoice, SilentVoice, SpeechSink, TextToSpeech};
pub use trainer::{ItemView, Trainer, TrainerSettings};
