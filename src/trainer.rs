//! The number trainer widget
//!
//! Glues the board, the click disambiguator and the speech/formatter
//! collaborators together. A single click speaks the clicked number once the
//! click window passes; a double click reveals it instead.

use std::sync::Arc;
use std::time::Duration;

use crate::board::Board;
use crate::clicks::{ClickDisambiguator, ClickState};
use crate::format::NumberFormatter;
use crate::generator::RandomSource;
use crate::speech::SpeechSink;
use crate::{Config, Result};

/// Per-instance settings passed in explicitly
#[derive(Debug, Clone)]
pub struct TrainerSettings {
    /// Language tag for formatting and speech
    pub language: String,
    /// Click/double-click window
    pub click_window: Duration,
}

impl From<&Config> for TrainerSettings {
    fn from(config: &Config) -> Self {
        Self {
            language: config.language.clone(),
            click_window: config.click_window,
        }
    }
}

/// What presentation needs to draw one item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemView {
    /// Formatted number
    pub text: String,
    /// Whether the digits are shown
    pub revealed: bool,
}

/// A number-reading drill
///
/// Dropping the trainer cancels any pending speak.
pub struct Trainer<R> {
    rng: R,
    board: Board,
    clicks: ClickDisambiguator,
    speech: Arc<dyn SpeechSink>,
    formatter: Arc<dyn NumberFormatter>,
    language: String,
}

impl<R: RandomSource> Trainer<R> {
    /// Create a trainer with a freshly generated board
    pub fn new(
        rng: R,
        settings: TrainerSettings,
        speech: Arc<dyn SpeechSink>,
        formatter: Arc<dyn NumberFormatter>,
    ) -> Self {
        let mut trainer = Self {
            rng,
            board: Board::default(),
            clicks: ClickDisambiguator::new(settings.click_window),
            speech,
            formatter,
            language: settings.language,
        };
        trainer.regenerate();
        trainer
    }

    /// Replace every number and hide them all
    pub fn regenerate(&mut self) {
        self.board.regenerate(&mut self.rng);
        tracing::info!(count = self.board.len(), "new numbers generated");
    }

    /// Single click on item `index`: speak it once the click window passes
    ///
    /// Any click still pending, on this or another item, is dropped.
    ///
    /// The speak is a task on the ambient tokio runtime. Use a current-thread
    /// runtime: a later `click` or `double_click` then always cancels it
    /// before it can run, while a multi-thread runtime may already be
    /// running the speak when the cancel arrives.
    ///
    /// # Errors
    ///
    /// Returns error if `index` is not on the board
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime
    pub fn click(&mut self, index: usize) -> Result<()> {
        let number = self.board.number(index)?;
        let text = self.formatter.format(number, &self.language);
        let language = self.language.clone();
        let speech = Arc::clone(&self.speech);

        tracing::debug!(index, "click");
        self.clicks.click(move || speech.speak(&text, &language));
        Ok(())
    }

    /// Double click on item `index`: drop the pending speak and reveal it
    ///
    /// # Errors
    ///
    /// Returns error if `index` is not on the board
    pub fn double_click(&mut self, index: usize) -> Result<()> {
        self.clicks.double_click();
        self.board.reveal(index)?;
        tracing::debug!(index, "revealed");
        Ok(())
    }

    /// Switch the language used for formatting and speech
    pub fn set_language(&mut self, language: impl Into<String>) {
        self.language = language.into();
        tracing::info!(language = %self.language, "language changed");
    }

    /// Current language tag
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// The board
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Whether a speak is waiting on the click window
    #[must_use]
    pub fn click_state(&self) -> ClickState {
        self.clicks.state()
    }

    /// Items as presentation should draw them
    #[must_use]
    pub fn items(&self) -> Vec<ItemView> {
        self.board
            .numbers()
            .iter()
            .zip(self.board.revealed())
            .map(|(number, revealed)| ItemView {
                text: self.formatter.format(*number, &self.language),
                revealed: *revealed,
            })
            .collect()
    }
}

impl<R> std::fmt::Debug for Trainer<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Trainer")
            .field("board", &self.board)
            .field("clicks", &self.clicks)
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}
