//! The displayed number set and its reveal state

use crate::generator::{self, RandomSource};
use crate::{Error, Result};

/// Numbers on display together with which of them have been revealed
///
/// `revealed` always has the same length as `numbers`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    numbers: Vec<u64>,
    revealed: Vec<bool>,
}

impl Board {
    /// Create a board from explicit numbers, all hidden
    #[must_use]
    pub fn new(numbers: Vec<u64>) -> Self {
        let revealed = vec![false; numbers.len()];
        Self { numbers, revealed }
    }

    /// Replace the board with a fresh set of [`SET_SIZE`] numbers, all hidden
    ///
    /// [`SET_SIZE`]: generator::SET_SIZE
    pub fn regenerate(&mut self, rng: &mut impl RandomSource) {
        *self = Self::new(generator::generate_numbers(rng));
        tracing::debug!(numbers = ?self.numbers, "board regenerated");
    }

    /// Numbers on the board
    #[must_use]
    pub fn numbers(&self) -> &[u64] {
        &self.numbers
    }

    /// Reveal flags, parallel to [`Self::numbers`]
    #[must_use]
    pub fn revealed(&self) -> &[bool] {
        &self.revealed
    }

    /// Number of items
    #[must_use]
    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    /// Whether the board holds no items
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }

    /// Number at `index`
    ///
    /// # Errors
    ///
    /// Returns error if `index` is past the end of the board
    pub fn number(&self, index: usize) -> Result<u64> {
        self.numbers
            .get(index)
            .copied()
            .ok_or(Error::NoSuchItem {
                index,
                len: self.len(),
            })
    }

    /// Whether the item at `index` has been revealed
    #[must_use]
    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.get(index).copied().unwrap_or(false)
    }

    /// Mark the item at `index` as revealed
    ///
    /// # Errors
    ///
    /// Returns error if `index` is past the end of the board
    pub fn reveal(&mut self, index: usize) -> Result<()> {
        let len = self.len();
        let slot = self
            .revealed
            .get_mut(index)
            .ok_or(Error::NoSuchItem { index, len })?;
        *slot = true;
        Ok(())
    }
}
