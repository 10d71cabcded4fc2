//! Click / double-click disambiguation
//!
//! A single click schedules its action after a short window. A second click
//! or a double click inside the window cancels it. Only one action is pending
//! per disambiguator, whichever item it belongs to.
//!
//! The timer is a spawned tokio task, so cancellation is only race-free on a
//! current-thread runtime where the task cannot be mid-poll while `cancel`
//! runs.

use std::time::Duration;

use tokio::task::JoinHandle;

/// Default window separating a click from the first half of a double click
pub const CLICK_WINDOW: Duration = Duration::from_millis(250);

/// State of the disambiguator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickState {
    /// No action scheduled
    Idle,
    /// An action is waiting for the window to elapse
    Pending,
}

/// Debounces clicks into at most one pending delayed action
#[derive(Debug)]
pub struct ClickDisambiguator {
    window: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Default for ClickDisambiguator {
    fn default() -> Self {
        Self::new(CLICK_WINDOW)
    }
}

impl ClickDisambiguator {
    /// Create a disambiguator with the given window
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Window used to wait for a second click
    #[must_use]
    pub const fn window(&self) -> Duration {
        self.window
    }

    /// Current state
    #[must_use]
    pub fn state(&self) -> ClickState {
        match &self.pending {
            Some(handle) if !handle.is_finished() => ClickState::Pending,
            _ => ClickState::Idle,
        }
    }

    /// Register a single click
    ///
    /// Cancels whatever action was pending and schedules `action` to run once
    /// the window elapses.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime
    pub fn click<F>(&mut self, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        if self.cancel() {
            tracing::trace!("previous click superseded");
        }

        let window = self.window;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(window).await;
            action();
        }));
    }

    /// Register a double click, dropping any pending single-click action
    ///
    /// Returns `true` if an action was canceled.
    pub fn double_click(&mut self) -> bool {
        let canceled = self.cancel();
        if canceled {
            tracing::trace!("pending click absorbed by double click");
        }
        canceled
    }

    /// Cancel the pending action, if any
    ///
    /// Returns `true` if an action was still waiting.
    pub fn cancel(&mut self) -> bool {
        let Some(handle) = self.pending.take() else {
            return false;
        };
        let waiting = !handle.is_finished();
        handle.abort();
        waiting
    }
}

impl Drop for ClickDisambiguator {
    fn drop(&mut self) {
        if self.cancel() {
            tracing::debug!("pending click canceled on teardown");
        }
    }
}
