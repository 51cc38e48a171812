//! Suggestion list navigation.
//!
//! An open list captures ArrowUp/ArrowDown (move the "current" mark with
//! wraparound) and Enter (commit the marked item). Committing opens a short
//! window during which plain Enter must not insert a line break.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::key::{KeyCode, KeyEvent};
use crate::traits::{HintList, Host};
use crate::types::Outcome;

/// Suppresses plain-Enter handling until an expiry instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnterSuppression {
    window: Duration,
    until: Option<Instant>,
}

impl EnterSuppression {
    pub const DEFAULT_WINDOW: Duration = Duration::from_millis(10);

    pub fn new(window: Duration) -> Self {
        Self {
            window,
            until: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Starts (or restarts) the window at `now`.
    pub fn arm(&mut self, now: Instant) {
        self.until = Some(now + self.window);
    }

    pub fn is_active(&self, now: Instant) -> bool {
        self.until.is_some_and(|until| now < until)
    }
}

impl Default for EnterSuppression {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WINDOW)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintState {
    /// No items, or the list is hidden. Every key is declined.
    Closed,
    /// The list is visible; zero or one item is marked current.
    Open { current: Option<usize> },
}

#[derive(Debug, Clone, Default)]
pub struct HintNavigator {
    suppression: EnterSuppression,
}

impl HintNavigator {
    pub fn new(window: Duration) -> Self {
        Self {
            suppression: EnterSuppression::new(window),
        }
    }

    /// Derives the state from the list's presentation state.
    pub fn state<L: HintList + ?Sized>(hints: &L) -> HintState {
        if hints.is_empty() || !hints.is_displayed() {
            HintState::Closed
        } else {
            HintState::Open {
                current: hints.current(),
            }
        }
    }

    pub fn suppression(&self) -> &EnterSuppression {
        &self.suppression
    }

    /// Whether plain Enter is still suppressed after a commit.
    pub fn suppresses_enter(&self, now: Instant) -> bool {
        self.suppression.is_active(now)
    }

    pub fn handle<L, H>(
        &mut self,
        hints: &mut L,
        host: &mut H,
        event: &KeyEvent,
        now: Instant,
    ) -> Outcome
    where
        L: HintList + ?Sized,
        H: Host + ?Sized,
    {
        let HintState::Open { current } = Self::state(hints) else {
            return Outcome::Declined;
        };
        let last = hints.len() - 1;

        match event.code {
            KeyCode::ArrowDown => {
                let next = match current {
                    Some(i) if i < last => i + 1,
                    _ => 0,
                };
                hints.set_current(Some(next));
                Outcome::Stop
            }
            KeyCode::ArrowUp => {
                let prev = match current {
                    Some(i) if i > 0 && i <= last => i - 1,
                    _ => last,
                };
                hints.set_current(Some(prev));
                Outcome::Stop
            }
            KeyCode::Enter => {
                if let Some(index) = current {
                    host.commit_hint(index);
                    self.suppression.arm(now);
                    debug!(index, "committed hint");
                }
                Outcome::Stop
            }
            _ => Outcome::Declined,
        }
    }
}
