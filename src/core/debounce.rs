//! Trailing-edge debouncer for message submission.
//!
//! Rapid Enter presses within the window collapse into a single submission;
//! every trigger restarts the timer, and the fire happens at the trailing
//! edge so it picks up the most recent input text.

use std::time::{Duration, Instant};

/// Default submission window.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(250);

#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    /// Arms (or re-arms) the timer. Each call pushes the deadline out by a
    /// full window.
    pub fn trigger(&mut self, now: Instant) {
        self.deadline = Some(now + self.window);
    }

    /// Returns true exactly once per burst, when the window has elapsed
    /// without another trigger. Disarms on fire.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// True while a trigger is waiting for its window to elapse.
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEBOUNCE_WINDOW)
    }
}
