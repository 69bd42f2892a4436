#![forbid(unsafe_code)]

//! One-shot timeouts on the host clock.
//!
//! A [`Timeout`] is owned by the component that armed it. The host polls it
//! with the current monotonic time; it fires at most once. Cancelling is
//! always allowed: before arming, while pending, after firing, or twice.
//!
//! # Invariants
//!
//! 1. [`poll`](Timeout::poll) returns `Some` at most once per arm.
//! 2. A cancelled timeout never fires.
//! 3. Firing reports how late the poll was relative to the deadline, so
//!    that callers can forward the overshoot into their animations.

use std::time::Duration;

/// Lifecycle of a [`Timeout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeoutState {
    /// Never armed.
    #[default]
    Idle,
    /// Waiting for its deadline.
    Armed {
        /// Absolute monotonic deadline.
        deadline: Duration,
    },
    /// Fired at the given deadline.
    Fired {
        /// Deadline at which it fired.
        at: Duration,
    },
    /// Cancelled before firing.
    Cancelled,
}

/// A single pending deadline.
#[derive(Debug, Clone, Copy, Default)]
pub struct Timeout {
    state: TimeoutState,
}

impl Timeout {
    /// Create an idle timeout.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: TimeoutState::Idle,
        }
    }

    /// Arm the timeout to fire `after` the given `now`.
    ///
    /// Re-arming replaces any previous deadline.
    pub fn arm(&mut self, now: Duration, after: Duration) {
        self.state = TimeoutState::Armed {
            deadline: now.saturating_add(after),
        };
    }

    /// Cancel a pending deadline. Returns `true` if one was pending.
    pub fn cancel(&mut self) -> bool {
        match self.state {
            TimeoutState::Armed { .. } => {
                self.state = TimeoutState::Cancelled;
                true
            }
            _ => false,
        }
    }

    /// Fire if the deadline has passed.
    ///
    /// Returns the deadline and the overshoot (`now - deadline`).
    pub fn poll(&mut self, now: Duration) -> Option<(Duration, Duration)> {
        match self.state {
            TimeoutState::Armed { deadline } if now >= deadline => {
                self.state = TimeoutState::Fired { at: deadline };
                Some((deadline, now - deadline))
            }
            _ => None,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> TimeoutState {
        self.state
    }

    /// Whether a deadline is pending.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self.state, TimeoutState::Armed { .. })
    }

    /// Pending deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<Duration> {
        match self.state {
            TimeoutState::Armed { deadline } => Some(deadline),
            _ => None,
        }
    }
}
