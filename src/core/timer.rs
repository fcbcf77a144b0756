//! Deadline slots for timeout-driven sub-states
//!
//! Nothing here owns a clock. Callers pass `now`, so the state machine can be
//! driven by a real event loop or by a virtual clock in tests and replays.

use std::time::{Duration, Instant};

/// Longest count accepted; further digits are ignored
const MAX_COUNT_DIGITS: usize = 6;

/// One cancellable deadline; arming it again replaces the previous one
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Deadline {
    at: Option<Instant>,
}

impl Deadline {
    /// A deadline already armed for `now + period`
    pub fn starting(now: Instant, period: Duration) -> Self {
        Self {
            at: Some(now + period),
        }
    }

    /// (Re)start the countdown
    pub fn arm(&mut self, now: Instant, period: Duration) {
        self.at = Some(now + period);
    }

    pub fn cancel(&mut self) {
        self.at = None;
    }

    pub fn is_armed(&self) -> bool {
        self.at.is_some()
    }

    /// Armed and due at `now`
    pub fn expired(&self, now: Instant) -> bool {
        self.at.is_some_and(|at| now >= at)
    }

    pub fn at(&self) -> Option<Instant> {
        self.at
    }
}

/// Numeric prefix being typed, with the deadline that flushes it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountBuffer {
    digits: String,
    deadline: Deadline,
}

impl CountBuffer {
    /// Append a digit and restart the deadline; non-digits are refused
    pub fn push(&mut self, c: char, now: Instant, period: Duration) -> bool {
        if !c.is_ascii_digit() {
            return false;
        }
        if self.digits.len() < MAX_COUNT_DIGITS {
            self.digits.push(c);
        }
        self.deadline.arm(now, period);
        true
    }

    pub fn digits(&self) -> &str {
        &self.digits
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    pub fn value(&self) -> Option<usize> {
        self.digits.parse().ok()
    }

    pub fn expired(&self, now: Instant) -> bool {
        !self.digits.is_empty() && self.deadline.expired(now)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline.at()
    }

    pub fn clear(&mut self) {
        self.digits.clear();
        self.deadline.cancel();
    }
}

/// Detects a second press of the same key inside a short window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DoublePress {
    pending: Deadline,
}

impl DoublePress {
    /// Returns true if this press completes a double press
    pub fn press(&mut self, now: Instant, window: Duration) -> bool {
        if self.pending.is_armed() && !self.pending.expired(now) {
            self.pending.cancel();
            true
        } else {
            self.pending.arm(now, window);
            false
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_armed()
    }

    pub fn expired(&self, now: Instant) -> bool {
        self.pending.expired(now)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.at()
    }

    pub fn cancel(&mut self) {
        self.pending.cancel();
    }
}
