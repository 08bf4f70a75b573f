//! Time control and cooperative cancellation for players.
//!
//! This module provides the pieces a player needs to respect time constraints:
//! a shared stop flag the controller can raise at any moment, a governor that
//! turns a low clock into a search cutoff, and a minimum thinking delay.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::game::Clock;

/// Remaining time below which search stops descending, in milliseconds.
pub const TIME_THRESHOLD_MS: u64 = 2000;

/// How long a thinking-delay wait sleeps between cancellation checks.
const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Thread-safe cancellation flag shared between a controller and a player.
///
/// Cloning is cheap and every clone observes the same flag. The
/// `is_cancelled()` check is a relaxed atomic load so it can be called on
/// every loop iteration of the search.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the player to stop. Advisory: the search unwinds at its next
    /// loop boundary and keeps whatever it already found.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Clear the flag so the token can be reused for the next move.
    pub fn reset(&self) {
        self.cancelled.store(false, Ordering::SeqCst);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Turns a low remaining-time budget into a frontier cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeGovernor {
    threshold_ms: u64,
}

impl TimeGovernor {
    pub fn new(threshold_ms: u64) -> Self {
        Self { threshold_ms }
    }

    pub fn threshold_ms(&self) -> u64 {
        self.threshold_ms
    }

    /// True when the clock reports less than the threshold. Search nodes
    /// treat this exactly like reaching the depth limit.
    #[inline]
    pub fn under_pressure<C: Clock + ?Sized>(&self, clock: &C) -> bool {
        clock.time_left_ms() < self.threshold_ms
    }
}

impl Default for TimeGovernor {
    fn default() -> Self {
        Self::new(TIME_THRESHOLD_MS)
    }
}

/// Minimum wall-clock time a player spends on a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThinkingDelay {
    delay: Duration,
}

impl ThinkingDelay {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    /// Time still owed if the move was started at `started`.
    pub fn remaining(&self, started: Instant) -> Duration {
        self.delay.saturating_sub(started.elapsed())
    }

    /// Block until `delay` has passed since `started`.
    ///
    /// Returns early, without error, as soon as `cancel` is raised.
    pub fn wait_out(&self, started: Instant, cancel: &CancelToken) {
        loop {
            if cancel.is_cancelled() {
                return;
            }
            let remaining = self.remaining(started);
            if remaining.is_zero() {
                return;
            }
            thread::sleep(remaining.min(WAIT_POLL_INTERVAL));
        }
    }
}

#[cfg(test)]
#[path = "time_control_tests.rs"]
mod time_control_tests;
