//! # Global runtime configuration.
//!
//! Provides [`Config`], the centralized settings for the watchdog runtime.
//!
//! The two numeric constants of the supervision algorithm live here rather
//! than as literals in the loop:
//! - `poll_interval`: how long the active loop waits between liveness checks
//!   (the wait is interruptible by any control operation);
//! - `failure_threshold`: how many consecutive launch failures trigger the
//!   milestone event (the counter then resets and supervision continues).
//!
//! ## Sentinel values
//! - `failure_threshold = 0` → the milestone is never emitted
//! - `bus_capacity` is clamped to a minimum of 1 by the bus

use std::time::Duration;

/// Global configuration for the watchdog runtime.
///
/// ## Field semantics
/// - `poll_interval`: delay between active-state liveness checks; control
///   operations wake the loop before the interval elapses
/// - `failure_threshold`: consecutive launch failures before the
///   `FailureThresholdReached` milestone (`0` = never)
/// - `bus_capacity`: event bus ring buffer size (min 1; clamped by the bus)
#[derive(Clone, Debug)]
pub struct Config {
    /// Delay between liveness checks while supervision is active.
    ///
    /// The wait is interruptible: `enable`/`disable`/`shutdown` take effect
    /// immediately, never after the interval elapses.
    pub poll_interval: Duration,

    /// Number of consecutive launch failures that emits the milestone event.
    ///
    /// Reaching the threshold logs a distinguished event and resets the
    /// counter; it does **not** stop or back off supervision.
    pub failure_threshold: u32,

    /// Capacity of the event bus broadcast channel ring buffer.
    ///
    /// Slow subscribers that lag behind more than `bus_capacity` events
    /// skip the oldest items. Minimum value is 1 (enforced by the bus).
    pub bus_capacity: usize,
}

impl Config {
    /// Returns a bus capacity clamped to a minimum of 1.
    ///
    /// The bus uses this value to avoid constructing an invalid channel.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }

    /// Returns the failure threshold as an `Option`.
    ///
    /// - `None` → milestone disabled
    /// - `Some(n)` → milestone after `n` consecutive failures
    #[inline]
    pub fn threshold(&self) -> Option<u32> {
        if self.failure_threshold == 0 {
            None
        } else {
            Some(self.failure_threshold)
        }
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `poll_interval = 2s`
    /// - `failure_threshold = 5`
    /// - `bus_capacity = 1024`
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(2),
            failure_threshold: 5,
            bus_capacity: 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.poll_interval, Duration::from_secs(2));
        assert_eq!(cfg.failure_threshold, 5);
        assert_eq!(cfg.threshold(), Some(5));
    }

    #[test]
    fn test_zero_threshold_is_disabled() {
        let cfg = Config {
            failure_threshold: 0,
            ..Config::default()
        };
        assert_eq!(cfg.threshold(), None);
    }

    #[test]
    fn test_bus_capacity_clamped() {
        let cfg = Config {
            bus_capacity: 0,
            ..Config::default()
        };
        assert_eq!(cfg.bus_capacity_clamped(), 1);
    }
}
