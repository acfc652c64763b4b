//! # Runtime events emitted by the watchdog.
//!
//! The [`EventKind`] enum classifies events across three categories:
//! - **Control events**: operator transitions (enabled, disabled, shutdown)
//! - **Supervision events**: probe/launch outcomes of one active cycle
//! - **Terminal events**: the loop has exited
//!
//! The [`Event`] struct carries metadata such as timestamps, the target
//! name, failure reasons, and the consecutive-failure count.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically. Use `seq` to restore exact order when events are consumed
//! out of band.
//!
//! ## Example
//! ```rust
//! use procvisor::{Event, EventKind};
//!
//! let ev = Event::now(EventKind::LaunchFailed)
//!     .with_target("daemon.exe")
//!     .with_reason("no such file")
//!     .with_failures(3);
//!
//! assert_eq!(ev.kind, EventKind::LaunchFailed);
//! assert_eq!(ev.target.as_deref(), Some("daemon.exe"));
//! assert_eq!(ev.failures, Some(3));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Control events ===
    /// Supervision was enabled by the driver.
    ///
    /// Sets:
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    WatchEnabled,

    /// Supervision was disabled by the driver.
    ///
    /// Sets:
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    WatchDisabled,

    /// Shutdown requested; the loop will exit on its next observation.
    ///
    /// Sets:
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    ShutdownRequested,

    // === Supervision events ===
    /// The target was found not running; a launch is about to be attempted.
    ///
    /// Sets:
    /// - `target`: target name
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    TargetMissing,

    /// A launch attempt succeeded.
    ///
    /// Sets:
    /// - `target`: target name
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    TargetLaunched,

    /// A launch attempt failed.
    ///
    /// Sets:
    /// - `target`: target name
    /// - `reason`: failure message
    /// - `failures`: consecutive-failure count including this attempt
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    LaunchFailed,

    /// The liveness check itself failed; treated as "not alive".
    ///
    /// Sets:
    /// - `target`: target name
    /// - `reason`: probe error message
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    ProbeFailed,

    /// Consecutive launch failures reached the configured threshold.
    ///
    /// The counter resets and supervision continues at the same cadence.
    ///
    /// Sets:
    /// - `target`: target name
    /// - `failures`: the threshold that was reached
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    FailureThresholdReached,

    // === Terminal events ===
    /// The supervision loop has exited (shutdown observed).
    ///
    /// Sets:
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    SupervisionStopped,
}

/// Runtime event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for operator logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Name of the supervised target, if applicable.
    pub target: Option<Arc<str>>,
    /// Human-readable reason (probe/launch errors).
    pub reason: Option<Arc<str>>,
    /// Consecutive launch failures at the time of the event.
    pub failures: Option<u32>,
    /// Event classification.
    pub kind: EventKind,
}

impl Event {
    /// Creates a new event of the given kind with the current timestamp and
    /// next sequence number.
    pub fn now(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            target: None,
            reason: None,
            failures: None,
            kind,
        }
    }

    /// Attaches a target name.
    #[inline]
    pub fn with_target(mut self, target: impl Into<Arc<str>>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches a consecutive-failure count.
    #[inline]
    pub fn with_failures(mut self, n: u32) -> Self {
        self.failures = Some(n);
        self
    }

    /// True for events that describe an error condition.
    #[inline]
    pub fn is_error(&self) -> bool {
        matches!(self.kind, EventKind::LaunchFailed | EventKind::ProbeFailed)
    }
}
