//! # Control surface for the watchdog.
//!
//! [`WatchdogHandle`] is the driver-facing half of the supervision core:
//! a UI button, a CLI, or a test calls `enable`/`disable`/`shutdown` here
//! while the background loop consumes the flags.
//!
//! ## Monitor discipline
//! Both flags live in a single [`tokio::sync::watch`] channel. Every
//! mutation goes through `send_if_modified`, so the flag write and the
//! broadcast wake-up happen atomically inside the channel's own critical
//! section — there is no missed-wakeup window and no stale-read window
//! beyond it. The loop's next `borrow_and_update` observes the latest
//! state.
//!
//! ## Invariants
//! - `running` is monotonic: once `shutdown()` flips it false, no
//!   operation flips it back.
//! - once `running` is false, `enabled` is forced false and `enable()`
//!   becomes a no-op.
//! - control transitions publish events only when state actually changed,
//!   so repeated calls are idempotent in the log as well.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::events::{Bus, Event, EventKind};

/// Shared control state consumed by the supervision loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ControlState {
    /// True while the loop actively supervises the target.
    pub enabled: bool,
    /// True until shutdown; terminal once false.
    pub running: bool,
}

impl ControlState {
    pub(crate) fn initial() -> Self {
        // Idle is the initial state: running, not yet supervising.
        Self {
            enabled: false,
            running: true,
        }
    }
}

/// Thread-safe control operations and observable status.
///
/// Cheap to clone; every clone controls the same watchdog.
#[derive(Clone)]
pub struct WatchdogHandle {
    pub(crate) control: watch::Sender<ControlState>,
    pub(crate) cancel: CancellationToken,
    pub(crate) failures: Arc<AtomicU32>,
    pub(crate) bus: Bus,
}

impl WatchdogHandle {
    /// Starts supervising: the loop leaves Idle immediately, not after a
    /// poll interval.
    ///
    /// No-op after `shutdown()`; idempotent.
    pub fn enable(&self) {
        let changed = self.control.send_if_modified(|c| {
            if c.running && !c.enabled {
                c.enabled = true;
                true
            } else {
                false
            }
        });
        if changed {
            self.bus.publish(Event::now(EventKind::WatchEnabled));
        }
    }

    /// Stops supervising: the loop returns to Idle immediately.
    ///
    /// Does not kill an already-launched target; idempotent.
    pub fn disable(&self) {
        let changed = self.control.send_if_modified(|c| {
            if c.enabled {
                c.enabled = false;
                true
            } else {
                false
            }
        });
        if changed {
            self.bus.publish(Event::now(EventKind::WatchDisabled));
        }
    }

    /// Terminates supervision permanently.
    ///
    /// Forces `enabled` false, flips `running` false (never reversed), and
    /// cancels the root token so an in-flight probe is abandoned. A launch
    /// already in flight is allowed to complete; the loop observes
    /// termination at the top of its next iteration. Idempotent.
    pub fn shutdown(&self) {
        let changed = self.control.send_if_modified(|c| {
            if c.running {
                c.running = false;
                c.enabled = false;
                true
            } else {
                false
            }
        });
        if changed {
            self.bus.publish(Event::now(EventKind::ShutdownRequested));
        }
        self.cancel.cancel();
    }

    /// True while supervision is enabled (for "running/stopped" indicators).
    pub fn is_enabled(&self) -> bool {
        self.control.borrow().enabled
    }

    /// False once `shutdown()` has been called.
    pub fn is_running(&self) -> bool {
        self.control.borrow().running
    }

    /// Launch attempts that failed since the last successful launch (or
    /// threshold reset).
    pub fn consecutive_failures(&self) -> u32 {
        self.failures.load(Ordering::SeqCst)
    }
}
