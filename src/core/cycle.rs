//! # Run a single supervision cycle.
//!
//! Executes one probe-and-maybe-launch pass against the target, publishing
//! lifecycle events to the [`Bus`]. Called once per Active iteration of the
//! watchdog loop.
//!
//! ## Event flow
//! ```text
//! Alive:
//!   probe → Ok(true)  → (no event, wait out the interval)
//!
//! Missing:
//!   probe → Ok(false) → publish TargetMissing
//!                     → launch → Ok  → publish TargetLaunched, counter = 0
//!                              → Err → counter += 1, publish LaunchFailed
//!                                      └─ counter == threshold:
//!                                           publish FailureThresholdReached,
//!                                           counter = 0 (supervision continues)
//!
//! Probe error:
//!   probe → Err(Canceled) → return (shutdown in progress, no event)
//!   probe → Err(other)    → publish ProbeFailed, treat as missing (fail-open)
//! ```
//!
//! ## Rules
//! - A launch and its outcome event occur exactly on each "not alive"
//!   observation, never on "alive"
//! - Every capability error is swallowed here; the cycle never returns one
//! - The threshold milestone takes no corrective action: the counter
//!   resets and retries continue at the same cadence

use std::sync::atomic::{AtomicU32, Ordering};

use tokio_util::sync::CancellationToken;

use crate::error::ProbeError;
use crate::events::{Bus, Event, EventKind};
use crate::probes::{Launcher, Probe};
use crate::target::Target;

/// Executes one supervision cycle: liveness check, then launch if absent.
#[allow(clippy::too_many_arguments)]
pub(crate) async fn run_cycle(
    target: &Target,
    probe: &dyn Probe,
    launcher: &dyn Launcher,
    bus: &Bus,
    failures: &AtomicU32,
    threshold: Option<u32>,
    ctx: &CancellationToken,
) {
    let alive = match probe.is_alive(target, ctx.child_token()).await {
        Ok(alive) => alive,
        // Shutdown mid-probe: not a liveness answer, not an error to log.
        Err(ProbeError::Canceled) => return,
        Err(e) => {
            bus.publish(
                Event::now(EventKind::ProbeFailed)
                    .with_target(target.name())
                    .with_reason(e.to_string()),
            );
            false
        }
    };

    if alive {
        return;
    }

    bus.publish(Event::now(EventKind::TargetMissing).with_target(target.name()));

    match launcher.launch(target).await {
        Ok(()) => {
            failures.store(0, Ordering::SeqCst);
            bus.publish(Event::now(EventKind::TargetLaunched).with_target(target.name()));
        }
        Err(e) => {
            let count = failures.fetch_add(1, Ordering::SeqCst) + 1;
            bus.publish(
                Event::now(EventKind::LaunchFailed)
                    .with_target(target.name())
                    .with_reason(e.to_string())
                    .with_failures(count),
            );
            if threshold.is_some_and(|t| count >= t) {
                bus.publish(
                    Event::now(EventKind::FailureThresholdReached)
                        .with_target(target.name())
                        .with_failures(count),
                );
                failures.store(0, Ordering::SeqCst);
            }
        }
    }
}
