//! # Status tracker for UI indicators.
//!
//! [`StatusTracker`] maintains the observable state a presentation layer
//! needs to render "running/stopped" indicators and simple counters,
//! derived entirely from the event stream. It is the pluggable
//! status-observer capability: the core stays decoupled from any
//! presentation technology.
//!
//! ## Rules
//! - `WatchEnabled` / `WatchDisabled` / `ShutdownRequested` drive the
//!   watching flag
//! - `TargetLaunched` / `LaunchFailed` / `FailureThresholdReached` feed
//!   cumulative counters (they never reset; the *consecutive* counter
//!   lives in the watchdog itself)
//! - Reads are eventually consistent with the loop's publishes

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;

use crate::events::{Event, EventKind};

use super::Subscribe;

/// Thread-safe, event-driven status snapshot.
#[derive(Debug, Default)]
pub struct StatusTracker {
    watching: AtomicBool,
    launches: AtomicU64,
    failed_launches: AtomicU64,
    thresholds: AtomicU64,
}

impl StatusTracker {
    /// Creates a new tracker; initially "not watching".
    pub fn new() -> Self {
        Self::default()
    }

    /// True while supervision is enabled (per the last observed event).
    pub fn is_watching(&self) -> bool {
        self.watching.load(Ordering::SeqCst)
    }

    /// Total successful launches observed.
    pub fn launches(&self) -> u64 {
        self.launches.load(Ordering::SeqCst)
    }

    /// Total failed launch attempts observed.
    pub fn failed_launches(&self) -> u64 {
        self.failed_launches.load(Ordering::SeqCst)
    }

    /// Times the consecutive-failure threshold was reached.
    pub fn thresholds_reached(&self) -> u64 {
        self.thresholds.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Subscribe for StatusTracker {
    async fn on_event(&self, event: &Event) {
        match event.kind {
            EventKind::WatchEnabled => self.watching.store(true, Ordering::SeqCst),
            EventKind::WatchDisabled | EventKind::ShutdownRequested => {
                self.watching.store(false, Ordering::SeqCst)
            }
            EventKind::TargetLaunched => {
                self.launches.fetch_add(1, Ordering::SeqCst);
            }
            EventKind::LaunchFailed => {
                self.failed_launches.fetch_add(1, Ordering::SeqCst);
            }
            EventKind::FailureThresholdReached => {
                self.thresholds.fetch_add(1, Ordering::SeqCst);
            }
            _ => {}
        }
    }

    fn name(&self) -> &'static str {
        "status_tracker"
    }
}
