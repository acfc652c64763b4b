//! # Structured logging subscriber.
//!
//! [`TraceWriter`] forwards runtime events to [`tracing`], so the watchdog
//! participates in whatever subscriber stack the host application installs
//! (env-filtered console output, JSON file layers, ...). Error-class events
//! map to `warn!`, the threshold milestone to `error!`, everything else to
//! `info!`.

use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::events::{Event, EventKind};

use super::Subscribe;

/// Subscriber that emits one `tracing` event per runtime event.
#[derive(Debug, Default)]
pub struct TraceWriter;

impl TraceWriter {
    /// Creates a new trace writer.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for TraceWriter {
    async fn on_event(&self, event: &Event) {
        let exe = event.target.as_deref().unwrap_or("");
        let reason = event.reason.as_deref().unwrap_or("");
        match event.kind {
            EventKind::WatchEnabled => info!(seq = event.seq, "watch enabled"),
            EventKind::WatchDisabled => info!(seq = event.seq, "watch disabled"),
            EventKind::ShutdownRequested => info!(seq = event.seq, "shutdown requested"),
            EventKind::SupervisionStopped => info!(seq = event.seq, "supervision stopped"),
            EventKind::TargetMissing => {
                info!(seq = event.seq, exe, "target not running, launching")
            }
            EventKind::TargetLaunched => info!(seq = event.seq, exe, "target launched"),
            EventKind::LaunchFailed => warn!(
                seq = event.seq,
                exe,
                reason,
                failures = event.failures.unwrap_or(0),
                "launch failed"
            ),
            EventKind::ProbeFailed => {
                warn!(seq = event.seq, exe, reason, "liveness check failed")
            }
            EventKind::FailureThresholdReached => error!(
                seq = event.seq,
                exe,
                failures = event.failures.unwrap_or(0),
                "launch failure threshold reached"
            ),
        }
    }

    fn name(&self) -> &'static str {
        "trace_writer"
    }
}
