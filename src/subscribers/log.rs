//! # Operator-facing activity log.
//!
//! [`LogWriter`] renders events as timestamped, human-readable lines and
//! hands them to a pluggable sink — a UI log box, a file appender, or
//! (by default) stdout. The sink is the only presentation coupling the
//! watchdog has; without a registered `LogWriter`, events simply go
//! unrendered.
//!
//! ## Output format
//! ```text
//! [08-25 14:03:11] watch enabled
//! [08-25 14:03:11] not running, starting: daemon.exe
//! [08-25 14:03:11] process started: daemon.exe
//! [08-25 14:03:13] failed to start daemon.exe: no such file (consecutive failures: 1)
//! [08-25 14:03:21] failure threshold reached: 5 consecutive launch failures
//! [08-25 14:03:30] watch disabled
//! [08-25 14:03:42] shutdown requested
//! [08-25 14:03:42] supervision stopped
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Local};

use crate::events::{Event, EventKind};

use super::Subscribe;

/// Pluggable destination for rendered log lines.
pub type LogSink = Arc<dyn Fn(String) + Send + Sync>;

/// Timestamped activity-log subscriber.
///
/// Formats each event as `[MM-DD HH:MM:SS] <message>` and forwards the
/// line to the configured sink.
pub struct LogWriter {
    sink: LogSink,
}

impl LogWriter {
    /// Creates a writer that prints to stdout.
    pub fn new() -> Self {
        Self::with_sink(Arc::new(|line| println!("{line}")))
    }

    /// Creates a writer with a custom sink (UI log box, test collector, ...).
    pub fn with_sink(sink: LogSink) -> Self {
        Self { sink }
    }

    /// Renders the message body for an event, without the timestamp prefix.
    ///
    /// Every event kind maps to exactly one operator-facing line.
    fn message(ev: &Event) -> String {
        let target = ev.target.as_deref().unwrap_or("?");
        let reason = ev.reason.as_deref().unwrap_or("unknown");
        match ev.kind {
            EventKind::WatchEnabled => "watch enabled".to_string(),
            EventKind::WatchDisabled => "watch disabled".to_string(),
            EventKind::ShutdownRequested => "shutdown requested".to_string(),
            EventKind::SupervisionStopped => "supervision stopped".to_string(),
            EventKind::TargetMissing => format!("not running, starting: {target}"),
            EventKind::TargetLaunched => format!("process started: {target}"),
            EventKind::LaunchFailed => format!(
                "failed to start {target}: {reason} (consecutive failures: {})",
                ev.failures.unwrap_or(0)
            ),
            EventKind::ProbeFailed => format!("liveness check error: {reason}"),
            EventKind::FailureThresholdReached => format!(
                "failure threshold reached: {} consecutive launch failures",
                ev.failures.unwrap_or(0)
            ),
        }
    }

    fn render(ev: &Event) -> String {
        let ts: DateTime<Local> = ev.at.into();
        format!("[{}] {}", ts.format("%m-%d %H:%M:%S"), Self::message(ev))
    }
}

impl Default for LogWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, event: &Event) {
        (self.sink)(Self::render(event));
    }

    fn name(&self) -> &'static str {
        "log_writer"
    }
}
