//! # Core subscriber trait.
//!
//! [`Subscribe`] is the extension point for plugging custom event handlers
//! into the runtime: logging, metrics, UI status indicators, alerting.
//! Subscribers are driven by the watchdog's listener task, fed from the
//! broadcast bus — never from inside the control operations' critical
//! section.
//!
//! ## Contract
//! - Implementations may be slow (I/O, batching) — they do **not** block
//!   the supervision loop or the control surface.
//! - Handlers receive events in publish order; a subscriber that lags
//!   behind the bus capacity skips the oldest events.

use async_trait::async_trait;

use crate::events::Event;

/// Contract for event subscribers.
///
/// Called from the watchdog's listener task. Implementations should avoid
/// blocking the async runtime (prefer async I/O and cooperative waits).
#[async_trait]
pub trait Subscribe: Send + Sync + 'static {
    /// Handles a single event.
    async fn on_event(&self, event: &Event);

    /// Human-readable name (for logs/metrics).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
