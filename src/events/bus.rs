//! # Event bus carrying the watchdog's observations.
//!
//! [`Bus`] fans supervision events out over [`tokio::sync::broadcast`]:
//! the loop publishes probe and launch outcomes, the control handle
//! publishes transitions (`WatchEnabled`, `ShutdownRequested`, ...), and
//! the watchdog's subscriber listener delivers everything to the
//! registered [`Subscribe`](crate::Subscribe) impls.
//!
//! ## Architecture
//! ```text
//! Publishers:                       Receivers:
//!   supervision loop ──┐              subscriber listener (opened at
//!                      ├────► Bus ──► Watchdog construction) ──► Subscribe
//!   WatchdogHandle   ──┘              ad-hoc observers via subscribe()
//! ```
//!
//! ## Rules
//! - **Control ops never wait on observers**: `publish()` is non-blocking,
//!   so `enable()`/`disable()`/`shutdown()` return immediately no matter
//!   how slow a log sink is.
//! - **Bounded**: [`Config::bus_capacity`](crate::Config) sizes one ring
//!   buffer shared by all receivers; a lagged receiver skips the oldest
//!   events and keeps going.
//! - **Ephemeral**: with no receiver at all, a published event is gone.
//!   The watchdog itself always holds one from construction, so events
//!   published ahead of `run()` are retained for the listener.

use tokio::sync::broadcast;

use super::event::Event;

/// Broadcast channel for supervision events.
///
/// Cheap to clone (the sender is `Arc`-backed); every receiver sees its
/// own clone of each event, in publish order.
///
/// ## Example
/// ```rust
/// use procvisor::{Bus, Event, EventKind};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let bus = Bus::new(16);
/// let mut rx = bus.subscribe();
///
/// bus.publish(Event::now(EventKind::TargetLaunched).with_target("daemon.exe"));
///
/// let ev = rx.recv().await.unwrap();
/// assert_eq!(ev.kind, EventKind::TargetLaunched);
/// assert_eq!(ev.target.as_deref(), Some("daemon.exe"));
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Bus {
    tx: broadcast::Sender<Event>,
}

impl Bus {
    /// Creates a bus whose ring buffer holds `capacity` events (minimum 1).
    ///
    /// Capacity is shared across all receivers, not per-subscriber.
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel::<Event>(capacity.max(1));
        Self { tx }
    }

    /// Publishes an event to every current receiver; never blocks.
    ///
    /// With no receivers the event is dropped.
    pub fn publish(&self, ev: Event) {
        let _ = self.tx.send(ev);
    }

    /// Opens an independent receiver observing events published from this
    /// point on.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }
}
