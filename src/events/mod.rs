//! Runtime events: types and broadcast bus.
//!
//! This module groups the event **data model** and the **bus** used to
//! publish/subscribe to runtime events emitted by the watchdog loop and its
//! control surface.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] — event classification and payload metadata
//! - [`Bus`] — thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: [`Watchdog`](crate::Watchdog) (supervision cycle, loop
//!   exit) and [`WatchdogHandle`](crate::WatchdogHandle) (control
//!   transitions).
//! - **Consumers**: the watchdog's subscriber listener, which fans events
//!   out to every [`Subscribe`](crate::Subscribe) implementation.

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
