//! # Event subscribers for the watchdog runtime.
//!
//! This module provides the [`Subscribe`] trait and built-in
//! implementations for handling runtime events broadcast through the
//! [`Bus`](crate::events::Bus).
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   Watchdog ── publish(Event) ──► Bus ──► subscriber listener
//!                                              │
//!                                    ┌─────────┼──────────┐
//!                                    ▼         ▼          ▼
//!                                LogWriter TraceWriter StatusTracker
//! ```
//!
//! ## Subscriber types
//! - **Passive subscribers** — observe and render events
//!   ([`LogWriter`], [`TraceWriter`])
//! - **Stateful subscribers** — maintain state based on events for status
//!   indicators ([`StatusTracker`])
//!
//! Subscribers run outside the watchdog's control path: a slow log sink
//! never blocks `enable`/`disable`/`shutdown` or the loop itself.

mod log;
mod status;
mod subscribe;
mod trace;

pub use log::{LogSink, LogWriter};
pub use status::StatusTracker;
pub use subscribe::Subscribe;
pub use trace::TraceWriter;
