//! Runtime core: the supervision loop and its control surface.
//!
//! The public API from this module is [`Watchdog`] (owns the loop) and
//! [`WatchdogHandle`] (thread-safe control operations).
//!
//! Internal modules:
//! - [`watchdog`]: the state machine (Idle / Active / Terminated) and the
//!   background loop;
//! - [`handle`]: control surface — enable / disable / shutdown / status;
//! - [`cycle`]: one probe-and-maybe-launch pass with event publishing;
//! - [`shutdown`]: cross-platform OS signal handling.

mod cycle;
mod handle;
mod shutdown;
mod watchdog;

pub use handle::WatchdogHandle;
pub use watchdog::Watchdog;
