//! # Injected capabilities: liveness checks and launches.
//!
//! The watchdog core does not inspect or spawn OS processes itself; it
//! consumes two capabilities through traits:
//! - [`Probe`] — answers whether the target is currently running
//! - [`Launcher`] — starts a new instance of the target (fire-and-forget)
//!
//! Function-backed implementations ([`ProbeFn`], [`LaunchFn`]) make it easy
//! to plug in closures — or deterministic fakes in tests. The [`system`]
//! module provides real OS-backed implementations.

mod launcher;
mod probe;
pub mod system;

pub use launcher::{LaunchFn, Launcher, LauncherRef};
pub use probe::{Probe, ProbeFn, ProbeRef};
