//! # procvisor
//!
//! **Procvisor** is a single-process watchdog library for Rust.
//!
//! It supervises one external executable: a background loop periodically
//! checks whether the target is running, launches it when absent, and
//! tracks consecutive launch failures. The loop can be paused and resumed
//! on demand, and it follows a wait/notify discipline — "stopped" mode
//! costs no CPU, and control transitions take effect immediately rather
//! than after a poll interval.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!            ┌──────────────────────┐
//!            │  Driver (UI / CLI)   │
//!            │  enable / disable /  │
//!            │  shutdown / status   │
//!            └─────────┬────────────┘
//!                      ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │  Watchdog (supervision loop)                            │
//! │  - control flags in a watch channel (atomic wake)       │
//! │  - Probe (injected liveness capability)                 │
//! │  - Launcher (injected launch capability)                │
//! │  - consecutive-failure counter + threshold milestone    │
//! │  - Bus (broadcast events)                               │
//! └─────────┬───────────────────────────────┬───────────────┘
//!           │ probe / launch                │ publishes Events:
//!           ▼                               │ - WatchEnabled/Disabled
//!   ┌───────────────────┐                   │ - TargetMissing
//!   │  Target process   │                   │ - TargetLaunched
//!   │  (spawn & forget) │                   │ - LaunchFailed
//!   └───────────────────┘                   │ - FailureThresholdReached
//!                                           │ - ...
//!                                           ▼
//!                              ┌────────────────────────┐
//!                              │  subscriber listener   │
//!                              └───┬─────────┬──────────┘
//!                                  ▼         ▼         ▼
//!                              LogWriter TraceWriter StatusTracker
//! ```
//!
//! ### Lifecycle
//! ```text
//! Watchdog::run()
//!
//! loop {
//!   ├─► read flags (latest control write wins)
//!   ├─► Terminated (!running)  → exit, publish SupervisionStopped
//!   ├─► Idle (!enabled)        → block on control change (zero probes)
//!   └─► Active:
//!        ├─► probe.is_alive()
//!        │     ├─ Ok(true)     → nothing to do
//!        │     ├─ Ok(false)    → TargetMissing → launcher.launch()
//!        │     │                   ├─ Ok  → TargetLaunched, failures = 0
//!        │     │                   └─ Err → failures += 1, LaunchFailed
//!        │     │                            └─ at threshold: milestone,
//!        │     │                               failures = 0, keep going
//!        │     └─ Err          → ProbeFailed, treated as "not alive"
//!        └─► wait poll_interval (interruptible by any control op)
//! }
//! ```
//!
//! ## Features
//! | Area             | Description                                              | Key types / traits                    |
//! |------------------|----------------------------------------------------------|---------------------------------------|
//! | **Control**      | Pause/resume/terminate supervision, read status.         | [`WatchdogHandle`]                    |
//! | **Capabilities** | Inject how liveness is checked and how launches happen.  | [`Probe`], [`Launcher`]               |
//! | **OS defaults**  | Process-listing probe and fire-and-forget spawner.       | [`ProcessListProbe`], [`SpawnLauncher`] |
//! | **Subscribers**  | Hook into runtime events (logs, tracing, status).        | [`Subscribe`], [`LogWriter`]          |
//! | **Errors**       | Typed, recoverable capability errors.                    | [`ProbeError`], [`LaunchError`]       |
//! | **Configuration**| Poll interval, failure threshold, bus capacity.          | [`Config`]                            |
//!
//! ## Example
//! ```rust,no_run
//! use std::sync::Arc;
//! use procvisor::{
//!     Config, LogWriter, ProcessListProbe, SpawnLauncher, Subscribe, Target, Watchdog,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];
//!     let dog = Arc::new(Watchdog::new(
//!         Config::default(),
//!         Target::new("/opt/app/daemon"),
//!         Arc::new(ProcessListProbe::new()),
//!         Arc::new(SpawnLauncher::new()),
//!         subs,
//!     ));
//!
//!     dog.handle().enable();
//!     dog.run_until_signal().await?;
//!     Ok(())
//! }
//! ```

mod config;
mod core;
mod error;
mod events;
mod probes;
mod subscribers;
mod target;

// ---- Public re-exports ----

pub use config::Config;
pub use core::{Watchdog, WatchdogHandle};
pub use error::{LaunchError, ProbeError, RuntimeError};
pub use events::{Bus, Event, EventKind};
pub use probes::system::{ProcessListProbe, SpawnLauncher};
pub use probes::{LaunchFn, Launcher, LauncherRef, Probe, ProbeFn, ProbeRef};
pub use subscribers::{LogSink, LogWriter, StatusTracker, Subscribe, TraceWriter};
pub use target::Target;
