//! Error types used by the watchdog runtime and its injected capabilities.
//!
//! This module defines three error enums:
//!
//! - [`ProbeError`] — errors raised by the liveness-check capability.
//! - [`LaunchError`] — errors raised by the launch capability.
//! - [`RuntimeError`] — errors raised by the watchdog runtime itself.
//!
//! Capability errors are never fatal: the supervision loop recovers from
//! every [`ProbeError`] and [`LaunchError`] locally, converting them to
//! events on the bus. Only [`RuntimeError`] reaches the driver.
//!
//! All types provide `as_label()` for stable snake_case labels in
//! logs/metrics.

use thiserror::Error;

/// # Errors produced by a liveness check.
///
/// A failing probe is folded to "not alive" by the supervision loop
/// (fail-open toward attempting a restart); it never reaches the driver.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ProbeError {
    /// The platform query could not be executed (spawn/read failure).
    #[error("liveness check I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The probe ran but could not produce an answer.
    #[error("liveness check failed: {error}")]
    Failed {
        /// The underlying error message.
        error: String,
    },

    /// The probe was abandoned because shutdown was requested.
    #[error("liveness check canceled")]
    Canceled,
}

impl ProbeError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use procvisor::ProbeError;
    ///
    /// let err = ProbeError::Failed { error: "garbled listing".into() };
    /// assert_eq!(err.as_label(), "probe_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ProbeError::Io { .. } => "probe_io",
            ProbeError::Failed { .. } => "probe_failed",
            ProbeError::Canceled => "probe_canceled",
        }
    }
}

/// # Errors produced by a launch attempt.
///
/// Each failure increments the watchdog's consecutive-failure counter;
/// it never terminates the supervision loop.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum LaunchError {
    /// The target executable could not be spawned.
    #[error("failed to spawn target: {source}")]
    Spawn {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The launch capability reported a failure.
    #[error("launch failed: {error}")]
    Failed {
        /// The underlying error message.
        error: String,
    },
}

impl LaunchError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use procvisor::LaunchError;
    ///
    /// let err = LaunchError::Failed { error: "missing binary".into() };
    /// assert_eq!(err.as_label(), "launch_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            LaunchError::Spawn { .. } => "launch_spawn",
            LaunchError::Failed { .. } => "launch_failed",
        }
    }
}

/// # Errors produced by the watchdog runtime.
///
/// These represent driver mistakes or platform failures, not target-process
/// failures: a crashing target never surfaces here.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// `run()` was called more than once on the same watchdog.
    #[error("watchdog loop already running")]
    AlreadyRunning,

    /// OS signal listeners could not be registered.
    #[error("signal registration failed: {source}")]
    Signal {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::AlreadyRunning => "runtime_already_running",
            RuntimeError::Signal { .. } => "runtime_signal",
        }
    }
}
