//! # Launch capability.
//!
//! This module defines the [`Launcher`] trait and a function-backed
//! implementation [`LaunchFn`]. The common handle type is [`LauncherRef`],
//! an `Arc<dyn Launcher>`.
//!
//! A launch is fire-and-forget: the capability starts a new instance of the
//! target and returns; the watchdog retains no handle to the child and
//! never waits for its exit. Failures feed the watchdog's
//! consecutive-failure counter and are never fatal to the loop.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::LaunchError;
use crate::target::Target;

/// Shared handle to a launcher.
pub type LauncherRef = Arc<dyn Launcher>;

/// # Launch capability.
///
/// Starts a new instance of the target process. The loop allows an
/// in-flight launch to complete even during shutdown; termination is
/// observed at the top of the next iteration.
#[async_trait]
pub trait Launcher: Send + Sync + 'static {
    /// Attempts to start the target. Fire-and-forget: success means the
    /// process was spawned, not that it stays up.
    async fn launch(&self, target: &Target) -> Result<(), LaunchError>;
}

/// Function-backed launcher implementation.
///
/// Wraps a closure that creates a new future per launch attempt.
#[derive(Debug)]
pub struct LaunchFn<F> {
    f: F,
}

impl<F> LaunchFn<F> {
    /// Creates a new function-backed launcher.
    ///
    /// Prefer [`LaunchFn::arc`] when you immediately need a [`LauncherRef`].
    pub fn new(f: F) -> Self {
        Self { f }
    }

    /// Creates the launcher and returns it as a shared handle.
    ///
    /// ## Example
    /// ```rust
    /// use procvisor::{LaunchFn, LauncherRef, LaunchError, Target};
    ///
    /// let l: LauncherRef = LaunchFn::arc(|_t: Target| async move {
    ///     Ok::<_, LaunchError>(())
    /// });
    /// ```
    pub fn arc(f: F) -> Arc<Self> {
        Arc::new(Self::new(f))
    }
}

#[async_trait]
impl<F, Fut> Launcher for LaunchFn<F>
where
    F: Fn(Target) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), LaunchError>> + Send + 'static,
{
    async fn launch(&self, target: &Target) -> Result<(), LaunchError> {
        (self.f)(target.clone()).await
    }
}
