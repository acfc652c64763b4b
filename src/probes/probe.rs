//! # Liveness-check capability.
//!
//! This module defines the [`Probe`] trait (async, cancelable) and a
//! function-backed implementation [`ProbeFn`]. The common handle type is
//! [`ProbeRef`], an `Arc<dyn Probe>` suitable for sharing across the
//! runtime.
//!
//! The core is agnostic to *how* liveness is determined — process
//! enumeration, a PID handle, a heartbeat file — it only consumes the
//! boolean result. A probe receives a [`CancellationToken`] and should
//! abandon its query with [`ProbeError::Canceled`] when the token fires.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::ProbeError;
use crate::target::Target;

/// Shared handle to a probe.
pub type ProbeRef = Arc<dyn Probe>;

/// # Liveness-check capability.
///
/// Answers whether the target process is currently running. Errors are
/// recovered by the supervision loop: anything other than
/// [`ProbeError::Canceled`] is logged and folded to "not alive"
/// (fail-open toward attempting a restart).
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use tokio_util::sync::CancellationToken;
/// use procvisor::{Probe, ProbeError, Target};
///
/// struct AlwaysAlive;
///
/// #[async_trait]
/// impl Probe for AlwaysAlive {
///     async fn is_alive(
///         &self,
///         _target: &Target,
///         _ctx: CancellationToken,
///     ) -> Result<bool, ProbeError> {
///         Ok(true)
///     }
/// }
/// ```
#[async_trait]
pub trait Probe: Send + Sync + 'static {
    /// Returns whether the target is currently running.
    ///
    /// Implementations should watch `ctx` and return
    /// [`ProbeError::Canceled`] promptly when shutdown is requested.
    async fn is_alive(&self, target: &Target, ctx: CancellationToken) -> Result<bool, ProbeError>;
}

/// Function-backed probe implementation.
///
/// Wraps a closure that *creates* a new future per check, so there is no
/// shared mutable state between invocations; share state explicitly with
/// `Arc<...>` inside the closure if needed.
#[derive(Debug)]
pub struct ProbeFn<F> {
    f: F,
}

impl<F> ProbeFn<F> {
    /// Creates a new function-backed probe.
    ///
    /// Prefer [`ProbeFn::arc`] when you immediately need a [`ProbeRef`].
    pub fn new(f: F) -> Self {
        Self { f }
    }

    /// Creates the probe and returns it as a shared handle.
    ///
    /// ## Example
    /// ```rust
    /// use tokio_util::sync::CancellationToken;
    /// use procvisor::{ProbeFn, ProbeRef, ProbeError, Target};
    ///
    /// let p: ProbeRef = ProbeFn::arc(|_t: Target, _ctx: CancellationToken| async move {
    ///     Ok::<_, ProbeError>(false)
    /// });
    /// ```
    pub fn arc(f: F) -> Arc<Self> {
        Arc::new(Self::new(f))
    }
}

#[async_trait]
impl<F, Fut> Probe for ProbeFn<F>
where
    F: Fn(Target, CancellationToken) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<bool, ProbeError>> + Send + 'static,
{
    async fn is_alive(&self, target: &Target, ctx: CancellationToken) -> Result<bool, ProbeError> {
        (self.f)(target.clone(), ctx).await
    }
}
