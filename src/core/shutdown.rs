//! # OS termination signals as a shutdown trigger.
//!
//! [`Watchdog::run_until_signal`](crate::Watchdog::run_until_signal)
//! awaits [`wait_for_shutdown_signal`] alongside the supervision loop and
//! calls `shutdown()` when it completes, so an operator's Ctrl-C or a
//! service manager's `SIGTERM` terminates the watchdog the same way the
//! handle does.
//!
//! On Unix the trigger is any of `SIGINT` (covers Ctrl-C), `SIGTERM`
//! (systemd/Kubernetes kill), or `SIGQUIT`; elsewhere it is
//! [`tokio::signal::ctrl_c`].

/// Completes when the process receives a termination signal.
///
/// Each call registers its own listeners; registration failure surfaces
/// as [`RuntimeError::Signal`](crate::RuntimeError) in the caller.
#[cfg(unix)]
pub(crate) async fn wait_for_shutdown_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigquit = signal(SignalKind::quit())?;

    tokio::select! {
        _ = sigint.recv() => {},
        _ = sigterm.recv() => {},
        _ = sigquit.recv() => {},
    }
    Ok(())
}

/// Completes when the process receives Ctrl-C.
///
/// Registration failure surfaces as
/// [`RuntimeError::Signal`](crate::RuntimeError) in the caller.
#[cfg(not(unix))]
pub(crate) async fn wait_for_shutdown_signal() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}
