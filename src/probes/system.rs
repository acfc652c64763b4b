//! # OS-backed capability implementations.
//!
//! Default implementations of the two capabilities for real targets:
//! - [`ProcessListProbe`] — determines liveness by running the platform
//!   process listing (`tasklist` on Windows, `ps -A -o comm=` elsewhere)
//!   and matching the target's executable name against it;
//! - [`SpawnLauncher`] — spawns the target executable and immediately drops
//!   the child handle (no kill-on-drop, no wait-for-exit).
//!
//! Both shell out via [`tokio::process::Command`], so neither blocks the
//! runtime. The probe abandons its query when the cancellation token fires,
//! keeping shutdown latency independent of a slow platform call.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;

use crate::error::{LaunchError, ProbeError};
use crate::target::Target;

use super::{Launcher, Probe};

/// Liveness probe backed by the platform process listing.
///
/// Matches the target's executable name as a substring of each listing
/// line, mirroring the lenient matching operators expect from
/// `tasklist`-style checks. A listing that exits non-zero is a
/// [`ProbeError::Failed`] and is treated as "not alive" by the loop.
#[derive(Debug, Default)]
pub struct ProcessListProbe;

impl ProcessListProbe {
    /// Creates a new process-list probe.
    pub fn new() -> Self {
        Self
    }

    #[cfg(windows)]
    fn listing_command() -> Command {
        Command::new("tasklist")
    }

    #[cfg(not(windows))]
    fn listing_command() -> Command {
        let mut cmd = Command::new("ps");
        cmd.args(["-A", "-o", "comm="]);
        cmd
    }
}

#[async_trait]
impl Probe for ProcessListProbe {
    async fn is_alive(&self, target: &Target, ctx: CancellationToken) -> Result<bool, ProbeError> {
        let child = Self::listing_command()
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()?;

        let output = tokio::select! {
            out = child.wait_with_output() => out?,
            _ = ctx.cancelled() => return Err(ProbeError::Canceled),
        };

        if !output.status.success() {
            return Err(ProbeError::Failed {
                error: format!("process listing exited with {}", output.status),
            });
        }

        let listing = String::from_utf8_lossy(&output.stdout);
        let name = target.name();
        Ok(!name.is_empty() && listing.lines().any(|line| line.contains(name)))
    }
}

/// Fire-and-forget launcher for the target executable.
///
/// The spawned child is detached immediately: the watchdog holds no handle
/// and never waits for exit, so the target outlives `disable()` and even
/// the watchdog itself.
#[derive(Debug, Default)]
pub struct SpawnLauncher;

impl SpawnLauncher {
    /// Creates a new spawn launcher.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Launcher for SpawnLauncher {
    async fn launch(&self, target: &Target) -> Result<(), LaunchError> {
        let child = Command::new(target.path())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        // Spawn-and-forget: the runtime reaps the orphan when it exits.
        drop(child);
        Ok(())
    }
}
