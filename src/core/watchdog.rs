//! # Watchdog: the supervision state machine and background loop.
//!
//! The [`Watchdog`] owns the event bus, the injected capabilities, and the
//! control flags. Its loop cycles through three logical states:
//!
//! ```text
//! States:
//!   Idle        running && !enabled   block on a control change; zero
//!                                     probes, zero timers, zero CPU
//!   Active      running && enabled    probe each iteration; launch when
//!                                     absent; interruptible interval wait
//!   Terminated  !running              loop exits; absorbing
//!
//! Transitions (all via WatchdogHandle, effective immediately):
//!   Idle ──enable()──► Active ──disable()──► Idle
//!     └───────────shutdown()───────────┘
//!                    ▼
//!               Terminated
//! ```
//!
//! ## Loop shape
//! ```text
//! loop {
//!   ├─► read control flags (borrow_and_update = latest write wins)
//!   ├─► !running            → break
//!   ├─► !enabled            → await control change, continue
//!   ├─► run_cycle()         → probe / launch / events (errors swallowed)
//!   └─► select! {
//!         sleep(poll_interval)   → continue
//!         control change         → continue (re-read flags at top)
//!       }
//! }
//! publish SupervisionStopped
//! ```
//!
//! ## Rules
//! - `run()` must be started exactly once; a second call returns
//!   [`RuntimeError::AlreadyRunning`]
//! - only `shutdown()` terminates the loop; target-process failures never do
//! - subscribers are fed from a separate listener task, never from inside
//!   the control path
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use tokio_util::sync::CancellationToken;
//! use procvisor::{
//!     Config, LaunchError, LaunchFn, LogWriter, ProbeError, ProbeFn,
//!     Subscribe, Target, Watchdog,
//! };
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cfg = Config {
//!         poll_interval: Duration::from_millis(50),
//!         ..Config::default()
//!     };
//!
//!     let probe = ProbeFn::arc(|_t: Target, _ctx: CancellationToken| async move {
//!         Ok::<_, ProbeError>(true)
//!     });
//!     let launcher = LaunchFn::arc(|_t: Target| async move { Ok::<_, LaunchError>(()) });
//!     let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];
//!
//!     let dog = Arc::new(Watchdog::new(cfg, Target::from("demo"), probe, launcher, subs));
//!     let handle = dog.handle();
//!
//!     let loop_task = tokio::spawn({
//!         let dog = dog.clone();
//!         async move { dog.run().await }
//!     });
//!
//!     handle.enable();
//!     tokio::time::sleep(Duration::from_millis(120)).await;
//!     handle.shutdown();
//!     loop_task.await??;
//!     Ok(())
//! }
//! ```

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, watch};
use tokio::time;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::core::cycle::run_cycle;
use crate::core::handle::{ControlState, WatchdogHandle};
use crate::core::shutdown;
use crate::error::RuntimeError;
use crate::events::{Bus, Event, EventKind};
use crate::probes::{LauncherRef, ProbeRef};
use crate::subscribers::Subscribe;
use crate::target::Target;

/// Supervises one external executable: probes its liveness on a fixed
/// cadence and relaunches it when absent.
pub struct Watchdog {
    cfg: Config,
    target: Target,
    probe: ProbeRef,
    launcher: LauncherRef,
    bus: Bus,
    subs: Arc<Vec<Arc<dyn Subscribe>>>,
    control: watch::Sender<ControlState>,
    cancel: CancellationToken,
    failures: Arc<AtomicU32>,
    started: AtomicBool,
    listener_rx: Mutex<Option<broadcast::Receiver<Event>>>,
}

impl Watchdog {
    /// Creates a watchdog for `target` with the given capabilities and
    /// subscribers.
    ///
    /// The watchdog starts in Idle: `run()` performs no probes until the
    /// handle's `enable()` is called.
    ///
    /// The subscriber listener's bus receiver is created here, not in
    /// `run()`, so control events published before the loop starts (for
    /// example `handle.enable()` ahead of `run()`) are buffered and
    /// delivered to subscribers once the loop is up.
    pub fn new(
        cfg: Config,
        target: Target,
        probe: ProbeRef,
        launcher: LauncherRef,
        subscribers: Vec<Arc<dyn Subscribe>>,
    ) -> Self {
        let bus = Bus::new(cfg.bus_capacity_clamped());
        let listener_rx = Mutex::new(Some(bus.subscribe()));
        let (control, _rx) = watch::channel(ControlState::initial());
        Self {
            cfg,
            target,
            probe,
            launcher,
            bus,
            subs: Arc::new(subscribers),
            control,
            cancel: CancellationToken::new(),
            failures: Arc::new(AtomicU32::new(0)),
            started: AtomicBool::new(false),
            listener_rx,
        }
    }

    /// Returns a cloneable control handle (enable / disable / shutdown /
    /// status reads).
    pub fn handle(&self) -> WatchdogHandle {
        WatchdogHandle {
            control: self.control.clone(),
            cancel: self.cancel.clone(),
            failures: self.failures.clone(),
            bus: self.bus.clone(),
        }
    }

    /// The event bus; attach extra receivers for ad-hoc observation.
    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    /// The supervised target's identity.
    pub fn target(&self) -> &Target {
        &self.target
    }

    /// Runs the background supervision loop until `shutdown()` is observed.
    ///
    /// Must be started exactly once, concurrently with the driver; a second
    /// call returns [`RuntimeError::AlreadyRunning`]. Publishes
    /// [`EventKind::SupervisionStopped`] on exit.
    pub async fn run(&self) -> Result<(), RuntimeError> {
        if self.started.swap(true, Ordering::SeqCst) {
            return Err(RuntimeError::AlreadyRunning);
        }
        self.subscriber_listener();

        let mut rx = self.control.subscribe();
        loop {
            let ctl = *rx.borrow_and_update();
            if !ctl.running {
                break;
            }
            if !ctl.enabled {
                // Idle: suspend until enable()/shutdown() wakes us.
                if rx.changed().await.is_err() {
                    break;
                }
                continue;
            }

            run_cycle(
                &self.target,
                self.probe.as_ref(),
                self.launcher.as_ref(),
                &self.bus,
                &self.failures,
                self.cfg.threshold(),
                &self.cancel,
            )
            .await;

            // Interruptible wait: a control operation preempts the interval.
            tokio::select! {
                _ = time::sleep(self.cfg.poll_interval) => {}
                res = rx.changed() => {
                    if res.is_err() {
                        break;
                    }
                }
            }
        }

        self.bus.publish(Event::now(EventKind::SupervisionStopped));
        Ok(())
    }

    /// Runs the loop and translates OS termination signals
    /// (SIGINT/SIGTERM/SIGQUIT, or Ctrl-C on Windows) into `shutdown()`.
    ///
    /// The loop is always drained before returning, even when signal
    /// registration fails.
    pub async fn run_until_signal(&self) -> Result<(), RuntimeError> {
        let handle = self.handle();
        let run = self.run();
        tokio::pin!(run);

        let signal = tokio::select! {
            res = &mut run => return res,
            res = shutdown::wait_for_shutdown_signal() => res,
        };
        handle.shutdown();
        run.await?;
        signal?;
        Ok(())
    }

    /// Forwards bus events to the subscriber set.
    ///
    /// Runs as its own task so a slow subscriber blocks neither the loop
    /// nor the control operations. The receiver was opened in `new()`, so
    /// events published before `run()` drain first. A lagging listener
    /// skips the oldest events and keeps going.
    fn subscriber_listener(&self) {
        let mut rx = self
            .listener_rx
            .lock()
            .ok()
            .and_then(|mut slot| slot.take())
            .unwrap_or_else(|| self.bus.subscribe());
        let subs = Arc::clone(&self.subs);
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(ev) => {
                        for sub in subs.iter() {
                            sub.on_event(&ev).await;
                        }
                    }
                    Err(RecvError::Lagged(_)) => continue,
                    Err(RecvError::Closed) => break,
                }
            }
        });
    }
}
