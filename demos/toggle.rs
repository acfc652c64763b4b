//! # Control Surface Example
//!
//! Drives the watchdog with fake capabilities to show the three states:
//! Idle costs nothing, `enable()`/`disable()` take effect immediately, and
//! `shutdown()` is terminal.
//!
//! ## Run
//! ```bash
//! cargo run --example toggle
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use procvisor::{Config, LaunchFn, LogWriter, ProbeFn, Subscribe, Target, Watchdog};
use tokio_util::sync::CancellationToken;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Fake target: "alive" after every launch, "dead" once we flip it.
    let alive = Arc::new(AtomicBool::new(false));

    let probe_state = alive.clone();
    let probe = ProbeFn::arc(move |_t: Target, _ctx: CancellationToken| {
        let state = probe_state.clone();
        async move { Ok::<_, procvisor::ProbeError>(state.load(Ordering::SeqCst)) }
    });

    let launch_state = alive.clone();
    let launcher = LaunchFn::arc(move |_t: Target| {
        let state = launch_state.clone();
        async move {
            state.store(true, Ordering::SeqCst);
            Ok::<_, procvisor::LaunchError>(())
        }
    });

    let cfg = Config {
        poll_interval: Duration::from_millis(500),
        ..Config::default()
    };
    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];
    let dog = Arc::new(Watchdog::new(cfg, Target::from("fake-daemon"), probe, launcher, subs));
    let handle = dog.handle();

    let loop_task = tokio::spawn({
        let dog = dog.clone();
        async move { dog.run().await }
    });

    // ============================================================
    // Demo 1: Idle → Active — the first check happens immediately
    // ============================================================
    println!(" ─► enable()");
    handle.enable();
    tokio::time::sleep(Duration::from_secs(1)).await;

    // ============================================================
    // Demo 2: the target "dies"; the next check relaunches it
    // ============================================================
    println!(" ─► killing fake target");
    alive.store(false, Ordering::SeqCst);
    tokio::time::sleep(Duration::from_secs(1)).await;

    // ============================================================
    // Demo 3: Active → Idle — no checks while disabled
    // ============================================================
    println!(" ─► disable()");
    handle.disable();
    tokio::time::sleep(Duration::from_secs(2)).await;

    // ============================================================
    // Demo 4: shutdown is terminal
    // ============================================================
    println!(" ─► shutdown()");
    handle.shutdown();
    loop_task.await??;
    println!(" ─► loop terminated; enabled={}", handle.is_enabled());
    Ok(())
}
