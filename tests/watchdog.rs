//! Behavioral tests for the supervision loop: control transitions, failure
//! counting, fail-open probing, and the idle/active cadence.
//!
//! All tests run under a paused tokio clock: `advance()` steps the poll
//! interval deterministically, and `settle()` lets the loop, the bus, and
//! the subscriber listener drain between steps.

use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::{advance, timeout};
use tokio_util::sync::CancellationToken;

use procvisor::{
    Config, LaunchError, LaunchFn, LauncherRef, LogWriter, ProbeError, ProbeFn, ProbeRef,
    StatusTracker, Subscribe, Target, Watchdog,
};

const POLL: Duration = Duration::from_secs(2);

fn test_config() -> Config {
    Config {
        poll_interval: POLL,
        failure_threshold: 5,
        bus_capacity: 256,
    }
}

/// Lets every spawned task (loop, listener, subscribers) run to its next
/// suspension point without advancing the clock.
async fn settle() {
    for _ in 0..32 {
        tokio::task::yield_now().await;
    }
}

/// A probe that returns a fixed answer and counts invocations.
fn counting_probe(alive: bool) -> (ProbeRef, Arc<AtomicU32>) {
    let calls = Arc::new(AtomicU32::new(0));
    let seen = calls.clone();
    let probe = ProbeFn::arc(move |_t: Target, _ctx: CancellationToken| {
        let seen = seen.clone();
        async move {
            seen.fetch_add(1, Ordering::SeqCst);
            Ok::<_, ProbeError>(alive)
        }
    });
    (probe, calls)
}

/// A probe that replays a scripted sequence of answers, then stays alive.
fn scripted_probe(script: Vec<bool>) -> ProbeRef {
    let script = Arc::new(script);
    let idx = Arc::new(AtomicUsize::new(0));
    ProbeFn::arc(move |_t: Target, _ctx: CancellationToken| {
        let script = script.clone();
        let idx = idx.clone();
        async move {
            let i = idx.fetch_add(1, Ordering::SeqCst);
            Ok::<_, ProbeError>(*script.get(i).unwrap_or(&true))
        }
    })
}

/// A launcher that always succeeds and counts invocations.
fn counting_launcher() -> (LauncherRef, Arc<AtomicU32>) {
    let calls = Arc::new(AtomicU32::new(0));
    let seen = calls.clone();
    let launcher = LaunchFn::arc(move |_t: Target| {
        let seen = seen.clone();
        async move {
            seen.fetch_add(1, Ordering::SeqCst);
            Ok::<_, LaunchError>(())
        }
    });
    (launcher, calls)
}

/// A launcher that always fails.
fn failing_launcher() -> LauncherRef {
    LaunchFn::arc(|_t: Target| async move {
        Err::<(), _>(LaunchError::Failed {
            error: "boom".into(),
        })
    })
}

/// A `LogWriter` whose sink collects rendered lines, plus accessors that
/// strip the `[MM-DD HH:MM:SS] ` prefix.
fn log_collector() -> (Arc<dyn Subscribe>, Arc<Mutex<Vec<String>>>) {
    let lines = Arc::new(Mutex::new(Vec::new()));
    let sink = lines.clone();
    let writer = LogWriter::with_sink(Arc::new(move |line| {
        sink.lock().unwrap().push(line);
    }));
    (Arc::new(writer), lines)
}

fn messages(lines: &Arc<Mutex<Vec<String>>>) -> Vec<String> {
    lines
        .lock()
        .unwrap()
        .iter()
        .map(|l| l[17..].to_string())
        .collect()
}

struct Fixture {
    dog: Arc<Watchdog>,
    task: tokio::task::JoinHandle<Result<(), procvisor::RuntimeError>>,
}

impl Fixture {
    /// Builds the watchdog and spawns its loop (already settled, still Idle).
    async fn spawn(
        probe: ProbeRef,
        launcher: LauncherRef,
        subs: Vec<Arc<dyn Subscribe>>,
    ) -> Fixture {
        let dog = Arc::new(Watchdog::new(
            test_config(),
            Target::from("foo"),
            probe,
            launcher,
            subs,
        ));
        let task = tokio::spawn({
            let dog = dog.clone();
            async move { dog.run().await }
        });
        settle().await;
        Fixture { dog, task }
    }

    async fn finish(self) {
        self.dog.handle().shutdown();
        settle().await;
        timeout(Duration::from_secs(5), self.task)
            .await
            .expect("loop did not terminate after shutdown")
            .unwrap()
            .unwrap();
    }
}

#[tokio::test(start_paused = true)]
async fn test_idle_performs_no_probes() {
    let (probe, probes) = counting_probe(true);
    let (launcher, _) = counting_launcher();
    let fx = Fixture::spawn(probe, launcher, Vec::new()).await;

    // Ten poll intervals in Idle: zero liveness checks.
    advance(POLL * 10).await;
    settle().await;
    assert_eq!(probes.load(Ordering::SeqCst), 0);

    fx.finish().await;
}

#[tokio::test(start_paused = true)]
async fn test_enable_probes_immediately_then_on_cadence() {
    let (probe, probes) = counting_probe(true);
    let (launcher, launches) = counting_launcher();
    let fx = Fixture::spawn(probe, launcher, Vec::new()).await;
    let handle = fx.dog.handle();

    // enable() takes effect without waiting for a poll interval.
    handle.enable();
    settle().await;
    assert_eq!(probes.load(Ordering::SeqCst), 1);

    // One more check per interval.
    advance(POLL).await;
    settle().await;
    assert_eq!(probes.load(Ordering::SeqCst), 2);

    advance(POLL).await;
    settle().await;
    assert_eq!(probes.load(Ordering::SeqCst), 3);

    // Target alive the whole time: no launches.
    assert_eq!(launches.load(Ordering::SeqCst), 0);

    fx.finish().await;
}

#[tokio::test(start_paused = true)]
async fn test_enable_before_run_is_not_lost() {
    let (probe, probes) = counting_probe(true);
    let (launcher, _) = counting_launcher();
    let (log, lines) = log_collector();
    let status = Arc::new(StatusTracker::new());
    let dog = Arc::new(Watchdog::new(
        test_config(),
        Target::from("foo"),
        probe,
        launcher,
        vec![log, status.clone()],
    ));
    let handle = dog.handle();

    // Control before the loop starts: the transition event is buffered,
    // not dropped.
    handle.enable();

    let task = tokio::spawn({
        let dog = dog.clone();
        async move { dog.run().await }
    });
    settle().await;

    assert_eq!(probes.load(Ordering::SeqCst), 1);
    assert!(status.is_watching());
    let msgs = messages(&lines);
    assert_eq!(
        msgs.iter().filter(|m| *m == "watch enabled").count(),
        1,
        "pre-run enable must still reach subscribers: {msgs:?}"
    );

    handle.shutdown();
    settle().await;
    timeout(Duration::from_secs(5), task)
        .await
        .expect("loop did not terminate after shutdown")
        .unwrap()
        .unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_disable_takes_effect_before_next_interval() {
    let (probe, probes) = counting_probe(true);
    let (launcher, _) = counting_launcher();
    let fx = Fixture::spawn(probe, launcher, Vec::new()).await;
    let handle = fx.dog.handle();

    handle.enable();
    settle().await;
    assert_eq!(probes.load(Ordering::SeqCst), 1);

    // Disable mid-interval: the loop parks without another check.
    handle.disable();
    settle().await;
    advance(POLL * 10).await;
    settle().await;
    assert_eq!(probes.load(Ordering::SeqCst), 1);

    // Re-enable: immediate check again (latest call wins).
    handle.enable();
    settle().await;
    assert_eq!(probes.load(Ordering::SeqCst), 2);

    fx.finish().await;
}

#[tokio::test(start_paused = true)]
async fn test_enable_and_disable_are_idempotent() {
    let (probe, probes) = counting_probe(true);
    let (launcher, _) = counting_launcher();
    let (log, lines) = log_collector();
    let fx = Fixture::spawn(probe, launcher, vec![log]).await;
    let handle = fx.dog.handle();

    handle.enable();
    handle.enable();
    settle().await;
    assert_eq!(probes.load(Ordering::SeqCst), 1);

    handle.disable();
    handle.disable();
    settle().await;

    let msgs = messages(&lines);
    assert_eq!(
        msgs.iter().filter(|m| *m == "watch enabled").count(),
        1,
        "second enable() must not repeat the transition: {msgs:?}"
    );
    assert_eq!(msgs.iter().filter(|m| *m == "watch disabled").count(), 1);

    fx.finish().await;
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_terminates_and_is_absorbing() {
    let (probe, probes) = counting_probe(true);
    let (launcher, _) = counting_launcher();
    let (log, lines) = log_collector();
    let fx = Fixture::spawn(probe, launcher, vec![log]).await;
    let handle = fx.dog.handle();

    handle.enable();
    settle().await;

    handle.shutdown();
    settle().await;
    timeout(Duration::from_secs(5), fx.task)
        .await
        .expect("loop did not terminate after shutdown")
        .unwrap()
        .unwrap();

    // Terminated is absorbing: later control calls change nothing.
    let before = probes.load(Ordering::SeqCst);
    handle.enable();
    assert!(!handle.is_enabled());
    advance(POLL * 5).await;
    settle().await;
    assert_eq!(probes.load(Ordering::SeqCst), before);

    let msgs = messages(&lines);
    assert!(msgs.contains(&"shutdown requested".to_string()));
    assert!(msgs.contains(&"supervision stopped".to_string()));
}

#[tokio::test(start_paused = true)]
async fn test_failure_counting_around_threshold() {
    let (probe, _) = counting_probe(false);
    let (log, lines) = log_collector();
    let fx = Fixture::spawn(probe, failing_launcher(), vec![log]).await;
    let handle = fx.dog.handle();

    handle.enable();
    settle().await;
    assert_eq!(handle.consecutive_failures(), 1);

    for expected in 2..=4u32 {
        advance(POLL).await;
        settle().await;
        assert_eq!(handle.consecutive_failures(), expected);
    }

    // Fifth consecutive failure: milestone fires once, counter resets.
    advance(POLL).await;
    settle().await;
    assert_eq!(handle.consecutive_failures(), 0);

    let msgs = messages(&lines);
    assert_eq!(
        msgs.iter()
            .filter(|m| m.starts_with("failure threshold reached"))
            .count(),
        1
    );
    assert_eq!(
        msgs.iter()
            .filter(|m| m.starts_with("failed to start foo"))
            .count(),
        5
    );

    // Sixth failure starts a fresh run.
    advance(POLL).await;
    settle().await;
    assert_eq!(handle.consecutive_failures(), 1);

    fx.finish().await;
}

#[tokio::test(start_paused = true)]
async fn test_probe_error_is_fail_open() {
    let probe = ProbeFn::arc(|_t: Target, _ctx: CancellationToken| async move {
        Err::<bool, _>(ProbeError::Failed {
            error: "listing unavailable".into(),
        })
    });
    let (launcher, launches) = counting_launcher();
    let (log, lines) = log_collector();
    let fx = Fixture::spawn(probe, launcher, vec![log]).await;
    let handle = fx.dog.handle();

    handle.enable();
    settle().await;

    // The error is logged and a launch is still attempted that iteration.
    assert_eq!(launches.load(Ordering::SeqCst), 1);
    let msgs = messages(&lines);
    let idx_err = msgs
        .iter()
        .position(|m| m.starts_with("liveness check error"))
        .expect("probe error not logged");
    let idx_missing = msgs
        .iter()
        .position(|m| m == "not running, starting: foo")
        .unwrap();
    assert!(idx_err < idx_missing);

    fx.finish().await;
}

#[tokio::test(start_paused = true)]
async fn test_launch_exactly_on_each_not_alive_observation() {
    let probe = scripted_probe(vec![false, false, true, false]);
    let (launcher, launches) = counting_launcher();
    let (log, lines) = log_collector();
    let status = Arc::new(StatusTracker::new());
    let fx = Fixture::spawn(probe, launcher, vec![log, status.clone()]).await;
    let handle = fx.dog.handle();

    handle.enable();
    settle().await;
    for _ in 0..3 {
        advance(POLL).await;
        settle().await;
    }

    // A launch and its success log occur exactly on each "not alive"
    // observation, never on "alive".
    let supervision: Vec<String> = messages(&lines)
        .into_iter()
        .filter(|m| m.starts_with("not running") || m.starts_with("process started"))
        .collect();
    assert_eq!(
        supervision,
        vec![
            "not running, starting: foo",
            "process started: foo",
            "not running, starting: foo",
            "process started: foo",
            "not running, starting: foo",
            "process started: foo",
        ]
    );
    assert_eq!(launches.load(Ordering::SeqCst), 3);
    assert_eq!(handle.consecutive_failures(), 0);
    assert_eq!(status.launches(), 3);
    assert!(status.is_watching());

    fx.finish().await;
    assert!(!status.is_watching());
}

#[tokio::test(start_paused = true)]
async fn test_successful_launch_resets_failure_count() {
    // Two failures, then the launcher recovers.
    let attempts = Arc::new(AtomicU32::new(0));
    let seen = attempts.clone();
    let launcher: LauncherRef = LaunchFn::arc(move |_t: Target| {
        let seen = seen.clone();
        async move {
            if seen.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(LaunchError::Failed {
                    error: "flaky".into(),
                })
            } else {
                Ok(())
            }
        }
    });
    let (probe, _) = counting_probe(false);
    let fx = Fixture::spawn(probe, launcher, Vec::new()).await;
    let handle = fx.dog.handle();

    handle.enable();
    settle().await;
    advance(POLL).await;
    settle().await;
    assert_eq!(handle.consecutive_failures(), 2);

    advance(POLL).await;
    settle().await;
    assert_eq!(handle.consecutive_failures(), 0);

    fx.finish().await;
}
