//! # Watchdog Driver Example
//!
//! Supervises a real executable with the OS-backed capabilities: the target
//! is probed through the platform process listing every two seconds and
//! relaunched whenever it is absent. Ctrl-C (or SIGTERM) shuts down.
//!
//! ## Run
//! ```bash
//! cargo run --example watch -- /path/to/executable
//! ```

use std::sync::Arc;

use procvisor::{
    Config, LogWriter, ProcessListProbe, SpawnLauncher, StatusTracker, Subscribe, Target,
    TraceWriter, Watchdog,
};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let path = std::env::args()
        .nth(1)
        .ok_or("usage: watch <path-to-executable>")?;

    let status = Arc::new(StatusTracker::new());
    let subs: Vec<Arc<dyn Subscribe>> = vec![
        Arc::new(LogWriter::new()),
        Arc::new(TraceWriter::new()),
        status.clone(),
    ];

    let dog = Watchdog::new(
        Config::default(),
        Target::new(path),
        Arc::new(ProcessListProbe::new()),
        Arc::new(SpawnLauncher::new()),
        subs,
    );

    println!(" ─► Supervising '{}'; Ctrl-C to stop.", dog.target());
    dog.handle().enable();
    dog.run_until_signal().await?;

    println!(
        " ─► Done: {} launches, {} failed attempts.",
        status.launches(),
        status.failed_launches()
    );
    Ok(())
}
