//! Tracing subscriber setup shared by the binaries.

use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Environment variable naming a file that receives verbose debug logs.
pub const DEBUG_LOG_ENV: &str = "TASKBOARD_DEBUG_LOG";

/// Install the global subscriber.
///
/// With `TASKBOARD_DEBUG_LOG` set, everything at DEBUG and above is appended to that
/// file with source locations. Otherwise logs go to stderr, filtered by `RUST_LOG`
/// (default `warn`).
pub fn init() -> std::io::Result<()> {
    match std::env::var(DEBUG_LOG_ENV) {
        Ok(log_path) => init_file(Path::new(&log_path)),
        Err(_) => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
                )
                .with_writer(std::io::stderr)
                .try_init();
            Ok(())
        }
    }
}

fn init_file(log_path: &Path) -> std::io::Result<()> {
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;

    let _ = tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_max_level(tracing::Level::DEBUG)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .try_init();
    Ok(())
}
