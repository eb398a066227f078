//! Logging setup: a `tracing` fmt subscriber with env-based filtering.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Where log lines go.
pub enum LogTarget<'a> {
    Stderr,
    /// Append to a file, keeping the terminal free for the TUI.
    File(&'a Path),
}

/// Install the global subscriber. `RUST_LOG` overrides `level`.
///
/// Calling this twice is harmless: the second install fails quietly. When a
/// file target cannot be opened nothing is installed and the error is
/// returned, so callers may carry on without logging.
pub fn init(level: &str, target: LogTarget<'_>) -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let _ = match target {
        LogTarget::Stderr => builder.with_writer(io::stderr).try_init(),
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };
    Ok(())
}
