use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Send `tracing` output to `path`, appending. The terminal belongs to the
/// TUI, so nothing goes to stdout or stderr. Returns false when the file
/// cannot be opened or a subscriber is already installed; the app then runs
/// without logs.
pub(crate) fn init_file_logging(path: &Path, filter: &str) -> bool {
    let file = match OpenOptions::new().create(true).append(true).open(path) {
        Ok(f) => f,
        Err(_) => return false,
    };
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .is_ok()
}
