//! Process-wide logging setup
//!
//! Installed once from `main`. Every line goes to stderr and, when the log
//! directory is writable, to a per-run file as well.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable holding the log level or filter directives
pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

const DEFAULT_LEVEL: &str = "info";

/// Build the filter from `LOG_LEVEL`, falling back to `info`
pub fn env_filter() -> EnvFilter {
    std::env::var(LOG_LEVEL_ENV)
        .ok()
        .and_then(|level| EnvFilter::try_new(level.to_lowercase()).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LEVEL))
}

/// File name for a run started at `now`
pub fn log_file_name(now: &jiff::Zoned) -> String {
    format!("sftp-loader_{}.log", now.strftime("%Y%m%d_%H%M%S"))
}

/// Create `log_dir` and a fresh log file inside it
pub fn open_log_file(log_dir: &Path) -> std::io::Result<(PathBuf, File)> {
    fs::create_dir_all(log_dir)?;
    let path = log_dir.join(log_file_name(&jiff::Zoned::now()));
    let file = File::create(&path)?;
    Ok((path, file))
}

/// Install the global subscriber
///
/// Returns the log file path, or `None` when only stderr is used.
pub fn init(log_dir: &Path) -> Option<PathBuf> {
    let stderr_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let (log_path, file_layer, file_error) = match open_log_file(log_dir) {
        Ok((path, file)) => {
            let layer = fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file));
            (Some(path), Some(layer), None)
        }
        Err(e) => (None, None, Some(e)),
    };

    tracing_subscriber::registry()
        .with(env_filter())
        .with(stderr_layer)
        .with(file_layer)
        .init();

    match (&log_path, file_error) {
        (Some(path), _) => tracing::debug!("Logging to {}", path.display()),
        (None, Some(e)) => tracing::warn!(
            "Cannot write log file in {}: {e}; logging to stderr only",
            log_dir.display()
        ),
        (None, None) => {}
    }
    log_path
}
