use crate::error::{LightscopeError, Result};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// `$HOME/.lightscope/logs`, or `./.lightscope/logs` without a home.
pub fn log_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".lightscope").join("logs")
}

/// Non-blocking daily-rolling writer under `dir`, or `None` when the
/// directory cannot be created.
fn file_writer(dir: &Path, component: &str) -> Option<(NonBlocking, WorkerGuard)> {
    if let Err(e) = std::fs::create_dir_all(dir) {
        eprintln!("warning: not logging to {}: {e}", dir.display());
        return None;
    }
    Some(tracing_appender::non_blocking(
        tracing_appender::rolling::daily(dir, component),
    ))
}

/// Installs the global subscriber: a daily-rolling file per component,
/// plus an ANSI stderr layer when `to_stderr` is set. The filter comes
/// from `RUST_LOG` and defaults to `info`. Without a usable log directory
/// only the stderr layer (if any) is installed.
///
/// Keep the returned guard alive for as long as logs should be flushed.
pub fn init_logging(component: &str, to_stderr: bool) -> Result<Option<WorkerGuard>> {
    let (file_layer, guard) = match file_writer(&log_dir(), component) {
        Some((writer, guard)) => {
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_layer = to_stderr.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| LightscopeError::Internal(format!("logging already initialized: {e}")))?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_writer_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let logs = dir.path().join("logs");
        assert!(file_writer(&logs, "test").is_some());
        assert!(logs.is_dir());
    }

    #[test]
    fn test_file_writer_skips_unusable_directory() {
        let file = tempfile::NamedTempFile::new().unwrap();
        // A regular file cannot hold a directory.
        let logs = file.path().join("logs");
        assert!(file_writer(&logs, "test").is_none());
    }
}
