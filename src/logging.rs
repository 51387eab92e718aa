//! Tracing subscriber setup.
//!
//! Filtering comes from `FDASH_LOG` (same syntax as `RUST_LOG`). The TUI owns the
//! terminal, so it logs to a file instead of stderr.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::{AppError, EXIT_INPUT};

const ENV_FILTER: &str = "FDASH_LOG";
const DEFAULT_FILTER: &str = "forecast_dash=info";

#[derive(Debug, Clone)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

/// Install the global subscriber. A second call is a no-op.
pub fn init(target: LogTarget) -> Result<(), AppError> {
    let filter = EnvFilter::try_from_env(ENV_FILTER).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

    let installed = match target {
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to open log file '{}': {e}", path.display())))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).try_init()
        }
    };

    if let Err(err) = installed {
        // Already installed (e.g. by a test harness); keep the existing one.
        tracing::debug!(%err, "log subscriber already installed");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_keeps_existing_subscriber() {
        assert!(init(LogTarget::Stderr).is_ok());
        assert!(init(LogTarget::Stderr).is_ok());
    }

    #[test]
    fn file_target_creates_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fdash.log");
        assert!(init(LogTarget::File(path.clone())).is_ok());
        assert!(path.exists());
    }

    #[test]
    fn unwritable_log_file_is_an_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = init(LogTarget::File(dir.path().join("missing").join("fdash.log"))).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_INPUT);
    }
}
