use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

// The checklist owns the terminal, so logs always go to a file.
pub fn default_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("tpconn")
        .join("tpconn.log")
}

/// Install the global subscriber. `RUST_LOG` overrides the `info` default.
pub fn init(path: Option<&Path>) -> Result<PathBuf> {
    let log_path = path.map(Path::to_path_buf).unwrap_or_else(default_log_path);
    if let Some(parent) = log_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|error| {
                Error::Logging(format!(
                    "failed to create log directory '{}': {error}",
                    parent.display()
                ))
            })?;
        }
    }

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .map_err(|error| {
            Error::Logging(format!(
                "failed to open log file '{}': {error}",
                log_path.display()
            ))
        })?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(log_file))
        .try_init()
        .map_err(|error| Error::Logging(error.to_string()))?;

    Ok(log_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_path_ends_in_app_dir() {
        let path = default_log_path();
        assert!(path.ends_with("tpconn/tpconn.log"));
    }

    #[test]
    fn init_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("run.log");
        // a second global init in the same test binary would fail; only the file side matters here
        let _ = init(Some(&path));
        assert!(path.exists());
    }
}
