use crate::connection::{convert_connections, to_json, AvailableConnection};
use crate::error::{Error, Result};
use crate::rncryptor;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

pub const EXTENSION: &str = "tableplusconnection";

pub fn export_path(stem: &str) -> PathBuf {
    PathBuf::from(format!("{stem}.{EXTENSION}"))
}

// Serialized, encrypted file contents for `connections`.
pub fn build_export(connections: &[AvailableConnection], password: &str) -> Result<Vec<u8>> {
    let json = to_json(&convert_connections(connections))?;
    rncryptor::encrypt(password, &json)
}

pub fn write_export(stem: &str, bytes: &[u8]) -> Result<PathBuf> {
    let path = export_path(stem);
    fs::write(&path, bytes)?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "wrote export");
    Ok(path)
}

// macOS `open -a <app> <path>`; stdio is inherited so the user sees any complaint.
pub fn open_with_app(app: &str, path: &Path) -> Result<()> {
    if !cfg!(target_os = "macos") {
        return Err(Error::UnsupportedPlatform);
    }
    let status = Command::new("open")
        .arg("-a")
        .arg(app)
        .arg(path)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()?;
    if !status.success() {
        return Err(Error::OpenFailed {
            app: app.to_string(),
            status: status.to_string(),
        });
    }
    Ok(())
}
