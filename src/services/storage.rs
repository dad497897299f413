//! Upload storage: file naming and disk writes.
//!
//! Stored names carry an upload timestamp prefix to keep same-named uploads
//! apart. Repeats within one second share a stored name and the later write
//! wins.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

pub const DEFAULT_UPLOAD_DIR: &str = "uploads";

/// Resolve the upload directory from `UPLOAD_DIR`, defaulting to `uploads`.
#[must_use]
pub fn upload_dir_from_env() -> PathBuf {
    std::env::var("UPLOAD_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_UPLOAD_DIR))
}

/// Reduce a client-supplied filename to a safe path segment: directory
/// components are stripped and spaces become underscores.
#[must_use]
pub fn sanitize_filename(raw: &str) -> String {
    let name = Path::new(raw)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("");
    let name = name.trim().replace(' ', "_");
    if name.is_empty() { "upload".to_owned() } else { name }
}

/// Name under which an upload is stored: `{timestamp}_{sanitized original}`.
#[must_use]
pub fn stored_name(uploaded_at: DateTime<Utc>, raw_filename: &str) -> String {
    format!("{}_{}", uploaded_at.format("%Y%m%d%H%M%S"), sanitize_filename(raw_filename))
}

/// Write uploaded bytes under `dir`, returning the full path written.
///
/// # Errors
///
/// Returns an IO error if the write fails.
pub async fn write_upload(dir: &Path, stored: &str, bytes: &[u8]) -> std::io::Result<PathBuf> {
    let path = dir.join(stored);
    tokio::fs::write(&path, bytes).await?;
    Ok(path)
}
