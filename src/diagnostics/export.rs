// SPDX-License-Identifier: MPL-2.0
//! Writing diagnostic reports to disk.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

/// Errors that can occur while exporting a report.
#[derive(Debug)]
pub enum ExportError {
    Io(io::Error),
    Serialization(serde_json::Error),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Serialization(e) => write!(f, "Serialization error: {e}"),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Serialization(e) => Some(e),
        }
    }
}

impl From<io::Error> for ExportError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err)
    }
}

impl From<ExportError> for crate::error::Error {
    fn from(err: ExportError) -> Self {
        crate::error::Error::Diagnostics(err.to_string())
    }
}

/// Writes `content` to `path` through a sibling `.tmp` file and a rename, so
/// readers never observe a partial report.
///
/// # Errors
///
/// Returns an error if writing or renaming fails.
pub fn write_atomic(path: &Path, content: &str) -> io::Result<()> {
    let temp_path = path.with_extension("json.tmp");

    fs::write(&temp_path, content)?;

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn export_error_io_displays_correctly() {
        let err = ExportError::Io(io::Error::new(io::ErrorKind::NotFound, "missing"));
        assert!(err.to_string().starts_with("I/O error:"));
    }

    #[test]
    fn export_error_converts_to_crate_error() {
        let err: crate::error::Error = ExportError::Io(io::Error::other("disk full")).into();
        assert!(matches!(err, crate::error::Error::Diagnostics(msg) if msg.contains("disk full")));
    }

    #[test]
    fn write_atomic_leaves_no_temp_file() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("report.json");

        write_atomic(&path, "{}").expect("write");

        assert_eq!(fs::read_to_string(&path).expect("read"), "{}");
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn write_atomic_fails_for_missing_directory() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("missing").join("report.json");
        assert!(write_atomic(&path, "{}").is_err());
    }
}
