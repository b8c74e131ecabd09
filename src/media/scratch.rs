// SPDX-License-Identifier: MPL-2.0
//! Scoped on-disk staging of upload bytes.
//!
//! A [`StagedImage`] owns its temporary file and removes it when dropped, so
//! every exit path of a resolution releases the file exactly once.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

const STAGED_PREFIX: &str = "geolens-";

/// Where uploads are staged.
#[derive(Debug, Clone, Default)]
pub struct ScratchSpace {
    dir: Option<PathBuf>,
}

impl ScratchSpace {
    /// Stages into the system temporary directory.
    #[must_use]
    pub fn system() -> Self {
        Self::default()
    }

    /// Stages into `dir`, which must exist.
    #[must_use]
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
        }
    }

    /// Resolved staging directory.
    #[must_use]
    pub fn dir(&self) -> PathBuf {
        self.dir.clone().unwrap_or_else(std::env::temp_dir)
    }

    /// Writes `bytes` to a fresh temporary file.
    ///
    /// `extension` (without the dot) is appended so tools that dispatch on
    /// file names see the right type.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    pub fn stage(&self, bytes: &[u8], extension: Option<&str>) -> io::Result<StagedImage> {
        let suffix = extension.map(|ext| format!(".{ext}")).unwrap_or_default();
        let mut file = tempfile::Builder::new()
            .prefix(STAGED_PREFIX)
            .suffix(&suffix)
            .tempfile_in(self.dir())?;
        file.write_all(bytes)?;
        file.flush()?;
        Ok(StagedImage { file })
    }
}

/// A staged upload; the file is deleted on drop.
#[derive(Debug)]
pub struct StagedImage {
    file: NamedTempFile,
}

impl StagedImage {
    #[must_use]
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}
