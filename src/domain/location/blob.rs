// SPDX-License-Identifier: MPL-2.0
//! Uploaded image bytes as they enter the pipeline.

/// Raw upload: bytes plus what the client claimed about them.
///
/// The declared size normally equals `bytes.len()`, but transports that
/// report a size header before the body is read can set it separately.
/// A blob is moved into the resolver and dropped when resolution ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBlob {
    bytes: Vec<u8>,
    content_type: String,
    declared_size: u64,
    file_name: Option<String>,
}

impl ImageBlob {
    /// Creates a blob whose declared size is the byte length.
    #[must_use]
    pub fn new(bytes: Vec<u8>, content_type: impl Into<String>) -> Self {
        let declared_size = bytes.len() as u64;
        Self {
            bytes,
            content_type: content_type.into(),
            declared_size,
            file_name: None,
        }
    }

    /// Overrides the declared size.
    #[must_use]
    pub fn with_declared_size(mut self, size: u64) -> Self {
        self.declared_size = size;
        self
    }

    /// Attaches the client-side file name (used only for staging suffixes
    /// and upload records).
    #[must_use]
    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    #[must_use]
    pub fn declared_size(&self) -> u64 {
        self.declared_size
    }

    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// Lower-cased extension of the file name, if any.
    #[must_use]
    pub fn extension(&self) -> Option<String> {
        let name = self.file_name.as_deref()?;
        let (_, ext) = name.rsplit_once('.')?;
        if ext.is_empty() || ext.contains(['/', '\\']) {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }
}
