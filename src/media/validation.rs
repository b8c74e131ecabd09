// SPDX-License-Identifier: MPL-2.0
//! Upload validation: size, declared content type and magic-byte signature.
//!
//! Checks run in that order and stop at the first failure, so each rejection
//! carries the most specific reason. Only the first twelve bytes are ever
//! inspected.

use crate::config::{UploadConfig, MAX_UPLOAD_BYTES, SIGNATURE_PROBE_LEN};
use crate::domain::error::{ValidationError, ALLOWED_CONTENT_TYPES};
use crate::domain::location::ImageBlob;

const JPEG_SIGNATURE: [u8; 3] = [0xFF, 0xD8, 0xFF];
const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
const RIFF_SIGNATURE: &[u8; 4] = b"RIFF";
const WEBP_FORM_TYPE: &[u8; 4] = b"WEBP";

/// Image container recognized from its leading bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Jpeg,
    Png,
    WebP,
}

impl ImageKind {
    /// Sniffs the container from the first bytes of `bytes`.
    ///
    /// The WebP check accepts `WEBP` anywhere in the first twelve bytes after
    /// a `RIFF` prefix, not only at the form-type offset.
    #[must_use]
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        let probe = &bytes[..bytes.len().min(SIGNATURE_PROBE_LEN)];

        if probe.starts_with(&JPEG_SIGNATURE) {
            return Some(Self::Jpeg);
        }
        if probe.starts_with(&PNG_SIGNATURE) {
            return Some(Self::Png);
        }
        if probe.starts_with(RIFF_SIGNATURE)
            && probe.windows(WEBP_FORM_TYPE.len()).any(|w| w == WEBP_FORM_TYPE)
        {
            return Some(Self::WebP);
        }
        None
    }

    /// Canonical MIME type.
    #[must_use]
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::WebP => "image/webp",
        }
    }

    /// File extension used when staging.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::WebP => "webp",
        }
    }

    /// MIME type for a file extension, used when the caller declares none.
    #[must_use]
    pub fn mime_for_extension(extension: &str) -> Option<&'static str> {
        match extension.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" | "jpe" => Some(Self::Jpeg.mime_type()),
            "png" => Some(Self::Png.mime_type()),
            "webp" => Some(Self::WebP.mime_type()),
            _ => None,
        }
    }
}

/// Gate that every upload passes before any metadata parsing.
#[derive(Debug, Clone)]
pub struct FileValidator {
    max_bytes: u64,
    allowed_types: Vec<String>,
}

impl Default for FileValidator {
    fn default() -> Self {
        Self {
            max_bytes: MAX_UPLOAD_BYTES,
            allowed_types: ALLOWED_CONTENT_TYPES.iter().map(|t| (*t).to_string()).collect(),
        }
    }
}

impl FileValidator {
    /// Validator with the 10 MiB limit and the three image types.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validator restricted by configuration. The limit can only go down and
    /// the type list can only shrink.
    #[must_use]
    pub fn from_config(config: &UploadConfig) -> Self {
        Self {
            max_bytes: config.effective_max_bytes(),
            allowed_types: config.effective_allowed_types(),
        }
    }

    #[must_use]
    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Checks size, then declared type, then signature.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::TooLarge`] if the declared size is over the limit
    /// - [`ValidationError::UnsupportedType`] if the declared type is not allowed
    /// - [`ValidationError::CorruptOrUnknownFormat`] if no signature matches
    pub fn validate(&self, blob: &ImageBlob) -> Result<ImageKind, ValidationError> {
        if blob.declared_size() > self.max_bytes {
            return Err(ValidationError::TooLarge {
                size: blob.declared_size(),
                limit: self.max_bytes,
            });
        }

        let content_type = blob.content_type();
        if !self
            .allowed_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(content_type))
        {
            return Err(ValidationError::UnsupportedType(content_type.to_string()));
        }

        ImageKind::sniff(blob.bytes()).ok_or(ValidationError::CorruptOrUnknownFormat)
    }
}
