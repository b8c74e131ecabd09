// SPDX-License-Identifier: MPL-2.0
//! GPS metadata reading port.
//!
//! A [`GpsReader`] is one decoding strategy: it parses the metadata embedded
//! in an image container and reports the GPS tags it found, without touching
//! pixel data. Conversion to a coordinate happens in the caller, so every
//! strategy shares the same parsing and sign rules.

use crate::domain::location::GpsReading;
use std::fmt;

// =============================================================================
// MetadataError
// =============================================================================

/// Errors a metadata decoder can report.
///
/// None of these reach the caller of the pipeline: the extractor records them
/// as diagnostics and treats the strategy as having found nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataError {
    /// The container format is not one this decoder understands.
    UnsupportedFormat,

    /// The metadata block exists but could not be parsed.
    CorruptedMetadata(String),

    /// The decoder itself failed unexpectedly.
    ReadFailed(String),
}

impl fmt::Display for MetadataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataError::UnsupportedFormat => write!(f, "Format does not support metadata"),
            MetadataError::CorruptedMetadata(msg) => write!(f, "Corrupted metadata: {msg}"),
            MetadataError::ReadFailed(msg) => write!(f, "Failed to read metadata: {msg}"),
        }
    }
}

impl std::error::Error for MetadataError {}

// =============================================================================
// GpsReader Trait
// =============================================================================

/// Port for one GPS metadata decoding strategy.
///
/// # Thread Safety
///
/// Readers hold no per-call state and must be `Send + Sync` so one instance
/// can serve concurrent resolutions.
pub trait GpsReader: Send + Sync {
    /// Short strategy name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Reads GPS tags from an image container.
    ///
    /// Returns `Ok(None)` when the image carries no metadata block or the
    /// block has no GPS section.
    ///
    /// # Errors
    ///
    /// Returns a [`MetadataError`] if the metadata cannot be decoded.
    fn read(&self, bytes: &[u8]) -> Result<Option<GpsReading>, MetadataError>;
}
