// SPDX-License-Identifier: MPL-2.0
//! Location result types.
//!
//! Pure value objects produced by the extraction pipeline. Nothing here is
//! mutated after construction.

use std::collections::BTreeMap;
use std::fmt;

/// Raw GPS tag values keyed by tag name, stringified.
pub type RawGpsTags = BTreeMap<String, String>;

// =============================================================================
// LocationSource
// =============================================================================

/// Where a location came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocationSource {
    /// Read from GPS tags embedded in the image.
    Exif,
    /// Produced by an estimator because no GPS tags were usable.
    Estimate,
}

impl LocationSource {
    /// Wire form: `"EXIF"` or `"ESTIMATE"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exif => "EXIF",
            Self::Estimate => "ESTIMATE",
        }
    }
}

impl fmt::Display for LocationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// GpsFix
// =============================================================================

/// A coordinate recovered from image metadata.
///
/// Construction rejects non-finite values and coordinates outside
/// `[-90, 90]` x `[-180, 180]`, so every `GpsFix` in circulation is a valid
/// WGS84 position.
#[derive(Debug, Clone, PartialEq)]
pub struct GpsFix {
    latitude: f64,
    longitude: f64,
    accuracy_meters: Option<f64>,
    raw_tags: RawGpsTags,
}

impl GpsFix {
    /// Creates a fix, or `None` if the coordinate is not a valid position.
    #[must_use]
    pub fn new(
        latitude: f64,
        longitude: f64,
        accuracy_meters: Option<f64>,
        raw_tags: RawGpsTags,
    ) -> Option<Self> {
        if !is_valid_latitude(latitude) || !is_valid_longitude(longitude) {
            return None;
        }
        Some(Self {
            latitude,
            longitude,
            accuracy_meters,
            raw_tags,
        })
    }

    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    #[must_use]
    pub fn accuracy_meters(&self) -> Option<f64> {
        self.accuracy_meters
    }

    #[must_use]
    pub fn raw_tags(&self) -> &RawGpsTags {
        &self.raw_tags
    }

    /// Always [`LocationSource::Exif`].
    #[must_use]
    pub fn source(&self) -> LocationSource {
        LocationSource::Exif
    }
}

// =============================================================================
// EstimateResult
// =============================================================================

/// Output of an estimator.
///
/// Fields are public because estimators are pluggable and live outside this
/// crate; the resolver checks the shape before handing it to the caller.
/// Estimator failures are carried in `error` rather than raised.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimateResult {
    pub latitude: f64,
    pub longitude: f64,
    /// Confidence in `[0, 1]`.
    pub confidence: f64,
    pub error: Option<String>,
}

impl EstimateResult {
    /// A null estimate at (0, 0) with zero confidence, carrying `error`.
    #[must_use]
    pub fn unavailable(error: impl Into<String>) -> Self {
        Self {
            latitude: 0.0,
            longitude: 0.0,
            confidence: 0.0,
            error: Some(error.into()),
        }
    }

    /// Always [`LocationSource::Estimate`].
    #[must_use]
    pub fn source(&self) -> LocationSource {
        LocationSource::Estimate
    }

    /// Returns `true` if this is the null island (0,0) with zero confidence.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.latitude.abs() < f64::EPSILON
            && self.longitude.abs() < f64::EPSILON
            && self.confidence.abs() < f64::EPSILON
    }
}

// =============================================================================
// LocationResult
// =============================================================================

/// The single output of a resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationResult {
    Exif(GpsFix),
    Estimate(EstimateResult),
}

impl LocationResult {
    #[must_use]
    pub fn source(&self) -> LocationSource {
        match self {
            Self::Exif(fix) => fix.source(),
            Self::Estimate(estimate) => estimate.source(),
        }
    }

    #[must_use]
    pub fn latitude(&self) -> f64 {
        match self {
            Self::Exif(fix) => fix.latitude(),
            Self::Estimate(estimate) => estimate.latitude,
        }
    }

    #[must_use]
    pub fn longitude(&self) -> f64 {
        match self {
            Self::Exif(fix) => fix.longitude(),
            Self::Estimate(estimate) => estimate.longitude,
        }
    }

    #[must_use]
    pub fn is_exif(&self) -> bool {
        matches!(self, Self::Exif(_))
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn is_valid_latitude(value: f64) -> bool {
    value.is_finite() && (-90.0..=90.0).contains(&value)
}

fn is_valid_longitude(value: f64) -> bool {
    value.is_finite() && (-180.0..=180.0).contains(&value)
}
