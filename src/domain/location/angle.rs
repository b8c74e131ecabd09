// SPDX-License-Identifier: MPL-2.0
//! Sexagesimal angle types and conversion to signed decimal degrees.
//!
//! EXIF stores latitude and longitude as an unsigned (degrees, minutes,
//! seconds) triple plus a separate hemisphere reference tag. This module
//! turns that pair into a single signed `f64`.

use std::fmt;

// =============================================================================
// AngleReference
// =============================================================================

/// Hemisphere reference attached to a GPS angle.
///
/// South and West negate the magnitude, North and East leave it unsigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleReference {
    North,
    South,
    East,
    West,
}

impl AngleReference {
    /// Reference assumed for a latitude whose reference tag is absent.
    pub const DEFAULT_LATITUDE: Self = Self::North;

    /// Reference assumed for a longitude whose reference tag is absent.
    pub const DEFAULT_LONGITUDE: Self = Self::East;

    /// Parses the textual form found in `GPSLatitudeRef` / `GPSLongitudeRef`.
    ///
    /// Surrounding whitespace, quotes and NUL padding are ignored, so both
    /// `N` and `"N"` parse. Only the first character is inspected.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let cleaned = raw.trim_matches(|c: char| c == '"' || c == '\0' || c.is_whitespace());
        match cleaned.chars().next()?.to_ascii_uppercase() {
            'N' => Some(Self::North),
            'S' => Some(Self::South),
            'E' => Some(Self::East),
            'W' => Some(Self::West),
            _ => None,
        }
    }

    /// Parses a reference tag value, falling back to `default` when the tag
    /// is missing or unrecognized.
    ///
    /// A missing reference silently places the coordinate in the northern or
    /// eastern hemisphere. Data that merely omits the tag may therefore come
    /// out with the wrong sign; callers get no signal that this happened.
    #[must_use]
    pub fn parse_or(raw: Option<&str>, default: Self) -> Self {
        raw.and_then(Self::parse).unwrap_or(default)
    }

    /// Returns `true` if this reference negates the magnitude.
    #[must_use]
    pub fn is_negative(self) -> bool {
        matches!(self, Self::South | Self::West)
    }

    /// Single-letter form as written in EXIF.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::North => "N",
            Self::South => "S",
            Self::East => "E",
            Self::West => "W",
        }
    }
}

impl fmt::Display for AngleReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// DmsAngle
// =============================================================================

/// Unsigned degrees / minutes / seconds triple.
///
/// Minutes and seconds are conventionally below 60 but nothing here enforces
/// it: the conversion is a plain formula, not a validator.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DmsAngle {
    pub degrees: f64,
    pub minutes: f64,
    pub seconds: f64,
}

impl DmsAngle {
    #[must_use]
    pub const fn new(degrees: f64, minutes: f64, seconds: f64) -> Self {
        Self {
            degrees,
            minutes,
            seconds,
        }
    }

    /// Converts to signed decimal degrees. See [`to_decimal_degrees`].
    #[must_use]
    pub fn to_decimal(self, reference: AngleReference) -> f64 {
        to_decimal_degrees(self, reference)
    }
}

/// Converts a DMS triple and hemisphere reference to signed decimal degrees.
///
/// Computes `degrees + minutes / 60 + seconds / 3600` without carrying
/// out-of-range minutes or seconds, then negates for South and West.
///
/// # Example
///
/// ```
/// use geolens::domain::location::{to_decimal_degrees, AngleReference, DmsAngle};
///
/// let nyc_lat = to_decimal_degrees(DmsAngle::new(40.0, 42.0, 30.0), AngleReference::North);
/// assert!((nyc_lat - 40.7083).abs() < 0.001);
///
/// let nyc_lng = to_decimal_degrees(DmsAngle::new(74.0, 0.0, 21.0), AngleReference::West);
/// assert!((nyc_lng + 74.0058).abs() < 0.001);
/// ```
#[must_use]
pub fn to_decimal_degrees(angle: DmsAngle, reference: AngleReference) -> f64 {
    let magnitude = angle.degrees + angle.minutes / 60.0 + angle.seconds / 3600.0;
    if reference.is_negative() {
        -magnitude
    } else {
        magnitude
    }
}
