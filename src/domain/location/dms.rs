// SPDX-License-Identifier: MPL-2.0
//! Metadata encodings of a sexagesimal angle and the raw GPS reading built
//! from them.

use super::angle::{AngleReference, DmsAngle};
use super::types::{GpsFix, RawGpsTags};

/// How a degrees/minutes/seconds triple arrived from a metadata decoder.
#[derive(Debug, Clone, PartialEq)]
pub enum DmsSource {
    /// Explicit numeric components, usually EXIF rationals.
    Structured(Vec<f64>),
    /// A human-readable string such as `"[40, 42, 30]"` or `"40, 42, 30"`.
    TextEncoded(String),
}

impl DmsSource {
    /// Parses the components into an angle.
    ///
    /// Structured values need at least three components; extra components are
    /// ignored. Text needs exactly three comma-separated floats once
    /// surrounding brackets are stripped. Anything else yields `None`.
    #[must_use]
    pub fn to_angle(&self) -> Option<DmsAngle> {
        match self {
            Self::Structured(values) => match values.as_slice() {
                [degrees, minutes, seconds, ..] => {
                    Some(DmsAngle::new(*degrees, *minutes, *seconds))
                }
                _ => None,
            },
            Self::TextEncoded(text) => parse_dms_text(text),
        }
    }
}

fn parse_dms_text(text: &str) -> Option<DmsAngle> {
    let inner = text
        .trim()
        .trim_start_matches(['[', '('])
        .trim_end_matches([']', ')']);

    let parts: Vec<&str> = inner.split(',').collect();
    let [degrees, minutes, seconds] = parts.as_slice() else {
        return None;
    };

    Some(DmsAngle::new(
        parse_component(degrees)?,
        parse_component(minutes)?,
        parse_component(seconds)?,
    ))
}

/// Parses one component as a plain float.
fn parse_component(raw: &str) -> Option<f64> {
    raw.trim().parse().ok()
}

// =============================================================================
// GpsReading
// =============================================================================

/// GPS tags one metadata decoder found, before conversion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GpsReading {
    pub latitude: Option<DmsSource>,
    pub latitude_ref: Option<String>,
    pub longitude: Option<DmsSource>,
    pub longitude_ref: Option<String>,
    /// Every GPS tag the decoder saw, stringified.
    pub raw_tags: RawGpsTags,
}

impl GpsReading {
    /// Converts the reading into a fix.
    ///
    /// Returns `None` when either axis is missing or unparseable, or when the
    /// converted coordinate is not a valid position. A missing hemisphere
    /// reference defaults to North / East.
    #[must_use]
    pub fn to_fix(&self, accuracy_meters: f64) -> Option<GpsFix> {
        let latitude = self.latitude.as_ref()?.to_angle()?;
        let longitude = self.longitude.as_ref()?.to_angle()?;

        let latitude_ref =
            AngleReference::parse_or(self.latitude_ref.as_deref(), AngleReference::DEFAULT_LATITUDE);
        let longitude_ref = AngleReference::parse_or(
            self.longitude_ref.as_deref(),
            AngleReference::DEFAULT_LONGITUDE,
        );

        GpsFix::new(
            latitude.to_decimal(latitude_ref),
            longitude.to_decimal(longitude_ref),
            Some(accuracy_meters),
            self.raw_tags.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn new_york() -> GpsReading {
        GpsReading {
            latitude: Some(DmsSource::Structured(vec![40.0, 42.0, 30.0])),
            latitude_ref: Some("N".into()),
            longitude: Some(DmsSource::Structured(vec![74.0, 0.0, 21.0])),
            longitude_ref: Some("W".into()),
            raw_tags: RawGpsTags::new(),
        }
    }

    #[test]
    fn structured_needs_three_components() {
        assert!(DmsSource::Structured(vec![40.0, 42.0]).to_angle().is_none());
        assert_eq!(
            DmsSource::Structured(vec![40.0, 42.0, 30.0, 99.0]).to_angle(),
            Some(DmsAngle::new(40.0, 42.0, 30.0))
        );
    }

    #[test]
    fn text_with_brackets_parses() {
        assert_eq!(
            DmsSource::TextEncoded("[40, 42, 30]".into()).to_angle(),
            Some(DmsAngle::new(40.0, 42.0, 30.0))
        );
        assert_eq!(
            DmsSource::TextEncoded("74, 0, 21.5".into()).to_angle(),
            Some(DmsAngle::new(74.0, 0.0, 21.5))
        );
    }

    #[test]
    fn text_rational_components_are_absent() {
        assert!(DmsSource::TextEncoded("[40/1, 42/1, 61/2]".into())
            .to_angle()
            .is_none());
        assert!(DmsSource::TextEncoded("40, 42, 61/2".into())
            .to_angle()
            .is_none());
    }

    #[test]
    fn text_with_wrong_component_count_is_absent() {
        assert!(DmsSource::TextEncoded("40, 42".into()).to_angle().is_none());
        assert!(DmsSource::TextEncoded("40, 42, 30, 1".into())
            .to_angle()
            .is_none());
        assert!(DmsSource::TextEncoded("".into()).to_angle().is_none());
    }

    #[test]
    fn text_with_non_numeric_component_is_absent() {
        assert!(DmsSource::TextEncoded("40, north, 30".into())
            .to_angle()
            .is_none());
    }

    #[test]
    fn reading_converts_to_signed_fix() {
        let fix = new_york().to_fix(5.0).expect("fix");
        assert_abs_diff_eq!(fix.latitude(), 40.7083, epsilon = 0.001);
        assert_abs_diff_eq!(fix.longitude(), -74.0058, epsilon = 0.001);
        assert_eq!(fix.accuracy_meters(), Some(5.0));
    }

    #[test]
    fn missing_reference_defaults_to_north_east() {
        let reading = GpsReading {
            latitude_ref: None,
            longitude_ref: None,
            ..new_york()
        };
        let fix = reading.to_fix(5.0).expect("fix");
        assert!(fix.latitude() > 0.0);
        assert!(fix.longitude() > 0.0);
    }

    #[test]
    fn malformed_axis_makes_reading_absent() {
        let reading = GpsReading {
            longitude: Some(DmsSource::TextEncoded("74, 0".into())),
            ..new_york()
        };
        assert!(reading.to_fix(5.0).is_none());

        let reading = GpsReading {
            latitude: None,
            ..new_york()
        };
        assert!(reading.to_fix(5.0).is_none());
    }

    #[test]
    fn out_of_range_result_is_absent() {
        let reading = GpsReading {
            latitude: Some(DmsSource::Structured(vec![95.0, 0.0, 0.0])),
            ..new_york()
        };
        assert!(reading.to_fix(5.0).is_none());
    }
}
