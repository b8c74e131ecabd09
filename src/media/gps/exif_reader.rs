// SPDX-License-Identifier: MPL-2.0
//! Primary GPS strategy: the flat EXIF tag table, read with `kamadak-exif`.

use std::io::Cursor;

use crate::application::port::{GpsReader, MetadataError};
use crate::domain::location::{DmsSource, GpsReading};

/// Reads GPS tags from the primary image's EXIF table.
///
/// Every tag whose name starts with `GPS` is collected into the raw tags,
/// stringified with the decoder's own value formatting.
#[derive(Debug, Clone, Copy, Default)]
pub struct KamadakGpsReader;

impl GpsReader for KamadakGpsReader {
    fn name(&self) -> &'static str {
        "kamadak-exif"
    }

    fn read(&self, bytes: &[u8]) -> Result<Option<GpsReading>, MetadataError> {
        let mut cursor = Cursor::new(bytes);
        let exif = match exif::Reader::new().read_from_container(&mut cursor) {
            Ok(exif) => exif,
            Err(exif::Error::NotFound(_)) => return Ok(None),
            Err(exif::Error::NotSupported(_)) => return Err(MetadataError::UnsupportedFormat),
            Err(e) => return Err(MetadataError::CorruptedMetadata(e.to_string())),
        };

        let mut reading = GpsReading::default();
        for field in exif.fields().filter(|f| f.ifd_num == exif::In::PRIMARY) {
            let name = field.tag.to_string();
            if !name.starts_with("GPS") {
                continue;
            }

            let tag = field.tag;
            if tag == exif::Tag::GPSLatitude {
                reading.latitude = dms_source(&field.value);
            } else if tag == exif::Tag::GPSLongitude {
                reading.longitude = dms_source(&field.value);
            } else if tag == exif::Tag::GPSLatitudeRef {
                reading.latitude_ref = first_ascii(&field.value);
            } else if tag == exif::Tag::GPSLongitudeRef {
                reading.longitude_ref = first_ascii(&field.value);
            }

            reading
                .raw_tags
                .insert(name, field.display_value().to_string());
        }

        if reading.raw_tags.is_empty() {
            return Ok(None);
        }
        Ok(Some(reading))
    }
}

/// Rationals become structured components; ASCII is kept as text for the
/// shared DMS parser.
fn dms_source(value: &exif::Value) -> Option<DmsSource> {
    match value {
        exif::Value::Rational(rationals) => Some(DmsSource::Structured(
            rationals.iter().map(exif::Rational::to_f64).collect(),
        )),
        exif::Value::SRational(rationals) => Some(DmsSource::Structured(
            rationals.iter().map(exif::SRational::to_f64).collect(),
        )),
        exif::Value::Ascii(_) => first_ascii(value).map(DmsSource::TextEncoded),
        _ => None,
    }
}

fn first_ascii(value: &exif::Value) -> Option<String> {
    match value {
        exif::Value::Ascii(lines) => lines
            .first()
            .map(|line| String::from_utf8_lossy(line).into_owned()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::plain_jpeg;

    #[test]
    fn bytes_without_container_are_rejected_or_empty() {
        let result = KamadakGpsReader.read(b"definitely not an image");
        assert!(!matches!(result, Ok(Some(_))));
    }

    #[test]
    fn jpeg_without_app1_has_no_reading() {
        assert!(matches!(KamadakGpsReader.read(&plain_jpeg()), Ok(None)));
    }

    #[test]
    fn rational_values_become_structured() {
        let value = exif::Value::Rational(vec![
            exif::Rational::from((40, 1)),
            exif::Rational::from((42, 1)),
            exif::Rational::from((61, 2)),
        ]);
        assert_eq!(
            dms_source(&value),
            Some(DmsSource::Structured(vec![40.0, 42.0, 30.5]))
        );
    }

    #[test]
    fn ascii_values_become_text() {
        let value = exif::Value::Ascii(vec![b"40, 42, 30".to_vec()]);
        assert_eq!(
            dms_source(&value),
            Some(DmsSource::TextEncoded("40, 42, 30".into()))
        );
        assert_eq!(first_ascii(&value).as_deref(), Some("40, 42, 30"));
    }

    #[test]
    fn other_value_types_are_ignored() {
        assert_eq!(dms_source(&exif::Value::Short(vec![1, 2, 3])), None);
        assert_eq!(first_ascii(&exif::Value::Byte(vec![b'N'])), None);
    }
}
