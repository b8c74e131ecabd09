// SPDX-License-Identifier: MPL-2.0
//! Fallback GPS strategy: the container's metadata block decoded by
//! `little_exif`, walking the GPS sub-IFD entries.

use image_rs::ImageFormat;
use little_exif::endian::Endian;
use little_exif::exif_tag::ExifTag;
use little_exif::exif_tag_format::ExifTagFormat;
use little_exif::filetype::FileExtension;
use little_exif::ifd::ExifTagGroup;
use little_exif::metadata::Metadata;
use little_exif::rational::uR64;

use crate::application::port::{GpsReader, MetadataError};
use crate::domain::location::{DmsSource, GpsReading};

/// Reads the GPS sub-block through `little_exif`.
///
/// Every entry of the GPS IFD lands in the raw tags, stringified from its
/// encoded value.
///
/// The container type comes from `image`'s signature detection so the
/// metadata parser is pointed at the right segment layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct LittleExifGpsReader;

impl GpsReader for LittleExifGpsReader {
    fn name(&self) -> &'static str {
        "little_exif"
    }

    fn read(&self, bytes: &[u8]) -> Result<Option<GpsReading>, MetadataError> {
        let extension = file_extension(bytes)?;
        let metadata = Metadata::new_from_vec(&bytes.to_vec(), extension)
            .map_err(|e| MetadataError::CorruptedMetadata(e.to_string()))?;

        let Some(gps) = metadata.get_ifd(ExifTagGroup::GPS, 0) else {
            return Ok(None);
        };
        let endian = metadata.get_endian();

        let mut reading = GpsReading::default();
        for tag in gps.get_tags() {
            match tag {
                ExifTag::GPSLatitude(values) => reading.latitude = Some(structured(values)),
                ExifTag::GPSLongitude(values) => reading.longitude = Some(structured(values)),
                ExifTag::GPSLatitudeRef(value) => reading.latitude_ref = Some(value.clone()),
                ExifTag::GPSLongitudeRef(value) => reading.longitude_ref = Some(value.clone()),
                _ => {}
            }
            reading
                .raw_tags
                .insert(tag_name(tag), tag_value(tag, &endian));
        }

        if reading.raw_tags.is_empty() {
            return Ok(None);
        }
        Ok(Some(reading))
    }
}

fn file_extension(bytes: &[u8]) -> Result<FileExtension, MetadataError> {
    match image_rs::guess_format(bytes) {
        Ok(ImageFormat::Jpeg) => Ok(FileExtension::JPEG),
        Ok(ImageFormat::Png) => Ok(FileExtension::PNG {
            as_zTXt_chunk: true,
        }),
        Ok(ImageFormat::WebP) => Ok(FileExtension::WEBP),
        _ => Err(MetadataError::UnsupportedFormat),
    }
}

/// Variant name for known tags, the hex id for ones `little_exif` lacks.
fn tag_name(tag: &ExifTag) -> String {
    if tag.is_unknown() {
        return format!("GPSTag{:#06x}", tag.as_u16());
    }
    let debug = format!("{tag:?}");
    debug
        .split_once('(')
        .map_or(debug.as_str(), |(name, _)| name)
        .to_string()
}

/// Stringifies a tag from its encoded bytes.
fn tag_value(tag: &ExifTag, endian: &Endian) -> String {
    let bytes = tag.value_as_u8_vec(endian);
    match tag.format() {
        ExifTagFormat::STRING => clean_ascii(&String::from_utf8_lossy(&bytes)),
        ExifTagFormat::RATIONAL64U => {
            let values: Vec<uR64> = bytes
                .chunks_exact(8)
                .map(|chunk| uR64 {
                    nominator: read_u32(&chunk[..4], endian),
                    denominator: read_u32(&chunk[4..], endian),
                })
                .collect();
            format_rationals(&values)
        }
        ExifTagFormat::INT16U => join(bytes.chunks_exact(2).map(|chunk| {
            let pair = [chunk[0], chunk[1]];
            match endian {
                Endian::Little => u16::from_le_bytes(pair),
                Endian::Big => u16::from_be_bytes(pair),
            }
        })),
        ExifTagFormat::INT32U => join(bytes.chunks_exact(4).map(|chunk| read_u32(chunk, endian))),
        _ => join(bytes.iter()),
    }
}

fn read_u32(chunk: &[u8], endian: &Endian) -> u32 {
    let quad = [chunk[0], chunk[1], chunk[2], chunk[3]];
    match endian {
        Endian::Little => u32::from_le_bytes(quad),
        Endian::Big => u32::from_be_bytes(quad),
    }
}

fn join<T: ToString>(values: impl Iterator<Item = T>) -> String {
    values
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn structured(values: &[uR64]) -> DmsSource {
    DmsSource::Structured(values.iter().map(rational_to_f64).collect())
}

fn rational_to_f64(value: &uR64) -> f64 {
    f64::from(value.nominator) / f64::from(value.denominator)
}

fn format_rationals(values: &[uR64]) -> String {
    values
        .iter()
        .map(|v| format!("{}/{}", v.nominator, v.denominator))
        .collect::<Vec<_>>()
        .join(", ")
}

fn clean_ascii(value: &str) -> String {
    value.trim_end_matches('\0').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_container_is_unsupported() {
        assert_eq!(
            LittleExifGpsReader.read(b"plain text").unwrap_err(),
            MetadataError::UnsupportedFormat
        );
    }

    #[test]
    fn container_detection_maps_supported_formats() {
        assert!(matches!(
            file_extension(&[0xFF, 0xD8, 0xFF, 0xE0]),
            Ok(FileExtension::JPEG)
        ));
        assert!(matches!(
            file_extension(b"RIFF\0\0\0\0WEBPVP8 "),
            Ok(FileExtension::WEBP)
        ));
        assert!(file_extension(b"GIF89a").is_err());
    }

    #[test]
    fn rationals_convert_and_format() {
        let values = vec![
            uR64 {
                nominator: 40,
                denominator: 1,
            },
            uR64 {
                nominator: 61,
                denominator: 2,
            },
        ];
        assert_eq!(
            structured(&values),
            DmsSource::Structured(vec![40.0, 30.5])
        );
        assert_eq!(format_rationals(&values), "40/1, 61/2");
    }

    #[test]
    fn zero_denominator_is_not_finite() {
        let value = uR64 {
            nominator: 1,
            denominator: 0,
        };
        assert!(!rational_to_f64(&value).is_finite());
    }

    #[test]
    fn ascii_terminator_is_trimmed() {
        assert_eq!(clean_ascii("N\0"), "N");
    }

    #[test]
    fn tag_names_come_from_the_variant() {
        assert_eq!(tag_name(&ExifTag::GPSMapDatum("WGS-84".into())), "GPSMapDatum");
        assert_eq!(
            tag_name(&ExifTag::UnknownINT8U(vec![1], 0x0031, ExifTagGroup::GPS)),
            "GPSTag0x0031"
        );
    }

    #[test]
    fn tag_values_are_stringified_per_format() {
        let altitude = ExifTag::GPSAltitude(vec![uR64 {
            nominator: 125,
            denominator: 2,
        }]);
        assert_eq!(tag_value(&altitude, &Endian::Little), "125/2");
        assert_eq!(tag_value(&altitude, &Endian::Big), "125/2");
        assert_eq!(
            tag_value(&ExifTag::GPSMapDatum("WGS-84".into()), &Endian::Little),
            "WGS-84"
        );
        assert_eq!(
            tag_value(&ExifTag::GPSVersionID(vec![2, 3, 0, 0]), &Endian::Big),
            "2, 3, 0, 0"
        );
    }
}
