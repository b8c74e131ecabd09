// SPDX-License-Identifier: MPL-2.0
//! Fixture builders shared by the integration tests.
#![allow(dead_code)]

use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

use exif::experimental::Writer;
use exif::{Field, In, Rational, Tag, Value};
use geolens::application::LocationResolver;
use geolens::infrastructure::PlaceholderEstimator;
use geolens::media::ScratchSpace;
use image_rs::{DynamicImage, ImageFormat, Rgb, RgbImage};

/// Encodes a small JPEG without any EXIF segment.
pub fn plain_jpeg() -> Vec<u8> {
    let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(16, 16, Rgb([30, 120, 60])));
    let mut bytes = Cursor::new(Vec::new());
    image
        .write_to(&mut bytes, ImageFormat::Jpeg)
        .expect("Failed to encode JPEG");
    bytes.into_inner()
}

fn rationals(parts: &[(u32, u32)]) -> Value {
    Value::Rational(parts.iter().map(|&(num, denom)| Rational { num, denom }).collect())
}

fn ascii(text: &str) -> Value {
    Value::Ascii(vec![text.as_bytes().to_vec()])
}

/// Serializes `fields` into a TIFF structure and embeds it as an APP1
/// segment right after the JPEG SOI marker.
pub fn jpeg_with_fields(fields: &[Field]) -> Vec<u8> {
    let make = Field {
        tag: Tag::Make,
        ifd_num: In::PRIMARY,
        value: ascii("geolens"),
    };
    let mut writer = Writer::new();
    writer.push_field(&make);
    for field in fields {
        writer.push_field(field);
    }
    let mut tiff = Cursor::new(Vec::new());
    writer
        .write(&mut tiff, false)
        .expect("Failed to write EXIF block");
    let tiff = tiff.into_inner();

    let mut payload = b"Exif\0\0".to_vec();
    payload.extend_from_slice(&tiff);
    let segment_len = u16::try_from(payload.len() + 2).expect("EXIF block fits in one segment");

    let jpeg = plain_jpeg();
    let mut out = Vec::with_capacity(jpeg.len() + payload.len() + 4);
    out.extend_from_slice(&jpeg[..2]);
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&segment_len.to_be_bytes());
    out.extend_from_slice(&payload);
    out.extend_from_slice(&jpeg[2..]);
    out
}

fn field(tag: Tag, value: Value) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value,
    }
}

/// A JPEG tagged 40°42'30"N 74°0'21"W.
pub fn new_york_jpeg() -> Vec<u8> {
    jpeg_with_fields(&[
        field(Tag::GPSLatitudeRef, ascii("N")),
        field(Tag::GPSLatitude, rationals(&[(40, 1), (42, 1), (30, 1)])),
        field(Tag::GPSLongitudeRef, ascii("W")),
        field(Tag::GPSLongitude, rationals(&[(74, 1), (0, 1), (21, 1)])),
    ])
}

/// The New York fixture plus an altitude of 10.5 m and a map datum.
pub fn new_york_jpeg_with_extras() -> Vec<u8> {
    jpeg_with_fields(&[
        field(Tag::GPSLatitudeRef, ascii("N")),
        field(Tag::GPSLatitude, rationals(&[(40, 1), (42, 1), (30, 1)])),
        field(Tag::GPSLongitudeRef, ascii("W")),
        field(Tag::GPSLongitude, rationals(&[(74, 1), (0, 1), (21, 1)])),
        field(Tag::GPSAltitude, rationals(&[(21, 2)])),
        field(Tag::GPSMapDatum, ascii("WGS-84")),
    ])
}

/// A JPEG tagged 33°51'54"S 151°12'36"E.
pub fn sydney_jpeg() -> Vec<u8> {
    jpeg_with_fields(&[
        field(Tag::GPSLatitudeRef, ascii("S")),
        field(Tag::GPSLatitude, rationals(&[(33, 1), (51, 1), (54, 1)])),
        field(Tag::GPSLongitudeRef, ascii("E")),
        field(Tag::GPSLongitude, rationals(&[(151, 1), (12, 1), (36, 1)])),
    ])
}

/// A JPEG whose latitude is stored as two-component text.
pub fn malformed_text_dms_jpeg() -> Vec<u8> {
    jpeg_with_fields(&[
        field(Tag::GPSLatitudeRef, ascii("N")),
        field(Tag::GPSLatitude, ascii("40, 42")),
        field(Tag::GPSLongitudeRef, ascii("W")),
        field(Tag::GPSLongitude, ascii("74, 0")),
    ])
}

/// A JPEG carrying only hemisphere references.
pub fn refs_only_jpeg() -> Vec<u8> {
    jpeg_with_fields(&[
        field(Tag::GPSLatitudeRef, ascii("N")),
        field(Tag::GPSLongitudeRef, ascii("W")),
    ])
}

/// Resolver with an instant placeholder estimator staging into `scratch`.
pub fn resolver_in(scratch: &std::path::Path) -> LocationResolver {
    LocationResolver::new(Arc::new(PlaceholderEstimator::new(Duration::ZERO)))
        .with_scratch(ScratchSpace::in_dir(scratch))
}

pub fn entry_count(dir: &std::path::Path) -> usize {
    std::fs::read_dir(dir)
        .map(|entries| entries.count())
        .unwrap_or(0)
}
