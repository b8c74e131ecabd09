// SPDX-License-Identifier: MPL-2.0
//! Shared helpers for unit tests.

use std::io::Cursor;

use image_rs::{DynamicImage, ImageFormat, Rgb, RgbImage};

/// A small real JPEG with no metadata segment besides JFIF.
pub fn plain_jpeg() -> Vec<u8> {
    encode(ImageFormat::Jpeg)
}

/// A small real PNG with no metadata chunks.
pub fn plain_png() -> Vec<u8> {
    encode(ImageFormat::Png)
}

fn encode(format: ImageFormat) -> Vec<u8> {
    let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, Rgb([90, 140, 200])));
    let mut bytes = Cursor::new(Vec::new());
    image
        .write_to(&mut bytes, format)
        .expect("encoding an in-memory test image succeeds");
    bytes.into_inner()
}
