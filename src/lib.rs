// SPDX-License-Identifier: MPL-2.0
//! `geolens` finds a best-effort geographic location for an uploaded image.
//!
//! Uploads are validated (size, declared type, file signature), then the
//! embedded EXIF GPS block is read through a chain of independent metadata
//! decoders. When no decoder yields a usable fix, an estimator is consulted.
//! Every result is checked against the response shape before leaving the
//! crate.

#![doc(html_root_url = "https://docs.rs/geolens/0.1.0")]

pub mod application;
pub mod boundary;
pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod media;
pub mod paths;

#[cfg(test)]
mod test_utils;
