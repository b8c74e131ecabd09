// SPDX-License-Identifier: MPL-2.0
//! Image byte handling: validation, GPS metadata decoding and scratch
//! staging.
//!
//! Nothing here decodes pixel data; only container headers and metadata
//! segments are read.

pub mod gps;
pub mod scratch;
pub mod validation;

pub use gps::{KamadakGpsReader, LittleExifGpsReader, MetadataGpsExtractor};
pub use scratch::{ScratchSpace, StagedImage};
pub use validation::{FileValidator, ImageKind};
