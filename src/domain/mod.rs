// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core types with ZERO external dependencies.
//!
//! This module contains pure value objects and the arithmetic that operates
//! on them. It has no dependencies on external crates (except `std`) so it
//! can be tested in isolation.
//!
//! # Modules
//!
//! - [`diagnostics`]: Diagnostics types ([`BufferCapacity`](diagnostics::BufferCapacity))
//! - [`error`]: Domain error types ([`ValidationError`](error::ValidationError),
//!   [`ProcessingError`](error::ProcessingError))
//! - [`location`]: Location types ([`ImageBlob`](location::ImageBlob),
//!   [`GpsFix`](location::GpsFix), [`LocationResult`](location::LocationResult))
//!   and DMS conversion

pub mod diagnostics;
pub mod error;
pub mod location;
