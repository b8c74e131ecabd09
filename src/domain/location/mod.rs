// SPDX-License-Identifier: MPL-2.0
//! Location domain types.
//!
//! - [`ImageBlob`]: the uploaded bytes and what the client declared about them
//! - [`AngleReference`], [`DmsAngle`], [`to_decimal_degrees`]: sexagesimal
//!   angle conversion
//! - [`DmsSource`], [`GpsReading`]: decoder output before conversion
//! - [`GpsFix`], [`EstimateResult`], [`LocationResult`]: pipeline output

mod angle;
mod blob;
mod dms;
mod types;

pub use angle::{to_decimal_degrees, AngleReference, DmsAngle};
pub use blob::ImageBlob;
pub use dms::{DmsSource, GpsReading};
pub use types::{EstimateResult, GpsFix, LocationResult, LocationSource, RawGpsTags};
