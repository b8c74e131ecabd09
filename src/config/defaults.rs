// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Upload**: Size limit enforced by the validator
//! - **Extraction**: Accuracy reported for EXIF fixes
//! - **Estimator**: Artificial latency of the placeholder estimator
//! - **Diagnostics**: Event buffer size

use crate::domain::diagnostics::buffer_capacity_bounds;

// ==========================================================================
// Upload Defaults
// ==========================================================================

/// Hard upper limit on upload size (10 MiB). Configuration may lower it,
/// never raise it.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Default upload size limit.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = MAX_UPLOAD_BYTES;

/// Number of leading bytes the validator inspects.
pub const SIGNATURE_PROBE_LEN: usize = 12;

// ==========================================================================
// Extraction Defaults
// ==========================================================================

/// Accuracy attached to EXIF fixes. Metadata rarely carries a real
/// horizontal error, so a fixed value is reported.
pub const DEFAULT_EXIF_ACCURACY_METERS: f64 = 5.0;

// ==========================================================================
// Estimator Defaults
// ==========================================================================

/// Simulated inference time of the placeholder estimator.
pub const DEFAULT_ESTIMATOR_DELAY_MS: u64 = 2_000;

/// Upper bound accepted for the simulated delay.
pub const MAX_ESTIMATOR_DELAY_MS: u64 = 60_000;

/// Message carried by the placeholder estimate.
pub const PLACEHOLDER_ESTIMATE_MESSAGE: &str = "No GPS data found in image. This is a placeholder - real AI estimation would analyze image content.";

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Default number of diagnostic events retained.
pub const DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY: usize = buffer_capacity_bounds::DEFAULT;

/// Minimum number of diagnostic events retained.
pub const MIN_DIAGNOSTICS_BUFFER_CAPACITY: usize = buffer_capacity_bounds::MIN;

/// Maximum number of diagnostic events retained.
pub const MAX_DIAGNOSTICS_BUFFER_CAPACITY: usize = buffer_capacity_bounds::MAX;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(DEFAULT_MAX_UPLOAD_BYTES <= MAX_UPLOAD_BYTES);
    assert!(SIGNATURE_PROBE_LEN >= 12);

    assert!(DEFAULT_EXIF_ACCURACY_METERS > 0.0);

    assert!(DEFAULT_ESTIMATOR_DELAY_MS <= MAX_ESTIMATOR_DELAY_MS);

    assert!(MIN_DIAGNOSTICS_BUFFER_CAPACITY > 0);
    assert!(MAX_DIAGNOSTICS_BUFFER_CAPACITY >= MIN_DIAGNOSTICS_BUFFER_CAPACITY);
    assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY >= MIN_DIAGNOSTICS_BUFFER_CAPACITY);
    assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY <= MAX_DIAGNOSTICS_BUFFER_CAPACITY);
};
