// SPDX-License-Identifier: MPL-2.0
//! Persistable summary of one processed upload.
//!
//! The crate never stores records; it only produces values in the shape the
//! surrounding system persists.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use crate::domain::location::{LocationResult, RawGpsTags};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadRecord {
    #[serde(serialize_with = "serialize_rfc3339")]
    pub created_at: DateTime<Utc>,
    pub file_name: String,
    pub file_size: u64,
    /// `EXIF` or `ESTIMATE`.
    pub result_type: String,
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: Option<f64>,
    pub confidence: Option<f64>,
    pub exif_data: Option<RawGpsTags>,
}

impl UploadRecord {
    /// Builds a record stamped with the current time.
    #[must_use]
    pub fn new(file_name: impl Into<String>, file_size: u64, result: &LocationResult) -> Self {
        Self::with_timestamp(file_name, file_size, result, Utc::now())
    }

    #[must_use]
    pub fn with_timestamp(
        file_name: impl Into<String>,
        file_size: u64,
        result: &LocationResult,
        created_at: DateTime<Utc>,
    ) -> Self {
        let (accuracy, confidence, exif_data) = match result {
            LocationResult::Exif(fix) => (
                fix.accuracy_meters(),
                None,
                Some(fix.raw_tags().clone()),
            ),
            LocationResult::Estimate(estimate) => (None, Some(estimate.confidence), None),
        };
        Self {
            created_at,
            file_name: file_name.into(),
            file_size,
            result_type: result.source().as_str().to_string(),
            latitude: result.latitude(),
            longitude: result.longitude(),
            accuracy,
            confidence,
            exif_data,
        }
    }
}

fn serialize_rfc3339<S: Serializer>(
    value: &DateTime<Utc>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_rfc3339())
}
