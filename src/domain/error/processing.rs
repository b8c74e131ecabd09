// SPDX-License-Identifier: MPL-2.0
//! Errors reported by a location resolution.

use std::fmt;

use super::ValidationError;

/// Failure of a whole resolution.
///
/// Metadata parsing problems never appear here: they degrade to "no GPS"
/// and the estimator takes over. Estimator failures are data inside the
/// estimate, not errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessingError {
    /// The upload failed validation.
    Invalid(ValidationError),

    /// The produced result does not match the declared result shape.
    InvalidResultShape(Vec<String>),

    /// Unexpected failure (staging I/O, worker panic, ...).
    Internal(String),
}

impl ProcessingError {
    /// HTTP status class the boundary should report.
    #[must_use]
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Invalid(_) => 400,
            Self::InvalidResultShape(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns `true` if the caller can fix the problem by changing the upload.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }
}

impl fmt::Display for ProcessingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid(reason) => write!(f, "{reason}"),
            Self::InvalidResultShape(problems) => {
                write!(f, "Invalid result format: {}", problems.join("; "))
            }
            Self::Internal(msg) => write!(f, "Processing failed: {msg}"),
        }
    }
}

impl std::error::Error for ProcessingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Invalid(reason) => Some(reason),
            Self::InvalidResultShape(_) | Self::Internal(_) => None,
        }
    }
}

impl From<ValidationError> for ProcessingError {
    fn from(err: ValidationError) -> Self {
        Self::Invalid(err)
    }
}
