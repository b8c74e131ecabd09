// SPDX-License-Identifier: MPL-2.0
//! Upload validation errors.

use std::fmt;

const MIB: u64 = 1024 * 1024;

/// Content types accepted for upload, in the order they are reported.
pub const ALLOWED_CONTENT_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

/// Reasons an upload is rejected before any parsing.
///
/// Every variant is user-correctable. Display messages carry a stable
/// keyword ("exceeds", "not allowed", "Invalid file format") that clients
/// match on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The declared size is above the limit.
    TooLarge {
        /// Declared size in bytes.
        size: u64,
        /// Limit in bytes.
        limit: u64,
    },

    /// The declared content type is not an accepted image type.
    UnsupportedType(String),

    /// The leading bytes match no known image signature.
    CorruptOrUnknownFormat,
}

impl ValidationError {
    /// Short machine-readable code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::TooLarge { .. } => "too_large",
            Self::UnsupportedType(_) => "unsupported_type",
            Self::CorruptOrUnknownFormat => "corrupt_or_unknown_format",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooLarge { limit, .. } if limit % MIB == 0 => {
                write!(f, "File size exceeds {} MB limit", limit / MIB)
            }
            Self::TooLarge { limit, .. } => {
                write!(f, "File size exceeds {limit} byte limit")
            }
            Self::UnsupportedType(content_type) => write!(
                f,
                "File type {content_type} not allowed. Allowed types: {}",
                ALLOWED_CONTENT_TYPES.join(", ")
            ),
            Self::CorruptOrUnknownFormat => write!(f, "Invalid file format or corrupted file"),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_large_mentions_exceeds_and_limit() {
        let err = ValidationError::TooLarge {
            size: 11 * 1024 * 1024,
            limit: 10 * 1024 * 1024,
        };
        assert_eq!(err.to_string(), "File size exceeds 10 MB limit");
        assert_eq!(err.code(), "too_large");
    }

    #[test]
    fn odd_limit_is_reported_in_bytes() {
        let err = ValidationError::TooLarge {
            size: 2048,
            limit: 1000,
        };
        assert_eq!(err.to_string(), "File size exceeds 1000 byte limit");
    }

    #[test]
    fn unsupported_type_mentions_not_allowed() {
        let err = ValidationError::UnsupportedType("text/plain".to_string());
        let message = err.to_string();
        assert!(message.contains("text/plain"));
        assert!(message.contains("not allowed"));
        assert!(message.contains("image/jpeg, image/png, image/webp"));
    }

    #[test]
    fn corrupt_mentions_invalid_file_format() {
        let message = ValidationError::CorruptOrUnknownFormat.to_string();
        assert!(message.contains("Invalid file format"));
    }
}
