// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types for the location pipeline.
//!
//! Each resolution produces a short trail of events: an optional validation
//! rejection, one [`DiagnosticEventKind::StrategyAttempt`] per metadata
//! strategy tried, an optional estimator fallback and a completion or failure
//! event.

use std::time::Instant;

use serde::{Deserialize, Serialize};

/// Severity of a diagnostic event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Debug,
    Info,
    Warning,
    Error,
}

/// What a single metadata strategy produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum StrategyOutcome {
    /// A usable coordinate was found.
    Fix,
    /// The strategy ran but found no usable GPS tags.
    NoGps {
        /// Number of GPS tags seen, usable or not.
        gps_tags: usize,
    },
    /// The decoder failed; treated as no GPS.
    Failed {
        /// Sanitized failure description.
        message: String,
    },
}

/// A diagnostic event with its capture time.
#[derive(Debug, Clone)]
pub struct DiagnosticEvent {
    /// When the event occurred (monotonic clock for relative timestamps)
    pub timestamp: Instant,
    pub level: Level,
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    /// Creates an event stamped now, with the level implied by its kind.
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self::with_timestamp(kind, Instant::now())
    }

    #[must_use]
    pub fn with_timestamp(kind: DiagnosticEventKind, timestamp: Instant) -> Self {
        Self {
            timestamp,
            level: kind.level(),
            kind,
        }
    }
}

/// The type and data of a diagnostic event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    /// The upload failed validation.
    ValidationRejected {
        /// Stable error code such as `too_large`.
        code: String,
        /// Message returned to the client.
        reason: String,
    },

    /// One metadata decoding strategy was attempted.
    StrategyAttempt {
        strategy: String,
        outcome: StrategyOutcome,
    },

    /// No fix was found and the estimator was consulted.
    EstimatorFallback {
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },

    /// A resolution finished successfully.
    ResolutionCompleted {
        /// `EXIF` or `ESTIMATE`.
        source: String,
        elapsed_ms: u64,
    },

    /// The produced result did not match the response schema.
    ResultShapeRejected { problems: Vec<String> },

    /// An unexpected failure aborted a resolution.
    InternalFailure { message: String },

    /// Anything else worth recording.
    Warning { message: String },
}

impl DiagnosticEventKind {
    /// Default severity for this kind of event.
    #[must_use]
    pub fn level(&self) -> Level {
        match self {
            Self::StrategyAttempt { outcome, .. } => match outcome {
                StrategyOutcome::Fix => Level::Info,
                StrategyOutcome::NoGps { .. } => Level::Debug,
                StrategyOutcome::Failed { .. } => Level::Warning,
            },
            Self::ValidationRejected { .. }
            | Self::EstimatorFallback { .. }
            | Self::ResolutionCompleted { .. } => Level::Info,
            Self::Warning { .. } => Level::Warning,
            Self::ResultShapeRejected { .. } | Self::InternalFailure { .. } => Level::Error,
        }
    }

    /// Snake-case name of the kind, as used in reports.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::ValidationRejected { .. } => "validation_rejected",
            Self::StrategyAttempt { .. } => "strategy_attempt",
            Self::EstimatorFallback { .. } => "estimator_fallback",
            Self::ResolutionCompleted { .. } => "resolution_completed",
            Self::ResultShapeRejected { .. } => "result_shape_rejected",
            Self::InternalFailure { .. } => "internal_failure",
            Self::Warning { .. } => "warning",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_levels_follow_outcome() {
        let failed = DiagnosticEventKind::StrategyAttempt {
            strategy: "kamadak-exif".into(),
            outcome: StrategyOutcome::Failed {
                message: "truncated IFD".into(),
            },
        };
        assert_eq!(failed.level(), Level::Warning);

        let none = DiagnosticEventKind::StrategyAttempt {
            strategy: "kamadak-exif".into(),
            outcome: StrategyOutcome::NoGps { gps_tags: 0 },
        };
        assert_eq!(none.level(), Level::Debug);
    }

    #[test]
    fn new_event_takes_level_from_kind() {
        let event = DiagnosticEvent::new(DiagnosticEventKind::InternalFailure {
            message: "boom".into(),
        });
        assert_eq!(event.level, Level::Error);
    }

    #[test]
    fn kind_serializes_with_type_tag() {
        let kind = DiagnosticEventKind::StrategyAttempt {
            strategy: "little_exif".into(),
            outcome: StrategyOutcome::Fix,
        };
        let json = serde_json::to_string(&kind).expect("serialize");
        assert!(json.contains("\"type\":\"strategy_attempt\""));
        assert!(json.contains("\"result\":\"fix\""));
        assert_eq!(kind.name(), "strategy_attempt");
    }

    #[test]
    fn estimator_fallback_omits_missing_error() {
        let kind = DiagnosticEventKind::EstimatorFallback { error: None };
        let json = serde_json::to_string(&kind).expect("serialize");
        assert_eq!(json, r#"{"type":"estimator_fallback"}"#);
    }

    #[test]
    fn levels_are_ordered_by_severity() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Warning < Level::Error);
    }
}
