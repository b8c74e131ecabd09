// SPDX-License-Identifier: MPL-2.0
//! Serializable diagnostic report.

use std::collections::BTreeMap;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{DiagnosticEventKind, Level};

/// Report header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Random 128-bit identifier, hex encoded.
    pub report_id: String,
    /// When the report was generated (RFC 3339).
    pub generated_at: String,
    pub geolens_version: String,
    /// When collection started (RFC 3339).
    pub collection_started_at: String,
    pub collection_duration_ms: u64,
    pub event_count: usize,
}

impl ReportMetadata {
    #[must_use]
    pub fn new(
        collection_started_at: DateTime<Utc>,
        collection_duration_ms: u64,
        event_count: usize,
    ) -> Self {
        Self {
            report_id: random_report_id(),
            generated_at: Utc::now().to_rfc3339(),
            geolens_version: env!("CARGO_PKG_VERSION").to_string(),
            collection_started_at: collection_started_at.to_rfc3339(),
            collection_duration_ms,
            event_count,
        }
    }
}

fn random_report_id() -> String {
    let mut bytes = [0u8; 16];
    // An all-zero id is still a valid report if the OS source is unavailable.
    let _ = getrandom::fill(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// An event with its time relative to collection start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerializableEvent {
    pub timestamp_ms: u64,
    pub level: Level,
    #[serde(flatten)]
    pub kind: DiagnosticEventKind,
}

impl SerializableEvent {
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // Duration in ms fits comfortably in u64
    pub fn new(
        event_timestamp: Instant,
        collection_start: Instant,
        level: Level,
        kind: DiagnosticEventKind,
    ) -> Self {
        let timestamp_ms = event_timestamp
            .saturating_duration_since(collection_start)
            .as_millis() as u64;
        Self {
            timestamp_ms,
            level,
            kind,
        }
    }
}

/// Aggregates over the reported events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Event count per kind name.
    pub event_counts: BTreeMap<String, usize>,
    pub exif_resolutions: usize,
    pub estimate_resolutions: usize,
    pub failed_strategy_attempts: usize,
}

impl ReportSummary {
    #[must_use]
    pub fn from_events(events: &[SerializableEvent]) -> Self {
        let mut summary = Self::default();
        for event in events {
            *summary
                .event_counts
                .entry(event.kind.name().to_string())
                .or_insert(0) += 1;

            match &event.kind {
                DiagnosticEventKind::ResolutionCompleted { source, .. } => {
                    if source == "EXIF" {
                        summary.exif_resolutions += 1;
                    } else {
                        summary.estimate_resolutions += 1;
                    }
                }
                DiagnosticEventKind::StrategyAttempt { .. } if event.level == Level::Warning => {
                    summary.failed_strategy_attempts += 1;
                }
                _ => {}
            }
        }
        summary
    }
}

/// Full diagnostic report as exported to JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticReport {
    pub metadata: ReportMetadata,
    pub events: Vec<SerializableEvent>,
    pub summary: ReportSummary,
}
