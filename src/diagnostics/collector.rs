// SPDX-License-Identifier: MPL-2.0
//! Diagnostics collector for aggregating and storing pipeline events.
//!
//! Resolutions run on worker threads and report through a
//! [`DiagnosticsHandle`]; the owner of the [`DiagnosticsCollector`] drains the
//! channel into a bounded buffer and exports it on demand.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use crossbeam_channel::{bounded, Receiver, Sender};

use super::export::{write_atomic, ExportError};
use super::{
    sanitize_message, BufferCapacity, CircularBuffer, DiagnosticEvent, DiagnosticEventKind,
    DiagnosticReport, ReportMetadata, ReportSummary, SerializableEvent, StrategyOutcome,
};
use crate::domain::error::ValidationError;
use crate::domain::location::LocationSource;

/// Channel capacity between handles and the collector.
const DEFAULT_CHANNEL_CAPACITY: usize = 1_024;

/// Handle for sending diagnostic events to the collector.
///
/// Cheap to clone and safe to share across threads. Sends never block: when
/// the channel is full, or the collector is gone, the event is dropped.
#[derive(Clone, Debug)]
pub struct DiagnosticsHandle {
    event_tx: Sender<DiagnosticEvent>,
}

impl DiagnosticsHandle {
    /// Sends an event, dropping it if the channel is full.
    pub fn log(&self, kind: DiagnosticEventKind) {
        let _ = self.event_tx.try_send(DiagnosticEvent::new(kind));
    }

    pub fn log_validation_rejected(&self, error: &ValidationError) {
        self.log(DiagnosticEventKind::ValidationRejected {
            code: error.code().to_string(),
            reason: error.to_string(),
        });
    }

    /// Records one metadata strategy attempt. Failure messages are sanitized.
    pub fn log_strategy_attempt(&self, strategy: &str, outcome: StrategyOutcome) {
        let outcome = match outcome {
            StrategyOutcome::Failed { message } => StrategyOutcome::Failed {
                message: sanitize_message(&message),
            },
            other => other,
        };
        self.log(DiagnosticEventKind::StrategyAttempt {
            strategy: strategy.to_string(),
            outcome,
        });
    }

    pub fn log_estimator_fallback(&self, error: Option<&str>) {
        self.log(DiagnosticEventKind::EstimatorFallback {
            error: error.map(sanitize_message),
        });
    }

    #[allow(clippy::cast_possible_truncation)] // Duration in ms fits comfortably in u64
    pub fn log_resolution_completed(&self, source: LocationSource, elapsed: Duration) {
        self.log(DiagnosticEventKind::ResolutionCompleted {
            source: source.as_str().to_string(),
            elapsed_ms: elapsed.as_millis() as u64,
        });
    }

    pub fn log_shape_rejected(&self, problems: &[String]) {
        self.log(DiagnosticEventKind::ResultShapeRejected {
            problems: problems.to_vec(),
        });
    }

    pub fn log_internal_failure(&self, message: impl AsRef<str>) {
        self.log(DiagnosticEventKind::InternalFailure {
            message: sanitize_message(message.as_ref()),
        });
    }

    pub fn log_warning(&self, message: impl AsRef<str>) {
        self.log(DiagnosticEventKind::Warning {
            message: sanitize_message(message.as_ref()),
        });
    }
}

/// Central collector for diagnostic events.
///
/// Stores events in a memory-bounded circular buffer; the oldest events are
/// evicted once capacity is reached.
pub struct DiagnosticsCollector {
    buffer: CircularBuffer<DiagnosticEvent>,
    event_rx: Receiver<DiagnosticEvent>,
    /// Kept to create handles.
    event_tx: Sender<DiagnosticEvent>,
    /// Monotonic start, for relative event timestamps.
    collection_started_at: Instant,
    /// Wall-clock start, for report metadata.
    collection_started_at_utc: DateTime<Utc>,
}

impl DiagnosticsCollector {
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        let (event_tx, event_rx) = bounded(DEFAULT_CHANNEL_CAPACITY);

        Self {
            buffer: CircularBuffer::new(capacity),
            event_rx,
            event_tx,
            collection_started_at: Instant::now(),
            collection_started_at_utc: Utc::now(),
        }
    }

    #[must_use]
    pub fn handle(&self) -> DiagnosticsHandle {
        DiagnosticsHandle {
            event_tx: self.event_tx.clone(),
        }
    }

    /// Drains the channel into the buffer.
    pub fn process_pending(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.buffer.push(event);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticEvent> {
        self.buffer.iter()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Exports buffered events as a pretty-printed JSON report.
    ///
    /// Call [`process_pending`](Self::process_pending) first to include
    /// events still in the channel.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn export_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.build_report())
    }

    /// Writes the JSON report to `path` atomically.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Io` if file operations fail and
    /// `ExportError::Serialization` if JSON serialization fails.
    pub fn export_to_file(&self, path: impl AsRef<Path>) -> Result<PathBuf, ExportError> {
        let path = path.as_ref();
        let json = self.export_json()?;
        write_atomic(path, &json)?;
        Ok(path.to_path_buf())
    }

    #[allow(clippy::cast_possible_truncation)] // Duration in ms fits comfortably in u64
    fn build_report(&self) -> DiagnosticReport {
        let collection_duration_ms = self.collection_started_at.elapsed().as_millis() as u64;

        let events: Vec<SerializableEvent> = self
            .buffer
            .iter()
            .map(|event| {
                SerializableEvent::new(
                    event.timestamp,
                    self.collection_started_at,
                    event.level,
                    event.kind.clone(),
                )
            })
            .collect();

        DiagnosticReport {
            metadata: ReportMetadata::new(
                self.collection_started_at_utc,
                collection_duration_ms,
                events.len(),
            ),
            summary: ReportSummary::from_events(&events),
            events,
        }
    }
}

impl Default for DiagnosticsCollector {
    fn default() -> Self {
        Self::new(BufferCapacity::default())
    }
}
