// SPDX-License-Identifier: MPL-2.0
//! Structured diagnostics for the location pipeline.
//!
//! Events describing validation, each metadata strategy attempt and the
//! final outcome are sent through a [`DiagnosticsHandle`] and kept in a
//! memory-bounded [`CircularBuffer`] owned by a [`DiagnosticsCollector`],
//! which can export them as a JSON report.
//!
//! Diagnostics never influence control flow: a resolver without a handle
//! behaves identically.
//!
//! # Privacy
//!
//! Free-form messages are passed through [`sanitize_message`], which replaces
//! filesystem paths with `<path>`.

mod buffer;
mod collector;
mod events;
mod export;
mod report;
mod sanitizer;

pub use buffer::{BufferCapacity, CircularBuffer};
pub use collector::{DiagnosticsCollector, DiagnosticsHandle};
pub use events::{DiagnosticEvent, DiagnosticEventKind, Level, StrategyOutcome};
pub use export::{write_atomic, ExportError};
pub use report::{DiagnosticReport, ReportMetadata, ReportSummary, SerializableEvent};
pub use sanitizer::sanitize_message;
