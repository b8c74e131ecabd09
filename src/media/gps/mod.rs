// SPDX-License-Identifier: MPL-2.0
//! GPS extraction from embedded image metadata.
//!
//! [`MetadataGpsExtractor`] runs an ordered chain of [`GpsReader`]
//! strategies and returns the first usable fix. Encoders disagree on where
//! and how they store GPS data, so a second, independent decoder catches
//! files the first one cannot read.
//!
//! Decoder errors and panics never leave this module: a failing strategy is
//! recorded as a diagnostic event and the chain moves on.

mod exif_reader;
mod little_exif_reader;

pub use exif_reader::KamadakGpsReader;
pub use little_exif_reader::LittleExifGpsReader;

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::application::port::GpsReader;
use crate::config::DEFAULT_EXIF_ACCURACY_METERS;
use crate::diagnostics::{DiagnosticsHandle, StrategyOutcome};
use crate::domain::location::{GpsFix, ImageBlob};

/// Two-strategy GPS extractor.
pub struct MetadataGpsExtractor {
    strategies: Vec<Box<dyn GpsReader>>,
    accuracy_meters: f64,
    diagnostics: Option<DiagnosticsHandle>,
}

impl Default for MetadataGpsExtractor {
    fn default() -> Self {
        Self::with_strategies(vec![
            Box::new(KamadakGpsReader),
            Box::new(LittleExifGpsReader),
        ])
    }
}

impl MetadataGpsExtractor {
    /// Primary `kamadak-exif` strategy followed by the `little_exif` fallback.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Extractor running `strategies` in order.
    #[must_use]
    pub fn with_strategies(strategies: Vec<Box<dyn GpsReader>>) -> Self {
        Self {
            strategies,
            accuracy_meters: DEFAULT_EXIF_ACCURACY_METERS,
            diagnostics: None,
        }
    }

    /// Sets the accuracy attached to every fix.
    #[must_use]
    pub fn with_accuracy(mut self, accuracy_meters: f64) -> Self {
        self.accuracy_meters = accuracy_meters;
        self
    }

    #[must_use]
    pub fn with_diagnostics(mut self, handle: DiagnosticsHandle) -> Self {
        self.diagnostics = Some(handle);
        self
    }

    /// Names of the strategies, in the order they are tried.
    #[must_use]
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Returns the first fix any strategy produces.
    ///
    /// Later strategies are not attempted once one succeeds. Absence covers
    /// both "no GPS tags" and "metadata could not be decoded".
    #[must_use]
    pub fn extract(&self, blob: &ImageBlob) -> Option<GpsFix> {
        self.strategies
            .iter()
            .find_map(|strategy| self.attempt(strategy.as_ref(), blob.bytes()))
    }

    fn attempt(&self, strategy: &dyn GpsReader, bytes: &[u8]) -> Option<GpsFix> {
        let read = panic::catch_unwind(AssertUnwindSafe(|| strategy.read(bytes)));

        let (fix, outcome) = match read {
            Ok(Ok(Some(reading))) => match reading.to_fix(self.accuracy_meters) {
                Some(fix) => (Some(fix), StrategyOutcome::Fix),
                None => (
                    None,
                    StrategyOutcome::NoGps {
                        gps_tags: reading.raw_tags.len(),
                    },
                ),
            },
            Ok(Ok(None)) => (None, StrategyOutcome::NoGps { gps_tags: 0 }),
            Ok(Err(err)) => (
                None,
                StrategyOutcome::Failed {
                    message: err.to_string(),
                },
            ),
            Err(payload) => (
                None,
                StrategyOutcome::Failed {
                    message: format!("decoder panicked: {}", panic_message(payload.as_ref())),
                },
            ),
        };

        if let Some(diagnostics) = &self.diagnostics {
            diagnostics.log_strategy_attempt(strategy.name(), outcome);
        }
        fix
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic"
    }
}
