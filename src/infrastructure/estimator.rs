// SPDX-License-Identifier: MPL-2.0
//! Placeholder adapter implementing the [`Estimator`] port.
//!
//! [`Estimator`]: crate::application::port::Estimator

use std::path::Path;
use std::thread;
use std::time::Duration;

use crate::application::port::Estimator;
use crate::config::{EstimatorConfig, PLACEHOLDER_ESTIMATE_MESSAGE};
use crate::domain::location::EstimateResult;

/// Stand-in for content-based estimation.
///
/// Sleeps for the configured delay to mimic inference latency, then reports
/// a null estimate (`0.0, 0.0`, confidence `0.0`) with an explanatory error.
/// The staged image is never opened.
#[derive(Debug, Clone)]
pub struct PlaceholderEstimator {
    delay: Duration,
}

impl Default for PlaceholderEstimator {
    fn default() -> Self {
        Self::from_config(&EstimatorConfig::default())
    }
}

impl PlaceholderEstimator {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    #[must_use]
    pub fn from_config(config: &EstimatorConfig) -> Self {
        Self::new(Duration::from_millis(config.effective_delay_ms()))
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Estimator for PlaceholderEstimator {
    fn estimate(&self, _image: &Path) -> EstimateResult {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        EstimateResult::unavailable(PLACEHOLDER_ESTIMATE_MESSAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn returns_null_estimate_with_error() {
        let result = PlaceholderEstimator::new(Duration::ZERO).estimate(Path::new("unused.jpg"));
        assert_eq!(result.latitude, 0.0);
        assert_eq!(result.longitude, 0.0);
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.error.as_deref(), Some(PLACEHOLDER_ESTIMATE_MESSAGE));
    }

    #[test]
    fn waits_for_configured_delay() {
        let estimator = PlaceholderEstimator::new(Duration::from_millis(30));
        let started = Instant::now();
        estimator.estimate(Path::new("unused.jpg"));
        assert!(started.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn default_delay_is_two_seconds() {
        assert_eq!(PlaceholderEstimator::default().delay(), Duration::from_secs(2));
    }

    #[test]
    fn config_delay_is_capped() {
        let config = EstimatorConfig {
            delay_ms: u64::MAX,
        };
        assert_eq!(
            PlaceholderEstimator::from_config(&config).delay(),
            Duration::from_millis(crate::config::MAX_ESTIMATOR_DELAY_MS)
        );
    }
}
