// SPDX-License-Identifier: MPL-2.0
//! Location estimation port.
//!
//! The [`Estimator`] is consulted only when an image carries no usable GPS
//! metadata. Implementations may be slow (real inference, remote calls) and
//! are not assumed to be deterministic.

use crate::domain::location::EstimateResult;
use std::path::Path;

/// Port for content-based location estimation.
///
/// Failures are reported inside the returned [`EstimateResult`] through its
/// `error` field; the call itself is infallible so the resolver always gets a
/// result back.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; the resolver may call the same
/// estimator from several blocking tasks at once.
pub trait Estimator: Send + Sync {
    /// Estimates where the staged image was taken.
    ///
    /// `image` is a readable file that lives at least until this call
    /// returns.
    fn estimate(&self, image: &Path) -> EstimateResult;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    struct FixedEstimator;

    impl Estimator for FixedEstimator {
        fn estimate(&self, _image: &Path) -> EstimateResult {
            EstimateResult {
                latitude: 48.8566,
                longitude: 2.3522,
                confidence: 0.4,
                error: None,
            }
        }
    }

    #[test]
    fn estimator_is_shareable_across_threads() {
        let estimator: Arc<dyn Estimator> = Arc::new(FixedEstimator);
        let handle = {
            let estimator = Arc::clone(&estimator);
            std::thread::spawn(move || estimator.estimate(Path::new("unused")))
        };
        let result = handle.join().expect("thread");
        assert_eq!(result.confidence, 0.4);
        assert!(result.error.is_none());
    }
}
