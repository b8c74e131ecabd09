// SPDX-License-Identifier: MPL-2.0
//! Location resolution use case.
//!
//! [`LocationResolver`] runs validate → extract → (estimate) → shape check
//! for one upload. It holds no per-request state, so a single instance can
//! serve any number of concurrent resolutions; the only per-call resource is
//! the scratch file staged for the estimator, which is released when the
//! call returns on any path.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use crate::application::port::Estimator;
use crate::application::schema::{check_shape, ResultPayload};
use crate::config::Config;
use crate::diagnostics::DiagnosticsHandle;
use crate::domain::error::ProcessingError;
use crate::domain::location::{ImageBlob, LocationResult};
use crate::infrastructure::PlaceholderEstimator;
use crate::media::{FileValidator, ImageKind, MetadataGpsExtractor, ScratchSpace};

/// Orchestrates the location pipeline for single uploads.
pub struct LocationResolver {
    validator: FileValidator,
    extractor: MetadataGpsExtractor,
    estimator: Arc<dyn Estimator>,
    scratch: ScratchSpace,
    diagnostics: Option<DiagnosticsHandle>,
}

impl LocationResolver {
    /// Resolver with default validation and extraction and the given
    /// estimator, staging into the system temporary directory.
    #[must_use]
    pub fn new(estimator: Arc<dyn Estimator>) -> Self {
        Self {
            validator: FileValidator::new(),
            extractor: MetadataGpsExtractor::new(),
            estimator,
            scratch: ScratchSpace::system(),
            diagnostics: None,
        }
    }

    /// Resolver configured from settings, using the placeholder estimator.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let scratch = match &config.scratch.dir {
            Some(dir) => ScratchSpace::in_dir(dir),
            None => ScratchSpace::system(),
        };
        Self {
            validator: FileValidator::from_config(&config.upload),
            extractor: MetadataGpsExtractor::new()
                .with_accuracy(config.extraction.exif_accuracy_meters),
            estimator: Arc::new(PlaceholderEstimator::from_config(&config.estimator)),
            scratch,
            diagnostics: None,
        }
    }

    #[must_use]
    pub fn with_validator(mut self, validator: FileValidator) -> Self {
        self.validator = validator;
        self
    }

    /// Replaces the extractor. A diagnostics handle already set on the
    /// resolver is forwarded to it.
    #[must_use]
    pub fn with_extractor(mut self, extractor: MetadataGpsExtractor) -> Self {
        self.extractor = match &self.diagnostics {
            Some(handle) => extractor.with_diagnostics(handle.clone()),
            None => extractor,
        };
        self
    }

    #[must_use]
    pub fn with_estimator(mut self, estimator: Arc<dyn Estimator>) -> Self {
        self.estimator = estimator;
        self
    }

    #[must_use]
    pub fn with_scratch(mut self, scratch: ScratchSpace) -> Self {
        self.scratch = scratch;
        self
    }

    /// Sends pipeline events, including per-strategy attempts, to `handle`.
    #[must_use]
    pub fn with_diagnostics(mut self, handle: DiagnosticsHandle) -> Self {
        self.extractor = self.extractor.with_diagnostics(handle.clone());
        self.diagnostics = Some(handle);
        self
    }

    /// Resolves a location for one upload.
    ///
    /// # Errors
    ///
    /// - [`ProcessingError::Invalid`] if the upload fails validation
    /// - [`ProcessingError::InvalidResultShape`] if the result does not match
    ///   the response schema
    /// - [`ProcessingError::Internal`] if staging fails or the estimator
    ///   panics
    pub fn resolve(&self, blob: &ImageBlob) -> Result<LocationResult, ProcessingError> {
        let started = Instant::now();

        let kind = self.validator.validate(blob).map_err(|err| {
            if let Some(diagnostics) = &self.diagnostics {
                diagnostics.log_validation_rejected(&err);
            }
            ProcessingError::Invalid(err)
        })?;

        let result = match self.extractor.extract(blob) {
            Some(fix) => LocationResult::Exif(fix),
            None => LocationResult::Estimate(self.estimate(blob, kind)?),
        };

        if let Err(problems) = check_shape(&ResultPayload::from(&result)) {
            if let Some(diagnostics) = &self.diagnostics {
                diagnostics.log_shape_rejected(&problems);
            }
            return Err(ProcessingError::InvalidResultShape(problems));
        }

        if let Some(diagnostics) = &self.diagnostics {
            diagnostics.log_resolution_completed(result.source(), started.elapsed());
        }
        Ok(result)
    }

    /// Runs [`resolve`](Self::resolve) on the blocking thread pool.
    ///
    /// Dropping the returned future abandons the resolution; nothing shared
    /// needs unwinding.
    ///
    /// # Errors
    ///
    /// Same as [`resolve`](Self::resolve); a failed blocking task is reported
    /// as [`ProcessingError::Internal`].
    pub async fn resolve_async(
        self: Arc<Self>,
        blob: ImageBlob,
    ) -> Result<LocationResult, ProcessingError> {
        let resolver = Arc::clone(&self);
        tokio::task::spawn_blocking(move || resolver.resolve(&blob))
            .await
            .map_err(|err| self.internal(format!("resolution task failed: {err}")))?
    }

    fn estimate(
        &self,
        blob: &ImageBlob,
        kind: ImageKind,
    ) -> Result<crate::domain::location::EstimateResult, ProcessingError> {
        let staged = self
            .scratch
            .stage(blob.bytes(), Some(kind.extension()))
            .map_err(|err| self.internal(format!("could not stage upload: {err}")))?;

        let estimate = panic::catch_unwind(AssertUnwindSafe(|| {
            self.estimator.estimate(staged.path())
        }))
        .map_err(|_| self.internal("estimator panicked"))?;

        if let Some(diagnostics) = &self.diagnostics {
            diagnostics.log_estimator_fallback(estimate.error.as_deref());
        }
        Ok(estimate)
    }

    fn internal(&self, message: impl Into<String>) -> ProcessingError {
        let message = message.into();
        if let Some(diagnostics) = &self.diagnostics {
            diagnostics.log_internal_failure(&message);
        }
        ProcessingError::Internal(message)
    }
}
