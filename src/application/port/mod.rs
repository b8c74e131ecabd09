// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! These traits use only domain types, so the resolver stays independent of
//! the metadata libraries and of whatever produces estimates.
//!
//! # Available Ports
//!
//! - [`estimator`]: Content-based location estimation
//! - [`metadata`]: GPS metadata decoding strategies
//!
//! # Design Notes
//!
//! - Traits are `Send + Sync`; one instance serves concurrent resolutions
//! - No `async fn`; the resolver moves blocking work off the runtime itself

pub mod estimator;
pub mod metadata;

pub use estimator::Estimator;
pub use metadata::{GpsReader, MetadataError};
