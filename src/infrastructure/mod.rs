// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! Concrete implementations of the port traits defined in
//! `application::port` that are not metadata decoders (those live in
//! [`crate::media::gps`]).
//!
//! # Available Adapters
//!
//! - [`estimator`]: Placeholder location estimator (implements [`Estimator`])
//!
//! [`Estimator`]: crate::application::port::Estimator

pub mod estimator;

pub use estimator::PlaceholderEstimator;
