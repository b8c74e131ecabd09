// SPDX-License-Identifier: MPL-2.0
//! Domain error types.
//!
//! This module provides pure domain error types that are independent
//! of external crates and infrastructure concerns.

mod processing;
mod validation;

pub use processing::ProcessingError;
pub use validation::{ValidationError, ALLOWED_CONTENT_TYPES};
