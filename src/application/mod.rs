// SPDX-License-Identifier: MPL-2.0
//! Application layer - use cases and orchestration.
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//! - [`resolver`]: The location resolution use case
//! - [`schema`]: Wire shape of a result and its conformance check
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Adapters in `media` and `infrastructure` implement application ports
//! - The `boundary` module and the binary drive the resolver

pub mod port;
pub mod resolver;
pub mod schema;

pub use resolver::LocationResolver;
pub use schema::{check_shape, ResultPayload};
