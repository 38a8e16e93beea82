//! Shared primitives: error type, geometry/frame types, numeric helpers.

/// Geometry and frame primitives.
pub mod core;
/// Crate error type.
pub mod error;
/// Finite-safe numeric helpers.
pub(crate) mod math;
