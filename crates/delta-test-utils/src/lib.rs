//! Shared test fixtures and utilities for the delta crates.
//!
//! Provides reference geometries and deterministic RNG helpers for
//! property-style kinematics tests.

pub mod geometry;
pub mod rng;

// ---------------------------------------------------------------------------
// Re-exports for convenience
// ---------------------------------------------------------------------------

pub use geometry::{equilateral_geometry, reference_geometry};
pub use rng::{random_joint_angles, seeded_rng};
