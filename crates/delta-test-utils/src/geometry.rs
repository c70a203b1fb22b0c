//! Geometry fixtures.

use delta_core::GeometryConfig;

/// The reference robot: `e=115, f=457.3, re=232, rf=112`.
pub fn reference_geometry() -> GeometryConfig {
    GeometryConfig::new(457.3, 115.0, 112.0, 232.0)
}

/// Base and effector of equal size, upper and lower arms of equal length.
pub fn equilateral_geometry(side: f64, arm: f64) -> GeometryConfig {
    GeometryConfig::new(side, side, arm, arm)
}
