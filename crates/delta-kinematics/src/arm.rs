//! Single-arm angle solver.
//!
//! Each arm moves in its own vertical plane. Once the target is rotated into
//! arm 1's frame (the local YZ-plane), the elbow lies on the intersection of
//! two circles: radius `rf` around the shoulder joint and radius `re` around
//! the effector's wrist attachment (the lower-arm sphere cut by the plane).

use delta_core::geometry::TAN30;
use delta_core::{DegenerateCause, GeometryConfig, KinematicsError, SolveStage};

use crate::quadratic::discriminant_sqrt;

/// Solve the actuator angle (degrees) for a target already expressed in the
/// arm's local frame.
///
/// Of the two elbow positions the outer one is always selected; the inner
/// one folds the arm back through the base.
///
/// # Errors
///
/// - [`KinematicsError::NoSolution`] if the circles do not intersect. The
///   stage is reported as arm 1 (the local frame);
///   [`inverse_kinematics`](crate::inverse_kinematics) relabels it.
/// - [`KinematicsError::Degenerate`] if `z0` is zero relative to the
///   [`length_scale`](GeometryConfig::length_scale) or any input is not
///   finite.
pub fn solve_arm_angle(
    x0: f64,
    y0: f64,
    z0: f64,
    geometry: &GeometryConfig,
) -> Result<f64, KinematicsError> {
    if !(x0.is_finite() && y0.is_finite() && z0.is_finite()) {
        return Err(KinematicsError::Degenerate(DegenerateCause::NonFinite));
    }
    if z0.abs() < f64::EPSILON * geometry.length_scale() {
        return Err(KinematicsError::Degenerate(DegenerateCause::ZeroHeight));
    }

    let rf = geometry.rf();
    let re = geometry.re();

    // Shoulder joint, half the base's inscribed-circle offset (f/2 * tan30)
    let y1 = -0.5 * TAN30 * geometry.f();
    // Shift the target from the effector centre to its edge
    let y0 = y0 - 0.5 * TAN30 * geometry.e();

    // Elbow locus: z = a + b*y
    let a = (x0 * x0 + y0 * y0 + z0 * z0 + rf * rf - re * re - y1 * y1) / (2.0 * z0);
    let b = (y1 - y0) / z0;

    let d = -(a + b * y1) * (a + b * y1) + rf * (b * b * rf + rf);
    let Some(sqrt_d) = discriminant_sqrt(d, rf * rf * (b * b + 1.0)) else {
        tracing::debug!(x0, y0, z0, d, "arm circles do not intersect");
        return Err(KinematicsError::NoSolution {
            stage: SolveStage::Arm(1),
        });
    };

    // Outer elbow
    let yj = (y1 - a * b - sqrt_d) / (b * b + 1.0);
    let zj = a + b * yj;

    let quadrant = if yj > y1 { 180.0 } else { 0.0 };
    let theta = (-zj / (y1 - yj)).atan().to_degrees() + quadrant;

    if !theta.is_finite() {
        return Err(KinematicsError::Degenerate(DegenerateCause::NonFinite));
    }
    tracing::trace!(yj, zj, theta, "arm angle solved");
    Ok(theta)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn reference() -> GeometryConfig {
        GeometryConfig::default()
    }

    /// Rebuild the elbow from the solved angle and check both link lengths.
    fn assert_links_consistent(x0: f64, y0: f64, z0: f64, g: &GeometryConfig) {
        let theta = solve_arm_angle(x0, y0, z0, g).unwrap().to_radians();
        let y1 = -0.5 * TAN30 * g.f();
        let elbow_y = y1 - g.rf() * theta.cos();
        let elbow_z = -g.rf() * theta.sin();

        let wrist_y = y0 - 0.5 * TAN30 * g.e();
        let lower = (x0 * x0 + (wrist_y - elbow_y).powi(2) + (z0 - elbow_z).powi(2)).sqrt();
        assert_relative_eq!(lower, g.re(), epsilon = 1e-9);
    }

    #[test]
    fn centred_target_below_base() {
        let theta = solve_arm_angle(0.0, 0.0, -300.0, &reference()).unwrap();
        assert_relative_eq!(theta, 73.983_218_406, epsilon = 1e-6);
    }

    #[test]
    fn solved_elbow_respects_link_lengths() {
        let g = reference();
        assert_links_consistent(0.0, 0.0, -200.0, &g);
        assert_links_consistent(30.0, -20.0, -250.0, &g);
        assert_links_consistent(-45.0, 15.0, -150.0, &g);
    }

    #[test]
    fn quadrant_correction_past_ninety_degrees() {
        // Deep targets swing the upper arm past vertical
        let theta = solve_arm_angle(0.0, 0.0, -325.0, &reference()).unwrap();
        assert!(theta > 90.0, "expected > 90 deg, got {theta}");
        assert_links_consistent(0.0, 0.0, -325.0, &reference());
    }

    #[test]
    fn unreachable_target() {
        let err = solve_arm_angle(0.0, 0.0, -1000.0, &reference()).unwrap_err();
        assert_eq!(
            err,
            KinematicsError::NoSolution {
                stage: SolveStage::Arm(1)
            }
        );
    }

    #[test]
    fn zero_height_is_degenerate() {
        let err = solve_arm_angle(10.0, 5.0, 0.0, &reference()).unwrap_err();
        assert_eq!(err, KinematicsError::Degenerate(DegenerateCause::ZeroHeight));
    }

    #[test]
    fn zero_height_threshold_follows_units() {
        // Negligible against a 457 mm robot
        let err = solve_arm_angle(0.0, 0.0, -1e-14, &reference()).unwrap_err();
        assert_eq!(err, KinematicsError::Degenerate(DegenerateCause::ZeroHeight));

        // The same robot in kilometres still solves the usual target
        let scale = 1e-7;
        let g = GeometryConfig::new(457.3 * scale, 115.0 * scale, 112.0 * scale, 232.0 * scale);
        let theta = solve_arm_angle(0.0, 0.0, -300.0 * scale, &g).unwrap();
        assert_relative_eq!(theta, 73.983_218_406, epsilon = 1e-6);
    }

    #[test]
    fn non_finite_input_is_degenerate() {
        let err = solve_arm_angle(f64::NAN, 0.0, -200.0, &reference()).unwrap_err();
        assert_eq!(err, KinematicsError::Degenerate(DegenerateCause::NonFinite));

        let err = solve_arm_angle(0.0, 0.0, f64::NEG_INFINITY, &reference()).unwrap_err();
        assert_eq!(err, KinematicsError::Degenerate(DegenerateCause::NonFinite));
    }
}
