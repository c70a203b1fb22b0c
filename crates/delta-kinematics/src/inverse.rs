//! Inverse kinematics: end-effector position to actuator angles.

use delta_core::geometry::{COS120, SIN120};
use delta_core::{DegenerateCause, GeometryConfig, JointAngles, KinematicsError, Point3, SolveStage};

use crate::arm::solve_arm_angle;

/// Rotate `(x, y)` about the vertical axis by the angle whose cosine and
/// sine are `cos` and `sin`, into the next arm's local frame.
const fn rotate_into_arm(x: f64, y: f64, cos: f64, sin: f64) -> (f64, f64) {
    (x * cos + y * sin, y * cos - x * sin)
}

/// Solve the three actuator angles that place the end effector at `target`.
///
/// Arms are solved in order (0°, +120°, -120°) and the solve stops at the
/// first arm that cannot reach; no partial result is returned.
///
/// Only the base plane itself is rejected. A target above it (`z > 0`) can
/// still return angles, but they describe the mirrored elbow-down pose:
/// feeding them back through
/// [`forward_kinematics`](crate::forward_kinematics) gives a point below the
/// base, not the requested one.
///
/// # Errors
///
/// - [`KinematicsError::NoSolution`] if any arm cannot reach the target, or
///   if the target lies in the base plane (`|z|` negligible against the
///   [`length_scale`](GeometryConfig::length_scale)).
/// - [`KinematicsError::Degenerate`] if a coordinate is not finite.
pub fn inverse_kinematics(
    target: Point3,
    geometry: &GeometryConfig,
) -> Result<JointAngles, KinematicsError> {
    if !target.is_finite() {
        return Err(KinematicsError::Degenerate(DegenerateCause::NonFinite));
    }
    let Point3 { x, y, z } = target;

    // The per-arm circle intersection is undefined in the base plane, and
    // the effector never reaches it on the branch the solvers select.
    if z.abs() < f64::EPSILON * geometry.length_scale() {
        tracing::debug!(x, y, z, "target in base plane");
        return Err(KinematicsError::NoSolution {
            stage: SolveStage::BasePlane,
        });
    }

    let theta1 = solve_arm_angle(x, y, z, geometry).map_err(|e| e.on_arm(1))?;

    let (x2, y2) = rotate_into_arm(x, y, COS120, SIN120);
    let theta2 = solve_arm_angle(x2, y2, z, geometry).map_err(|e| e.on_arm(2))?;

    let (x3, y3) = rotate_into_arm(x, y, COS120, -SIN120);
    let theta3 = solve_arm_angle(x3, y3, z, geometry).map_err(|e| e.on_arm(3))?;

    Ok(JointAngles::new(theta1, theta2, theta3))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn centred_target_gives_equal_angles() {
        let angles = inverse_kinematics(Point3::new(0.0, 0.0, -300.0), &GeometryConfig::default())
            .unwrap();
        assert_relative_eq!(angles.theta1, angles.theta2, epsilon = 1e-9);
        assert_relative_eq!(angles.theta1, angles.theta3, epsilon = 1e-9);
        assert_relative_eq!(angles.theta1, 73.983_218_406, epsilon = 1e-6);
    }

    #[test]
    fn base_plane_is_unreachable() {
        let err = inverse_kinematics(Point3::new(0.0, 0.0, 0.0), &GeometryConfig::default())
            .unwrap_err();
        assert_eq!(
            err,
            KinematicsError::NoSolution {
                stage: SolveStage::BasePlane
            }
        );

        let err = inverse_kinematics(Point3::new(40.0, -25.0, 0.0), &GeometryConfig::default())
            .unwrap_err();
        assert!(err.is_unreachable());

        // Rounding noise around z = 0 counts as the base plane
        let err = inverse_kinematics(Point3::new(0.0, 0.0, -1e-14), &GeometryConfig::default())
            .unwrap_err();
        assert!(err.is_unreachable());
    }

    #[test]
    fn target_above_base_does_not_round_trip() {
        let g = GeometryConfig::default();
        let angles = inverse_kinematics(Point3::new(0.0, 0.0, 100.0), &g).unwrap();
        assert_relative_eq!(angles.theta1, -1.560_784_759, epsilon = 1e-6);

        let back = crate::forward_kinematics(angles, &g).unwrap();
        assert!(back.z < 0.0);
        assert_relative_eq!(back.z, -93.898_808_061, epsilon = 1e-6);
    }

    #[test]
    fn first_failing_arm_is_reported() {
        // Far along -y: arm 1 (pointing at -y) stays in reach longest, so
        // arm 2 is the first to fail.
        let err = inverse_kinematics(Point3::new(0.0, -220.0, -200.0), &GeometryConfig::default())
            .unwrap_err();
        assert_eq!(
            err,
            KinematicsError::NoSolution {
                stage: SolveStage::Arm(2)
            }
        );
    }

    #[test]
    fn too_deep_fails_on_arm_one() {
        let err = inverse_kinematics(Point3::new(0.0, 0.0, -1000.0), &GeometryConfig::default())
            .unwrap_err();
        assert_eq!(
            err,
            KinematicsError::NoSolution {
                stage: SolveStage::Arm(1)
            }
        );
    }

    #[test]
    fn non_finite_target_is_degenerate() {
        let err = inverse_kinematics(Point3::new(0.0, f64::NAN, -200.0), &GeometryConfig::default())
            .unwrap_err();
        assert_eq!(err, KinematicsError::Degenerate(DegenerateCause::NonFinite));
    }

    #[test]
    fn rotation_into_arm_frames() {
        // A point on arm 2's axis rotates onto arm 1's axis
        let (x, y) = rotate_into_arm(SIN120, -COS120, COS120, SIN120);
        assert_relative_eq!(x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(y, -1.0, epsilon = 1e-12);

        let (x, y) = rotate_into_arm(3.0, 4.0, COS120, -SIN120);
        assert_relative_eq!(x.hypot(y), 5.0, epsilon = 1e-12);
    }
}
