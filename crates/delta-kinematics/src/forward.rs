//! Forward kinematics: actuator angles to end-effector position.
//!
//! Each elbow is placed from its actuator angle. The effector (shifted to
//! the shared centre) is then the point at distance `re` from all three
//! elbows: the intersection of three spheres. Subtracting the sphere
//! equations pairwise leaves `x` and `y` linear in `z`, which reduces the
//! problem to one quadratic in `z`.

use nalgebra::Vector3;

use delta_core::geometry::{SIN30, TAN30, TAN60};
use delta_core::{DegenerateCause, GeometryConfig, JointAngles, KinematicsError, Point3, SolveStage};

use crate::quadratic::discriminant_sqrt;

/// Elbow positions of the three arms, offset so the effector centre stands
/// in for the three wrist joints.
pub fn elbow_positions(angles: JointAngles, geometry: &GeometryConfig) -> [Vector3<f64>; 3] {
    let rf = geometry.rf();
    let t = (geometry.f() - geometry.e()) * TAN30 / 2.0;
    let [theta1, theta2, theta3] = angles.to_radians();

    let y1 = -(t + rf * theta1.cos());
    let z1 = -rf * theta1.sin();

    let y2 = (t + rf * theta2.cos()) * SIN30;
    let x2 = y2 * TAN60;
    let z2 = -rf * theta2.sin();

    let y3 = (t + rf * theta3.cos()) * SIN30;
    let x3 = -y3 * TAN60;
    let z3 = -rf * theta3.sin();

    [
        Vector3::new(0.0, y1, z1),
        Vector3::new(x2, y2, z2),
        Vector3::new(x3, y3, z3),
    ]
}

/// Solve the end-effector position for the given actuator angles.
///
/// Of the two sphere intersections the lower one is returned; the upper
/// one is not a physical configuration.
///
/// # Errors
///
/// - [`KinematicsError::NoSolution`] if the three spheres do not meet.
/// - [`KinematicsError::Degenerate`] if the elbows are collinear in plan
///   view (`dnm` negligible against the squared
///   [`length_scale`](GeometryConfig::length_scale)), the quadratic's
///   leading coefficient underflows to zero or a subnormal, or an angle is
///   not finite.
pub fn forward_kinematics(
    angles: JointAngles,
    geometry: &GeometryConfig,
) -> Result<Point3, KinematicsError> {
    if !angles.is_finite() {
        return Err(KinematicsError::Degenerate(DegenerateCause::NonFinite));
    }

    let re = geometry.re();
    let length = geometry.length_scale();
    let [p1, p2, p3] = elbow_positions(angles, geometry);
    let (y1, z1) = (p1.y, p1.z);
    let (x2, y2, z2) = (p2.x, p2.y, p2.z);
    let (x3, y3, z3) = (p3.x, p3.y, p3.z);

    let dnm = (y2 - y1) * x3 - (y3 - y1) * x2;
    // dnm is an area in plan view
    if dnm.abs() < f64::EPSILON * length * length {
        return Err(KinematicsError::Degenerate(DegenerateCause::CollinearElbows));
    }

    let w1 = p1.norm_squared();
    let w2 = p2.norm_squared();
    let w3 = p3.norm_squared();

    // x = (a1*z + b1) / dnm
    let a1 = (z2 - z1) * (y3 - y1) - (z3 - z1) * (y2 - y1);
    let b1 = -((w2 - w1) * (y3 - y1) - (w3 - w1) * (y2 - y1)) / 2.0;

    // y = (a2*z + b2) / dnm
    let a2 = -(z2 - z1) * x3 + (z3 - z1) * x2;
    let b2 = ((w2 - w1) * x3 - (w3 - w1) * x2) / 2.0;

    // a*z^2 + b*z + c = 0
    // a >= dnm^2 > 0, so it only vanishes when the terms underflow
    let a = a1 * a1 + a2 * a2 + dnm * dnm;
    if a < f64::MIN_POSITIVE {
        return Err(KinematicsError::Degenerate(
            DegenerateCause::ZeroLeadingCoefficient,
        ));
    }
    let b = 2.0 * (a1 * b1 + a2 * (b2 - y1 * dnm) - z1 * dnm * dnm);
    let c_terms = (b2 - y1 * dnm) * (b2 - y1 * dnm) + b1 * b1;
    let c = c_terms + dnm * dnm * (z1 * z1 - re * re);

    let d = b * b - 4.0 * a * c;
    let scale = b * b + 4.0 * a * (c_terms + dnm * dnm * (z1 * z1 + re * re));
    let Some(sqrt_d) = discriminant_sqrt(d, scale) else {
        tracing::debug!(?angles, d, "elbow spheres do not intersect");
        return Err(KinematicsError::NoSolution {
            stage: SolveStage::SphereIntersection,
        });
    };

    let z0 = -0.5 * (b + sqrt_d) / a;
    let x0 = (a1 * z0 + b1) / dnm;
    let y0 = (a2 * z0 + b2) / dnm;

    let point = Point3::new(x0, y0, z0);
    if !point.is_finite() {
        return Err(KinematicsError::Degenerate(DegenerateCause::NonFinite));
    }
    tracing::trace!(?angles, ?point, "forward kinematics solved");
    Ok(point)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
