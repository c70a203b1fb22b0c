use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Point3
// ---------------------------------------------------------------------------

/// End-effector position in the robot's base frame.
///
/// The base plane is `z = 0`; reachable poses hang below it (`z < 0`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub const fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    pub fn to_vector(self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Self) -> f64 {
        (self.to_vector() - other.to_vector()).norm()
    }
}

impl From<[f64; 3]> for Point3 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Vector3<f64>> for Point3 {
    fn from(v: Vector3<f64>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Point3> for Vector3<f64> {
    fn from(p: Point3) -> Self {
        p.to_vector()
    }
}

// ---------------------------------------------------------------------------
// JointAngles
// ---------------------------------------------------------------------------

/// Actuator angles in degrees, one per arm in arm order.
///
/// 0° puts the upper arm in the base plane; positive angles swing the
/// elbow downward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct JointAngles {
    pub theta1: f64,
    pub theta2: f64,
    pub theta3: f64,
}

impl JointAngles {
    pub const fn new(theta1: f64, theta2: f64, theta3: f64) -> Self {
        Self {
            theta1,
            theta2,
            theta3,
        }
    }

    /// All three actuators at the same angle.
    pub const fn uniform(theta: f64) -> Self {
        Self::new(theta, theta, theta)
    }

    pub const fn to_array(self) -> [f64; 3] {
        [self.theta1, self.theta2, self.theta3]
    }

    /// Angles converted to radians, in arm order.
    pub fn to_radians(self) -> [f64; 3] {
        self.to_array().map(f64::to_radians)
    }

    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|t| t.is_finite())
    }

    /// Largest per-joint absolute difference to `other`, in degrees.
    pub fn max_abs_diff(&self, other: &Self) -> f64 {
        self.to_array()
            .iter()
            .zip(other.to_array())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    }
}

impl From<[f64; 3]> for JointAngles {
    fn from([theta1, theta2, theta3]: [f64; 3]) -> Self {
        Self::new(theta1, theta2, theta3)
    }
}
