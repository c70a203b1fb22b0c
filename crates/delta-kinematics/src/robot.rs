//! Convenience wrapper binding a geometry to the kinematic transforms.

use delta_core::{GeometryConfig, JointAngles, KinematicsError, Point3};

use crate::{forward_kinematics, inverse_kinematics};

/// A delta robot with fixed link lengths.
///
/// Holds its [`GeometryConfig`] by value. Reconfiguring means building a new
/// `DeltaRobot`; there is no in-place mutation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DeltaRobot {
    geometry: GeometryConfig,
}

impl DeltaRobot {
    /// Create a robot with the given geometry.
    pub const fn new(geometry: GeometryConfig) -> Self {
        Self { geometry }
    }

    /// Create the reference robot.
    pub fn with_defaults() -> Self {
        Self::new(GeometryConfig::default())
    }

    pub const fn geometry(&self) -> &GeometryConfig {
        &self.geometry
    }

    /// Actuator angles for an end-effector position.
    ///
    /// # Errors
    ///
    /// See [`inverse_kinematics`].
    pub fn inverse(&self, target: Point3) -> Result<JointAngles, KinematicsError> {
        inverse_kinematics(target, &self.geometry)
    }

    /// End-effector position for a set of actuator angles.
    ///
    /// # Errors
    ///
    /// See [`forward_kinematics`].
    pub fn forward(&self, angles: JointAngles) -> Result<Point3, KinematicsError> {
        forward_kinematics(angles, &self.geometry)
    }
}
