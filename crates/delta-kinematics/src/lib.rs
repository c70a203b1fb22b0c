//! Closed-form kinematics for three-arm delta robots.
//!
//! Provides inverse kinematics (end-effector position to actuator angles),
//! forward kinematics (actuator angles to end-effector position), and the
//! per-arm angle solver that inverse kinematics is built on.
//!
//! # Architecture
//!
//! ```text
//!                 ┌──► solve_arm_angle (arm 1, 0°)
//! Point3 ──► IK ──┼──► solve_arm_angle (arm 2, +120°) ──► JointAngles
//!                 └──► solve_arm_angle (arm 3, -120°)
//!
//! JointAngles ──► FK (three-sphere intersection) ──► Point3
//! ```
//!
//! Every function is pure: the [`GeometryConfig`](delta_core::GeometryConfig)
//! is passed in by reference and nothing is cached between calls, so solves
//! can run concurrently from any number of threads.

pub mod arm;
pub mod forward;
pub mod inverse;
mod quadratic;
pub mod robot;

pub use arm::solve_arm_angle;
pub use forward::forward_kinematics;
pub use inverse::inverse_kinematics;
pub use robot::DeltaRobot;
