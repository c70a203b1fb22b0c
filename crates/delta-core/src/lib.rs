// delta-core: Geometry model, pose types and errors for delta-robot kinematics.

pub mod error;
pub mod geometry;
pub mod types;

pub use error::{ConfigError, DegenerateCause, DeltaError, KinematicsError, SolveStage};
pub use geometry::{GeometryConfig, GeometryUpdate};
pub use types::{JointAngles, Point3};
