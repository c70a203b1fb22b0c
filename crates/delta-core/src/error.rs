use thiserror::Error;

/// Top-level error type for the delta workspace.
#[derive(Debug, Error)]
pub enum DeltaError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Kinematics error: {0}")]
    Kinematics(#[from] KinematicsError),

    /// Terminal I/O of an interactive session.
    #[error("Session I/O error: {0}")]
    Session(#[from] std::io::Error),
}

/// Geometry configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Invalid {field}: {value} (must be > 0)")]
    NonPositiveLength { field: &'static str, value: f64 },

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

/// Which quadratic failed when a pose is unreachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStage {
    /// Per-arm circle intersection during inverse kinematics (arm index 1..=3).
    Arm(u8),
    /// Three-sphere intersection during forward kinematics.
    SphereIntersection,
    /// Target lies in the base plane.
    BasePlane,
}

impl std::fmt::Display for SolveStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Arm(i) => write!(f, "arm {i}"),
            Self::SphereIntersection => f.write_str("sphere intersection"),
            Self::BasePlane => f.write_str("base plane"),
        }
    }
}

/// Denominator that vanished during a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegenerateCause {
    /// Per-arm solve called with `z0 = 0`.
    ZeroHeight,
    /// Elbow projections are collinear (`dnm = 0`).
    CollinearElbows,
    /// Leading coefficient of the sphere-intersection quadratic is zero.
    ZeroLeadingCoefficient,
    /// An input or intermediate value is NaN or infinite.
    NonFinite,
}

impl std::fmt::Display for DegenerateCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::ZeroHeight => "target height is zero",
            Self::CollinearElbows => "elbow positions are collinear",
            Self::ZeroLeadingCoefficient => "quadratic leading coefficient is zero",
            Self::NonFinite => "non-finite value",
        })
    }
}

/// Solver outcome other than a valid triple.
///
/// Copy + static messages: these are returned on every failed solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum KinematicsError {
    /// The pose has no physical counterpart for this geometry.
    #[error("No solution: pose unreachable ({stage})")]
    NoSolution { stage: SolveStage },

    /// Caller or geometry misuse that would divide by zero.
    #[error("Degenerate input: {0}")]
    Degenerate(DegenerateCause),
}

impl KinematicsError {
    /// True for the recoverable "unreachable pose" outcome.
    pub const fn is_unreachable(&self) -> bool {
        matches!(self, Self::NoSolution { .. })
    }

    /// Re-attribute a per-arm failure to arm `arm`. Other errors pass through.
    #[must_use]
    pub const fn on_arm(self, arm: u8) -> Self {
        match self {
            Self::NoSolution {
                stage: SolveStage::Arm(_),
            } => Self::NoSolution {
                stage: SolveStage::Arm(arm),
            },
            other => other,
        }
    }
}
