//! Delta-robot geometry: the four link lengths and the fixed trigonometric
//! constants shared by both kinematic transforms.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// `sqrt(3)`.
pub const SQRT3: f64 = 1.732_050_807_568_877_2;
/// `sin(120°)`.
pub const SIN120: f64 = SQRT3 / 2.0;
/// `cos(120°)`.
pub const COS120: f64 = -0.5;
/// `tan(60°)`.
pub const TAN60: f64 = SQRT3;
/// `sin(30°)`.
pub const SIN30: f64 = 0.5;
/// `tan(30°)`, also `1 / sqrt(3)`.
pub const TAN30: f64 = 1.0 / SQRT3;

// ---------------------------------------------------------------------------
// Serde default functions
// ---------------------------------------------------------------------------

const fn default_base() -> f64 {
    457.3
}
const fn default_effector() -> f64 {
    115.0
}
const fn default_upper_arm() -> f64 {
    112.0
}
const fn default_lower_arm() -> f64 {
    232.0
}

// ---------------------------------------------------------------------------
// GeometryConfig
// ---------------------------------------------------------------------------

/// Link lengths of one delta-robot instance.
///
/// All four lengths must be strictly positive for a solve to be physically
/// meaningful. The solvers do not check this; [`GeometryConfig::validate`]
/// does, and every loader calls it.
///
/// The default is the reference robot `(f=457.3, e=115, rf=112, re=232)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometryConfig {
    /// Side length of the fixed base triangle (`f`).
    #[serde(default = "default_base")]
    pub base: f64,

    /// Side length of the end-effector triangle (`e`).
    #[serde(default = "default_effector")]
    pub effector: f64,

    /// Upper (proximal) arm length, actuator to elbow (`rf`).
    #[serde(default = "default_upper_arm")]
    pub upper_arm: f64,

    /// Lower (distal) arm length, elbow to effector (`re`).
    #[serde(default = "default_lower_arm")]
    pub lower_arm: f64,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            base: default_base(),
            effector: default_effector(),
            upper_arm: default_upper_arm(),
            lower_arm: default_lower_arm(),
        }
    }
}

impl GeometryConfig {
    pub const fn new(base: f64, effector: f64, upper_arm: f64, lower_arm: f64) -> Self {
        Self {
            base,
            effector,
            upper_arm,
            lower_arm,
        }
    }

    /// Base side length `f`.
    pub const fn f(&self) -> f64 {
        self.base
    }

    /// End-effector side length `e`.
    pub const fn e(&self) -> f64 {
        self.effector
    }

    /// Upper arm length `rf`.
    pub const fn rf(&self) -> f64 {
        self.upper_arm
    }

    /// Lower arm length `re`.
    pub const fn re(&self) -> f64 {
        self.lower_arm
    }

    /// Longest of the four lengths. Zero tests in the solvers are taken
    /// relative to this (or its square for area-like terms), so they do not
    /// depend on the unit the robot is measured in.
    pub fn length_scale(&self) -> f64 {
        self.base
            .max(self.effector)
            .max(self.upper_arm)
            .max(self.lower_arm)
    }

    /// Field names and values in display order (base, effector, lower, upper).
    pub const fn fields(&self) -> [(&'static str, f64); 4] {
        [
            ("base", self.base),
            ("effector", self.effector),
            ("lower_arm", self.lower_arm),
            ("upper_arm", self.upper_arm),
        ]
    }

    /// Validate configuration. Returns Err on a non-positive or non-finite length.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in self.fields() {
            if !value.is_finite() {
                return Err(ConfigError::InvalidValue {
                    field: field.into(),
                    message: format!("{value} is not finite"),
                });
            }
            if value <= 0.0 {
                return Err(ConfigError::NonPositiveLength { field, value });
            }
        }
        Ok(())
    }

    /// Return a new geometry with the fields set in `update` replaced.
    ///
    /// The result is validated as a whole; `self` is never modified.
    pub fn with_update(&self, update: GeometryUpdate) -> Result<Self, ConfigError> {
        let next = Self {
            base: update.base.unwrap_or(self.base),
            effector: update.effector.unwrap_or(self.effector),
            upper_arm: update.upper_arm.unwrap_or(self.upper_arm),
            lower_arm: update.lower_arm.unwrap_or(self.lower_arm),
        };
        next.validate()?;
        Ok(next)
    }

    /// Load from TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load from TOML file, falling back to the default geometry if the file
    /// does not exist.
    pub fn from_file_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(err.into()),
        }
    }

    /// Parse from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save to TOML file.
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// GeometryUpdate
// ---------------------------------------------------------------------------

/// Partial edit of a [`GeometryConfig`]. `None` leaves the field unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GeometryUpdate {
    pub base: Option<f64>,
    pub effector: Option<f64>,
    pub upper_arm: Option<f64>,
    pub lower_arm: Option<f64>,
}

impl GeometryUpdate {
    /// Build an update from raw edit-surface entries, where a negative value
    /// means "leave unchanged".
    pub fn from_entries(base: f64, effector: f64, upper_arm: f64, lower_arm: f64) -> Self {
        let set_if_non_negative = |v: f64| (v >= 0.0).then_some(v);
        Self {
            base: set_if_non_negative(base),
            effector: set_if_non_negative(effector),
            upper_arm: set_if_non_negative(upper_arm),
            lower_arm: set_if_non_negative(lower_arm),
        }
    }

    /// True if no field would change.
    pub const fn is_empty(&self) -> bool {
        self.base.is_none()
            && self.effector.is_none()
            && self.upper_arm.is_none()
            && self.lower_arm.is_none()
    }
}
