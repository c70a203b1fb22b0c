//! Text rendering for solver results, parameters and help.

use delta_core::{GeometryConfig, JointAngles, Point3};

pub fn format_angles(angles: &JointAngles) -> String {
    format!(
        "theta1 = {:.3}, theta2 = {:.3}, theta3 = {:.3}",
        angles.theta1, angles.theta2, angles.theta3
    )
}

pub fn format_point(point: &Point3) -> String {
    format!("x = {:.3}, y = {:.3}, z = {:.3}", point.x, point.y, point.z)
}

/// Two-row parameter table in the order base, end effector, lower arm, upper arm.
pub fn format_parameters(geometry: &GeometryConfig) -> String {
    format!(
        "{:<20}{:<20}{:<20}{:<20}\n{:<20.6}{:<20.6}{:<20.6}{:<20.6}",
        "Base",
        "End effector",
        "Lower arm",
        "Upper arm",
        geometry.base,
        geometry.effector,
        geometry.lower_arm,
        geometry.upper_arm,
    )
}

pub fn format_commands() -> String {
    [
        (" -i x, y, z", "calculate upper arm angles from end effector's coordinates"),
        (" -f a1, a2, a3", "calculate end effector's coordinates from upper arm angles"),
        (" -m", "show menu"),
        (" -q", "quit without saving model parameters"),
        (" -sq", "save model parameters then quit"),
    ]
    .iter()
    .map(|(usage, help)| format!("{usage:<15}{help}"))
    .collect::<Vec<_>>()
    .join("\n")
}

pub const MENU: &str = "\
Delta Robot Kinematics Reference

Choose the following settings:
\t1. View current delta robot model parameters
\t2. Change current delta robot model parameters
\t3. Commands list
\t4. Start
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angles_three_decimals() {
        let s = format_angles(&JointAngles::new(73.983_218, 0.0, -5.5));
        assert_eq!(s, "theta1 = 73.983, theta2 = 0.000, theta3 = -5.500");
    }

    #[test]
    fn point_three_decimals() {
        let s = format_point(&Point3::new(0.0, -0.000_01, -96.859_015));
        assert_eq!(s, "x = 0.000, y = -0.000, z = -96.859");
    }

    #[test]
    fn parameter_table_layout() {
        let table = format_parameters(&GeometryConfig::default());
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Base                End effector"));
        assert!(lines[1].starts_with("457.300000          115.000000          232.000000"));
    }

    #[test]
    fn commands_list_has_every_flag() {
        let list = format_commands();
        for flag in ["-i", "-f", "-m", "-q", "-sq"] {
            assert!(list.contains(flag), "missing {flag}");
        }
        assert_eq!(list.lines().count(), 5);
    }
}
