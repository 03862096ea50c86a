//! Common utilities and types for trajectory following

/// Common types used across the codebase
pub mod types {
    use nalgebra::{Point3, UnitQuaternion};
    use serde::{Deserialize, Serialize};

    /// A 3D waypoint (x, y, z)
    pub type Waypoint = Point3<f64>;

    /// Orientation of an entity, opaque to the path follower
    pub type Orientation = UnitQuaternion<f64>;

    /// A waypoint paired with the orientation the entity holds there
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct Pose {
        pub position: Waypoint,
        pub orientation: Orientation,
    }

    impl Pose {
        pub fn new(position: Waypoint, orientation: Orientation) -> Self {
            Pose {
                position,
                orientation,
            }
        }
    }

    /// Line between two consecutive waypoints, only used for drawing
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct Segment {
        pub from: Waypoint,
        pub to: Waypoint,
    }

    impl Segment {
        pub fn length(&self) -> f64 {
            nalgebra::distance(&self.from, &self.to)
        }
    }

    /// RGB color with channels in [0, 1]
    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    pub struct Color {
        pub r: f64,
        pub g: f64,
        pub b: f64,
    }

    impl Color {
        pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
        pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);

        pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
            Color { r, g, b }
        }

        /// True when every channel lies in [0, 1]
        pub fn is_normalized(&self) -> bool {
            [self.r, self.g, self.b]
                .iter()
                .all(|c| (0.0..=1.0).contains(c))
        }
    }

    /// How a segment is drawn
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct LineStyle {
        pub color: Color,
        pub width: f64,
    }

    /// Orientation with zero roll, pitch and yaw
    pub fn level_orientation() -> Orientation {
        UnitQuaternion::from_euler_angles(0.0, 0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::types::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_segment_length() {
        let segment = Segment {
            from: Waypoint::new(0.0, 0.0, 1.0),
            to: Waypoint::new(3.0, 4.0, 1.0),
        };
        assert_relative_eq!(segment.length(), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_color_range() {
        assert!(Color::RED.is_normalized());
        assert!(!Color::rgb(1.2, 0.0, 0.0).is_normalized());
        assert!(!Color::rgb(0.0, -0.1, 0.0).is_normalized());
    }

    #[test]
    fn test_level_orientation_is_identity() {
        let q = level_orientation();
        assert_relative_eq!(q.angle(), 0.0, epsilon = 1e-12);
    }
}
