//! Run configuration
//!
//! A run is a list of trajectories driven one after another with the same
//! entity. Settings are read from TOML; every field has a default, so an empty
//! file reproduces the reference run (a red circle followed by a blue figure
//! eight).
//!
//! ```toml
//! steps_per_waypoint = 10
//! progress_every = 20
//!
//! [[trajectories]]
//! family = "circle"
//! num_points = 100
//! radius = 3.0
//! height = 1.0
//! color = { r = 1.0, g = 0.0, b = 0.0 }
//! line_width = 2.0
//! ```

use crate::common::types::{Color, LineStyle, Orientation, Pose, Waypoint};
use crate::control::trajectory::{CurveFamily, TrajectoryParams};
use crate::navigation::path_follower::FollowerConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading or validating a run configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Validation(String),
}

/// One trajectory of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryTask {
    pub family: CurveFamily,
    pub num_points: usize,
    pub radius: f64,
    #[serde(default = "default_height")]
    pub height: f64,
    #[serde(default = "default_color")]
    pub color: Color,
    #[serde(default = "default_line_width")]
    pub line_width: f64,
}

fn default_height() -> f64 {
    1.0
}

fn default_color() -> Color {
    Color::RED
}

fn default_line_width() -> f64 {
    2.0
}

impl TrajectoryTask {
    pub fn params(&self) -> TrajectoryParams {
        TrajectoryParams::new(self.num_points, self.radius, self.height)
    }

    pub fn style(&self) -> LineStyle {
        LineStyle {
            color: self.color,
            width: self.line_width,
        }
    }
}

/// Settings for a whole run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Model reference handed to the backend when spawning the entity
    pub model: String,
    pub spawn_position: [f64; 3],
    /// Fixed roll, pitch and yaw held through every traversal
    pub orientation_rpy: [f64; 3],
    pub steps_per_waypoint: u32,
    /// Progress report granularity in waypoints, 0 disables reports
    pub progress_every: usize,
    /// Ticks to let the entity rest on a new trajectory's start before following it
    pub settle_ticks: u32,
    pub trajectories: Vec<TrajectoryTask>,
}

impl Default for RunConfig {
    fn default() -> Self {
        let follower = FollowerConfig::default();
        RunConfig {
            model: "r2d2.urdf".to_string(),
            spawn_position: [0.0, 0.0, 1.0],
            orientation_rpy: [0.0, 0.0, 0.0],
            steps_per_waypoint: follower.steps_per_waypoint,
            progress_every: follower.progress_every,
            settle_ticks: 50,
            trajectories: vec![
                TrajectoryTask {
                    family: CurveFamily::Circle,
                    num_points: 100,
                    radius: 3.0,
                    height: 1.0,
                    color: Color::RED,
                    line_width: 2.0,
                },
                TrajectoryTask {
                    family: CurveFamily::FigureEight,
                    num_points: 100,
                    radius: 2.5,
                    height: 1.0,
                    color: Color::BLUE,
                    line_width: 2.0,
                },
            ],
        }
    }
}

impl RunConfig {
    /// Load a configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn orientation(&self) -> Orientation {
        let [roll, pitch, yaw] = self.orientation_rpy;
        Orientation::from_euler_angles(roll, pitch, yaw)
    }

    pub fn spawn_pose(&self) -> Pose {
        let [x, y, z] = self.spawn_position;
        Pose::new(Waypoint::new(x, y, z), self.orientation())
    }

    pub fn follower_config(&self) -> FollowerConfig {
        FollowerConfig {
            steps_per_waypoint: self.steps_per_waypoint,
            progress_every: self.progress_every,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::Validation("model cannot be empty".to_string()));
        }
        if self.trajectories.is_empty() {
            return Err(ConfigError::Validation(
                "at least one trajectory is required".to_string(),
            ));
        }

        for (i, task) in self.trajectories.iter().enumerate() {
            task.params()
                .validate()
                .map_err(|e| ConfigError::Validation(format!("trajectory {}: {}", i, e)))?;
            if !task.color.is_normalized() {
                return Err(ConfigError::Validation(format!(
                    "trajectory {}: color channels must be within [0, 1]",
                    i
                )));
            }
            if !(task.line_width > 0.0) {
                return Err(ConfigError::Validation(format!(
                    "trajectory {}: line width must be positive",
                    i
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_reference_run() {
        let config = RunConfig::from_toml("").unwrap();
        assert_eq!(config, RunConfig::default());
        assert_eq!(config.trajectories.len(), 2);
        assert_eq!(config.trajectories[1].family, CurveFamily::FigureEight);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_custom_run() {
        let config = RunConfig::from_toml(
            r#"
            steps_per_waypoint = 4
            settle_ticks = 0

            [[trajectories]]
            family = "figure_eight"
            num_points = 40
            radius = 1.5
            color = { r = 0.0, g = 1.0, b = 0.0 }
            "#,
        )
        .unwrap();

        assert_eq!(config.steps_per_waypoint, 4);
        assert_eq!(config.progress_every, 20);
        assert_eq!(config.model, "r2d2.urdf");
        let task = &config.trajectories[0];
        assert_eq!(task.family, CurveFamily::FigureEight);
        assert_eq!(task.height, 1.0);
        assert_eq!(task.line_width, 2.0);
        assert_eq!(task.color, Color::rgb(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_spawn_pose() {
        let config = RunConfig::from_toml("orientation_rpy = [0.0, 0.0, 1.5]").unwrap();
        let pose = config.spawn_pose();
        assert_eq!(pose.position, Waypoint::new(0.0, 0.0, 1.0));
        let (_, _, yaw) = pose.orientation.euler_angles();
        assert!((yaw - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_family_is_rejected() {
        let result = RunConfig::from_toml(
            r#"
            [[trajectories]]
            family = "spiral"
            num_points = 10
            radius = 1.0
            "#,
        );
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_validation() {
        let mut config = RunConfig::default();
        config.trajectories[0].num_points = 1;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        let mut config = RunConfig::default();
        config.trajectories[1].radius = 0.0;
        assert!(config.validate().is_err());

        let mut config = RunConfig::default();
        config.trajectories[0].color = Color::rgb(2.0, 0.0, 0.0);
        assert!(config.validate().is_err());

        let mut config = RunConfig::default();
        config.trajectories.clear();
        assert!(config.validate().is_err());
    }
}
