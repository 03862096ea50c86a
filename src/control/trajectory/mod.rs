//! Trajectory generation module
//!
//! Produces closed parametric paths sampled uniformly over `[0, 2π]`. Both
//! endpoints are included, so the first and last waypoints coincide.

use crate::common::types::Waypoint;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Errors raised while generating a trajectory
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrajectoryError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Named curve families the generator knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveFamily {
    Circle,
    FigureEight,
}

impl CurveFamily {
    /// Point on the curve at parameter `t`
    pub fn point_at(&self, t: f64, radius: f64, height: f64) -> Waypoint {
        match self {
            CurveFamily::Circle => Waypoint::new(radius * t.cos(), radius * t.sin(), height),
            CurveFamily::FigureEight => {
                let x = radius * t.sin();
                Waypoint::new(x, x * t.cos(), height)
            }
        }
    }
}

impl fmt::Display for CurveFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurveFamily::Circle => write!(f, "círculo"),
            CurveFamily::FigureEight => write!(f, "figura 8"),
        }
    }
}

/// Sampling parameters shared by every curve family
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryParams {
    pub num_points: usize,
    pub radius: f64,
    pub height: f64,
}

impl TrajectoryParams {
    pub fn new(num_points: usize, radius: f64, height: f64) -> Self {
        TrajectoryParams {
            num_points,
            radius,
            height,
        }
    }

    /// Check the parameters before any sampling happens
    pub fn validate(&self) -> Result<(), TrajectoryError> {
        if self.num_points < 2 {
            return Err(TrajectoryError::InvalidParameter(format!(
                "num_points must be at least 2, got {}",
                self.num_points
            )));
        }
        // Written as a negated comparison so NaN is rejected too
        if !(self.radius > 0.0) {
            return Err(TrajectoryError::InvalidParameter(format!(
                "radius must be positive, got {}",
                self.radius
            )));
        }
        Ok(())
    }
}

/// An ordered, immutable sequence of waypoints
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    family: CurveFamily,
    params: TrajectoryParams,
    waypoints: Vec<Waypoint>,
}

impl Trajectory {
    pub fn family(&self) -> CurveFamily {
        self.family
    }

    pub fn params(&self) -> &TrajectoryParams {
        &self.params
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn first(&self) -> Option<&Waypoint> {
        self.waypoints.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Waypoint> {
        self.waypoints.iter()
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a Waypoint;
    type IntoIter = std::slice::Iter<'a, Waypoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.waypoints.iter()
    }
}

/// `n` values spaced evenly over `[start, stop]`, both ends included.
///
/// The last sample is pinned to `stop` so closed curves end exactly where
/// they started.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { stop } else { start + i as f64 * step })
                .collect()
        }
    }
}

/// A trajectory generator for the robot
#[derive(Debug, Default)]
pub struct TrajectoryGenerator {}

impl TrajectoryGenerator {
    /// Create a new trajectory generator
    pub fn new() -> Self {
        TrajectoryGenerator {}
    }

    /// Sample `params.num_points` waypoints of `family` uniformly over `[0, 2π]`
    pub fn generate(
        &self,
        family: CurveFamily,
        params: TrajectoryParams,
    ) -> Result<Trajectory, TrajectoryError> {
        params.validate()?;

        let waypoints: Vec<Waypoint> = linspace(0.0, TAU, params.num_points)
            .into_iter()
            .map(|t| family.point_at(t, params.radius, params.height))
            .collect();

        debug!(
            "Generated {} trajectory with {} waypoints (radius={}, height={})",
            family,
            waypoints.len(),
            params.radius,
            params.height
        );

        Ok(Trajectory {
            family,
            params,
            waypoints,
        })
    }
}

/// Circle of `radius` in the plane `z = height`
pub fn circle(num_points: usize, radius: f64, height: f64) -> Result<Trajectory, TrajectoryError> {
    TrajectoryGenerator::new().generate(
        CurveFamily::Circle,
        TrajectoryParams::new(num_points, radius, height),
    )
}

/// Figure eight `(r·sin t, r·sin t·cos t, height)`
pub fn figure_eight(
    num_points: usize,
    radius: f64,
    height: f64,
) -> Result<Trajectory, TrajectoryError> {
    TrajectoryGenerator::new().generate(
        CurveFamily::FigureEight,
        TrajectoryParams::new(num_points, radius, height),
    )
}
