//! Path following: step an entity through a trajectory one waypoint at a time
//!
//! The follower never touches a simulation directly. Every effect goes through
//! a [`TraversalHandler`], and any error the handler returns aborts the
//! traversal and is handed back to the caller as is.

use crate::common::types::{Orientation, Pose, Segment};
use crate::control::trajectory::Trajectory;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, info};

/// Receives the effects of a traversal, in order, for each waypoint
pub trait TraversalHandler {
    type Error;

    /// Place the entity at the waypoint
    fn on_pose(&mut self, pose: &Pose) -> Result<(), Self::Error>;

    /// Draw the segment from the previous waypoint to the current one
    fn on_segment(&mut self, segment: &Segment) -> Result<(), Self::Error>;

    /// Advance simulated time by `ticks` ticks. Pacing is up to the implementor.
    fn advance(&mut self, ticks: u32) -> Result<(), Self::Error>;
}

/// Invalid follower parameter
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid follower parameter `{name}`: {reason}")]
pub struct FollowerConfigError {
    pub name: String,
    pub reason: String,
}

/// Cadence of a traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FollowerConfig {
    /// Simulation ticks delegated after each waypoint
    pub steps_per_waypoint: u32,
    /// Report progress every this many waypoints; 0 disables reports
    pub progress_every: usize,
}

impl Default for FollowerConfig {
    fn default() -> Self {
        FollowerConfig {
            steps_per_waypoint: 10,
            progress_every: 20,
        }
    }
}

impl FollowerConfig {
    /// Apply overrides from a parameter map. Unknown keys are ignored.
    pub fn configure(&mut self, params: &HashMap<String, f64>) -> Result<(), FollowerConfigError> {
        if let Some(&steps) = params.get("steps_per_waypoint") {
            let steps = whole_number("steps_per_waypoint", steps, u32::MAX as f64)?;
            self.steps_per_waypoint = steps as u32;
        }

        if let Some(&every) = params.get("progress_every") {
            let every = whole_number("progress_every", every, usize::MAX as f64)?;
            self.progress_every = every as usize;
        }

        Ok(())
    }
}

fn whole_number(name: &str, value: f64, max: f64) -> Result<f64, FollowerConfigError> {
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > max {
        return Err(FollowerConfigError {
            name: name.to_string(),
            reason: format!("expected a non-negative whole number, got {}", value),
        });
    }
    Ok(value)
}

/// What a finished traversal did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TraversalStats {
    pub poses: usize,
    pub segments: usize,
    pub ticks: u64,
}

/// Steps an entity through every waypoint of a trajectory, in order
#[derive(Debug, Clone, Default)]
pub struct WaypointFollower {
    config: FollowerConfig,
}

impl WaypointFollower {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: FollowerConfig) -> Self {
        WaypointFollower { config }
    }

    pub fn config(&self) -> &FollowerConfig {
        &self.config
    }

    pub fn configure(&mut self, params: &HashMap<String, f64>) -> Result<(), FollowerConfigError> {
        self.config.configure(params)
    }

    /// Traverse `trajectory` holding `orientation` fixed.
    ///
    /// For waypoint `i` the handler sees, in this order: one pose, one segment
    /// from waypoint `i - 1` (skipped for the first waypoint), then
    /// `steps_per_waypoint` ticks. `progress` is then called with `i / n` when
    /// `i` is a multiple of `progress_every`.
    pub fn follow<H>(
        &self,
        trajectory: &Trajectory,
        orientation: &Orientation,
        handler: &mut H,
        mut progress: Option<&mut dyn FnMut(f64)>,
    ) -> Result<TraversalStats, H::Error>
    where
        H: TraversalHandler,
    {
        let n = trajectory.len();
        let mut stats = TraversalStats::default();
        debug!("Following {} trajectory with {} waypoints", trajectory.family(), n);

        let mut previous = None;
        for (i, &position) in trajectory.iter().enumerate() {
            handler.on_pose(&Pose::new(position, *orientation))?;
            stats.poses += 1;

            if let Some(from) = previous {
                handler.on_segment(&Segment { from, to: position })?;
                stats.segments += 1;
            }
            previous = Some(position);

            handler.advance(self.config.steps_per_waypoint)?;
            stats.ticks += u64::from(self.config.steps_per_waypoint);

            if self.config.progress_every > 0 && i % self.config.progress_every == 0 {
                let fraction = i as f64 / n as f64;
                if let Some(report) = progress.as_deref_mut() {
                    report(fraction);
                }
                info!("  Progreso: {:.1}%", fraction * 100.0);
            }
        }

        Ok(stats)
    }
}
