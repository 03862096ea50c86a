pub mod common;
pub mod config;
pub mod control;
pub mod navigation;
pub mod report;
pub mod visualization;

use crate::common::types::Orientation;
use crate::config::{ConfigError, RunConfig};
use crate::control::trajectory::{TrajectoryError, TrajectoryGenerator};
use crate::navigation::metrics::total_distance;
use crate::navigation::path_follower::WaypointFollower;
use crate::report::{distance_line, RunSummary, TrajectoryReport};
use crate::visualization::{EntityDriver, VisualizationSink};
use thiserror::Error;
use tracing::info;

/// Errors from a run. Sink failures are carried as the sink reported them.
#[derive(Debug, Error)]
pub enum RunError<E: std::error::Error + 'static> {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Trajectory(#[from] TrajectoryError),

    #[error("visualization sink failed: {0}")]
    Sink(#[source] E),
}

/// Drives one entity through every configured trajectory, in order
pub struct TrajectoryRunner {
    config: RunConfig,
    generator: TrajectoryGenerator,
    follower: WaypointFollower,
    orientation: Orientation,
}

impl TrajectoryRunner {
    /// Create a runner from a validated configuration
    pub fn new(config: RunConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(TrajectoryRunner {
            generator: TrajectoryGenerator::new(),
            follower: WaypointFollower::with_config(config.follower_config()),
            orientation: config.orientation(),
            config,
        })
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Access the follower, e.g. to apply parameter overrides
    pub fn follower_mut(&mut self) -> &mut WaypointFollower {
        &mut self.follower
    }

    /// Spawn the entity and follow each trajectory against `sink`.
    ///
    /// Every trajectory after the first starts with the entity placed on its
    /// first waypoint and `settle_ticks` ticks of rest.
    pub fn run<S>(&self, sink: &mut S) -> Result<RunSummary, RunError<S::Error>>
    where
        S: VisualizationSink,
    {
        let handle = sink
            .create_entity(&self.config.model, &self.config.spawn_pose())
            .map_err(RunError::Sink)?;

        let mut summary = RunSummary::default();

        for (i, task) in self.config.trajectories.iter().enumerate() {
            let trajectory = self.generator.generate(task.family, task.params())?;
            let distance = total_distance(trajectory.waypoints());
            info!("{}", distance_line(task.family, distance));

            if i > 0 {
                if let Some(start) = trajectory.first() {
                    sink.set_entity_pose(handle, start, &self.orientation)
                        .map_err(RunError::Sink)?;
                }
                if self.config.settle_ticks > 0 {
                    sink.advance_simulation(self.config.settle_ticks)
                        .map_err(RunError::Sink)?;
                    summary.ticks += u64::from(self.config.settle_ticks);
                }
            }

            info!("Iniciando simulación: {}", task.family);
            let mut driver = EntityDriver::new(sink, handle, task.style());
            let stats = self
                .follower
                .follow(&trajectory, &self.orientation, &mut driver, None)
                .map_err(RunError::Sink)?;
            info!("✓ {} completado", task.family);

            summary.ticks += stats.ticks;
            summary.trajectories.push(TrajectoryReport {
                family: task.family,
                points: trajectory.len(),
                distance,
            });
        }

        Ok(summary)
    }
}
