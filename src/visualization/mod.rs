//! Bridge between the path follower and a 3D visualization backend
//!
//! The backend itself (connection, scene assets, camera, gravity, real-time
//! pacing) lives outside this crate. It only has to implement
//! [`VisualizationSink`].

pub mod recording;

use crate::common::types::{LineStyle, Orientation, Pose, Segment, Waypoint};
use crate::navigation::path_follower::TraversalHandler;

pub use self::recording::{RecordingSink, SinkEvent};

/// Backend-assigned identifier of a spawned entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityHandle(pub u64);

/// Operations a simulation/visualization backend must provide
pub trait VisualizationSink {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Spawn an entity from a model reference at an initial pose
    fn create_entity(&mut self, model: &str, initial: &Pose) -> Result<EntityHandle, Self::Error>;

    /// Teleport an entity, no dynamics involved
    fn set_entity_pose(
        &mut self,
        handle: EntityHandle,
        position: &Waypoint,
        orientation: &Orientation,
    ) -> Result<(), Self::Error>;

    fn draw_segment(
        &mut self,
        from: &Waypoint,
        to: &Waypoint,
        style: &LineStyle,
    ) -> Result<(), Self::Error>;

    /// Advance simulated time by `ticks` ticks
    fn advance_simulation(&mut self, ticks: u32) -> Result<(), Self::Error>;
}

/// Drives one entity of a sink from follower events
pub struct EntityDriver<'a, S: VisualizationSink> {
    sink: &'a mut S,
    handle: EntityHandle,
    style: LineStyle,
}

impl<'a, S: VisualizationSink> EntityDriver<'a, S> {
    pub fn new(sink: &'a mut S, handle: EntityHandle, style: LineStyle) -> Self {
        EntityDriver {
            sink,
            handle,
            style,
        }
    }
}

impl<S: VisualizationSink> TraversalHandler for EntityDriver<'_, S> {
    type Error = S::Error;

    fn on_pose(&mut self, pose: &Pose) -> Result<(), S::Error> {
        self.sink
            .set_entity_pose(self.handle, &pose.position, &pose.orientation)
    }

    fn on_segment(&mut self, segment: &Segment) -> Result<(), S::Error> {
        self.sink.draw_segment(&segment.from, &segment.to, &self.style)
    }

    fn advance(&mut self, ticks: u32) -> Result<(), S::Error> {
        self.sink.advance_simulation(ticks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::types::{level_orientation, Color};
    use crate::control::trajectory::circle;
    use crate::navigation::path_follower::{FollowerConfig, WaypointFollower};

    #[test]
    fn test_driver_forwards_to_sink() {
        let mut sink = RecordingSink::new();
        let orientation = level_orientation();
        let handle = sink
            .create_entity("r2d2.urdf", &Pose::new(Waypoint::new(0.0, 0.0, 1.0), orientation))
            .unwrap();
        let style = LineStyle {
            color: Color::RED,
            width: 2.0,
        };
        let trajectory = circle(3, 1.0, 1.0).unwrap();
        let p = trajectory.waypoints();

        let mut driver = EntityDriver::new(&mut sink, handle, style);
        let follower = WaypointFollower::with_config(FollowerConfig {
            steps_per_waypoint: 2,
            progress_every: 0,
        });
        follower
            .follow(&trajectory, &orientation, &mut driver, None)
            .unwrap();

        assert_eq!(sink.ticks(), 6);
        assert_eq!(sink.segments().count(), 2);
        assert_eq!(
            sink.events()[1..4],
            [
                SinkEvent::SetPose {
                    handle,
                    position: p[0],
                    orientation
                },
                SinkEvent::Advance(2),
                SinkEvent::SetPose {
                    handle,
                    position: p[1],
                    orientation
                },
            ]
        );
        assert_eq!(
            sink.events()[4],
            SinkEvent::DrawSegment {
                from: p[0],
                to: p[1],
                style
            }
        );
    }
}
