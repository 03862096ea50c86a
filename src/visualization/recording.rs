//! In-memory sink that records every call instead of rendering it

use super::{EntityHandle, VisualizationSink};
use crate::common::types::{LineStyle, Orientation, Pose, Waypoint};
use std::convert::Infallible;
use tracing::trace;

/// One recorded sink call
#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    CreateEntity {
        handle: EntityHandle,
        model: String,
        pose: Pose,
    },
    SetPose {
        handle: EntityHandle,
        position: Waypoint,
        orientation: Orientation,
    },
    DrawSegment {
        from: Waypoint,
        to: Waypoint,
        style: LineStyle,
    },
    Advance(u32),
}

/// Sink used when no simulation backend is attached
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Vec<SinkEvent>,
    next_handle: u64,
    ticks: u64,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[SinkEvent] {
        &self.events
    }

    /// Total simulated ticks advanced so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn segments(&self) -> impl Iterator<Item = (&Waypoint, &Waypoint, &LineStyle)> {
        self.events.iter().filter_map(|event| match event {
            SinkEvent::DrawSegment { from, to, style } => Some((from, to, style)),
            _ => None,
        })
    }

    /// Last position set for `handle`
    pub fn position_of(&self, handle: EntityHandle) -> Option<Waypoint> {
        self.events.iter().rev().find_map(|event| match event {
            SinkEvent::SetPose {
                handle: h,
                position,
                ..
            } if *h == handle => Some(*position),
            SinkEvent::CreateEntity { handle: h, pose, .. } if *h == handle => {
                Some(pose.position)
            }
            _ => None,
        })
    }
}

impl VisualizationSink for RecordingSink {
    type Error = Infallible;

    fn create_entity(&mut self, model: &str, initial: &Pose) -> Result<EntityHandle, Infallible> {
        let handle = EntityHandle(self.next_handle);
        self.next_handle += 1;
        trace!("create_entity {:?} from {}", handle, model);
        self.events.push(SinkEvent::CreateEntity {
            handle,
            model: model.to_string(),
            pose: *initial,
        });
        Ok(handle)
    }

    fn set_entity_pose(
        &mut self,
        handle: EntityHandle,
        position: &Waypoint,
        orientation: &Orientation,
    ) -> Result<(), Infallible> {
        self.events.push(SinkEvent::SetPose {
            handle,
            position: *position,
            orientation: *orientation,
        });
        Ok(())
    }

    fn draw_segment(
        &mut self,
        from: &Waypoint,
        to: &Waypoint,
        style: &LineStyle,
    ) -> Result<(), Infallible> {
        self.events.push(SinkEvent::DrawSegment {
            from: *from,
            to: *to,
            style: *style,
        });
        Ok(())
    }

    fn advance_simulation(&mut self, ticks: u32) -> Result<(), Infallible> {
        self.ticks += u64::from(ticks);
        self.events.push(SinkEvent::Advance(ticks));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::types::level_orientation;

    #[test]
    fn test_handles_are_unique() {
        let mut sink = RecordingSink::new();
        let pose = Pose::new(Waypoint::origin(), level_orientation());
        let a = sink.create_entity("a.urdf", &pose).unwrap();
        let b = sink.create_entity("b.urdf", &pose).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_position_tracking() {
        let mut sink = RecordingSink::new();
        let q = level_orientation();
        let handle = sink
            .create_entity("r2d2.urdf", &Pose::new(Waypoint::new(0.0, 0.0, 1.0), q))
            .unwrap();
        assert_eq!(sink.position_of(handle), Some(Waypoint::new(0.0, 0.0, 1.0)));

        sink.set_entity_pose(handle, &Waypoint::new(3.0, 0.0, 1.0), &q)
            .unwrap();
        sink.advance_simulation(7).unwrap();
        assert_eq!(sink.position_of(handle), Some(Waypoint::new(3.0, 0.0, 1.0)));
        assert_eq!(sink.position_of(EntityHandle(42)), None);
        assert_eq!(sink.ticks(), 7);
    }
}
