//! Control module: everything that decides where the entity should be
pub mod trajectory;

pub use self::trajectory::{
    circle, figure_eight, CurveFamily, Trajectory, TrajectoryError, TrajectoryGenerator,
    TrajectoryParams,
};
