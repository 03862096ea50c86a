//! Navigation module: measuring paths and following them
pub mod metrics;
pub mod path_follower;

pub use self::metrics::total_distance;
pub use self::path_follower::{
    FollowerConfig, FollowerConfigError, TraversalHandler, TraversalStats, WaypointFollower,
};
