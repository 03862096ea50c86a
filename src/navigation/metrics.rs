//! Path metrics over ordered waypoint sequences

use crate::common::types::Waypoint;

/// Arc length of a sampled path: the sum of the Euclidean lengths of its
/// consecutive segments. Zero for fewer than two waypoints.
pub fn total_distance(waypoints: &[Waypoint]) -> f64 {
    waypoints
        .windows(2)
        .map(|pair| nalgebra::distance(&pair[0], &pair[1]))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::trajectory::{circle, figure_eight};
    use approx::assert_relative_eq;
    use std::f64::consts::TAU;

    #[test]
    fn test_degenerate_sequences() {
        assert_eq!(total_distance(&[]), 0.0);
        assert_eq!(total_distance(&[Waypoint::new(1.0, 2.0, 3.0)]), 0.0);

        let repeated = vec![Waypoint::new(-4.0, 0.5, 9.0); 12];
        assert_eq!(total_distance(&repeated), 0.0);
    }

    #[test]
    fn test_sum_of_segments() {
        let path = [
            Waypoint::new(0.0, 0.0, 0.0),
            Waypoint::new(3.0, 4.0, 0.0),
            Waypoint::new(3.0, 4.0, 2.0),
        ];
        assert_relative_eq!(total_distance(&path), 7.0, epsilon = 1e-12);
    }

    #[test]
    fn test_reversal_invariance() {
        let trajectory = figure_eight(73, 2.5, 1.0).unwrap();
        let forward = total_distance(trajectory.waypoints());
        let mut reversed = trajectory.waypoints().to_vec();
        reversed.reverse();
        assert_relative_eq!(total_distance(&reversed), forward, epsilon = 1e-9);
    }

    #[test]
    fn test_four_point_circle_chords() {
        let trajectory = circle(4, 1.0, 0.0).unwrap();
        // Three chords of the inscribed triangle
        assert_relative_eq!(
            total_distance(trajectory.waypoints()),
            3.0 * 3f64.sqrt(),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_circle_converges_to_circumference() {
        let r = 3.0;
        let mut previous_error = f64::INFINITY;
        for n in [10, 20, 50, 100, 200, 500, 1000] {
            let error = TAU * r - total_distance(circle(n, r, 1.0).unwrap().waypoints());
            assert!(error >= 0.0);
            assert!(error < previous_error, "error did not shrink at n = {}", n);
            previous_error = error;
        }
        assert!(previous_error < 1e-3);
    }

    #[test]
    fn test_reference_distances() {
        let circle_distance = total_distance(circle(100, 3.0, 1.0).unwrap().waypoints());
        let eight_distance = total_distance(figure_eight(100, 2.5, 1.0).unwrap().waypoints());
        assert_eq!(format!("{:.2}", circle_distance), "18.85");
        assert_eq!(format!("{:.2}", eight_distance), "15.24");
    }
}
