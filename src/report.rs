//! Console summary of a run, distances with two decimals

use crate::control::trajectory::CurveFamily;
use std::fmt;

/// Line printed right after a trajectory is generated
pub fn distance_line(family: CurveFamily, distance: f64) -> String {
    let subject = match family {
        CurveFamily::Circle => "del círculo",
        CurveFamily::FigureEight => "de la figura 8",
    };
    format!("Distancia {}: {:.2} metros", subject, distance)
}

/// Result of driving one trajectory
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryReport {
    pub family: CurveFamily,
    pub points: usize,
    pub distance: f64,
}

/// Result of a whole run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub trajectories: Vec<TrajectoryReport>,
    /// Simulation ticks advanced over the run, settling included
    pub ticks: u64,
}

impl RunSummary {
    pub fn total_distance(&self) -> f64 {
        self.trajectories.iter().map(|t| t.distance).sum()
    }

    pub fn total_points(&self) -> usize {
        self.trajectories.iter().map(|t| t.points).sum()
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let banner = "=".repeat(40);
        writeln!(f, "{}", banner)?;
        writeln!(f, "RESUMEN")?;
        writeln!(f, "{}", banner)?;
        for t in &self.trajectories {
            writeln!(f, "Distancia {}: {:.2} m", t.family, t.distance)?;
        }
        writeln!(f, "Distancia total: {:.2} m", self.total_distance())?;
        write!(f, "Total de puntos: {}", self.total_points())
    }
}
