//! Read-only statistics over a finished trajectory.

use krill_core::{SimulationState, Trajectory};
use serde::Serialize;

/// Summary of one population sequence
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesStats {
    /// Smallest non-NaN value (NaN if every value is NaN)
    #[serde(serialize_with = "krill_core::nonfinite::serialize")]
    pub min: f64,
    /// Largest non-NaN value (NaN if every value is NaN)
    #[serde(serialize_with = "krill_core::nonfinite::serialize")]
    pub max: f64,
    #[serde(serialize_with = "krill_core::nonfinite::serialize")]
    pub final_value: f64,
    /// No NaN or infinity anywhere in the sequence
    pub all_finite: bool,
    /// Some value dropped below zero
    pub went_negative: bool,
}

impl SeriesStats {
    pub fn from_values(values: &[f64]) -> Self {
        let mut min = f64::NAN;
        let mut max = f64::NAN;
        let mut all_finite = true;
        let mut went_negative = false;

        for &v in values {
            if !v.is_finite() {
                all_finite = false;
            }
            if v < 0.0 {
                went_negative = true;
            }
            // f64::min/max ignore a NaN operand
            min = min.min(v);
            max = max.max(v);
        }

        Self {
            min,
            max,
            final_value: values.last().copied().unwrap_or(f64::NAN),
            all_finite,
            went_negative,
        }
    }
}

/// Statistics for a whole run
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrajectoryStats {
    pub krill: SeriesStats,
    pub whale: SeriesStats,
    /// Accumulated time of the last entry
    #[serde(serialize_with = "krill_core::nonfinite::serialize")]
    pub duration: f64,
    pub steps: usize,
}

impl TrajectoryStats {
    pub fn from_trajectory(trajectory: &Trajectory) -> Self {
        Self {
            krill: SeriesStats::from_values(trajectory.krill()),
            whale: SeriesStats::from_values(trajectory.whale()),
            duration: trajectory.last().time,
            steps: trajectory.steps(),
        }
    }
}

/// Evenly strided subset of the trajectory for display.
///
/// Keeps the first and last entries. Returns every entry when the trajectory
/// already fits in `max_points`; `max_points` below 2 is treated as 2.
pub fn downsample(trajectory: &Trajectory, max_points: usize) -> Vec<SimulationState> {
    let len = trajectory.len();
    let max_points = max_points.max(2);
    if len <= max_points {
        return trajectory.iter().collect();
    }

    let last = len - 1;
    let intervals = max_points - 1;
    // last >= intervals here, so the rounded indices are strictly increasing
    (0..=intervals)
        .filter_map(|k| trajectory.state((k * last + intervals / 2) / intervals))
        .collect()
}
