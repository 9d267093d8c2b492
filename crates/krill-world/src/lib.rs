//! Simulation engine for the krill/whale model.
//!
//! Fixed-step explicit Euler integration of the coupled system, plus
//! read-only statistics over the resulting trajectory.

pub mod engine;
pub mod stats;

pub use engine::{euler_step, integrate, integrate_observed, Simulation, SimulationResult};
pub use stats::{downsample, SeriesStats, TrajectoryStats};
