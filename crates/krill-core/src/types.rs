//! Core type definitions for the simulation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Instantaneous state of the coupled system
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    /// Elapsed simulated time (years)
    #[serde(with = "crate::nonfinite")]
    pub time: f64,
    /// Krill population
    #[serde(with = "crate::nonfinite")]
    pub krill: f64,
    /// Whale population
    #[serde(with = "crate::nonfinite")]
    pub whale: f64,
}

impl SimulationState {
    pub fn new(time: f64, krill: f64, whale: f64) -> Self {
        Self { time, krill, whale }
    }

    /// State at `time = 0` from whole-number starting populations
    pub fn initial(krill: u64, whale: u64) -> Self {
        Self {
            time: 0.0,
            krill: krill as f64,
            whale: whale as f64,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.time.is_finite() && self.krill.is_finite() && self.whale.is_finite()
    }
}

impl fmt::Display for SimulationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "t={:.4} krill={:.3} whale={:.3}",
            self.time, self.krill, self.whale
        )
    }
}

/// Largest step count [`Trajectory::with_capacity`] reserves for in advance
pub const MAX_RESERVED_STEPS: usize = 1 << 24;

/// Full time-indexed record of a run.
///
/// Entry `i` of each sequence is the state after `i` steps; index 0 is the
/// initial state. Sequences only ever grow together through [`Trajectory::push`].
/// Non-finite entries serialize as `"inf"`, `"-inf"` or `"NaN"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTrajectory")]
pub struct Trajectory {
    #[serde(serialize_with = "crate::nonfinite::vec::serialize")]
    time: Vec<f64>,
    #[serde(serialize_with = "crate::nonfinite::vec::serialize")]
    krill: Vec<f64>,
    #[serde(serialize_with = "crate::nonfinite::vec::serialize")]
    whale: Vec<f64>,
}

impl Trajectory {
    pub fn new(initial: SimulationState) -> Self {
        Self {
            time: vec![initial.time],
            krill: vec![initial.krill],
            whale: vec![initial.whale],
        }
    }

    /// Start a trajectory with room for `steps` further entries.
    ///
    /// The up-front reservation is capped at [`MAX_RESERVED_STEPS`]; longer
    /// runs grow the sequences on demand.
    pub fn with_capacity(initial: SimulationState, steps: usize) -> Self {
        let cap = steps.min(MAX_RESERVED_STEPS) + 1;
        let mut time = Vec::with_capacity(cap);
        let mut krill = Vec::with_capacity(cap);
        let mut whale = Vec::with_capacity(cap);
        time.push(initial.time);
        krill.push(initial.krill);
        whale.push(initial.whale);
        Self { time, krill, whale }
    }

    /// Append one state to all three sequences.
    pub fn push(&mut self, state: SimulationState) {
        self.time.push(state.time);
        self.krill.push(state.krill);
        self.whale.push(state.whale);
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Always false: a trajectory holds at least its initial state.
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Number of update steps recorded (`len() - 1`)
    pub fn steps(&self) -> usize {
        self.len().saturating_sub(1)
    }

    pub fn times(&self) -> &[f64] {
        &self.time
    }

    pub fn krill(&self) -> &[f64] {
        &self.krill
    }

    pub fn whale(&self) -> &[f64] {
        &self.whale
    }

    pub fn state(&self, index: usize) -> Option<SimulationState> {
        Some(SimulationState {
            time: *self.time.get(index)?,
            krill: *self.krill.get(index)?,
            whale: *self.whale.get(index)?,
        })
    }

    pub fn initial(&self) -> SimulationState {
        SimulationState {
            time: self.time[0],
            krill: self.krill[0],
            whale: self.whale[0],
        }
    }

    pub fn last(&self) -> SimulationState {
        let i = self.len() - 1;
        SimulationState {
            time: self.time[i],
            krill: self.krill[i],
            whale: self.whale[i],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = SimulationState> + '_ {
        self.time
            .iter()
            .zip(&self.krill)
            .zip(&self.whale)
            .map(|((&time, &krill), &whale)| SimulationState { time, krill, whale })
    }

    /// Hand the three sequences to a consumer as `(time, krill, whale)`.
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        (self.time, self.krill, self.whale)
    }
}

#[derive(Deserialize)]
struct RawTrajectory {
    #[serde(with = "crate::nonfinite::vec")]
    time: Vec<f64>,
    #[serde(with = "crate::nonfinite::vec")]
    krill: Vec<f64>,
    #[serde(with = "crate::nonfinite::vec")]
    whale: Vec<f64>,
}

impl TryFrom<RawTrajectory> for Trajectory {
    type Error = String;

    fn try_from(raw: RawTrajectory) -> std::result::Result<Self, Self::Error> {
        if raw.time.is_empty() {
            return Err("trajectory must contain the initial state".to_string());
        }
        if raw.time.len() != raw.krill.len() || raw.time.len() != raw.whale.len() {
            return Err(format!(
                "trajectory sequences differ in length: time={}, krill={}, whale={}",
                raw.time.len(),
                raw.krill.len(),
                raw.whale.len()
            ));
        }
        Ok(Self {
            time: raw.time,
            krill: raw.krill,
            whale: raw.whale,
        })
    }
}
