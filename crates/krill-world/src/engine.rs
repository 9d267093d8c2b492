//! Explicit Euler integration and the run driver.

use crate::stats::TrajectoryStats;
use krill_core::{ModelParameters, RunConfig, ScenarioConfig, SimulationState, Trajectory};
use serde::Serialize;
use tracing::{debug, info, instrument};

/// Steps between progress events in [`Simulation::run`]
const PROGRESS_INTERVAL: u64 = 100_000;

/// Advance the state by one explicit Euler step.
///
/// Both derivatives are evaluated on the incoming snapshot: the whale update
/// reads the krill value from before this step's krill update.
#[inline]
pub fn euler_step(state: SimulationState, params: &ModelParameters, delta_t: f64) -> SimulationState {
    let old_krill = state.krill;
    let krill = state.krill + params.krill_rate(state.krill, state.whale) * delta_t;
    let whale = state.whale + params.whale_rate(old_krill, state.whale) * delta_t;
    SimulationState {
        time: state.time + delta_t,
        krill,
        whale,
    }
}

/// Integrate `run.n_steps` steps from `initial`.
///
/// Total over its inputs: no clamping, no early exit, non-finite values
/// propagate. The result always holds `n_steps + 1` entries; memory grows
/// linearly with `n_steps`.
pub fn integrate(initial: SimulationState, params: &ModelParameters, run: &RunConfig) -> Trajectory {
    integrate_observed(initial, params, run, |_, _| {})
}

/// [`integrate`], calling `observe(step, &state)` after each appended step.
///
/// The observer only sees the state; it cannot alter the trajectory.
pub fn integrate_observed<F>(
    initial: SimulationState,
    params: &ModelParameters,
    run: &RunConfig,
    mut observe: F,
) -> Trajectory
where
    F: FnMut(u64, &SimulationState),
{
    let reserve = usize::try_from(run.n_steps).unwrap_or(usize::MAX);
    let mut trajectory = Trajectory::with_capacity(initial, reserve);
    let mut state = initial;
    for step in 1..=run.n_steps {
        state = euler_step(state, params, run.delta_t);
        trajectory.push(state);
        observe(step, &state);
    }
    trajectory
}

/// Runs one scenario and reports on it.
pub struct Simulation {
    config: ScenarioConfig,
}

impl Simulation {
    pub fn new(config: ScenarioConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    /// Run the simulation for the configured number of steps
    #[instrument(
        skip(self),
        fields(
            n_steps = self.config.run.n_steps,
            delta_t = self.config.run.delta_t,
        )
    )]
    pub fn run(&self) -> SimulationResult {
        let initial = SimulationState::initial(self.config.initial.krill, self.config.initial.whale);
        let params = self.config.model;
        let run = self.config.run;

        info!(
            krill0 = self.config.initial.krill,
            whale0 = self.config.initial.whale,
            a = params.a,
            b = params.b,
            m = params.m,
            n = params.n,
            "Starting simulation for {} steps",
            run.n_steps
        );

        let trajectory = integrate_observed(initial, &params, &run, |step, state| {
            if step % PROGRESS_INTERVAL == 0 {
                debug!(
                    step,
                    time = state.time,
                    krill = state.krill,
                    whale = state.whale,
                    "Step {}/{}",
                    step,
                    run.n_steps
                );
            }
        });

        let stats = TrajectoryStats::from_trajectory(&trajectory);
        self.emit_run_summary(&trajectory, &stats);

        SimulationResult {
            steps: run.n_steps,
            trajectory,
            stats,
        }
    }

    fn emit_run_summary(&self, trajectory: &Trajectory, stats: &TrajectoryStats) {
        let last = trajectory.last();
        info!(
            event = "run_summary",
            steps = stats.steps,
            final_time = last.time,
            final_krill = last.krill,
            final_whale = last.whale,
            krill_min = stats.krill.min,
            krill_max = stats.krill.max,
            whale_min = stats.whale.min,
            whale_max = stats.whale.max,
            all_finite = stats.krill.all_finite && stats.whale.all_finite,
            went_negative = stats.krill.went_negative || stats.whale.went_negative,
            "Simulation complete"
        );
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationResult {
    pub trajectory: Trajectory,
    pub stats: TrajectoryStats,
    pub steps: u64,
}
