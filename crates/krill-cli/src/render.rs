//! Downstream presentation of a finished run.
//!
//! Everything here only reads the trajectory; the three panels mirror the
//! classic layout: krill over time, whales over time, and the phase plot of
//! whales against krill.

use krill_core::{Result, ScenarioConfig, SimulationState};
use krill_world::{downsample, SimulationResult};
use serde::Serialize;
use std::io::Write;

/// One plot panel with fixed axis ranges
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotPanel {
    pub title: String,
    pub x: String,
    pub y: String,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
}

/// Plot-ready document for an external plotting tool
#[derive(Debug, Serialize)]
pub struct PlotData {
    pub panels: Vec<PlotPanel>,
    /// `(krill, whale)` fixed point, if defined
    pub equilibrium: Option<(f64, f64)>,
    pub points: Vec<SimulationState>,
}

pub fn panels(scenario: &ScenarioConfig) -> Vec<PlotPanel> {
    let duration = scenario.run.duration();
    let max_k = scenario.display.max_krill;
    let max_w = scenario.display.max_whale;
    vec![
        PlotPanel {
            title: "krill(t)".to_string(),
            x: "time".to_string(),
            y: "krill".to_string(),
            x_range: (0.0, duration),
            y_range: (0.0, max_k),
        },
        PlotPanel {
            title: "whale(t)".to_string(),
            x: "time".to_string(),
            y: "whale".to_string(),
            x_range: (0.0, duration),
            y_range: (0.0, max_w),
        },
        PlotPanel {
            title: "parametric plot - whales and krill".to_string(),
            x: "whale".to_string(),
            y: "krill".to_string(),
            x_range: (0.0, max_w),
            y_range: (0.0, max_k),
        },
    ]
}

pub fn plot_data(scenario: &ScenarioConfig, result: &SimulationResult, max_points: usize) -> PlotData {
    PlotData {
        panels: panels(scenario),
        equilibrium: scenario.model.equilibrium(),
        points: downsample(&result.trajectory, max_points),
    }
}

pub fn write_json<W: Write>(
    out: &mut W,
    scenario: &ScenarioConfig,
    result: &SimulationResult,
    max_points: usize,
) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, &plot_data(scenario, result, max_points))?;
    writeln!(out)?;
    Ok(())
}

pub fn write_csv<W: Write>(out: &mut W, result: &SimulationResult, max_points: usize) -> Result<()> {
    writeln!(out, "time,krill,whale")?;
    for state in downsample(&result.trajectory, max_points) {
        writeln!(out, "{},{},{}", state.time, state.krill, state.whale)?;
    }
    Ok(())
}

pub fn write_summary<W: Write>(
    out: &mut W,
    scenario: &ScenarioConfig,
    result: &SimulationResult,
) -> Result<()> {
    let stats = &result.stats;
    let model = &scenario.model;

    writeln!(
        out,
        "Krill/whale run: {} steps of {} (t_end = {})",
        result.steps,
        scenario.run.delta_t,
        stats.duration
    )?;
    writeln!(
        out,
        "  initial: krill = {}, whale = {}",
        scenario.initial.krill, scenario.initial.whale
    )?;
    writeln!(
        out,
        "  model:   a = {}, b = {}, m = {}, n = {}",
        model.a, model.b, model.m, model.n
    )?;
    match model.equilibrium() {
        Some((k, w)) => writeln!(out, "  equilibrium: krill = {:.3}, whale = {:.3}", k, w)?,
        None => writeln!(out, "  equilibrium: undefined (b or n is zero)")?,
    }
    writeln!(out)?;

    for (name, series) in [("krill", &stats.krill), ("whale", &stats.whale)] {
        writeln!(
            out,
            "  {:<5}  min {:>14.3}  max {:>14.3}  final {:>14.3}",
            name, series.min, series.max, series.final_value
        )?;
        if !series.all_finite {
            writeln!(out, "         non-finite values present")?;
        }
        if series.went_negative {
            writeln!(out, "         dropped below zero")?;
        }
    }
    writeln!(out)?;

    writeln!(out, "Panels:")?;
    for panel in panels(scenario) {
        writeln!(
            out,
            "  {:<36} {} in [{}, {}], {} in [{}, {}]",
            panel.title,
            panel.x,
            panel.x_range.0,
            panel.x_range.1,
            panel.y,
            panel.y_range.0,
            panel.y_range.1
        )?;
    }
    Ok(())
}
