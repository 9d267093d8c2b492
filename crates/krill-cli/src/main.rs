//! Command-line driver: collect parameters, run the model, present the result.

mod cli;
mod prompt;
mod render;
mod telemetry;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, OutputFormat};
use krill_world::Simulation;
use std::io::{self, Write};
use tracing::{info, warn};

fn main() -> Result<()> {
    let cli = Cli::parse();

    telemetry::init_telemetry(cli.log_json)?;

    let mut scenario = cli.base_scenario().context("failed to load scenario")?;

    if cli.interactive {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut prompt_out = io::stderr();
        prompt::prompt_parameters(&mut input, &mut prompt_out, &mut scenario)
            .context("failed to read parameters")?;
    }

    if cli.no_validate {
        warn!("Parameter pre-check skipped");
    } else {
        scenario.validate().context("invalid parameters")?;
    }

    let result = Simulation::new(scenario.clone()).run();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.output {
        OutputFormat::Summary => render::write_summary(&mut out, &scenario, &result)?,
        OutputFormat::Json => render::write_json(&mut out, &scenario, &result, cli.points)?,
        OutputFormat::Csv => render::write_csv(&mut out, &result, cli.points)?,
    }
    out.flush()?;

    info!(output = ?cli.output, "Done");
    Ok(())
}
