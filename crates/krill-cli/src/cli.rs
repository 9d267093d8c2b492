//! Command-line arguments and scenario assembly.

use clap::{Parser, ValueEnum};
use krill_core::{Result, ScenarioConfig};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plot panel report with axis ranges and run statistics
    Summary,
    /// Plot data document for an external plotting tool
    Json,
    /// time,krill,whale rows
    Csv,
}

#[derive(Debug, Parser)]
#[command(name = "krill")]
#[command(version)]
#[command(about = "Krill/whale population dynamics with fixed-step Euler integration")]
pub struct Cli {
    /// Scenario file (JSON); explicit flags override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Initial number of krill
    #[arg(long)]
    pub krill: Option<u64>,

    /// Initial number of whales
    #[arg(long)]
    pub whale: Option<u64>,

    /// Krill growth rate
    #[arg(short = 'a', allow_negative_numbers = true)]
    pub a: Option<f64>,

    /// Krill mortality per whale
    #[arg(short = 'b', allow_negative_numbers = true)]
    pub b: Option<f64>,

    /// Whale decline rate
    #[arg(short = 'm', allow_negative_numbers = true)]
    pub m: Option<f64>,

    /// Whale growth per krill
    #[arg(short = 'n', allow_negative_numbers = true)]
    pub n: Option<f64>,

    /// Integration step size (years)
    #[arg(long, allow_negative_numbers = true)]
    pub delta_t: Option<f64>,

    /// Number of integration steps
    #[arg(short, long)]
    pub steps: Option<u64>,

    /// Prompt for the populations and coefficients on stdin
    #[arg(short, long)]
    pub interactive: bool,

    /// Skip the parameter pre-check
    #[arg(long)]
    pub no_validate: bool,

    /// What to write to stdout
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Summary)]
    pub output: OutputFormat,

    /// Maximum number of trajectory points in json/csv output
    #[arg(short, long, default_value = "1000")]
    pub points: usize,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,
}

impl Cli {
    /// Defaults, then the config file, then explicit flags.
    pub fn base_scenario(&self) -> Result<ScenarioConfig> {
        let mut scenario = match &self.config {
            Some(path) => ScenarioConfig::from_json_file(path)?,
            None => ScenarioConfig::default(),
        };
        self.apply_overrides(&mut scenario);
        Ok(scenario)
    }

    fn apply_overrides(&self, scenario: &mut ScenarioConfig) {
        if let Some(krill) = self.krill {
            scenario.initial.krill = krill;
        }
        if let Some(whale) = self.whale {
            scenario.initial.whale = whale;
        }
        if let Some(a) = self.a {
            scenario.model.a = a;
        }
        if let Some(b) = self.b {
            scenario.model.b = b;
        }
        if let Some(m) = self.m {
            scenario.model.m = m;
        }
        if let Some(n) = self.n {
            scenario.model.n = n;
        }
        if let Some(delta_t) = self.delta_t {
            scenario.run.delta_t = delta_t;
        }
        if let Some(steps) = self.steps {
            scenario.run.n_steps = steps;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_without_flags() {
        let cli = Cli::parse_from(["krill"]);
        assert_eq!(cli.output, OutputFormat::Summary);
        assert_eq!(cli.points, 1000);
        assert_eq!(cli.base_scenario().unwrap(), ScenarioConfig::default());
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from([
            "krill", "--krill", "500", "--whale", "7", "-a", "0.3", "-m", "-0.25", "--steps", "20",
            "--delta-t", "0.01", "-o", "csv",
        ]);
        let scenario = cli.base_scenario().unwrap();
        assert_eq!(scenario.initial.krill, 500);
        assert_eq!(scenario.initial.whale, 7);
        assert_eq!(scenario.model.a, 0.3);
        assert_eq!(scenario.model.m, -0.25);
        assert_eq!(scenario.model.b, 0.0001);
        assert_eq!(scenario.run.n_steps, 20);
        assert_eq!(scenario.run.delta_t, 0.01);
        assert_eq!(cli.output, OutputFormat::Csv);
    }

    #[test]
    fn test_config_file_then_flags() {
        let path = std::env::temp_dir().join(format!("krill_cli_test_scenario_{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "initial": { "krill": 123, "whale": 45 }, "run": { "n_steps": 9 } }"#)
            .unwrap();

        let cli = Cli::parse_from(["krill", "--config", path.to_str().unwrap(), "--whale", "46"]);
        let scenario = cli.base_scenario().unwrap();
        assert_eq!(scenario.initial.krill, 123);
        assert_eq!(scenario.initial.whale, 46);
        assert_eq!(scenario.run.n_steps, 9);

        std::fs::remove_file(&path).ok();
    }
}
