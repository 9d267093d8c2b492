//! Configuration types for the simulation.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Interaction coefficients of the krill/whale model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelParameters {
    /// Krill intrinsic growth rate
    pub a: f64,
    /// Krill mortality per unit whale population
    pub b: f64,
    /// Whale intrinsic decline rate
    pub m: f64,
    /// Whale growth per unit krill population
    pub n: f64,
}

impl Default for ModelParameters {
    fn default() -> Self {
        Self {
            a: 0.2,
            b: 0.0001,
            m: 0.5,
            n: 0.000001,
        }
    }
}

impl ModelParameters {
    pub fn new(a: f64, b: f64, m: f64, n: f64) -> Self {
        Self { a, b, m, n }
    }

    /// dK/dt: growth at rate `a`, discounted by predation pressure
    #[inline]
    pub fn krill_rate(&self, krill: f64, whale: f64) -> f64 {
        (self.a - self.b * whale) * krill
    }

    /// dW/dt: decline at rate `m`, offset by available krill
    #[inline]
    pub fn whale_rate(&self, krill: f64, whale: f64) -> f64 {
        (-self.m + self.n * krill) * whale
    }

    /// Non-trivial fixed point `(krill, whale) = (m/n, a/b)`.
    ///
    /// Returns `None` when either denominator is zero. Diagnostic only.
    pub fn equilibrium(&self) -> Option<(f64, f64)> {
        if self.n == 0.0 || self.b == 0.0 {
            return None;
        }
        Some((self.m / self.n, self.a / self.b))
    }

    fn validate(&self) -> Result<()> {
        for (name, value) in [("a", self.a), ("b", self.b), ("m", self.m), ("n", self.n)] {
            if !value.is_finite() {
                return Err(Error::Validation(format!(
                    "coefficient {} must be finite, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Starting populations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitialPopulations {
    pub krill: u64,
    pub whale: u64,
}

impl Default for InitialPopulations {
    fn default() -> Self {
        Self {
            krill: 700_000,
            whale: 3000,
        }
    }
}

/// Step size and step count for one run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Fixed integration step (years). Must be small relative to the
    /// system's timescales; stability is the caller's concern.
    pub delta_t: f64,
    /// Number of update iterations
    pub n_steps: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            delta_t: 0.0001,
            n_steps: 600_000,
        }
    }
}

impl RunConfig {
    pub fn new(delta_t: f64, n_steps: u64) -> Self {
        Self { delta_t, n_steps }
    }

    /// Nominal simulated span, `n_steps * delta_t`. Used for axis ranges only.
    pub fn duration(&self) -> f64 {
        self.n_steps as f64 * self.delta_t
    }

    fn validate(&self) -> Result<()> {
        if !self.delta_t.is_finite() || self.delta_t <= 0.0 {
            return Err(Error::Validation(format!(
                "delta_t must be finite and > 0, got {}",
                self.delta_t
            )));
        }
        Ok(())
    }
}

/// Axis limits used when plotting
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub max_krill: f64,
    pub max_whale: f64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_krill: 1_000_000.0,
            max_whale: 10_000.0,
        }
    }
}

impl DisplayConfig {
    fn validate(&self) -> Result<()> {
        for (name, value) in [("max_krill", self.max_krill), ("max_whale", self.max_whale)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::Validation(format!(
                    "{} must be finite and > 0, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Everything needed for one run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub initial: InitialPopulations,
    pub model: ModelParameters,
    pub run: RunConfig,
    pub display: DisplayConfig,
}

impl ScenarioConfig {
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Optional pre-check before a run.
    ///
    /// Catches parameters that cannot describe a forward-in-time run. It does
    /// not judge numerical stability or sign of the populations; the
    /// integrator accepts anything and this check is never applied by it.
    pub fn validate(&self) -> Result<()> {
        self.model.validate()?;
        self.run.validate()?;
        self.display.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configs() {
        let model = ModelParameters::default();
        assert_eq!(model.a, 0.2);
        assert_eq!(model.b, 0.0001);
        assert_eq!(model.m, 0.5);
        assert_eq!(model.n, 0.000001);

        let initial = InitialPopulations::default();
        assert_eq!(initial.krill, 700_000);
        assert_eq!(initial.whale, 3000);

        let run = RunConfig::default();
        assert_eq!(run.delta_t, 0.0001);
        assert_eq!(run.n_steps, 600_000);
        assert!((run.duration() - 60.0).abs() < 1e-9);

        let display = DisplayConfig::default();
        assert_eq!(display.max_krill, 1_000_000.0);
        assert_eq!(display.max_whale, 10_000.0);

        assert!(ScenarioConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rates() {
        let model = ModelParameters::default();
        // (0.2 - 0.0001 * 3000) * 700000 = -70000
        assert!((model.krill_rate(700_000.0, 3000.0) + 70_000.0).abs() < 1e-6);
        // (-0.5 + 0.000001 * 700000) * 3000 = 600
        assert!((model.whale_rate(700_000.0, 3000.0) - 600.0).abs() < 1e-6);
    }

    #[test]
    fn test_equilibrium() {
        let (k, w) = ModelParameters::default().equilibrium().unwrap();
        assert!((k - 500_000.0).abs() < 1e-6);
        assert!((w - 2000.0).abs() < 1e-6);

        assert!(ModelParameters::new(0.2, 0.0, 0.5, 1e-6).equilibrium().is_none());
        assert!(ModelParameters::new(0.2, 1e-4, 0.5, 0.0).equilibrium().is_none());
    }

    #[test]
    fn test_validation_rejects_bad_step() {
        let mut config = ScenarioConfig::default();
        config.run.delta_t = 0.0;
        assert!(matches!(config.validate(), Err(Error::Validation(_))));

        config.run.delta_t = -0.001;
        assert!(config.validate().is_err());

        config.run.delta_t = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_non_finite_coefficient() {
        let mut config = ScenarioConfig::default();
        config.model.m = f64::INFINITY;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("coefficient m"));
    }

    #[test]
    fn test_validation_allows_negative_coefficients() {
        let mut config = ScenarioConfig::default();
        config.model.a = -1.0;
        config.model.n = -0.5;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let json = r#"{ "initial": { "whale": 42 }, "run": { "n_steps": 10 } }"#;
        let config = ScenarioConfig::from_json_str(json).unwrap();
        assert_eq!(config.initial.krill, 700_000);
        assert_eq!(config.initial.whale, 42);
        assert_eq!(config.run.n_steps, 10);
        assert_eq!(config.run.delta_t, 0.0001);
        assert_eq!(config.model, ModelParameters::default());
    }

    #[test]
    fn test_scenario_serialization() {
        let config = ScenarioConfig::default();
        let json = config.to_json_pretty().unwrap();
        let back = ScenarioConfig::from_json_str(&json).unwrap();
        assert_eq!(back.initial, config.initial);
        assert_eq!(back.run.n_steps, config.run.n_steps);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = ScenarioConfig::from_json_file("/nonexistent/krill/scenario.json").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
