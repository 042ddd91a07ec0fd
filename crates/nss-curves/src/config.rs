//! Calibration settings.
//!
//! [`CalibrationConfig`] is plain data so it can be embedded in a TOML or
//! JSON settings file; every field falls back to its default when absent.

use nss_math::optimization::OptimizationConfig;
use serde::{Deserialize, Serialize};

use crate::error::{CurveError, CurveResult};

/// Default starting decay scale for Nelson-Siegel calibration.
pub const DEFAULT_NS_TAU0: f64 = 2.0;

/// Default starting decay scales for Svensson calibration.
pub const DEFAULT_NSS_TAU0: (f64, f64) = (2.0, 5.0);

/// Settings for the outer (decay scale) search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalibrationConfig {
    /// Starting τ for Nelson-Siegel.
    #[serde(default = "default_initial_tau")]
    pub initial_tau: f64,

    /// Starting `(τ₁, τ₂)` for Svensson.
    #[serde(default = "default_initial_taus")]
    pub initial_taus: [f64; 2],

    /// Maximum number of simplex iterations.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u64,

    /// Convergence tolerance on the spread of simplex objective values.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// Relative size of the initial simplex.
    #[serde(default = "default_initial_step")]
    pub initial_step: f64,

    /// Smallest decay scale the search may visit.
    #[serde(default = "default_min_tau")]
    pub min_tau: f64,
}

fn default_initial_tau() -> f64 {
    DEFAULT_NS_TAU0
}

fn default_initial_taus() -> [f64; 2] {
    [DEFAULT_NSS_TAU0.0, DEFAULT_NSS_TAU0.1]
}

fn default_max_iterations() -> u64 {
    1000
}

fn default_tolerance() -> f64 {
    f64::EPSILON
}

fn default_initial_step() -> f64 {
    0.05
}

fn default_min_tau() -> f64 {
    1e-6
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            initial_tau: default_initial_tau(),
            initial_taus: default_initial_taus(),
            max_iterations: default_max_iterations(),
            tolerance: default_tolerance(),
            initial_step: default_initial_step(),
            min_tau: default_min_tau(),
        }
    }
}

impl CalibrationConfig {
    /// Builder method to set the Nelson-Siegel starting τ.
    #[must_use]
    pub fn with_initial_tau(mut self, tau: f64) -> Self {
        self.initial_tau = tau;
        self
    }

    /// Builder method to set the Svensson starting `(τ₁, τ₂)`.
    #[must_use]
    pub fn with_initial_taus(mut self, tau1: f64, tau2: f64) -> Self {
        self.initial_taus = [tau1, tau2];
        self
    }

    /// Builder method to set the iteration cap.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u64) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Builder method to set the convergence tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Builder method to set the lower bound on decay scales.
    #[must_use]
    pub fn with_min_tau(mut self, min_tau: f64) -> Self {
        self.min_tau = min_tau;
        self
    }

    /// Checks every setting, reporting all problems at once.
    pub fn validate(&self) -> CurveResult<()> {
        let mut problems = Vec::new();

        let positive = |name: &str, value: f64, problems: &mut Vec<String>| {
            if !(value.is_finite() && value > 0.0) {
                problems.push(format!("{name} must be finite and > 0, got {value}"));
            }
        };

        positive("initial_tau", self.initial_tau, &mut problems);
        positive("initial_taus[0]", self.initial_taus[0], &mut problems);
        positive("initial_taus[1]", self.initial_taus[1], &mut problems);
        positive("initial_step", self.initial_step, &mut problems);
        positive("min_tau", self.min_tau, &mut problems);

        if !(self.tolerance.is_finite() && self.tolerance >= 0.0) {
            problems.push(format!(
                "tolerance must be finite and >= 0, got {}",
                self.tolerance
            ));
        }
        if self.max_iterations == 0 {
            problems.push("max_iterations must be at least 1".to_string());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(CurveError::invalid_config(problems.join("; ")))
        }
    }

    /// Minimizer settings derived from this configuration.
    pub fn optimization_config(&self) -> OptimizationConfig {
        OptimizationConfig::default()
            .with_tolerance(self.tolerance)
            .with_max_iterations(self.max_iterations)
            .with_initial_step(self.initial_step)
    }
}
