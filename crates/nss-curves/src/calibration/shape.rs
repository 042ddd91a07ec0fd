//! Nonlinear search over decay scales.

use nss_math::optimization::{nelder_mead, Bounds};
use serde::Serialize;
use tracing::{debug, warn};

use super::objective::profile_error;
use super::ols::solve_betas;
use super::{check_sample, check_shape};
use crate::config::CalibrationConfig;
use crate::error::{CurveError, CurveResult};
use crate::models::{NelsonSiegel, ShapeModel, Svensson};

/// Outcome of the outer search.
///
/// Non-convergence is not an error: check [`CalibrationStatus::success`]
/// before trusting the fitted curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalibrationStatus {
    /// Whether the minimizer met its convergence criterion.
    pub success: bool,
    /// Number of simplex iterations.
    pub iterations: u64,
    /// Sum of squared residuals at the returned shape.
    pub objective_value: f64,
    /// Termination reason reported by the minimizer.
    pub termination: String,
    /// Final decay scales.
    pub shape: Vec<f64>,
    /// Number of observations fitted.
    pub observations: usize,
}

impl CalibrationStatus {
    /// Root mean squared residual.
    #[must_use]
    pub fn rms_error(&self) -> f64 {
        if self.observations == 0 {
            return 0.0;
        }
        (self.objective_value / self.observations as f64).sqrt()
    }

    /// One-line description of the calibration outcome.
    pub fn summary(&self) -> String {
        format!(
            "Calibration {}: {} iterations, SSE={:.3e}, RMS={:.4}bp ({})",
            if self.success { "converged" } else { "FAILED" },
            self.iterations,
            self.objective_value,
            self.rms_error() * 10_000.0,
            self.termination
        )
    }
}

/// Profile least-squares calibrator.
///
/// Searches the decay scales with Nelder-Mead; each objective evaluation
/// solves for the betas by OLS.
///
/// # Example
///
/// ```rust
/// use nss_curves::prelude::*;
///
/// let truth = NelsonSiegel::new(0.017, -0.023, 0.24, 2.2);
/// let t: Vec<f64> = (0..=30).map(f64::from).collect();
/// let y = truth.zeros(&t);
///
/// let (curve, status) = Calibrator::default().calibrate_ns(&t, &y).unwrap();
/// assert!(status.success);
/// assert!((curve.tau() - 2.2).abs() < 1e-3);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Calibrator {
    config: CalibrationConfig,
}

impl Calibrator {
    /// Creates a calibrator with the given settings.
    pub fn new(config: CalibrationConfig) -> Self {
        Self { config }
    }

    /// Returns the settings.
    pub fn config(&self) -> &CalibrationConfig {
        &self.config
    }

    /// Calibrates a Nelson-Siegel curve from the configured starting τ.
    pub fn calibrate_ns(&self, t: &[f64], y: &[f64]) -> CurveResult<(NelsonSiegel, CalibrationStatus)> {
        self.calibrate::<NelsonSiegel>(t, y, self.config.initial_tau)
    }

    /// Calibrates a Svensson curve from the configured starting `(τ₁, τ₂)`.
    pub fn calibrate_nss(&self, t: &[f64], y: &[f64]) -> CurveResult<(Svensson, CalibrationStatus)> {
        let [tau1, tau2] = self.config.initial_taus;
        self.calibrate::<Svensson>(t, y, (tau1, tau2))
    }

    /// Calibrates model `M` to `(t, y)` starting from `shape0`.
    ///
    /// # Errors
    ///
    /// Fails before any numeric work on a mismatched, empty or non-finite
    /// sample, an invalid configuration, or a starting shape below
    /// `min_tau`. Failing to converge is reported through the status.
    pub fn calibrate<M: ShapeModel>(
        &self,
        t: &[f64],
        y: &[f64],
        shape0: M::Shape,
    ) -> CurveResult<(M, CalibrationStatus)> {
        check_sample(t, y)?;
        self.config.validate()?;
        check_shape::<M>(shape0)?;

        let initial = M::shape_to_vec(shape0);
        for (name, value) in M::SHAPE_NAMES.iter().zip(&initial) {
            if *value < self.config.min_tau {
                return Err(CurveError::invalid_shape(*name, *value));
            }
        }

        debug!(
            model = M::NAME,
            observations = t.len(),
            ?shape0,
            "starting calibration"
        );

        let bounds = Bounds::lower_only(self.config.min_tau, initial.len());
        let objective = |p: &[f64]| {
            profile_error::<M>(M::shape_from_slice(p), t, y).unwrap_or(f64::INFINITY)
        };
        let result = nelder_mead(
            objective,
            &initial,
            Some(&bounds),
            &self.config.optimization_config(),
        )?;

        let shape = M::shape_from_slice(&result.parameters);
        let (model, _) = solve_betas::<M>(shape, t, y)?;

        let status = CalibrationStatus {
            success: result.converged,
            iterations: result.iterations,
            objective_value: result.objective_value,
            termination: result.termination,
            shape: result.parameters,
            observations: t.len(),
        };

        if status.success {
            debug!(model = M::NAME, ?shape, "{}", status.summary());
        } else {
            warn!(model = M::NAME, ?shape, "{}", status.summary());
        }

        Ok((model, status))
    }
}

/// Calibrates a Nelson-Siegel curve to `(t, y)` starting from `tau0`.
///
/// Uses the default [`CalibrationConfig`]; the conventional start is
/// [`DEFAULT_NS_TAU0`](crate::config::DEFAULT_NS_TAU0).
pub fn calibrate_ns(
    t: &[f64],
    y: &[f64],
    tau0: f64,
) -> CurveResult<(NelsonSiegel, CalibrationStatus)> {
    Calibrator::default().calibrate::<NelsonSiegel>(t, y, tau0)
}

/// Calibrates a Svensson curve to `(t, y)` starting from `(τ₁, τ₂)`.
///
/// The two hump terms are interchangeable, so the result depends on the
/// ordering of the starting scales: starting with `τ₁ < τ₂` tends to keep
/// `τ₁ < τ₂` and vice versa, and different starts can settle in different
/// local optima. Recovery of the true parameters is only reliable when the
/// start is close to them.
pub fn calibrate_nss(
    t: &[f64],
    y: &[f64],
    tau0: (f64, f64),
) -> CurveResult<(Svensson, CalibrationStatus)> {
    Calibrator::default().calibrate::<Svensson>(t, y, tau0)
}
