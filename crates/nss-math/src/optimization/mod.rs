//! Optimization algorithms.
//!
//! This module provides the derivative-free minimizer used for the outer
//! (nonlinear) stage of curve calibration. The search itself is delegated to
//! the Nelder-Mead solver of the `argmin` crate; this module adapts plain
//! closures to argmin's [`CostFunction`] interface and reduces argmin's final
//! state to an [`OptimizationResult`].

use argmin::core::{CostFunction, Error, Executor, State, TerminationReason, TerminationStatus};
use argmin::solver::neldermead::NelderMead;

use crate::error::{MathError, MathResult};

/// Configuration for optimization algorithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptimizationConfig {
    /// Sample standard deviation of the simplex costs at which a run stops,
    /// and the cost improvement below which a restart counts as settled.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u64,
    /// Relative size of the initial simplex around the starting point.
    pub initial_step: f64,
}

impl Default for OptimizationConfig {
    fn default() -> Self {
        Self {
            tolerance: f64::EPSILON,
            max_iterations: 1000,
            initial_step: 0.05,
        }
    }
}

impl OptimizationConfig {
    /// Sets the convergence tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u64) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the relative size of the initial simplex.
    #[must_use]
    pub fn with_initial_step(mut self, initial_step: f64) -> Self {
        self.initial_step = initial_step;
        self
    }
}

/// Result of an optimization run.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationResult {
    /// Optimal parameters found.
    pub parameters: Vec<f64>,
    /// Final objective function value.
    pub objective_value: f64,
    /// Number of iterations used.
    pub iterations: u64,
    /// Whether the optimization converged.
    pub converged: bool,
    /// Human-readable termination reason reported by the solver.
    pub termination: String,
}

/// Per-coordinate box constraints.
///
/// Nelder-Mead has no native notion of bounds; points outside the box are
/// given an infinite cost so the simplex never moves there.
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    /// Lower bound per coordinate.
    pub lower: Vec<f64>,
    /// Upper bound per coordinate.
    pub upper: Vec<f64>,
}

impl Bounds {
    /// Creates bounds from explicit lower and upper vectors.
    pub fn new(lower: Vec<f64>, upper: Vec<f64>) -> MathResult<Self> {
        if lower.len() != upper.len() {
            return Err(MathError::invalid_input(format!(
                "bounds have {} lower and {} upper entries",
                lower.len(),
                upper.len()
            )));
        }
        if let Some(i) = (0..lower.len()).find(|&i| lower[i] > upper[i]) {
            return Err(MathError::invalid_input(format!(
                "lower bound {} exceeds upper bound {} at index {i}",
                lower[i], upper[i]
            )));
        }
        Ok(Self { lower, upper })
    }

    /// Creates bounds with a common lower bound and no upper bound.
    pub fn lower_only(lower: f64, dimension: usize) -> Self {
        Self {
            lower: vec![lower; dimension],
            upper: vec![f64::INFINITY; dimension],
        }
    }

    /// Returns the number of constrained coordinates.
    pub fn dimension(&self) -> usize {
        self.lower.len()
    }

    /// Returns true if `x` lies inside the box (bounds inclusive).
    pub fn contains(&self, x: &[f64]) -> bool {
        x.iter()
            .zip(self.lower.iter().zip(&self.upper))
            .all(|(v, (lo, hi))| *v >= *lo && *v <= *hi)
    }
}

/// Adapts a closure to argmin's cost function interface.
struct ClosureCost<'a, F> {
    f: &'a F,
    bounds: Option<&'a Bounds>,
}

impl<F> CostFunction for ClosureCost<'_, F>
where
    F: Fn(&[f64]) -> f64,
{
    type Param = Vec<f64>;
    type Output = f64;

    fn cost(&self, param: &Self::Param) -> Result<Self::Output, Error> {
        if let Some(bounds) = self.bounds {
            if !bounds.contains(param) {
                return Ok(f64::INFINITY);
            }
        }
        let value = (self.f)(param);
        // NaN would break the simplex ordering
        Ok(if value.is_nan() { f64::INFINITY } else { value })
    }
}

/// Builds the starting simplex: the initial point plus one vertex per
/// coordinate, perturbed by `step` relative to that coordinate.
fn initial_simplex(initial: &[f64], step: f64) -> Vec<Vec<f64>> {
    let mut simplex = Vec::with_capacity(initial.len() + 1);
    simplex.push(initial.to_vec());
    for i in 0..initial.len() {
        let mut vertex = initial.to_vec();
        vertex[i] = if vertex[i] == 0.0 {
            0.00025
        } else {
            vertex[i] * (1.0 + step)
        };
        simplex.push(vertex);
    }
    simplex
}

/// Upper limit on simplex restarts from the best point.
const MAX_RESTARTS: usize = 16;

/// Relative parameter change below which a restart counts as settled.
const PARAMETER_TOLERANCE: f64 = 1e-10;

fn max_relative_step(from: &[f64], to: &[f64]) -> f64 {
    from.iter()
        .zip(to)
        .map(|(a, b)| (b - a).abs() / (1.0 + a.abs()))
        .fold(0.0, f64::max)
}

/// Outcome of a single simplex run.
struct SimplexRun {
    parameters: Vec<f64>,
    cost: f64,
    iterations: u64,
    status: TerminationStatus,
}

impl SimplexRun {
    fn solver_converged(&self) -> bool {
        matches!(
            self.status,
            TerminationStatus::Terminated(
                TerminationReason::SolverConverged | TerminationReason::TargetCostReached
            )
        )
    }

    fn termination(&self) -> String {
        match &self.status {
            TerminationStatus::Terminated(reason) => reason.text().to_string(),
            TerminationStatus::NotTerminated => "Not terminated".to_string(),
        }
    }
}

fn run_simplex<F>(
    f: &F,
    start: &[f64],
    bounds: Option<&Bounds>,
    config: &OptimizationConfig,
    max_iterations: u64,
) -> MathResult<SimplexRun>
where
    F: Fn(&[f64]) -> f64,
{
    let solver = NelderMead::new(initial_simplex(start, config.initial_step))
        .with_sd_tolerance(config.tolerance)?;
    let problem = ClosureCost { f, bounds };

    let res = Executor::new(problem, solver)
        .configure(|state| state.max_iters(max_iterations))
        .run()?;

    let state = res.state();
    let parameters = state
        .get_best_param()
        .cloned()
        .ok_or_else(|| MathError::Optimizer {
            reason: "solver finished without a best parameter".to_string(),
        })?;

    Ok(SimplexRun {
        parameters,
        cost: state.get_best_cost(),
        iterations: state.get_iter(),
        status: state.get_termination_status().clone(),
    })
}

/// Minimizes `f` starting from `initial` with the Nelder-Mead simplex method.
///
/// The objective is treated as a black box: no gradients are required.
///
/// A collapsed simplex only shows that the vertex costs agree, which also
/// happens when the vertices straddle the minimum symmetrically. Whenever the
/// solver stops on its cost tolerance the search is therefore restarted with
/// a fresh simplex around the best point, and convergence is reported only
/// once a restart no longer lowers the cost by more than the tolerance or no
/// longer moves the best point.
///
/// Reaching `max_iterations` (counted over all restarts) is not an error; it
/// is reported through [`OptimizationResult::converged`].
///
/// # Errors
///
/// Returns an error if `initial` is empty, if the bounds have the wrong
/// dimension or exclude the starting point, or if the backend fails.
pub fn nelder_mead<F>(
    f: F,
    initial: &[f64],
    bounds: Option<&Bounds>,
    config: &OptimizationConfig,
) -> MathResult<OptimizationResult>
where
    F: Fn(&[f64]) -> f64,
{
    if initial.is_empty() {
        return Err(MathError::insufficient_data(1, 0));
    }
    if let Some(b) = bounds {
        if b.dimension() != initial.len() {
            return Err(MathError::invalid_input(format!(
                "bounds dimension {} does not match parameter dimension {}",
                b.dimension(),
                initial.len()
            )));
        }
        if !b.contains(initial) {
            return Err(MathError::invalid_input(format!(
                "initial point {initial:?} lies outside the bounds"
            )));
        }
    }

    let mut best = run_simplex(&f, initial, bounds, config, config.max_iterations)?;
    let mut iterations = best.iterations;
    let mut termination = best.termination();
    let mut converged = false;
    let mut restarts = 0;

    while best.solver_converged() {
        let remaining = config.max_iterations.saturating_sub(iterations);
        if remaining == 0 {
            termination = TerminationReason::MaxItersReached.text().to_string();
            break;
        }
        if restarts == MAX_RESTARTS {
            termination = format!("No stable minimum after {MAX_RESTARTS} restarts");
            break;
        }
        restarts += 1;

        let run = run_simplex(&f, &best.parameters, bounds, config, remaining)?;
        iterations += run.iterations;
        termination = run.termination();
        log::trace!(
            "nelder-mead restart {restarts}: cost {:.3e} -> {:.3e}",
            best.cost,
            run.cost
        );

        if !run.solver_converged() {
            if run.cost < best.cost {
                best = run;
            }
            break;
        }
        let settled = run.cost >= best.cost - config.tolerance
            || max_relative_step(&best.parameters, &run.parameters) <= PARAMETER_TOLERANCE;
        if run.cost < best.cost {
            best = run;
        }
        if settled {
            converged = true;
            break;
        }
    }

    log::debug!(
        "nelder-mead finished after {iterations} iterations and {restarts} restarts: {termination} (cost {:.3e})",
        best.cost
    );

    Ok(OptimizationResult {
        parameters: best.parameters,
        objective_value: best.cost,
        iterations,
        converged,
        termination,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_nelder_mead_quadratic() {
        // Minimize (x-2)^2 + (y-3)^2
        let f = |params: &[f64]| {
            let x = params[0];
            let y = params[1];
            (x - 2.0).powi(2) + (y - 3.0).powi(2)
        };

        let result = nelder_mead(f, &[0.5, 0.5], None, &OptimizationConfig::default()).unwrap();

        assert!(result.converged);
        assert_relative_eq!(result.parameters[0], 2.0, epsilon = 1e-5);
        assert_relative_eq!(result.parameters[1], 3.0, epsilon = 1e-5);
        assert!(result.objective_value < 1e-10);
    }

    #[test]
    fn test_nelder_mead_one_dimensional() {
        let f = |p: &[f64]| (p[0] - 2.2).powi(2);
        let result = nelder_mead(f, &[1.0], None, &OptimizationConfig::default()).unwrap();

        assert!(result.converged);
        assert_relative_eq!(result.parameters[0], 2.2, epsilon = 1e-6);
        assert!(result.objective_value < 1e-12);
    }

    #[test]
    fn test_symmetric_simplex_is_restarted() {
        // Both starting vertices sit 0.1 from the minimum, so their costs agree
        let f = |p: &[f64]| (p[0] - 2.1).powi(2);
        let config = OptimizationConfig::default().with_initial_step(0.1);
        let result = nelder_mead(f, &[2.0], None, &config).unwrap();

        assert!(result.converged);
        assert_relative_eq!(result.parameters[0], 2.1, epsilon = 1e-6);
        assert!(result.objective_value < 1e-12);
    }

    #[test]
    fn test_restarts_share_iteration_budget() {
        let f = |p: &[f64]| (p[0] - 2.2).powi(2);
        let full = nelder_mead(f, &[1.0], None, &OptimizationConfig::default()).unwrap();
        assert!(full.iterations > 1);

        let config = OptimizationConfig::default().with_max_iterations(full.iterations - 1);
        let capped = nelder_mead(f, &[1.0], None, &config).unwrap();

        assert!(!capped.converged);
        assert!(capped.iterations <= full.iterations - 1);
        assert!(capped.termination.contains("iterations"));
    }

    #[test]
    fn test_max_relative_step() {
        assert_eq!(max_relative_step(&[1.0, 2.0], &[1.0, 2.0]), 0.0);
        assert_relative_eq!(max_relative_step(&[1.0, 0.0], &[1.5, 0.1]), 0.25, epsilon = 1e-15);
    }

    #[test]
    fn test_nelder_mead_respects_lower_bound() {
        // Unconstrained minimum at -1, bounded problem must stay at x >= 0.5
        let f = |p: &[f64]| (p[0] + 1.0).powi(2);
        let bounds = Bounds::lower_only(0.5, 1);
        let result =
            nelder_mead(f, &[3.0], Some(&bounds), &OptimizationConfig::default()).unwrap();

        assert!(result.parameters[0] >= 0.5);
        assert_relative_eq!(result.parameters[0], 0.5, epsilon = 1e-3);
    }

    #[test]
    fn test_nelder_mead_iteration_cap_is_not_an_error() {
        let f = |p: &[f64]| (p[0] - 100.0).powi(2) + (p[1] + 50.0).powi(2);
        let config = OptimizationConfig::default().with_max_iterations(3);
        let result = nelder_mead(f, &[1.0, 1.0], None, &config).unwrap();

        assert!(!result.converged);
        assert_eq!(result.iterations, 3);
        assert!(result.termination.contains("iterations"));
    }

    #[test]
    fn test_nelder_mead_nan_objective_is_rejected_by_simplex() {
        let f = |p: &[f64]| if p[0] > 1.5 { f64::NAN } else { (p[0] - 1.0).powi(2) };
        let result = nelder_mead(f, &[0.2], None, &OptimizationConfig::default()).unwrap();

        assert!(result.converged);
        assert!(result.objective_value.is_finite());
        assert_relative_eq!(result.parameters[0], 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_invalid_inputs() {
        let f = |p: &[f64]| p[0];
        let config = OptimizationConfig::default();

        assert!(nelder_mead(f, &[], None, &config).is_err());

        let bounds = Bounds::lower_only(0.0, 2);
        assert!(nelder_mead(f, &[1.0], Some(&bounds), &config).is_err());

        let bounds = Bounds::lower_only(2.0, 1);
        assert!(nelder_mead(f, &[1.0], Some(&bounds), &config).is_err());
    }

    #[test]
    fn test_bounds() {
        assert!(Bounds::new(vec![0.0], vec![1.0, 2.0]).is_err());
        assert!(Bounds::new(vec![3.0], vec![1.0]).is_err());

        let b = Bounds::new(vec![0.0, -1.0], vec![1.0, 1.0]).unwrap();
        assert!(b.contains(&[0.5, 0.0]));
        assert!(b.contains(&[0.0, 1.0]));
        assert!(!b.contains(&[1.5, 0.0]));
    }

    #[test]
    fn test_initial_simplex() {
        let simplex = initial_simplex(&[2.0, 0.0], 0.05);
        assert_eq!(simplex.len(), 3);
        assert_eq!(simplex[0], vec![2.0, 0.0]);
        assert_relative_eq!(simplex[1][0], 2.1, epsilon = 1e-15);
        assert_eq!(simplex[2][1], 0.00025);
    }
}
