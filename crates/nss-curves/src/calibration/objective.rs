//! Profile least-squares objective.
//!
//! For a candidate shape the betas are concentrated out by OLS, leaving the
//! sum of squared residuals as a function of the decay scales alone.

use tracing::trace;

use super::ols::solve_betas;
use super::{check_sample, check_shape};
use crate::error::CurveResult;
use crate::models::{NelsonSiegel, ShapeModel, Svensson};

/// Sum of squared residuals of the best-fit model `M` with the given shape.
pub fn sum_squared_error<M: ShapeModel>(shape: M::Shape, t: &[f64], y: &[f64]) -> CurveResult<f64> {
    check_sample(t, y)?;
    check_shape::<M>(shape)?;
    profile_error::<M>(shape, t, y)
}

/// Objective for Nelson-Siegel calibration.
pub fn nelson_siegel_error(tau: f64, t: &[f64], y: &[f64]) -> CurveResult<f64> {
    sum_squared_error::<NelsonSiegel>(tau, t, y)
}

/// Objective for Svensson calibration.
pub fn svensson_error(taus: (f64, f64), t: &[f64], y: &[f64]) -> CurveResult<f64> {
    sum_squared_error::<Svensson>(taus, t, y)
}

/// Unchecked objective used inside the optimizer loop.
pub(crate) fn profile_error<M: ShapeModel>(
    shape: M::Shape,
    t: &[f64],
    y: &[f64],
) -> CurveResult<f64> {
    let (model, _) = solve_betas::<M>(shape, t, y)?;
    let sse: f64 = model
        .zeros(t)
        .iter()
        .zip(y)
        .map(|(fitted, observed)| (fitted - observed).powi(2))
        .sum();
    trace!(model = M::NAME, ?shape, sse, "objective evaluated");
    Ok(sse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CurveError;
    use crate::models::FactorModel;

    fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
        let step = (end - start) / (n - 1) as f64;
        (0..n).map(|i| start + step * i as f64).collect()
    }

    #[test]
    fn test_nelson_siegel_error_at_true_tau() {
        let truth = NelsonSiegel::new(0.017, -0.023, 0.24, 2.2);
        let t = linspace(0.0, 30.0, 50);
        let y = truth.zeros(&t);

        let error = nelson_siegel_error(2.2, &t, &y).unwrap();
        assert!(error < 1e-12);

        let perturbed = nelson_siegel_error(2.2 * 1.1, &t, &y).unwrap();
        assert!(perturbed > 1e-7);
    }

    #[test]
    fn test_svensson_error_at_true_taus() {
        let truth = Svensson::new(0.017, -0.023, 0.24, 0.1, 2.2, 3.1);
        let t = linspace(0.0, 30.0, 50);
        let y = truth.zeros(&t);

        let error = svensson_error((2.2, 3.1), &t, &y).unwrap();
        assert!(error < 1e-12);

        let perturbed = svensson_error((2.2 * 1.1, 3.1 * 1.1), &t, &y).unwrap();
        assert!(perturbed > 1e-8);
    }

    #[test]
    fn test_error_checks_sample() {
        assert!(matches!(
            nelson_siegel_error(2.0, &[1.0, 2.0], &[0.01]),
            Err(CurveError::ShapeMismatch { .. })
        ));
        assert!(matches!(
            svensson_error((2.0, 5.0), &[1.0, f64::NAN], &[0.01, 0.02]),
            Err(CurveError::NonFiniteValue { what: "maturity", index: 1 })
        ));
    }
}
