//! Curve calibration.
//!
//! Fits a factor model to observed `(maturity, yield)` pairs by profile
//! least squares:
//!
//! 1. For fixed decay scales the model is linear in its betas, so
//!    [`fit_betas`] finds them by ordinary least squares.
//! 2. [`sum_squared_error`] turns that fit into a function of the decay
//!    scales alone.
//! 3. [`Calibrator`] minimizes it with Nelder-Mead and refits the betas at
//!    the optimum.
//!
//! An N-parameter nonlinear fit thus collapses to a one- or two-dimensional
//! search plus a small linear solve per evaluation.
//!
//! # Example
//!
//! ```rust
//! use nss_curves::prelude::*;
//!
//! let t = [0.25, 0.5, 1.0, 2.0, 5.0, 10.0, 20.0, 30.0];
//! let y = Svensson::new(0.04, -0.02, 0.01, 0.015, 1.5, 8.0).zeros(&t);
//!
//! let (curve, status) = calibrate_nss(&t, &y, (1.5, 8.0)).unwrap();
//! assert!(status.success);
//! println!("{}", status.summary());
//! println!("10Y zero rate: {:.4}%", curve.zero(10.0) * 100.0);
//! ```

mod objective;
mod ols;
mod shape;

pub use objective::{nelson_siegel_error, svensson_error, sum_squared_error};
pub use ols::{fit_betas, fit_nelson_siegel_betas, fit_svensson_betas};
pub use shape::{calibrate_ns, calibrate_nss, CalibrationStatus, Calibrator};

use crate::error::{check_tau, CurveError, CurveResult};
use crate::models::ShapeModel;

/// Checks a calibration sample before any numeric routine runs.
pub(crate) fn check_sample(t: &[f64], y: &[f64]) -> CurveResult<()> {
    if t.len() != y.len() {
        return Err(CurveError::shape_mismatch(t.len(), y.len()));
    }
    if t.is_empty() {
        return Err(CurveError::insufficient_points(1, 0));
    }
    if let Some(index) = t.iter().position(|v| !v.is_finite()) {
        return Err(CurveError::non_finite("maturity", index));
    }
    if let Some(index) = y.iter().position(|v| !v.is_finite()) {
        return Err(CurveError::non_finite("yield", index));
    }
    Ok(())
}

/// Checks that every decay scale of `shape` is finite and positive.
pub(crate) fn check_shape<M: ShapeModel>(shape: M::Shape) -> CurveResult<()> {
    M::SHAPE_NAMES
        .iter()
        .copied()
        .zip(M::shape_to_vec(shape))
        .try_for_each(|(name, value)| check_tau(name, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NelsonSiegel, Svensson};

    #[test]
    fn test_check_sample() {
        assert!(check_sample(&[1.0, 2.0], &[0.01, 0.02]).is_ok());
        assert_eq!(
            check_sample(&[1.0, 2.0], &[0.01]),
            Err(CurveError::shape_mismatch(2, 1))
        );
        assert_eq!(
            check_sample(&[], &[]),
            Err(CurveError::insufficient_points(1, 0))
        );
        assert_eq!(
            check_sample(&[1.0, 2.0], &[0.01, f64::INFINITY]),
            Err(CurveError::non_finite("yield", 1))
        );
    }

    #[test]
    fn test_check_shape() {
        assert!(check_shape::<NelsonSiegel>(2.0).is_ok());
        assert!(check_shape::<Svensson>((2.0, 5.0)).is_ok());
        assert_eq!(
            check_shape::<Svensson>((2.0, 0.0)),
            Err(CurveError::invalid_shape("tau2", 0.0))
        );
    }
}
