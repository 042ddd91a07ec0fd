//! Amplitude fit for a fixed shape.
//!
//! With the decay scales held fixed every model is linear in its betas, so
//! the best betas are the ordinary least-squares solution of
//! `factor_matrix(t) · β ≈ y`.

use nalgebra::DVector;
use nss_math::linear_algebra::{least_squares, LeastSquaresSolution};

use super::{check_sample, check_shape};
use crate::error::CurveResult;
use crate::models::{NelsonSiegel, ShapeModel, Svensson};

/// Fits the betas of model `M` for a fixed shape.
///
/// Returns the fitted model together with the raw least-squares solution
/// (residuals, rank, singular values).
///
/// # Errors
///
/// - [`CurveError::ShapeMismatch`](crate::CurveError::ShapeMismatch) if
///   `t` and `y` differ in length
/// - [`CurveError::InsufficientPoints`](crate::CurveError::InsufficientPoints)
///   for an empty sample
/// - [`CurveError::InvalidShape`](crate::CurveError::InvalidShape) for a
///   non-positive decay scale
pub fn fit_betas<M: ShapeModel>(
    shape: M::Shape,
    t: &[f64],
    y: &[f64],
) -> CurveResult<(M, LeastSquaresSolution)> {
    check_sample(t, y)?;
    check_shape::<M>(shape)?;
    solve_betas(shape, t, y)
}

/// Fits `(β₀, β₁, β₂)` of a Nelson-Siegel curve with decay scale `tau`.
pub fn fit_nelson_siegel_betas(
    tau: f64,
    t: &[f64],
    y: &[f64],
) -> CurveResult<(NelsonSiegel, LeastSquaresSolution)> {
    fit_betas::<NelsonSiegel>(tau, t, y)
}

/// Fits `(β₀, β₁, β₂, β₃)` of a Svensson curve with decay scales `(τ₁, τ₂)`.
pub fn fit_svensson_betas(
    taus: (f64, f64),
    t: &[f64],
    y: &[f64],
) -> CurveResult<(Svensson, LeastSquaresSolution)> {
    fit_betas::<Svensson>(taus, t, y)
}

/// Same as [`fit_betas`] without input checks.
pub(crate) fn solve_betas<M: ShapeModel>(
    shape: M::Shape,
    t: &[f64],
    y: &[f64],
) -> CurveResult<(M, LeastSquaresSolution)> {
    let factors = M::from_shape(shape).factor_matrix(t);
    let target = DVector::from_column_slice(y);
    let solution = least_squares(&factors, &target)?;
    let model = M::from_betas(&solution.coefficients_vec(), shape);
    Ok((model, solution))
}
