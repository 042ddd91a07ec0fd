//! Parametric yield curve models.
//!
//! This module provides the two factor models of the library:
//! - [`NelsonSiegel`]: three factors (level, slope, curvature), one decay scale
//! - [`Svensson`]: adds a second curvature factor with its own decay scale
//!
//! Both expose the same behaviour through [`FactorModel`] (evaluation) and
//! [`ShapeModel`] (construction from shape parameters), so calibration code
//! is written once for both.
//!
//! # Time zero
//!
//! The loadings `(1 - e^(-t/τ)) / (t/τ)` have a removable singularity at
//! `t = 0`. For every maturity `t <= 0` the loadings are the exact limits
//! `(1, 0)` (resp. `(1, 0, 0)`), so `zero(0) == β₀ + β₁` exactly.
//!
//! Batch evaluation first replaces non-positive maturities with
//! [`MACHINE_EPSILON`], evaluates the closed form, and then overwrites those
//! positions with the limits. Scalar and batch evaluation agree bit for bit.

mod nelson_siegel;
mod svensson;

pub use nelson_siegel::NelsonSiegel;
pub use svensson::Svensson;

use nalgebra::{DMatrix, DVector};
use std::fmt::Debug;

/// Stand-in for non-positive maturities during batch evaluation.
pub const MACHINE_EPSILON: f64 = f64::EPSILON;

/// Evaluation interface shared by all factor models.
pub trait FactorModel {
    /// Number of amplitude parameters (columns of the factor matrix).
    fn factor_count(&self) -> usize;

    /// Amplitude parameters `[β₀, β₁, β₂(, β₃)]`.
    fn betas(&self) -> Vec<f64>;

    /// Decay scales `[τ]` or `[τ₁, τ₂]`.
    fn taus(&self) -> Vec<f64>;

    /// Factor row `[1, l₁, l₂(, l₃)]` for a single maturity.
    fn factor_vector(&self, t: f64) -> DVector<f64>;

    /// Design matrix with one row `[1, l₁, l₂(, l₃)]` per maturity.
    fn factor_matrix(&self, t: &[f64]) -> DMatrix<f64>;

    /// Zero rate at maturity `t`.
    fn zero(&self, t: f64) -> f64;

    /// Zero rates for a batch of maturities.
    fn zeros(&self, t: &[f64]) -> Vec<f64>;

    /// Instantaneous forward rate at maturity `t`.
    fn forward(&self, t: f64) -> f64;

    /// Instantaneous forward rates for a batch of maturities.
    fn forwards(&self, t: &[f64]) -> Vec<f64> {
        t.iter().map(|&ti| self.forward(ti)).collect()
    }
}

/// Construction interface used by calibration.
///
/// A model is split into a nonlinear *shape* (its decay scales) and linear
/// amplitudes. Calibration searches over the shape and solves for the
/// amplitudes.
pub trait ShapeModel: FactorModel + Copy + Debug {
    /// Shape parameters (`f64` or `(f64, f64)`).
    type Shape: Copy + Debug + PartialEq;

    /// Human-readable model name used in logs.
    const NAME: &'static str;

    /// Names of the shape parameters, in [`ShapeModel::shape_to_vec`] order.
    const SHAPE_NAMES: &'static [&'static str];

    /// Model with the given shape and all amplitudes zero.
    fn from_shape(shape: Self::Shape) -> Self;

    /// Model from amplitudes (in factor-matrix column order) and a shape.
    ///
    /// # Panics
    ///
    /// Panics if `betas` is shorter than [`FactorModel::factor_count`].
    fn from_betas(betas: &[f64], shape: Self::Shape) -> Self;

    /// Shape parameters of this model.
    fn shape(&self) -> Self::Shape;

    /// Flattens a shape for the optimizer.
    fn shape_to_vec(shape: Self::Shape) -> Vec<f64>;

    /// Rebuilds a shape from the optimizer's parameter vector.
    fn shape_from_slice(values: &[f64]) -> Self::Shape;
}

/// Replaces non-positive maturities by [`MACHINE_EPSILON`].
pub(crate) fn positive_times(t: &[f64]) -> Vec<f64> {
    t.iter()
        .map(|&ti| if ti <= 0.0 { MACHINE_EPSILON } else { ti })
        .collect()
}

/// Returns `((1 - e^(-t/τ)) / (t/τ), e^(-t/τ))` for `t > 0`.
#[inline]
pub(crate) fn decay_loading(t: f64, tau: f64) -> (f64, f64) {
    let x = t / tau;
    let exp_t = (-x).exp();
    ((1.0 - exp_t) / x, exp_t)
}
