//! Nelson-Siegel three-factor model.

use std::fmt;

use nalgebra::{DMatrix, DVector};

use super::{decay_loading, positive_times, FactorModel, ShapeModel};
use crate::error::{check_tau, CurveResult};

/// Nelson-Siegel yield curve model.
///
/// The model parameterizes the zero rate curve as:
/// ```text
/// z(t) = β₀ + β₁ * ((1 - e^(-t/τ)) / (t/τ))
///           + β₂ * ((1 - e^(-t/τ)) / (t/τ) - e^(-t/τ))
/// ```
///
/// Where:
/// - β₀: Long-term level (asymptotic zero rate)
/// - β₁: Short-term component (slope)
/// - β₂: Medium-term component (curvature/hump)
/// - τ: Decay factor (controls where the hump occurs)
///
/// # Financial Interpretation
///
/// - β₀: Long-run equilibrium rate
/// - β₀ + β₁: Instantaneous short rate (as t → 0)
/// - β₂ > 0: Hump in curve; β₂ < 0: U-shape
///
/// # Example
///
/// ```rust
/// use nss_curves::prelude::*;
///
/// let ns = NelsonSiegel::new(0.017, -0.023, 0.24, 2.2);
///
/// assert_eq!(ns.zero(0.0), 0.017 + -0.023);
/// assert!(ns.zero(5.0) > ns.zero(0.25));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NelsonSiegel {
    beta0: f64,
    beta1: f64,
    beta2: f64,
    tau: f64,
}

impl NelsonSiegel {
    /// Creates a new Nelson-Siegel curve.
    ///
    /// `tau` must be strictly positive; this is not checked. With `tau <= 0`
    /// evaluation divides by zero or flips the sign of the decay and the
    /// results are meaningless. Use [`NelsonSiegel::try_new`] for untrusted
    /// input.
    pub fn new(beta0: f64, beta1: f64, beta2: f64, tau: f64) -> Self {
        Self {
            beta0,
            beta1,
            beta2,
            tau,
        }
    }

    /// Creates a new Nelson-Siegel curve, rejecting a non-positive or
    /// non-finite `tau`.
    pub fn try_new(beta0: f64, beta1: f64, beta2: f64, tau: f64) -> CurveResult<Self> {
        check_tau("tau", tau)?;
        Ok(Self::new(beta0, beta1, beta2, tau))
    }

    /// Long-term level β₀.
    pub fn beta0(&self) -> f64 {
        self.beta0
    }

    /// Slope β₁.
    pub fn beta1(&self) -> f64 {
        self.beta1
    }

    /// Curvature β₂.
    pub fn beta2(&self) -> f64 {
        self.beta2
    }

    /// Decay scale τ.
    pub fn tau(&self) -> f64 {
        self.tau
    }

    /// Returns the model parameters as (β₀, β₁, β₂, τ).
    pub fn parameters(&self) -> (f64, f64, f64, f64) {
        (self.beta0, self.beta1, self.beta2, self.tau)
    }

    /// Factor loadings `(l₁, l₂)` at maturity `t`.
    ///
    /// Returns `(1, 0)` for `t <= 0`.
    pub fn factors(&self, t: f64) -> (f64, f64) {
        if t <= 0.0 {
            (1.0, 0.0)
        } else {
            self.positive_factors(t)
        }
    }

    /// Factor loadings for a batch of maturities.
    pub fn factors_batch(&self, t: &[f64]) -> (Vec<f64>, Vec<f64>) {
        let (mut l1, mut l2): (Vec<f64>, Vec<f64>) = positive_times(t)
            .into_iter()
            .map(|ti| self.positive_factors(ti))
            .unzip();

        for (i, _) in t.iter().enumerate().filter(|&(_, &ti)| ti <= 0.0) {
            l1[i] = 1.0;
            l2[i] = 0.0;
        }
        (l1, l2)
    }

    fn positive_factors(&self, t: f64) -> (f64, f64) {
        let (l1, exp_t) = decay_loading(t, self.tau);
        (l1, l1 - exp_t)
    }

    #[inline]
    fn combine(&self, l1: f64, l2: f64) -> f64 {
        self.beta0 + self.beta1 * l1 + self.beta2 * l2
    }
}

impl FactorModel for NelsonSiegel {
    fn factor_count(&self) -> usize {
        3
    }

    fn betas(&self) -> Vec<f64> {
        vec![self.beta0, self.beta1, self.beta2]
    }

    fn taus(&self) -> Vec<f64> {
        vec![self.tau]
    }

    fn factor_vector(&self, t: f64) -> DVector<f64> {
        let (l1, l2) = self.factors(t);
        DVector::from_vec(vec![1.0, l1, l2])
    }

    fn factor_matrix(&self, t: &[f64]) -> DMatrix<f64> {
        let (l1, l2) = self.factors_batch(t);
        DMatrix::from_fn(t.len(), 3, |i, j| match j {
            0 => 1.0,
            1 => l1[i],
            _ => l2[i],
        })
    }

    fn zero(&self, t: f64) -> f64 {
        let (l1, l2) = self.factors(t);
        self.combine(l1, l2)
    }

    fn zeros(&self, t: &[f64]) -> Vec<f64> {
        let (l1, l2) = self.factors_batch(t);
        l1.iter().zip(&l2).map(|(&a, &b)| self.combine(a, b)).collect()
    }

    /// ```text
    /// f(t) = β₀ + β₁ * e^(-t/τ) + β₂ * (t/τ) * e^(-t/τ)
    /// ```
    fn forward(&self, t: f64) -> f64 {
        let x = t / self.tau;
        let exp_t = (-x).exp();
        self.beta0 + self.beta1 * exp_t + self.beta2 * exp_t * x
    }
}

impl ShapeModel for NelsonSiegel {
    type Shape = f64;

    const NAME: &'static str = "Nelson-Siegel";
    const SHAPE_NAMES: &'static [&'static str] = &["tau"];

    fn from_shape(tau: f64) -> Self {
        Self::new(0.0, 0.0, 0.0, tau)
    }

    fn from_betas(betas: &[f64], tau: f64) -> Self {
        Self::new(betas[0], betas[1], betas[2], tau)
    }

    fn shape(&self) -> f64 {
        self.tau
    }

    fn shape_to_vec(tau: f64) -> Vec<f64> {
        vec![tau]
    }

    fn shape_from_slice(values: &[f64]) -> f64 {
        values[0]
    }
}

impl fmt::Display for NelsonSiegel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "NelsonSiegel(beta0={}, beta1={}, beta2={}, tau={})",
            self.beta0, self.beta1, self.beta2, self.tau
        )
    }
}
