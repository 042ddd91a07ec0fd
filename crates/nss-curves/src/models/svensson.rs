//! Nelson-Siegel-Svensson four-factor model.

use std::fmt;

use nalgebra::{DMatrix, DVector};

use super::{decay_loading, positive_times, FactorModel, ShapeModel};
use crate::error::{check_tau, CurveResult};

/// Svensson (Nelson-Siegel-Svensson) yield curve model.
///
/// Extends Nelson-Siegel with a second hump term that has its own decay
/// scale:
/// ```text
/// z(t) = β₀ + β₁ * ((1 - e^(-t/τ₁)) / (t/τ₁))
///           + β₂ * ((1 - e^(-t/τ₁)) / (t/τ₁) - e^(-t/τ₁))
///           + β₃ * ((1 - e^(-t/τ₂)) / (t/τ₂) - e^(-t/τ₂))
/// ```
///
/// This is the parameterization used by several central banks (ECB,
/// Bundesbank, Federal Reserve) to publish fitted government curves.
///
/// The two hump terms are interchangeable: swapping `(β₂, τ₁)` with
/// `(β₃, τ₂)` only changes the slope loading, so fits with `τ₁ < τ₂` and
/// `τ₁ > τ₂` can describe the same data almost equally well.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Svensson {
    beta0: f64,
    beta1: f64,
    beta2: f64,
    beta3: f64,
    tau1: f64,
    tau2: f64,
}

impl Svensson {
    /// Creates a new Svensson curve.
    ///
    /// Both decay scales must be strictly positive; this is not checked.
    /// Use [`Svensson::try_new`] for untrusted input.
    pub fn new(beta0: f64, beta1: f64, beta2: f64, beta3: f64, tau1: f64, tau2: f64) -> Self {
        Self {
            beta0,
            beta1,
            beta2,
            beta3,
            tau1,
            tau2,
        }
    }

    /// Creates a new Svensson curve, rejecting non-positive or non-finite
    /// decay scales.
    pub fn try_new(
        beta0: f64,
        beta1: f64,
        beta2: f64,
        beta3: f64,
        tau1: f64,
        tau2: f64,
    ) -> CurveResult<Self> {
        check_tau("tau1", tau1)?;
        check_tau("tau2", tau2)?;
        Ok(Self::new(beta0, beta1, beta2, beta3, tau1, tau2))
    }

    /// Long-term level β₀.
    pub fn beta0(&self) -> f64 {
        self.beta0
    }

    /// Slope β₁.
    pub fn beta1(&self) -> f64 {
        self.beta1
    }

    /// First curvature β₂.
    pub fn beta2(&self) -> f64 {
        self.beta2
    }

    /// Second curvature β₃.
    pub fn beta3(&self) -> f64 {
        self.beta3
    }

    /// First decay scale τ₁.
    pub fn tau1(&self) -> f64 {
        self.tau1
    }

    /// Second decay scale τ₂.
    pub fn tau2(&self) -> f64 {
        self.tau2
    }

    /// Returns the model parameters as (β₀, β₁, β₂, β₃, τ₁, τ₂).
    pub fn parameters(&self) -> (f64, f64, f64, f64, f64, f64) {
        (
            self.beta0, self.beta1, self.beta2, self.beta3, self.tau1, self.tau2,
        )
    }

    /// Factor loadings `(l₁, l₂, l₃)` at maturity `t`.
    ///
    /// Returns `(1, 0, 0)` for `t <= 0`.
    pub fn factors(&self, t: f64) -> (f64, f64, f64) {
        if t <= 0.0 {
            (1.0, 0.0, 0.0)
        } else {
            self.positive_factors(t)
        }
    }

    /// Factor loadings for a batch of maturities.
    pub fn factors_batch(&self, t: &[f64]) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        let mut l1 = Vec::with_capacity(t.len());
        let mut l2 = Vec::with_capacity(t.len());
        let mut l3 = Vec::with_capacity(t.len());
        for ti in positive_times(t) {
            let (a, b, c) = self.positive_factors(ti);
            l1.push(a);
            l2.push(b);
            l3.push(c);
        }

        for (i, _) in t.iter().enumerate().filter(|&(_, &ti)| ti <= 0.0) {
            l1[i] = 1.0;
            l2[i] = 0.0;
            l3[i] = 0.0;
        }
        (l1, l2, l3)
    }

    fn positive_factors(&self, t: f64) -> (f64, f64, f64) {
        let (l1, exp_t) = decay_loading(t, self.tau1);
        let (m1, exp_t2) = decay_loading(t, self.tau2);
        (l1, l1 - exp_t, m1 - exp_t2)
    }

    #[inline]
    fn combine(&self, l1: f64, l2: f64, l3: f64) -> f64 {
        self.beta0 + self.beta1 * l1 + self.beta2 * l2 + self.beta3 * l3
    }
}

impl FactorModel for Svensson {
    fn factor_count(&self) -> usize {
        4
    }

    fn betas(&self) -> Vec<f64> {
        vec![self.beta0, self.beta1, self.beta2, self.beta3]
    }

    fn taus(&self) -> Vec<f64> {
        vec![self.tau1, self.tau2]
    }

    fn factor_vector(&self, t: f64) -> DVector<f64> {
        let (l1, l2, l3) = self.factors(t);
        DVector::from_vec(vec![1.0, l1, l2, l3])
    }

    fn factor_matrix(&self, t: &[f64]) -> DMatrix<f64> {
        let (l1, l2, l3) = self.factors_batch(t);
        DMatrix::from_fn(t.len(), 4, |i, j| match j {
            0 => 1.0,
            1 => l1[i],
            2 => l2[i],
            _ => l3[i],
        })
    }

    fn zero(&self, t: f64) -> f64 {
        let (l1, l2, l3) = self.factors(t);
        self.combine(l1, l2, l3)
    }

    fn zeros(&self, t: &[f64]) -> Vec<f64> {
        let (l1, l2, l3) = self.factors_batch(t);
        (0..t.len())
            .map(|i| self.combine(l1[i], l2[i], l3[i]))
            .collect()
    }

    /// ```text
    /// f(t) = β₀ + β₁ * e^(-t/τ₁) + β₂ * (t/τ₁) * e^(-t/τ₁) + β₃ * (t/τ₂) * e^(-t/τ₂)
    /// ```
    fn forward(&self, t: f64) -> f64 {
        let x1 = t / self.tau1;
        let x2 = t / self.tau2;
        let exp_t = (-x1).exp();
        let exp_t2 = (-x2).exp();
        self.beta0 + self.beta1 * exp_t + self.beta2 * exp_t * x1 + self.beta3 * exp_t2 * x2
    }
}

impl ShapeModel for Svensson {
    type Shape = (f64, f64);

    const NAME: &'static str = "Nelson-Siegel-Svensson";
    const SHAPE_NAMES: &'static [&'static str] = &["tau1", "tau2"];

    fn from_shape((tau1, tau2): (f64, f64)) -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0, tau1, tau2)
    }

    fn from_betas(betas: &[f64], (tau1, tau2): (f64, f64)) -> Self {
        Self::new(betas[0], betas[1], betas[2], betas[3], tau1, tau2)
    }

    fn shape(&self) -> (f64, f64) {
        (self.tau1, self.tau2)
    }

    fn shape_to_vec((tau1, tau2): (f64, f64)) -> Vec<f64> {
        vec![tau1, tau2]
    }

    fn shape_from_slice(values: &[f64]) -> (f64, f64) {
        (values[0], values[1])
    }
}

impl fmt::Display for Svensson {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Svensson(beta0={}, beta1={}, beta2={}, beta3={}, tau1={}, tau2={})",
            self.beta0, self.beta1, self.beta2, self.beta3, self.tau1, self.tau2
        )
    }
}
