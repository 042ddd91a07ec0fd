//! Empirical level, slope and curvature.
//!
//! Diebold & Li (2006) proxy the three Nelson-Siegel factors with simple
//! combinations of observed yields. They are handy as sanity checks on a
//! fitted curve or as rough starting values.

use serde::Serialize;

/// Model-free proxies for the Nelson-Siegel factors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EmpiricalFactors {
    /// Level: the 10-year yield.
    pub level: f64,
    /// Slope: 10-year minus 3-month yield.
    pub slope: f64,
    /// Curvature: twice the 2-year yield minus the 3-month and 10-year yields.
    pub curvature: f64,
}

/// Computes the Diebold-Li empirical factors from the 3-month, 2-year and
/// 10-year yields.
pub fn empirical_factors(y_3m: f64, y_2y: f64, y_10y: f64) -> EmpiricalFactors {
    EmpiricalFactors {
        level: y_10y,
        slope: y_10y - y_3m,
        curvature: 2.0 * y_2y - y_3m - y_10y,
    }
}
