//! # NSS Curves
//!
//! Nelson-Siegel and Nelson-Siegel-Svensson yield curves.
//!
//! This crate provides:
//!
//! - **Models**: [`NelsonSiegel`] and [`Svensson`] with zero and
//!   instantaneous forward rates, scalar or batched
//! - **Curve Records**: [`CurveSpec`], the flat JSON parameter record used
//!   at the boundary of the library
//! - **Calibration**: profile least-squares fitting of either model to
//!   observed yields
//! - **Empirical Factors**: Diebold-Li level, slope and curvature proxies
//!
//! ## Quick Start
//!
//! ```rust
//! use nss_curves::prelude::*;
//!
//! let curve = NelsonSiegel::new(0.017, -0.023, 0.24, 2.2);
//! let t: Vec<f64> = (0..=10).map(f64::from).collect();
//!
//! // Zero and forward rates
//! let zeros = evaluate_curve(&curve, &t);
//! let forwards = evaluate_forward(&curve, &t);
//! assert_eq!(zeros[0], forwards[0]);
//!
//! // Recover the curve from its own zero rates
//! let (fitted, status) = calibrate_ns(&t, &zeros, DEFAULT_NS_TAU0).unwrap();
//! assert!(status.success);
//! assert!((fitted.tau() - 2.2).abs() < 1e-3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]

pub mod calibration;
pub mod config;
pub mod curve_spec;
pub mod empirical;
pub mod error;
pub mod models;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calibration::{
        calibrate_ns, calibrate_nss, fit_betas, fit_nelson_siegel_betas, fit_svensson_betas,
        nelson_siegel_error, sum_squared_error, svensson_error, CalibrationStatus, Calibrator,
    };
    pub use crate::config::{CalibrationConfig, DEFAULT_NSS_TAU0, DEFAULT_NS_TAU0};
    pub use crate::curve_spec::{evaluate_curve, evaluate_forward, CurveRecord, CurveSpec};
    pub use crate::empirical::{empirical_factors, EmpiricalFactors};
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::models::{FactorModel, NelsonSiegel, ShapeModel, Svensson, MACHINE_EPSILON};
}

pub use curve_spec::{evaluate_curve, evaluate_forward, CurveSpec};
pub use error::{CurveError, CurveResult};
pub use models::{FactorModel, NelsonSiegel, ShapeModel, Svensson};
