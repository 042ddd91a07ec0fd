//! # NSS Math
//!
//! Numerical building blocks for the NSS yield curve library.
//!
//! This crate provides:
//!
//! - **Linear Algebra**: SVD-based linear least squares
//! - **Optimization**: Derivative-free minimization (Nelder-Mead simplex)
//!
//! Everything here works on plain `f64` slices and `nalgebra` dynamic
//! matrices; nothing is specific to yield curves.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::float_cmp)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod linear_algebra;
pub mod optimization;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::linear_algebra::{least_squares, LeastSquaresSolution};
    pub use crate::optimization::{nelder_mead, Bounds, OptimizationConfig, OptimizationResult};
}

pub use error::{MathError, MathResult};
