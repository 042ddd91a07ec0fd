//! Error types for curve operations.
//!
//! Evaluation never fails for valid numeric input, so every variant here
//! belongs to one of three places: curve construction and parsing,
//! calibration preconditions, or the numeric backend.

use nss_math::MathError;
use thiserror::Error;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Error types for curve operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// Maturities and yields of a calibration sample have different lengths.
    #[error("Shape mismatch: {times} maturities but {values} yields")]
    ShapeMismatch {
        /// Number of maturities.
        times: usize,
        /// Number of observed yields.
        values: usize,
    },

    /// Not enough observations to calibrate.
    #[error("Insufficient points: need at least {required}, got {got}")]
    InsufficientPoints {
        /// Minimum required points.
        required: usize,
        /// Actual number of points provided.
        got: usize,
    },

    /// A calibration sample contains NaN or infinity.
    #[error("Non-finite {what} at index {index}")]
    NonFiniteValue {
        /// Which input held the value (`maturity` or `yield`).
        what: &'static str,
        /// Position of the offending value.
        index: usize,
    },

    /// A decay scale is not strictly positive (or not finite).
    #[error("Invalid shape parameter {name} = {value}: must be finite and > 0")]
    InvalidShape {
        /// Parameter name (`tau`, `tau1`, `tau2`).
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    /// A flat curve record could not be interpreted.
    #[error("Invalid curve record: {reason}")]
    InvalidRecord {
        /// Description of what's wrong with the record.
        reason: String,
    },

    /// Calibration settings are out of range.
    #[error("Invalid calibration config: {reason}")]
    InvalidConfig {
        /// Description of the invalid setting.
        reason: String,
    },

    /// Mathematical error.
    #[error("Math error: {0}")]
    Math(#[from] MathError),
}

impl CurveError {
    /// Creates a shape mismatch error.
    #[must_use]
    pub fn shape_mismatch(times: usize, values: usize) -> Self {
        Self::ShapeMismatch { times, values }
    }

    /// Creates an insufficient points error.
    #[must_use]
    pub fn insufficient_points(required: usize, got: usize) -> Self {
        Self::InsufficientPoints { required, got }
    }

    /// Creates a non-finite value error.
    #[must_use]
    pub fn non_finite(what: &'static str, index: usize) -> Self {
        Self::NonFiniteValue { what, index }
    }

    /// Creates an invalid shape error.
    #[must_use]
    pub fn invalid_shape(name: &'static str, value: f64) -> Self {
        Self::InvalidShape { name, value }
    }

    /// Creates an invalid record error.
    #[must_use]
    pub fn invalid_record(reason: impl Into<String>) -> Self {
        Self::InvalidRecord {
            reason: reason.into(),
        }
    }

    /// Creates an invalid config error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}

/// Checks that a decay scale is finite and strictly positive.
pub(crate) fn check_tau(name: &'static str, value: f64) -> CurveResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CurveError::invalid_shape(name, value))
    }
}
