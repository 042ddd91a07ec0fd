//! Error types for numerical operations.

use thiserror::Error;

/// A specialized Result type for numerical operations.
pub type MathResult<T> = Result<T, MathError>;

/// Errors that can occur in the least-squares solver or the minimizer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// Matrix is singular and the decomposition could not be solved.
    #[error("Singular matrix: {reason}")]
    SingularMatrix {
        /// Why the solve failed.
        reason: String,
    },

    /// Matrix and right-hand side dimensions are incompatible.
    #[error("Incompatible dimensions: ({rows1}x{cols1}) and ({rows2}x{cols2})")]
    DimensionMismatch {
        /// Rows in the design matrix.
        rows1: usize,
        /// Columns in the design matrix.
        cols1: usize,
        /// Rows in the right-hand side.
        rows2: usize,
        /// Columns in the right-hand side.
        cols2: usize,
    },

    /// Insufficient data points for operation.
    #[error("Insufficient data: need at least {required}, got {actual}")]
    InsufficientData {
        /// Minimum required points.
        required: usize,
        /// Actual number of points.
        actual: usize,
    },

    /// Invalid input parameter.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },

    /// The optimizer backend reported an error.
    #[error("Optimizer error: {reason}")]
    Optimizer {
        /// Message from the backend.
        reason: String,
    },
}

impl MathError {
    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Creates an insufficient data error.
    #[must_use]
    pub fn insufficient_data(required: usize, actual: usize) -> Self {
        Self::InsufficientData { required, actual }
    }

    /// Creates a singular matrix error.
    #[must_use]
    pub fn singular(reason: impl Into<String>) -> Self {
        Self::SingularMatrix {
            reason: reason.into(),
        }
    }
}

impl From<argmin::core::Error> for MathError {
    fn from(err: argmin::core::Error) -> Self {
        Self::Optimizer {
            reason: err.to_string(),
        }
    }
}
