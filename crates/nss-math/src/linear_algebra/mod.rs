//! Linear algebra utilities.
//!
//! This module provides the linear least-squares solver used to fit the
//! amplitude parameters of factor models.

use crate::error::{MathError, MathResult};
use nalgebra::{DMatrix, DVector, SVD};

/// Solution of a linear least-squares problem `min ‖A·x − b‖²`.
///
/// Besides the coefficient vector this carries the diagnostics a caller may
/// want to inspect (residuals, numerical rank, singular values). Calibration
/// code passes it through without interpreting it.
#[derive(Debug, Clone, PartialEq)]
pub struct LeastSquaresSolution {
    /// Best-fit coefficients, one per column of the design matrix.
    pub coefficients: DVector<f64>,
    /// Sum of squared residuals `‖A·x − b‖²`.
    pub residual_sum_of_squares: f64,
    /// Effective rank of the design matrix.
    pub rank: usize,
    /// Singular values of the design matrix, in descending order.
    pub singular_values: DVector<f64>,
}

impl LeastSquaresSolution {
    /// Returns true if the design matrix has full column rank.
    pub fn is_full_rank(&self) -> bool {
        self.rank == self.coefficients.len()
    }

    /// Returns the coefficients as a plain vector.
    pub fn coefficients_vec(&self) -> Vec<f64> {
        self.coefficients.iter().copied().collect()
    }
}

/// Solves the linear least-squares problem `min ‖A·x − b‖²`.
///
/// Uses the singular value decomposition of `A`. Singular values below
/// `ε · max(rows, cols) · σ_max` are treated as zero, so rank-deficient systems
/// yield the minimum-norm solution instead of failing.
///
/// # Errors
///
/// - [`MathError::DimensionMismatch`] if `a.nrows() != b.len()`
/// - [`MathError::InsufficientData`] if the system is empty
/// - [`MathError::InvalidInput`] if `a` or `b` contains NaN or infinity
/// - [`MathError::SingularMatrix`] if the decomposition does not converge
pub fn least_squares(a: &DMatrix<f64>, b: &DVector<f64>) -> MathResult<LeastSquaresSolution> {
    let (rows, cols) = a.shape();

    if rows != b.len() {
        return Err(MathError::DimensionMismatch {
            rows1: rows,
            cols1: cols,
            rows2: b.len(),
            cols2: 1,
        });
    }
    if rows == 0 || cols == 0 {
        return Err(MathError::insufficient_data(1, rows.min(cols)));
    }
    // The SVD iteration does not terminate on NaN entries
    if a.iter().chain(b.iter()).any(|v| !v.is_finite()) {
        return Err(MathError::invalid_input(
            "least squares system contains non-finite values",
        ));
    }

    let svd = SVD::try_new(a.clone(), true, true, f64::EPSILON, 0)
        .ok_or_else(|| MathError::singular("SVD did not converge"))?;

    let sigma_max = svd.singular_values.max();
    let cutoff = f64::EPSILON * rows.max(cols) as f64 * sigma_max;

    let coefficients = svd.solve(b, cutoff).map_err(MathError::singular)?;
    let rank = svd.rank(cutoff);

    let residual_sum_of_squares = (a * &coefficients - b).norm_squared();

    log::debug!(
        "least squares: {}x{} system, rank {}, rss {:.3e}",
        rows,
        cols,
        rank,
        residual_sum_of_squares
    );

    Ok(LeastSquaresSolution {
        coefficients,
        residual_sum_of_squares,
        rank,
        singular_values: svd.singular_values,
    })
}
