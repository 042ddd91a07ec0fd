//! CLI error types.

use nss_curves::CurveError;
use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// The optimizer stopped without meeting its convergence criterion.
    #[error("Calibration did not converge: {0}")]
    NotConverged(String),

    /// A command-line value is out of range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The settings file is missing, unreadable or malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Rendering a plot failed.
    #[error("Plot error: {0}")]
    Plot(String),

    /// Curve construction or calibration error.
    #[error(transparent)]
    Curve(#[from] CurveError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;

impl From<csv::Error> for CliError {
    fn from(err: csv::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
