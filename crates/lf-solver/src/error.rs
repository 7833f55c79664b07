//! Error types for solver operations.

use lf_core::error::LfError;
use lf_models::ModelError;
use thiserror::Error;

/// Errors that can occur during a coupled leaf solve.
#[derive(Error, Debug)]
pub enum SolverError {
    /// Leaf temperature did not settle within the iteration cap.
    ///
    /// Retrying with the same inputs gives the same result.
    #[error(
        "No convergence after {iterations} iterations (last leaf temperature change {last_delta} degC)"
    )]
    NonConvergence { iterations: usize, last_delta: f64 },

    #[error("Invalid forcing: {what}")]
    InvalidForcing { what: &'static str },

    #[error("Invalid configuration: {what}")]
    InvalidConfig { what: &'static str },

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Numeric error: {what}")]
    Numeric { what: String },
}

pub type SolverResult<T> = Result<T, SolverError>;

impl From<SolverError> for LfError {
    fn from(e: SolverError) -> Self {
        match e {
            SolverError::NonConvergence { .. } => LfError::NotConverged {
                what: "leaf temperature",
            },
            SolverError::InvalidForcing { what } => LfError::InvalidArg { what },
            SolverError::InvalidConfig { what } => LfError::InvalidArg { what },
            SolverError::Model(e) => e.into(),
            SolverError::Numeric { what } => LfError::Numeric { what },
        }
    }
}
