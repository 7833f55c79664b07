//! Error types for the command-line driver.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Scenario error: {0}")]
    Project(String),

    #[error("Scenario compilation failed: {0}")]
    Compile(String),

    #[error("Solver error: {0}")]
    Solver(String),

    #[error("{failed} of {total} forcing records failed to solve")]
    RecordsFailed { failed: usize, total: usize },

    #[error("Failed to write output: {path}")]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type AppResult<T> = Result<T, AppError>;

impl From<lf_project::ProjectError> for AppError {
    fn from(err: lf_project::ProjectError) -> Self {
        AppError::Project(err.to_string())
    }
}

impl From<lf_solver::SolverError> for AppError {
    fn from(err: lf_solver::SolverError) -> Self {
        AppError::Solver(err.to_string())
    }
}

impl From<lf_models::ModelError> for AppError {
    fn from(err: lf_models::ModelError) -> Self {
        AppError::Compile(err.to_string())
    }
}
