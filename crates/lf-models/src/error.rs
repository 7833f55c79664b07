//! Error types for sub-model evaluation.

use lf_core::error::LfError;
use thiserror::Error;

/// Errors that can occur while evaluating a leaf sub-model.
#[derive(Error, Debug, Clone)]
pub enum ModelError {
    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}

pub type ModelResult<T> = Result<T, ModelError>;

impl From<ModelError> for LfError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::NonPhysical { what } => LfError::Numeric {
                what: what.to_string(),
            },
            ModelError::InvalidArg { what } => LfError::InvalidArg { what },
        }
    }
}
