use thiserror::Error;

#[derive(Error, Debug)]
pub enum LfError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Invalid input: {what}")]
    InvalidInput { what: String },

    #[error("Numeric failure: {what}")]
    Numeric { what: String },

    #[error("Not converged: {what}")]
    NotConverged { what: &'static str },
}
