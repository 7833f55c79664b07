//! Solver configuration.

use crate::error::{SolverError, SolverResult};
use lf_core::numeric::ZERO_TOL;

/// Coupled solver configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolverConfig {
    /// Maximum coupling iterations before the solve fails
    pub max_iterations: usize,
    /// Leaf temperature change that counts as converged (degC)
    pub temperature_tol: f64,
    /// Magnitude at or below which conductances and fluxes are treated as zero
    pub zero_tol: f64,
    /// PAR at or below which stomata are closed (umol m-2 s-1)
    pub par_threshold: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            temperature_tol: 0.02,
            zero_tol: ZERO_TOL,
            par_threshold: 20.0,
        }
    }
}

impl SolverConfig {
    pub fn validate(&self) -> SolverResult<()> {
        if self.max_iterations == 0 {
            return Err(SolverError::InvalidConfig {
                what: "max_iterations must be > 0",
            });
        }
        if !self.temperature_tol.is_finite() || self.temperature_tol <= 0.0 {
            return Err(SolverError::InvalidConfig {
                what: "temperature_tol must be > 0",
            });
        }
        if !self.zero_tol.is_finite() || self.zero_tol < 0.0 {
            return Err(SolverError::InvalidConfig {
                what: "zero_tol must be >= 0",
            });
        }
        if !self.par_threshold.is_finite() {
            return Err(SolverError::InvalidConfig {
                what: "par_threshold must be finite",
            });
        }
        Ok(())
    }
}
