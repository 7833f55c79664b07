//! Coupled leaf-state solver.
//!
//! Photosynthesis depends on leaf temperature and the CO2 concentration at the
//! leaf surface; leaf temperature depends on transpiration, which depends on
//! stomatal conductance; stomatal conductance depends on photosynthesis and the
//! humidity at the leaf surface. This crate closes that loop with a bounded
//! fixed-point iteration on leaf temperature and scales the converged per-leaf
//! fluxes to the canopy with leaf-area index.
//!
//! Each call is a pure function of its forcing and the immutable solver setup,
//! so one `CoupledSolver` can serve many threads.

pub mod config;
pub mod coupled;
pub mod energy;
pub mod error;
pub mod forcing;

pub use config::SolverConfig;
pub use coupled::{CanopyFluxes, CoupledSolver, LeafSolution};
pub use energy::{EnergyStep, leaf_temperature_step};
pub use error::{SolverError, SolverResult};
pub use forcing::Forcing;
