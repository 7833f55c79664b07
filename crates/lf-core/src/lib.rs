//! lf-core: stable foundation for leafflux.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (Real + zero tolerance + finiteness checks)
//! - constants (injected table of physical constants)
//! - error (shared error types)

pub mod constants;
pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use constants::PhysicalConstants;
pub use error::LfError;
pub use numeric::*;
pub use units::*;
