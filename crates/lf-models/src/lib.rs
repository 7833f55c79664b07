//! lf-models: leaf sub-models consumed by the coupled solver.
//!
//! Provides the collaborator interfaces and reference implementations:
//! - `DemandModel`: biochemical photosynthesis and stomatal conductance
//!   (`FarquharC3`)
//! - `EnergyBalanceModel`: net radiation, leaf conductances and latent heat
//!   (`PenmanMonteith`)
//! - `SolarGeometry`: cosine of the solar zenith angle (`SpencerSolarGeometry`)
//!
//! All models are deterministic functions of their inputs and carry no
//! mutable state, so a single instance can be shared across threads.
//!
//! # Example
//!
//! ```no_run
//! use lf_core::PhysicalConstants;
//! use lf_models::{DemandInputs, DemandModel, FarquharC3, LeafParams};
//!
//! let model = FarquharC3::new(PhysicalConstants::default());
//! let params = LeafParams::default();
//! let out = model
//!     .assimilation(
//!         DemandInputs {
//!             cs: 400.0,
//!             tleaf_k: 298.15,
//!             par: 1500.0,
//!             vpd: 1.5,
//!         },
//!         &params,
//!     )
//!     .unwrap();
//! println!("An = {} umol m-2 s-1", out.an);
//! ```

pub mod common;
pub mod error;
pub mod farquhar;
pub mod params;
pub mod penman_monteith;
pub mod solar;
pub mod traits;

// Re-exports
pub use error::{ModelError, ModelResult};
pub use farquhar::FarquharC3;
pub use params::{GsModel, LeafParams};
pub use penman_monteith::PenmanMonteith;
pub use solar::SpencerSolarGeometry;
pub use traits::{
    AirState, Assimilation, DemandInputs, DemandModel, EnergyBalanceModel, LatentFlux,
    LeafConductances, SolarGeometry,
};
