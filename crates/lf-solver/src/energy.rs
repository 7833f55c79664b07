//! Leaf energy-balance step.
//!
//! Given a leaf temperature and stomatal conductance, asks the energy-balance
//! model for radiation, conductances and latent heat, then re-derives leaf
//! temperature from the sensible heat left over. Convergence is not decided
//! here; see [`crate::coupled`].

use crate::error::{SolverError, SolverResult};
use lf_core::PhysicalConstants;
use lf_core::numeric::is_near_zero;
use lf_models::{AirState, EnergyBalanceModel, LatentFlux};

/// Result of one energy-balance evaluation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnergyStep {
    /// Candidate leaf temperature (degC)
    pub tleaf: f64,
    /// Transpiration (mol H2O m-2 s-1)
    pub et: f64,
    /// Latent heat flux (W m-2)
    pub le_et: f64,
    /// One-sided boundary-layer conductance to heat (mol m-2 s-1)
    pub gbh: f64,
    /// Total leaf conductance to water vapour (mol m-2 s-1)
    pub gw: f64,
}

/// Recompute leaf temperature from the leaf energy balance.
///
/// # Arguments
/// * `model` - Energy-balance collaborator
/// * `constants` - Physical constants
/// * `zero_tol` - Magnitude treated as zero for conductances
/// * `tleaf` - Current leaf temperature (degC)
/// * `air` - Air-side conditions
/// * `gsc` - Stomatal conductance to CO2 (mol m-2 s-1)
/// * `rnet` - Net radiation (W m-2); taken from `model` when `None`
pub fn leaf_temperature_step(
    model: &dyn EnergyBalanceModel,
    constants: &PhysicalConstants,
    zero_tol: f64,
    tleaf: f64,
    air: &AirState,
    gsc: f64,
    rnet: Option<f64>,
) -> SolverResult<EnergyStep> {
    let c = constants;
    let tleaf_k = tleaf + c.deg_to_kelvin;

    let air_density = air.pressure / (c.r_dry_air * air.tair_k);
    // m s-1 to mol m-2 s-1
    let cmolar = air.pressure / (c.r_gas * air.tair_k);

    let rnet = match rnet {
        Some(r) => r,
        None => model.net_radiation(air, tleaf_k)?,
    };

    let g = model.conductances(air, tleaf, gsc, cmolar)?;

    let flux = if is_near_zero(gsc, zero_tol) {
        LatentFlux::ZERO
    } else {
        model.latent_heat(air, tleaf, &g, rnet)?
    };

    // Leuning (1995) D6 with both conductances doubled for a two-sided leaf.
    // Units of grn and gbh cancel in the ratio.
    let y = if is_near_zero(g.gbh, zero_tol) {
        0.0
    } else {
        1.0 / (1.0 + (2.0 * g.grn) / (2.0 * g.gbh))
    };

    // Sensible heat exchanged with the surroundings
    let h = y * (rnet - flux.le_et);

    // gh carries grn and the two-sided doubling
    let capacity = c.cp_air * air_density * (g.gh / cmolar);
    let new_tleaf = if is_near_zero(capacity, zero_tol) {
        air.tair
    } else {
        air.tair + h / capacity
    };

    if !new_tleaf.is_finite() {
        return Err(SolverError::Numeric {
            what: format!(
                "leaf temperature not finite (rnet = {rnet}, gh = {}, gbh = {})",
                g.gh, g.gbh
            ),
        });
    }

    Ok(EnergyStep {
        tleaf: new_tleaf,
        et: flux.et,
        le_et: flux.le_et,
        gbh: g.gbh,
        gw: g.gw,
    })
}
