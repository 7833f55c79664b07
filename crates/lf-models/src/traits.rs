//! Collaborator interfaces used by the coupled leaf solver.

use crate::error::ModelResult;
use crate::params::LeafParams;

/// Inputs to the biochemical demand model for one evaluation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DemandInputs {
    /// CO2 concentration at the leaf surface (umol mol-1)
    pub cs: f64,
    /// Leaf temperature (K)
    pub tleaf_k: f64,
    /// Incident PAR (umol m-2 s-1)
    pub par: f64,
    /// Vapour pressure deficit at the leaf surface (kPa)
    pub vpd: f64,
}

/// Output of the demand model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Assimilation {
    /// Net assimilation (umol m-2 s-1)
    pub an: f64,
    /// Stomatal conductance to CO2 (mol m-2 s-1)
    pub gsc: f64,
    /// Intercellular CO2 (umol mol-1)
    pub ci: f64,
}

/// Trait for biochemical photosynthesis models that also close stomatal
/// conductance.
///
/// Implementations are deterministic functions of their inputs and parameters.
pub trait DemandModel: Send + Sync {
    /// Model name for debugging and identification.
    fn name(&self) -> &str;

    /// Compute net assimilation, stomatal conductance to CO2 and intercellular
    /// CO2 for the given surface conditions.
    fn assimilation(&self, inputs: DemandInputs, params: &LeafParams)
    -> ModelResult<Assimilation>;
}

/// Air-side conditions seen by the energy-balance model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AirState {
    /// Air temperature (degC)
    pub tair: f64,
    /// Air temperature (K)
    pub tair_k: f64,
    /// Air vapour pressure deficit (kPa)
    pub vpd: f64,
    /// Air pressure (Pa)
    pub pressure: f64,
    /// Wind speed (m s-1)
    pub wind: f64,
    /// Incident PAR (umol m-2 s-1)
    pub par: f64,
}

/// Leaf conductances, all in mol m-2 s-1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LeafConductances {
    /// Radiative conductance
    pub grn: f64,
    /// Total two-sided conductance to heat (boundary layer + radiative)
    pub gh: f64,
    /// One-sided boundary-layer conductance to heat
    pub gbh: f64,
    /// Total leaf conductance to water vapour (stomata + boundary layer)
    pub gw: f64,
}

/// Evaporative flux from the leaf.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LatentFlux {
    /// Transpiration (mol H2O m-2 s-1)
    pub et: f64,
    /// Latent heat flux (W m-2)
    pub le_et: f64,
}

impl LatentFlux {
    pub const ZERO: LatentFlux = LatentFlux { et: 0.0, le_et: 0.0 };
}

/// Trait for leaf energy-balance models.
///
/// The coupled solver owns the temperature update; implementations only supply
/// radiation, conductances and the latent heat flux.
pub trait EnergyBalanceModel: Send + Sync {
    /// Model name for debugging and identification.
    fn name(&self) -> &str;

    /// Net radiation absorbed by the leaf (W m-2).
    fn net_radiation(&self, air: &AirState, tleaf_k: f64) -> ModelResult<f64>;

    /// Radiative, heat, boundary-layer and water-vapour conductances.
    ///
    /// # Arguments
    /// * `air` - Air-side conditions
    /// * `tleaf` - Leaf temperature (degC)
    /// * `gsc` - Stomatal conductance to CO2 (mol m-2 s-1)
    /// * `cmolar` - Conversion from m s-1 to mol m-2 s-1
    fn conductances(
        &self,
        air: &AirState,
        tleaf: f64,
        gsc: f64,
        cmolar: f64,
    ) -> ModelResult<LeafConductances>;

    /// Transpiration and latent heat flux for the given conductances and net
    /// radiation.
    fn latent_heat(
        &self,
        air: &AirState,
        tleaf: f64,
        conductances: &LeafConductances,
        rnet: f64,
    ) -> ModelResult<LatentFlux>;
}

/// Trait for solar position calculations.
pub trait SolarGeometry: Send + Sync {
    /// Cosine of the solar zenith angle.
    ///
    /// # Arguments
    /// * `doy` - Day of year
    /// * `hod` - Hour of day, decimal local standard time
    /// * `latitude` - Degrees north
    /// * `longitude` - Degrees east
    fn cos_zenith(&self, doy: f64, hod: f64, latitude: f64, longitude: f64) -> f64;
}

impl<F> SolarGeometry for F
where
    F: Fn(f64, f64, f64, f64) -> f64 + Send + Sync,
{
    fn cos_zenith(&self, doy: f64, hod: f64, latitude: f64, longitude: f64) -> f64 {
        self(doy, hod, latitude, longitude)
    }
}
