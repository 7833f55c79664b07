//! Leaf energy balance after Leuning et al. (1995), Penman-Monteith form.

use crate::common::{check_finite, saturation_vapour_pressure};
use crate::error::{ModelError, ModelResult};
use crate::traits::{AirState, EnergyBalanceModel, LatentFlux, LeafConductances};
use lf_core::PhysicalConstants;
use lf_core::numeric::{ZERO_TOL, is_near_zero};
use lf_core::units::{Length, as_m};

/// Leaf thermal emissivity
const LEAF_EMISSIVITY: f64 = 0.99;

/// Forced-convection coefficient for a flat plate (m s-0.5)
const FORCED_CONVECTION_COEF: f64 = 0.003;

/// Grashof number prefactor (m-3 K-1)
const GRASHOF_COEF: f64 = 1.6e8;

/// Temperature dependence of the latent heat of vaporisation (J kg-1 K-1)
const LV_SLOPE: f64 = 2.365e3;

/// Step used to take the slope of the saturation curve (K)
const ESAT_STEP: f64 = 0.1;

/// Penman-Monteith leaf energy-balance model.
#[derive(Debug, Clone)]
pub struct PenmanMonteith {
    /// Characteristic leaf width (m)
    leaf_width: f64,
    /// Shortwave absorptance [0, 1]
    sw_abs: f64,
    constants: PhysicalConstants,
}

impl PenmanMonteith {
    /// Create a new model for a leaf of the given width and absorptance.
    pub fn new(leaf_width: Length, sw_abs: f64, constants: PhysicalConstants) -> Self {
        Self {
            leaf_width: as_m(leaf_width),
            sw_abs,
            constants,
        }
    }

    /// Radiative conductance (mol m-2 s-1), Leuning (1995) eq. A3.
    pub fn radiative_conductance(&self, tair_k: f64) -> f64 {
        let c = &self.constants;
        4.0 * c.sigma * tair_k.powi(3) * LEAF_EMISSIVITY / c.cp_molar()
    }

    /// One-sided boundary-layer conductance to heat from forced convection.
    pub fn forced_convection(&self, wind: f64, cmolar: f64) -> f64 {
        FORCED_CONVECTION_COEF * (wind.max(0.0) / self.leaf_width).sqrt() * cmolar
    }

    /// One-sided boundary-layer conductance to heat from free convection.
    pub fn free_convection(&self, tleaf: f64, tair: f64, cmolar: f64) -> f64 {
        let w = self.leaf_width;
        let grashof = GRASHOF_COEF * (tleaf - tair).abs() * w.powi(3);
        0.5 * self.constants.heat_diffusivity * grashof.powf(0.25) / w * cmolar
    }

    /// Latent heat of vaporisation at air temperature (J mol-1).
    fn latent_heat_of_vaporisation(&self, tair: f64) -> f64 {
        (self.constants.h2o_lv0 - LV_SLOPE * tair) * self.constants.h2o_molar_mass
    }
}

impl EnergyBalanceModel for PenmanMonteith {
    fn name(&self) -> &str {
        "penman-monteith"
    }

    /// Absorbed shortwave plus isothermal net longwave.
    ///
    /// Longwave is evaluated at air temperature with the leaf as a black
    /// body; the departure of the leaf from air temperature is carried by the
    /// radiative conductance instead.
    fn net_radiation(&self, air: &AirState, _tleaf_k: f64) -> ModelResult<f64> {
        let c = &self.constants;

        let par_wm2 = air.par.max(0.0) / c.umol_per_joule;
        let shortwave = par_wm2 / c.par_fraction;
        let absorbed = self.sw_abs * shortwave;

        // Brutsaert (1975) clear-sky emissivity from air vapour pressure
        let ea = (saturation_vapour_pressure(air.tair) - air.vpd * c.kpa_to_pa()).max(0.0);
        let emissivity_atm = 0.642 * (ea / air.tair_k).powf(1.0 / 7.0);
        let net_longwave = c.sigma * air.tair_k.powi(4) * (emissivity_atm - 1.0);

        let rnet = absorbed + net_longwave;
        check_finite(rnet, "net radiation")?;
        Ok(rnet)
    }

    fn conductances(
        &self,
        air: &AirState,
        tleaf: f64,
        gsc: f64,
        cmolar: f64,
    ) -> ModelResult<LeafConductances> {
        if gsc < 0.0 {
            return Err(ModelError::InvalidArg {
                what: "stomatal conductance must be >= 0",
            });
        }
        let c = &self.constants;

        let grn = self.radiative_conductance(air.tair_k);
        let gbh = self.forced_convection(air.wind, cmolar)
            + self.free_convection(tleaf, air.tair, cmolar);

        // Stomata on one side only: boundary layer to vapour is the two-sided sum
        let gbv = 2.0 * gbh * c.gbh_to_gbw;
        let gsv = gsc * c.gsc_to_gsw;

        let gh = 2.0 * (gbh + grn);
        let gw = if is_near_zero(gbv + gsv, ZERO_TOL) {
            0.0
        } else {
            gbv * gsv / (gbv + gsv)
        };

        check_finite(gh, "heat conductance")?;
        check_finite(gw, "water vapour conductance")?;

        Ok(LeafConductances { grn, gh, gbh, gw })
    }

    fn latent_heat(
        &self,
        air: &AirState,
        _tleaf: f64,
        conductances: &LeafConductances,
        rnet: f64,
    ) -> ModelResult<LatentFlux> {
        let LeafConductances { gh, gw, .. } = *conductances;
        if is_near_zero(gw, ZERO_TOL) {
            return Ok(LatentFlux::ZERO);
        }
        let c = &self.constants;

        let lambda = self.latent_heat_of_vaporisation(air.tair);
        let slope = (saturation_vapour_pressure(air.tair + ESAT_STEP)
            - saturation_vapour_pressure(air.tair))
            / ESAT_STEP;
        let gamma = c.cp_molar() * air.pressure / lambda;

        let vpd_pa = air.vpd * c.kpa_to_pa();
        let le_et = (slope * rnet + vpd_pa * gh * c.cp_molar()) / (slope + gamma * gh / gw);
        let et = le_et / lambda;

        check_finite(le_et, "latent heat flux")?;
        Ok(LatentFlux { et, le_et })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lf_core::units::m;

    fn air() -> AirState {
        AirState {
            tair: 25.0,
            tair_k: 298.15,
            vpd: 1.5,
            pressure: 101_325.0,
            wind: 2.5,
            par: 1500.0,
        }
    }

    fn cmolar(air: &AirState) -> f64 {
        air.pressure / (PhysicalConstants::default().r_gas * air.tair_k)
    }

    fn model() -> PenmanMonteith {
        PenmanMonteith::new(m(0.02), 0.5, PhysicalConstants::default())
    }

    #[test]
    fn net_radiation_is_positive_in_sunlight() {
        let rnet = model().net_radiation(&air(), 298.15).unwrap();
        assert!(rnet > 100.0 && rnet < 500.0, "rnet = {rnet}");
    }

    #[test]
    fn net_radiation_is_negative_at_night() {
        let night = AirState { par: 0.0, ..air() };
        let rnet = model().net_radiation(&night, 298.15).unwrap();
        assert!(rnet < 0.0);
    }

    #[test]
    fn night_longwave_treats_leaf_as_black_body() {
        let c = PhysicalConstants::default();
        let night = AirState { par: 0.0, ..air() };
        let ea = saturation_vapour_pressure(25.0) - 1500.0;
        let emissivity_atm = 0.642 * (ea / 298.15).powf(1.0 / 7.0);
        let expected = c.sigma * 298.15_f64.powi(4) * (emissivity_atm - 1.0);
        let rnet = model().net_radiation(&night, 298.15).unwrap();
        assert!((rnet - expected).abs() < 1e-9, "{rnet} vs {expected}");
    }

    #[test]
    fn closed_stomata_block_vapour() {
        let a = air();
        let g = model().conductances(&a, 25.0, 0.0, cmolar(&a)).unwrap();
        assert_eq!(g.gw, 0.0);
        assert!(g.gbh > 0.0);
        assert!((g.gh - 2.0 * (g.gbh + g.grn)).abs() < 1e-12);
    }

    #[test]
    fn free_convection_vanishes_without_temperature_difference() {
        assert_eq!(model().free_convection(25.0, 25.0, 40.0), 0.0);
        assert!(model().free_convection(27.0, 25.0, 40.0) > 0.0);
    }

    #[test]
    fn calm_air_leaves_only_free_convection() {
        let calm = AirState { wind: 0.0, ..air() };
        let g = model().conductances(&calm, 25.0, 0.2, cmolar(&calm)).unwrap();
        assert_eq!(g.gbh, 0.0);
        assert_eq!(g.gw, 0.0);
    }

    #[test]
    fn water_conductance_is_series_sum() {
        let a = air();
        let g = model().conductances(&a, 25.0, 0.2, cmolar(&a)).unwrap();
        let gsv = 0.2 * 1.57;
        assert!(g.gw < gsv);
        assert!(g.gw > 0.0);
    }

    #[test]
    fn transpiration_rises_with_vpd() {
        let m = model();
        let a = air();
        let g = m.conductances(&a, 25.0, 0.2, cmolar(&a)).unwrap();
        let moist = m
            .latent_heat(&AirState { vpd: 0.5, ..a }, 25.0, &g, 300.0)
            .unwrap();
        let dry = m
            .latent_heat(&AirState { vpd: 3.0, ..a }, 25.0, &g, 300.0)
            .unwrap();
        assert!(dry.et > moist.et);
        assert!(dry.le_et > 0.0);
    }

    #[test]
    fn negative_conductance_is_rejected() {
        let a = air();
        assert!(model().conductances(&a, 25.0, -0.1, cmolar(&a)).is_err());
    }
}
