//! Fixed-point coupling of leaf photosynthesis, stomata and energy balance.

use crate::config::SolverConfig;
use crate::energy::{EnergyStep, leaf_temperature_step};
use crate::error::{SolverError, SolverResult};
use crate::forcing::Forcing;
use lf_core::PhysicalConstants;
use lf_core::numeric::is_near_zero;
use lf_models::{DemandInputs, DemandModel, EnergyBalanceModel, LeafParams, SolarGeometry};
use tracing::{debug, trace, warn};

/// Canopy-scaled fluxes for one timestep.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CanopyFluxes {
    /// Net assimilation (umol m-2 s-1)
    pub an: f64,
    /// Stomatal conductance to water vapour (mol m-2 s-1)
    pub gsw: f64,
    /// Transpiration (mol H2O m-2 s-1)
    pub et: f64,
}

impl CanopyFluxes {
    pub const ZERO: CanopyFluxes = CanopyFluxes {
        an: 0.0,
        gsw: 0.0,
        et: 0.0,
    };
}

/// Canopy fluxes together with the converged per-leaf state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LeafSolution {
    pub canopy: CanopyFluxes,
    /// False when the darkness gate short-circuited the solve
    pub sun_up: bool,
    /// Solar elevation (degrees)
    pub solar_elevation: f64,
    /// Leaf temperature from the final energy-balance step (degC)
    pub leaf_temperature: f64,
    /// Per-leaf net assimilation (umol m-2 s-1)
    pub an: f64,
    /// Per-leaf stomatal conductance to CO2 (mol m-2 s-1)
    pub gsc: f64,
    /// Intercellular CO2 (umol mol-1)
    pub ci: f64,
    /// Per-leaf transpiration (mol H2O m-2 s-1)
    pub et: f64,
    /// Per-leaf latent heat flux (W m-2)
    pub le_et: f64,
    /// CO2 at the leaf surface (umol mol-1)
    pub surface_co2: f64,
    /// Vapour pressure deficit at the leaf surface (kPa)
    pub surface_vpd: f64,
    /// Coupling iterations taken
    pub iterations: usize,
    /// Leaf temperature change over the final iteration (degC)
    pub last_delta: f64,
}

/// Coupled leaf-state solver.
///
/// Holds the leaf parameters, physical constants and references to the three
/// collaborators. None of it changes after construction; all iteration state
/// lives on the stack of a single call.
pub struct CoupledSolver<'a> {
    params: LeafParams,
    demand: &'a dyn DemandModel,
    energy: &'a dyn EnergyBalanceModel,
    solar: &'a dyn SolarGeometry,
    constants: PhysicalConstants,
    config: SolverConfig,
}

impl<'a> CoupledSolver<'a> {
    /// Create a solver. The iteration cap is taken from `params.iter_max`.
    pub fn new(
        params: LeafParams,
        demand: &'a dyn DemandModel,
        energy: &'a dyn EnergyBalanceModel,
        solar: &'a dyn SolarGeometry,
        constants: PhysicalConstants,
    ) -> SolverResult<Self> {
        params.validate()?;
        let config = SolverConfig {
            max_iterations: params.iter_max,
            ..SolverConfig::default()
        };
        Ok(Self {
            params,
            demand,
            energy,
            solar,
            constants,
            config,
        })
    }

    /// Replace the solver configuration.
    pub fn with_config(mut self, config: SolverConfig) -> SolverResult<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    pub fn params(&self) -> &LeafParams {
        &self.params
    }

    pub fn constants(&self) -> &PhysicalConstants {
        &self.constants
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solve one timestep and return canopy-scaled fluxes.
    pub fn solve(&self, forcing: &Forcing) -> SolverResult<CanopyFluxes> {
        self.solve_detailed(forcing).map(|s| s.canopy)
    }

    /// Solar elevation (degrees) from the solar-geometry collaborator.
    pub fn solar_elevation(&self, forcing: &Forcing) -> SolverResult<f64> {
        let cos_zenith = self.solar.cos_zenith(
            forcing.doy,
            forcing.hod,
            forcing.latitude,
            forcing.longitude,
        );
        if !cos_zenith.is_finite() {
            return Err(SolverError::Numeric {
                what: format!("cos zenith not finite: {cos_zenith}"),
            });
        }
        let zenith = cos_zenith.clamp(-1.0, 1.0).acos().to_degrees();
        Ok(90.0 - zenith)
    }

    /// One energy-balance step for the given leaf temperature (degC) and
    /// stomatal conductance to CO2.
    pub fn leaf_temperature_step(
        &self,
        tleaf: f64,
        forcing: &Forcing,
        gsc: f64,
    ) -> SolverResult<EnergyStep> {
        let air = forcing.air_state(&self.constants);
        leaf_temperature_step(
            self.energy,
            &self.constants,
            self.config.zero_tol,
            tleaf,
            &air,
            gsc,
            forcing.net_radiation,
        )
    }

    /// Solve one timestep and return the full converged leaf state.
    pub fn solve_detailed(&self, forcing: &Forcing) -> SolverResult<LeafSolution> {
        forcing.validate()?;

        let c = &self.constants;
        let cfg = &self.config;
        let air = forcing.air_state(c);
        let elevation = self.solar_elevation(forcing)?;

        // Stomata are taken as closed in the dark
        if elevation <= 0.0 || forcing.par <= cfg.par_threshold {
            trace!(elevation, par = forcing.par, "sun down, skipping leaf solve");
            return Ok(LeafSolution {
                canopy: CanopyFluxes::ZERO,
                sun_up: false,
                solar_elevation: elevation,
                leaf_temperature: air.tair,
                an: 0.0,
                gsc: 0.0,
                ci: forcing.co2,
                et: 0.0,
                le_et: 0.0,
                surface_co2: forcing.co2,
                surface_vpd: air.vpd,
                iterations: 0,
                last_delta: 0.0,
            });
        }

        let ca = forcing.co2;
        let mut cs = ca;
        let mut dleaf = air.vpd;
        let mut tleaf = air.tair;
        let mut last_delta = f64::INFINITY;

        for iteration in 1..=cfg.max_iterations {
            let demand = self.demand.assimilation(
                DemandInputs {
                    cs,
                    tleaf_k: tleaf + c.deg_to_kelvin,
                    par: forcing.par,
                    vpd: dleaf,
                },
                &self.params,
            )?;

            let step = leaf_temperature_step(
                self.energy,
                c,
                cfg.zero_tol,
                tleaf,
                &air,
                demand.gsc,
                forcing.net_radiation,
            )?;

            // Surface CO2 drawn down across the boundary layer
            let gbc = step.gbh * c.gbh_to_gbc;
            cs = if gbc > cfg.zero_tol && demand.an > 0.0 {
                ca - demand.an / gbc
            } else {
                ca
            };

            // Surface humidity from the transpiration stream
            dleaf = if is_near_zero(step.et, cfg.zero_tol) || is_near_zero(step.gw, cfg.zero_tol)
            {
                air.vpd
            } else {
                step.et * air.pressure / step.gw * c.pa_to_kpa
            };

            last_delta = (tleaf - step.tleaf).abs();
            debug!(
                iteration,
                tleaf,
                new_tleaf = step.tleaf,
                delta = last_delta,
                an = demand.an,
                gsc = demand.gsc,
                "leaf coupling iteration"
            );

            if last_delta < cfg.temperature_tol {
                let canopy = CanopyFluxes {
                    an: demand.an * forcing.lai,
                    gsw: demand.gsc * c.gsc_to_gsw * forcing.lai,
                    et: step.et * forcing.lai,
                };
                return Ok(LeafSolution {
                    canopy,
                    sun_up: true,
                    solar_elevation: elevation,
                    leaf_temperature: step.tleaf,
                    an: demand.an,
                    gsc: demand.gsc,
                    ci: demand.ci,
                    et: step.et,
                    le_et: step.le_et,
                    surface_co2: cs,
                    surface_vpd: dleaf,
                    iterations: iteration,
                    last_delta,
                });
            }

            tleaf = step.tleaf;
        }

        warn!(
            iterations = cfg.max_iterations,
            last_delta, "leaf temperature did not converge"
        );
        Err(SolverError::NonConvergence {
            iterations: cfg.max_iterations,
            last_delta,
        })
    }
}
