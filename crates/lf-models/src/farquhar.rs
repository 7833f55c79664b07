//! Farquhar C3 photosynthesis coupled to a stomatal conductance closure.
//!
//! Rubisco-limited and RuBP-regeneration-limited rates are each solved
//! together with the stomatal closure, so that the returned intercellular CO2
//! is consistent with the conductance that delivers it. The coupled form
//! follows Wang & Leuning (1998) and Medlyn et al. (2011).

use crate::common::{Root, arrhenius, check_finite, peaked_arrhenius, quadratic};
use crate::error::{ModelError, ModelResult};
use crate::params::{GsModel, LeafParams};
use crate::traits::{Assimilation, DemandInputs, DemandModel};
use lf_core::PhysicalConstants;

/// Michaelis constant for CO2 at 25 degC (umol mol-1)
const KC25: f64 = 404.9;
/// Michaelis constant for O2 at 25 degC (mmol mol-1)
const KO25: f64 = 278.4;
/// Intercellular O2 (mmol mol-1)
const OI: f64 = 210.0;
/// CO2 compensation point without day respiration at 25 degC (umol mol-1)
const GAMSTAR25: f64 = 42.75;
/// Activation energies (J mol-1)
const EC: f64 = 79_430.0;
const EO: f64 = 36_380.0;
const EAG: f64 = 37_830.0;

/// Quantum yield of electron transport (mol mol-1)
const QUANTUM_YIELD: f64 = 0.3;
/// Leaf absorptance of PAR
const PAR_ABSORPTANCE: f64 = 0.85;

/// Floor on VPD for the Medlyn closure (kPa)
const MIN_VPD_KPA: f64 = 0.05;

/// Below this margin over Rd the RuBP-limited rate is evaluated at Cs.
const MIN_AJ_MARGIN: f64 = 1e-6;

/// Farquhar C3 demand model.
#[derive(Debug, Clone)]
pub struct FarquharC3 {
    /// Curvature of the light response of electron transport
    pub theta_j: f64,
    /// Apply high-temperature deactivation to Jmax
    pub peaked_jmax: bool,
    /// Apply high-temperature deactivation to Vcmax
    pub peaked_vcmax: bool,
    constants: PhysicalConstants,
}

impl FarquharC3 {
    /// Create a model with peaked temperature responses and theta_J = 0.85.
    pub fn new(constants: PhysicalConstants) -> Self {
        Self {
            theta_j: 0.85,
            peaked_jmax: true,
            peaked_vcmax: true,
            constants,
        }
    }

    /// Effective Michaelis-Menten coefficient, Kc (1 + O / Ko).
    fn michaelis_menten(&self, tk: f64) -> f64 {
        let r = self.constants.r_gas;
        let kc = arrhenius(KC25, EC, tk, r);
        let ko = arrhenius(KO25, EO, tk, r);
        kc * (1.0 + OI / ko)
    }

    fn vcmax(&self, params: &LeafParams, tk: f64) -> f64 {
        let r = self.constants.r_gas;
        if self.peaked_vcmax {
            peaked_arrhenius(params.vcmax25, params.eav, tk, params.delta_sv, params.hdv, r)
        } else {
            arrhenius(params.vcmax25, params.eav, tk, r)
        }
    }

    fn jmax(&self, params: &LeafParams, tk: f64) -> f64 {
        let r = self.constants.r_gas;
        if self.peaked_jmax {
            peaked_arrhenius(params.jmax25, params.eaj, tk, params.delta_sj, params.hdj, r)
        } else {
            arrhenius(params.jmax25, params.eaj, tk, r)
        }
    }

    /// Day respiration with a Q10 temperature response.
    fn respiration(&self, params: &LeafParams, tk: f64) -> f64 {
        let tc = tk - self.constants.deg_to_kelvin;
        params.rd25 * params.q10.powf((tc - 25.0) / 10.0)
    }

    /// Potential electron transport rate from the non-rectangular hyperbola.
    fn electron_transport(&self, params: &LeafParams, par: f64, jmax: f64) -> ModelResult<f64> {
        let alpha = params.alpha.unwrap_or(QUANTUM_YIELD * PAR_ABSORPTANCE);
        let absorbed = alpha * par;
        quadratic(self.theta_j, -(absorbed + jmax), absorbed * jmax, Root::Small)
    }

    /// Residual conductance and the gs/A slope, both on the CO2 basis.
    fn stomatal_slope(&self, params: &LeafParams, cs: f64, vpd: f64) -> ModelResult<(f64, f64)> {
        let to_co2 = self.constants.gsw_to_gsc();
        let g0 = params.g0 * to_co2;
        let gs_over_a = match params.gs_model {
            GsModel::Medlyn => {
                // 1.6 in the water-vapour form cancels on the CO2 basis
                let vpd = vpd.max(MIN_VPD_KPA);
                (1.0 + params.g1 / vpd.sqrt()) / cs
            }
            GsModel::Leuning => {
                params.g1 / (cs - params.gamma) / (1.0 + vpd / params.d0) * to_co2
            }
        };
        check_finite(gs_over_a, "gs/A slope")?;
        Ok((g0, gs_over_a))
    }
}

impl DemandModel for FarquharC3 {
    fn name(&self) -> &str {
        "farquhar-c3"
    }

    fn assimilation(
        &self,
        inputs: DemandInputs,
        params: &LeafParams,
    ) -> ModelResult<Assimilation> {
        let DemandInputs {
            cs,
            tleaf_k: tk,
            par,
            vpd,
        } = inputs;

        if !(tk > 0.0) {
            return Err(ModelError::InvalidArg {
                what: "leaf temperature must be > 0 K",
            });
        }
        check_finite(cs, "surface CO2")?;

        let rd = self.respiration(params, tk);

        // A thin boundary layer can draw surface CO2 down past what the
        // closure accepts; the leaf then only respires through shut stomata.
        let starved = match params.gs_model {
            GsModel::Medlyn => cs <= 0.0,
            GsModel::Leuning => cs <= params.gamma,
        };
        if starved {
            return Ok(Assimilation {
                an: -rd,
                gsc: params.g0 * self.constants.gsw_to_gsc(),
                ci: cs.max(0.0),
            });
        }

        let km = self.michaelis_menten(tk);
        let gamma_star = arrhenius(GAMSTAR25, EAG, tk, self.constants.r_gas);
        let vcmax = self.vcmax(params, tk);
        let jmax = self.jmax(params, tk);

        let j = self.electron_transport(params, par.max(0.0), jmax)?;
        let vj = j / 4.0;

        let (g0, gs_over_a) = self.stomatal_slope(params, cs, vpd)?;
        let open = 1.0 - cs * gs_over_a;

        // Rubisco-limited, solved jointly with the closure for Ci
        let a = g0 + gs_over_a * (vcmax - rd);
        let b = open * (vcmax - rd) + g0 * (km - cs) - gs_over_a * (vcmax * gamma_star + km * rd);
        let c = -open * (vcmax * gamma_star + km * rd) - g0 * km * cs;
        let cic = quadratic(a, b, c, Root::Large)?;
        let ac = if cic <= 0.0 || cic > cs {
            0.0
        } else {
            vcmax * (cic - gamma_star) / (cic + km)
        };

        // RuBP-regeneration-limited
        let a = g0 + gs_over_a * (vj - rd);
        let b = open * (vj - rd) + g0 * (2.0 * gamma_star - cs)
            - gs_over_a * (vj * gamma_star + 2.0 * gamma_star * rd);
        let c = -open * gamma_star * (vj + 2.0 * rd) - g0 * 2.0 * gamma_star * cs;
        let mut cij = quadratic(a, b, c, Root::Large)?;
        let mut aj = vj * (cij - gamma_star) / (cij + 2.0 * gamma_star);
        if aj - rd < MIN_AJ_MARGIN {
            cij = cs;
            aj = vj * (cij - gamma_star) / (cij + 2.0 * gamma_star);
        }

        let an = ac.min(aj) - rd;
        let ci = if ac < aj { cic } else { cij };
        let gsc = g0.max(g0 + gs_over_a * an);

        check_finite(an, "net assimilation")?;
        check_finite(gsc, "stomatal conductance")?;
        check_finite(ci, "intercellular CO2")?;

        Ok(Assimilation { an, gsc, ci })
    }
}
